use std::collections::VecDeque;
use std::fmt;
use std::sync::RwLock;

use chrono::{Duration, Utc};
use tokio::sync::broadcast;
use tracing::debug;

use crate::error::{FeedError, FeedResult};
use crate::notification::{Notification, Severity};

const CHANNEL_CAPACITY: usize = 256;

/// Newest-first feed of operator notifications.
///
/// Unbounded by default; with a capacity the oldest entries are evicted.
pub struct NotificationLog {
    entries: RwLock<VecDeque<Notification>>,
    capacity: Option<usize>,
    sender: broadcast::Sender<Notification>,
}

impl NotificationLog {
    /// A log seeded with the sign-in and backup entries shown on a fresh console.
    pub fn new() -> Self {
        Self::seeded(None)
    }

    /// A seeded log that keeps at most `capacity` entries.
    ///
    /// A zero capacity is raised to one so the latest push stays visible.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::seeded(Some(capacity.max(1)))
    }

    /// A log with no entries.
    pub fn empty() -> Self {
        Self::unseeded(None)
    }

    /// An empty log that keeps at most `capacity` entries (at least one).
    pub fn empty_with_capacity(capacity: usize) -> Self {
        Self::unseeded(Some(capacity.max(1)))
    }

    fn unseeded(capacity: Option<usize>) -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            entries: RwLock::new(VecDeque::new()),
            capacity,
            sender,
        }
    }

    fn seeded(capacity: Option<usize>) -> Self {
        let now = Utc::now();
        let mut backup = Notification::new(
            "Backup",
            "Last automatic backup completed.",
            Severity::Info,
            now - Duration::hours(2),
        );
        backup.read = true;
        let signin = Notification::new(
            "System",
            "Administrator sign-in succeeded.",
            Severity::Success,
            now,
        );

        let log = Self::unseeded(capacity);
        {
            let mut entries = log.entries.write().expect("lock poisoned");
            entries.push_back(signin);
            entries.push_back(backup);
            if let Some(cap) = capacity {
                entries.truncate(cap);
            }
        }
        log
    }

    /// Prepend a new unread notification and return it.
    pub fn push(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
    ) -> Notification {
        let notification = Notification::new(title, message, severity, Utc::now());
        {
            let mut entries = self.entries.write().expect("lock poisoned");
            entries.push_front(notification.clone());
            if let Some(cap) = self.capacity {
                entries.truncate(cap);
            }
        }
        debug!(title = %notification.title, severity = %severity, "notification pushed");
        let _ = self.sender.send(notification.clone());
        notification
    }

    pub fn info(&self, title: impl Into<String>, message: impl Into<String>) -> Notification {
        self.push(title, message, Severity::Info)
    }

    pub fn success(&self, title: impl Into<String>, message: impl Into<String>) -> Notification {
        self.push(title, message, Severity::Success)
    }

    pub fn warning(&self, title: impl Into<String>, message: impl Into<String>) -> Notification {
        self.push(title, message, Severity::Warning)
    }

    pub fn mark_all_read(&self) {
        let mut entries = self.entries.write().expect("lock poisoned");
        for entry in entries.iter_mut() {
            entry.read = true;
        }
    }

    /// Mark a single notification read.
    pub fn mark_read(&self, id: &str) -> FeedResult<()> {
        let mut entries = self.entries.write().expect("lock poisoned");
        let entry = entries
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| FeedError::NotFound(id.to_string()))?;
        entry.read = true;
        Ok(())
    }

    pub fn clear_all(&self) {
        self.entries.write().expect("lock poisoned").clear();
    }

    pub fn unread_count(&self) -> usize {
        self.entries
            .read()
            .expect("lock poisoned")
            .iter()
            .filter(|n| !n.read)
            .count()
    }

    /// All notifications, newest first.
    pub fn list(&self) -> Vec<Notification> {
        self.entries.read().expect("lock poisoned").iter().cloned().collect()
    }

    /// The most recent notification, if any.
    pub fn latest(&self) -> Option<Notification> {
        self.entries.read().expect("lock poisoned").front().cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Receive every notification pushed after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Default for NotificationLog {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NotificationLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationLog")
            .field("entry_count", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_log_has_fixed_pair() {
        let log = NotificationLog::new();
        let entries = log.list();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "System");
        assert_eq!(entries[0].severity, Severity::Success);
        assert!(!entries[0].read);
        assert_eq!(entries[1].title, "Backup");
        assert!(entries[1].read);
        assert_eq!(entries[1].relative_label(Utc::now()), "2h ago");
        assert_eq!(log.unread_count(), 1);
    }

    #[test]
    fn push_prepends_unread() {
        let log = NotificationLog::new();
        let pushed = log.warning("Access denied", "Insufficient permissions.");
        let entries = log.list();
        assert_eq!(entries[0], pushed);
        assert_eq!(entries[0].relative_label(Utc::now()), "just now");
        assert_eq!(log.unread_count(), 2);
    }

    #[test]
    fn mark_all_read_then_clear() {
        let log = NotificationLog::new();
        log.info("a", "b");
        log.mark_all_read();
        assert_eq!(log.unread_count(), 0);
        assert_eq!(log.len(), 3);
        log.clear_all();
        assert!(log.is_empty());
        assert_eq!(log.unread_count(), 0);
    }

    #[test]
    fn mark_read_by_id() {
        let log = NotificationLog::empty();
        let n = log.success("Saved", "ok");
        log.mark_read(&n.id).unwrap();
        assert_eq!(log.unread_count(), 0);
        assert_eq!(log.mark_read("missing"), Err(FeedError::NotFound("missing".into())));
    }

    #[test]
    fn capacity_evicts_oldest() {
        let log = NotificationLog::with_capacity(3);
        log.info("one", "");
        log.info("two", "");
        let titles: Vec<_> = log.list().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["two", "one", "System"]);
    }

    #[test]
    fn empty_log_honours_capacity() {
        let log = NotificationLog::empty_with_capacity(2);
        assert!(log.is_empty());
        for i in 0..5 {
            log.info(format!("n{i}"), "");
        }
        let titles: Vec<_> = log.list().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["n4", "n3"]);
    }

    #[test]
    fn zero_capacity_keeps_latest_push() {
        for log in [NotificationLog::with_capacity(0), NotificationLog::empty_with_capacity(0)] {
            let pushed = log.warning("Security", "Denied.");
            assert_eq!(log.list(), vec![pushed]);
        }
    }

    #[tokio::test]
    async fn subscribers_receive_pushes() {
        let log = NotificationLog::empty();
        let mut rx = log.subscribe();
        log.success("Saved", "Item created.");
        let received = rx.recv().await.unwrap();
        assert_eq!(received.title, "Saved");
        assert_eq!(received.severity, Severity::Success);
    }
}
