use std::fmt;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use folio_feed::NotificationLog;
use folio_store::{keys, BlobStore};

use crate::config::CredentialTable;
use crate::error::{GateError, LoginError};
use crate::role::{permissions_for, Permissions, Role};

/// The operator's standing with the console.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum Session {
    #[default]
    Unauthenticated,
    Authenticated { role: Role },
}

impl Session {
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Authenticated { role } => Some(*role),
            Self::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Permissions of this session; unauthenticated sessions have none.
    pub fn permissions(&self) -> Permissions {
        self.role().map(permissions_for).unwrap_or(Permissions::NONE)
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => f.write_str("unauthenticated"),
            Self::Authenticated { role } => write!(f, "authenticated as {role}"),
        }
    }
}

/// Resolves access keys into sessions and keeps the session persisted
/// under [`keys::ADMIN_AUTH`] and [`keys::ADMIN_ROLE`].
pub struct SessionResolver {
    blobs: Arc<dyn BlobStore>,
    credentials: CredentialTable,
    feed: Arc<NotificationLog>,
    current: RwLock<Session>,
    changes: broadcast::Sender<Session>,
}

impl SessionResolver {
    /// A resolver starting unauthenticated. Call [`Self::restore`] to pick up
    /// a persisted session.
    pub fn new(
        blobs: Arc<dyn BlobStore>,
        credentials: CredentialTable,
        feed: Arc<NotificationLog>,
    ) -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            blobs,
            credentials,
            feed,
            current: RwLock::new(Session::Unauthenticated),
            changes,
        }
    }

    pub fn current(&self) -> Session {
        *self.current.read().expect("lock poisoned")
    }

    pub fn permissions(&self) -> Permissions {
        self.current().permissions()
    }

    /// Exchange an access key for a session.
    ///
    /// An unknown key leaves the current session unchanged.
    pub fn login(&self, credential: &str) -> Result<Session, LoginError> {
        let Some(role) = self.credentials.lookup(credential) else {
            warn!("login rejected: unknown access key");
            return Err(LoginError::InvalidCredential);
        };

        self.blobs.put(keys::ADMIN_AUTH, "true")?;
        self.blobs.put(keys::ADMIN_ROLE, role.as_str())?;

        let session = Session::Authenticated { role };
        self.set(session);
        self.feed.success("Security", "Access granted to the console.");
        info!(%role, "operator signed in");
        Ok(session)
    }

    /// Clear the persisted session and return to unauthenticated.
    pub fn logout(&self) -> Result<(), GateError> {
        self.blobs.remove(keys::ADMIN_AUTH)?;
        self.blobs.remove(keys::ADMIN_ROLE)?;
        self.set(Session::Unauthenticated);
        info!("operator signed out");
        Ok(())
    }

    /// Rebuild the session from the persisted keys.
    ///
    /// Anything other than `admin_auth = "true"` with a known role yields
    /// an unauthenticated session.
    pub fn restore(&self) -> Result<Session, GateError> {
        let auth = self.blobs.get(keys::ADMIN_AUTH)?;
        let role = self.blobs.get(keys::ADMIN_ROLE)?;

        let session = match (auth.as_deref(), role) {
            (Some("true"), Some(role)) => match role.parse::<Role>() {
                Ok(role) => Session::Authenticated { role },
                Err(e) => {
                    warn!(error = %e, "persisted role is invalid, session not restored");
                    Session::Unauthenticated
                }
            },
            (None, None) => Session::Unauthenticated,
            _ => {
                warn!("persisted session is inconsistent, session not restored");
                Session::Unauthenticated
            }
        };

        debug!(%session, "session restored");
        self.set(session);
        Ok(session)
    }

    /// Receive the new session on every login, logout and restore.
    pub fn subscribe(&self) -> broadcast::Receiver<Session> {
        self.changes.subscribe()
    }

    fn set(&self, session: Session) {
        *self.current.write().expect("lock poisoned") = session;
        let _ = self.changes.send(session);
    }
}

impl fmt::Debug for SessionResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionResolver")
            .field("session", &self.current())
            .field("credential_count", &self.credentials.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_feed::Severity;
    use folio_store::InMemoryBlobStore;

    fn resolver() -> (Arc<InMemoryBlobStore>, Arc<NotificationLog>, SessionResolver) {
        let blobs = Arc::new(InMemoryBlobStore::new());
        let feed = Arc::new(NotificationLog::empty());
        let resolver = SessionResolver::new(blobs.clone(), CredentialTable::default(), feed.clone());
        (blobs, feed, resolver)
    }

    #[test]
    fn login_persists_and_notifies() {
        let (blobs, feed, resolver) = resolver();
        let session = resolver.login("editor").unwrap();
        assert_eq!(session, Session::Authenticated { role: Role::Editor });
        assert_eq!(blobs.get(keys::ADMIN_AUTH).unwrap().as_deref(), Some("true"));
        assert_eq!(blobs.get(keys::ADMIN_ROLE).unwrap().as_deref(), Some("EDITOR"));

        let latest = feed.latest().unwrap();
        assert_eq!(latest.message, "Access granted to the console.");
        assert_eq!(latest.severity, Severity::Success);
    }

    #[test]
    fn invalid_credential_leaves_state_unchanged() {
        let (blobs, feed, resolver) = resolver();
        resolver.login("viewer").unwrap();
        let before = feed.len();

        let err = resolver.login("wrong").unwrap_err();
        assert!(matches!(err, LoginError::InvalidCredential));
        assert_eq!(err.user_message(), "Invalid access key.");
        assert_eq!(resolver.current(), Session::Authenticated { role: Role::Viewer });
        assert_eq!(blobs.get(keys::ADMIN_ROLE).unwrap().as_deref(), Some("VIEWER"));
        assert_eq!(feed.len(), before);
    }

    #[test]
    fn logout_clears_keys() {
        let (blobs, _, resolver) = resolver();
        resolver.login("admin").unwrap();
        resolver.logout().unwrap();
        assert_eq!(resolver.current(), Session::Unauthenticated);
        assert_eq!(resolver.permissions(), Permissions::NONE);
        assert!(blobs.get(keys::ADMIN_AUTH).unwrap().is_none());
        assert!(blobs.get(keys::ADMIN_ROLE).unwrap().is_none());
    }

    #[test]
    fn restore_round_trip() {
        let (blobs, feed, resolver) = resolver();
        resolver.login("logan").unwrap();

        let fresh = SessionResolver::new(blobs, CredentialTable::default(), feed);
        assert_eq!(fresh.current(), Session::Unauthenticated);
        let restored = fresh.restore().unwrap();
        assert_eq!(restored, Session::Authenticated { role: Role::SuperAdmin });
        assert_eq!(fresh.current(), restored);
    }

    #[test]
    fn restore_rejects_inconsistent_keys() {
        let (blobs, _, resolver) = resolver();
        blobs.put(keys::ADMIN_ROLE, "EDITOR").unwrap();
        assert_eq!(resolver.restore().unwrap(), Session::Unauthenticated);

        blobs.put(keys::ADMIN_AUTH, "true").unwrap();
        blobs.put(keys::ADMIN_ROLE, "OWNER").unwrap();
        assert_eq!(resolver.restore().unwrap(), Session::Unauthenticated);

        blobs.put(keys::ADMIN_AUTH, "false").unwrap();
        blobs.put(keys::ADMIN_ROLE, "EDITOR").unwrap();
        assert_eq!(resolver.restore().unwrap(), Session::Unauthenticated);
    }

    #[tokio::test]
    async fn subscribers_see_role_changes() {
        let (_, _, resolver) = resolver();
        let mut rx = resolver.subscribe();
        resolver.login("admin").unwrap();
        resolver.logout().unwrap();
        assert_eq!(rx.recv().await.unwrap(), Session::Authenticated { role: Role::SuperAdmin });
        assert_eq!(rx.recv().await.unwrap(), Session::Unauthenticated);
    }
}
