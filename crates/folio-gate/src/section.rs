use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use folio_feed::NotificationLog;

use crate::error::GateError;
use crate::role::{Action, Permissions};
use crate::session::SessionResolver;

/// Console sections reachable from the sidebar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Overview,
    Blogs,
    Projects,
    Experience,
    Leads,
    Profile,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Self::Overview,
        Self::Blogs,
        Self::Projects,
        Self::Experience,
        Self::Leads,
        Self::Profile,
    ];

    /// Returns `true` if `permissions` may open this section.
    pub fn is_visible_to(&self, permissions: &Permissions) -> bool {
        match self {
            Self::Leads => permissions.allows(Action::ViewLeads),
            Self::Profile => permissions.allows(Action::UpdateProfile),
            _ => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Blogs => "blogs",
            Self::Projects => "projects",
            Self::Experience => "experience",
            Self::Leads => "leads",
            Self::Profile => "profile",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GateError::Config(format!("unknown section: {s}")))
    }
}

/// Tracks the active console section and keeps it within what the current
/// session may see.
pub struct AdminNavigator {
    sessions: Arc<SessionResolver>,
    feed: Arc<NotificationLog>,
    active: RwLock<Section>,
}

impl AdminNavigator {
    pub fn new(sessions: Arc<SessionResolver>, feed: Arc<NotificationLog>) -> Self {
        Self {
            sessions,
            feed,
            active: RwLock::new(Section::Overview),
        }
    }

    pub fn active(&self) -> Section {
        *self.active.read().expect("lock poisoned")
    }

    /// Switch to `section`, or fall back to the overview with a warning if
    /// the session may not see it. Returns the section actually shown.
    pub fn navigate(&self, section: Section) -> Section {
        let shown = self.guard(section);
        *self.active.write().expect("lock poisoned") = shown;
        shown
    }

    /// Re-check the active section after a role change.
    pub fn recheck(&self) -> Section {
        self.navigate(self.active())
    }

    /// Sections the current session may open, in sidebar order.
    pub fn visible_sections(&self) -> Vec<Section> {
        let permissions = self.sessions.permissions();
        Section::ALL
            .into_iter()
            .filter(|s| s.is_visible_to(&permissions))
            .collect()
    }

    fn guard(&self, requested: Section) -> Section {
        let session = self.sessions.current();
        if requested.is_visible_to(&session.permissions()) {
            debug!(section = %requested, "section opened");
            return requested;
        }
        warn!(section = %requested, %session, "section denied, redirecting to overview");
        self.feed.warning(
            "Security",
            format!("Insufficient permissions to open {requested}."),
        );
        Section::Overview
    }
}

impl fmt::Debug for AdminNavigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminNavigator")
            .field("active", &self.active())
            .finish()
    }
}
