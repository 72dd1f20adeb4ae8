use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a notification is styled in the operator feed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
        };
        f.write_str(s)
    }
}

/// One entry in the operator feed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub severity: Severity,
    pub read: bool,
}

impl Notification {
    /// A fresh unread notification stamped `at`.
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            title: title.into(),
            message: message.into(),
            created_at: at,
            severity,
            read: false,
        }
    }

    /// Age relative to `now`: "just now", "5m ago", "2h ago", "3d ago".
    pub fn relative_label(&self, now: DateTime<Utc>) -> String {
        let age = now.signed_duration_since(self.created_at);
        if age.num_minutes() < 1 {
            "just now".to_string()
        } else if age.num_hours() < 1 {
            format!("{}m ago", age.num_minutes())
        } else if age.num_days() < 1 {
            format!("{}h ago", age.num_hours())
        } else {
            format!("{}d ago", age.num_days())
        }
    }
}
