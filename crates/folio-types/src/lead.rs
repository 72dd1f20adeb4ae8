use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::id::ItemId;

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Kind of work an inbound project request asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadCategory {
    #[serde(rename = "Web App")]
    WebApp,
    #[serde(rename = "Mobile App")]
    MobileApp,
    Automation,
    #[serde(rename = "AI Integration")]
    AiIntegration,
    Consulting,
    Other,
}

impl fmt::Display for LeadCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::WebApp => "Web App",
            Self::MobileApp => "Mobile App",
            Self::Automation => "Automation",
            Self::AiIntegration => "AI Integration",
            Self::Consulting => "Consulting",
            Self::Other => "Other",
        };
        f.write_str(s)
    }
}

impl FromStr for LeadCategory {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "webapp" | "web" => Ok(Self::WebApp),
            "mobileapp" | "mobile" => Ok(Self::MobileApp),
            "automation" => Ok(Self::Automation),
            "aiintegration" | "ai" => Ok(Self::AiIntegration),
            "consulting" => Ok(Self::Consulting),
            "other" => Ok(Self::Other),
            _ => Err(TypeError::UnknownLeadCategory(s.to_string())),
        }
    }
}

/// Triage state of a lead. Transitions only along the cycle
/// New → Contacted → Archived → New.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Archived,
}

impl LeadStatus {
    /// The next state in the triage cycle.
    pub fn next(self) -> Self {
        match self {
            Self::New => Self::Contacted,
            Self::Contacted => Self::Archived,
            Self::Archived => Self::New,
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::New => "New",
            Self::Contacted => "Contacted",
            Self::Archived => "Archived",
        };
        f.write_str(s)
    }
}

impl FromStr for LeadStatus {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "new" => Ok(Self::New),
            "contacted" => Ok(Self::Contacted),
            "archived" => Ok(Self::Archived),
            _ => Err(TypeError::UnknownLeadStatus(s.to_string())),
        }
    }
}

/// An inbound project request submitted through the public contact form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRequest {
    #[serde(default)]
    pub id: ItemId,
    pub client_name: String,
    pub client_email: String,
    pub category: LeadCategory,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    /// Submission date as displayed.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub status: LeadStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_status() -> impl Strategy<Value = LeadStatus> {
        prop_oneof![
            Just(LeadStatus::New),
            Just(LeadStatus::Contacted),
            Just(LeadStatus::Archived),
        ]
    }

    proptest! {
        #[test]
        fn three_steps_return_to_start(status in any_status()) {
            prop_assert_eq!(status.next().next().next(), status);
        }

        #[test]
        fn one_step_always_changes_state(status in any_status()) {
            prop_assert_ne!(status.next(), status);
        }
    }

    #[test]
    fn cycle_never_skips() {
        assert_eq!(LeadStatus::New.next(), LeadStatus::Contacted);
        assert_eq!(LeadStatus::Contacted.next(), LeadStatus::Archived);
        assert_eq!(LeadStatus::Archived.next(), LeadStatus::New);
    }

    #[test]
    fn lead_category_parses_display_names() {
        assert_eq!("Mobile App".parse::<LeadCategory>().unwrap(), LeadCategory::MobileApp);
        assert_eq!("ai-integration".parse::<LeadCategory>().unwrap(), LeadCategory::AiIntegration);
        assert!("gardening".parse::<LeadCategory>().is_err());
    }

    #[test]
    fn lead_wire_shape() {
        let lead = LeadRequest {
            id: ItemId::new("lead-1"),
            client_name: "Jane".into(),
            client_email: "jane@x.com".into(),
            category: LeadCategory::MobileApp,
            description: "d".into(),
            budget: None,
            date: "1 January 2026".into(),
            status: LeadStatus::New,
        };
        let json = serde_json::to_value(&lead).unwrap();
        assert_eq!(json["clientName"], "Jane");
        assert_eq!(json["category"], "Mobile App");
        assert_eq!(json["status"], "New");
        assert!(json.get("budget").is_none());
    }
}
