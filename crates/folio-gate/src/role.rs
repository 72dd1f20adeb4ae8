use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GateError;

/// Operator role, persisted as `SUPER_ADMIN`, `EDITOR` or `VIEWER`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    Editor,
    Viewer,
}

impl Role {
    pub const ALL: [Role; 3] = [Self::SuperAdmin, Self::Editor, Self::Viewer];

    /// The persisted form of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::Editor => "EDITOR",
            Self::Viewer => "VIEWER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "SUPER_ADMIN" | "SUPERADMIN" => Ok(Self::SuperAdmin),
            "EDITOR" => Ok(Self::Editor),
            "VIEWER" => Ok(Self::Viewer),
            other => Err(GateError::Config(format!("unknown role: {other}"))),
        }
    }
}

/// What a session is allowed to do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    pub can_modify: bool,
    pub can_delete: bool,
    pub can_view_leads: bool,
    pub can_manage_profile: bool,
}

impl Permissions {
    /// No permissions at all.
    pub const NONE: Permissions = Permissions {
        can_modify: false,
        can_delete: false,
        can_view_leads: false,
        can_manage_profile: false,
    };

    /// Returns `true` if these permissions allow `action`.
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::Create | Action::Update | Action::Export => self.can_modify,
            Action::Delete => self.can_delete,
            Action::ToggleLeadStatus => self.can_view_leads && self.can_modify,
            Action::ViewLeads => self.can_view_leads,
            Action::UpdateProfile => self.can_manage_profile,
            Action::SubmitLead => true,
        }
    }
}

/// The single mapping from role to permissions.
pub fn permissions_for(role: Role) -> Permissions {
    match role {
        Role::SuperAdmin => Permissions {
            can_modify: true,
            can_delete: true,
            can_view_leads: true,
            can_manage_profile: true,
        },
        Role::Editor => Permissions {
            can_modify: true,
            can_delete: false,
            can_view_leads: true,
            can_manage_profile: false,
        },
        Role::Viewer => Permissions::NONE,
    }
}

/// An operation a caller asks the gate to authorize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Update,
    Delete,
    ToggleLeadStatus,
    ViewLeads,
    UpdateProfile,
    Export,
    /// Public lead intake; open to everyone.
    SubmitLead,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::ToggleLeadStatus => "toggle_lead_status",
            Self::ViewLeads => "view_leads",
            Self::UpdateProfile => "update_profile",
            Self::Export => "export",
            Self::SubmitLead => "submit_lead",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_action() -> impl Strategy<Value = Action> {
        prop_oneof![
            Just(Action::Create),
            Just(Action::Update),
            Just(Action::Delete),
            Just(Action::ToggleLeadStatus),
            Just(Action::ViewLeads),
            Just(Action::UpdateProfile),
            Just(Action::Export),
            Just(Action::SubmitLead),
        ]
    }

    proptest! {
        #[test]
        fn higher_roles_allow_at_least_as_much(action in any_action()) {
            let admin = permissions_for(Role::SuperAdmin).allows(action);
            let editor = permissions_for(Role::Editor).allows(action);
            let viewer = permissions_for(Role::Viewer).allows(action);
            prop_assert!(admin || !editor);
            prop_assert!(editor || !viewer);
            prop_assert!(admin);
        }
    }

    #[test]
    fn super_admin_has_everything() {
        let p = permissions_for(Role::SuperAdmin);
        assert!(p.can_modify && p.can_delete && p.can_view_leads && p.can_manage_profile);
    }

    #[test]
    fn editor_cannot_delete_or_manage_profile() {
        let p = permissions_for(Role::Editor);
        assert!(p.can_modify);
        assert!(p.can_view_leads);
        assert!(!p.can_delete);
        assert!(!p.can_manage_profile);
        assert!(p.allows(Action::ToggleLeadStatus));
        assert!(!p.allows(Action::Delete));
    }

    #[test]
    fn viewer_has_nothing_but_lead_intake() {
        let p = permissions_for(Role::Viewer);
        assert_eq!(p, Permissions::NONE);
        assert!(!p.allows(Action::Create));
        assert!(!p.allows(Action::ViewLeads));
        assert!(p.allows(Action::SubmitLead));
    }

    #[test]
    fn role_wire_names() {
        assert_eq!(serde_json::to_string(&Role::SuperAdmin).unwrap(), "\"SUPER_ADMIN\"");
        assert_eq!("super-admin".parse::<Role>().unwrap(), Role::SuperAdmin);
        assert_eq!("EDITOR".parse::<Role>().unwrap(), Role::Editor);
        assert!("ROOT".parse::<Role>().is_err());
    }
}
