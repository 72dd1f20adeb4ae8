use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Access keys accepted by the console, each mapped to a role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialTable(BTreeMap<String, Role>);

impl CredentialTable {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, role: Role) {
        self.0.insert(key.into(), role);
    }

    /// The role granted by `key`, if any. Keys are matched exactly.
    pub fn lookup(&self, key: &str) -> Option<Role> {
        self.0.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CredentialTable {
    fn default() -> Self {
        let mut table = Self::new();
        table.insert("admin", Role::SuperAdmin);
        table.insert("logan", Role::SuperAdmin);
        table.insert("editor", Role::Editor);
        table.insert("viewer", Role::Viewer);
        table
    }
}

/// Configuration for the session resolver and mutation gate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Access keys and the role each grants.
    pub credentials: CredentialTable,
    /// Whether drafts must carry their required fields before a save.
    pub require_fields: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            credentials: CredentialTable::default(),
            require_fields: true,
        }
    }
}

impl GateConfig {
    /// A configuration that skips draft field validation.
    ///
    /// Role checks still apply.
    pub fn lenient() -> Self {
        Self {
            require_fields: false,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_credentials() {
        let table = CredentialTable::default();
        assert_eq!(table.lookup("admin"), Some(Role::SuperAdmin));
        assert_eq!(table.lookup("logan"), Some(Role::SuperAdmin));
        assert_eq!(table.lookup("editor"), Some(Role::Editor));
        assert_eq!(table.lookup("viewer"), Some(Role::Viewer));
        assert_eq!(table.lookup("Admin"), None);
        assert_eq!(table.lookup(""), None);
    }

    #[test]
    fn config_from_toml_overrides_credentials() {
        let config: GateConfig = toml::from_str(
            r#"
            require_fields = false

            [credentials]
            "s3cret" = "SUPER_ADMIN"
            "intern" = "VIEWER"
            "#,
        )
        .unwrap();
        assert!(!config.require_fields);
        assert_eq!(config.credentials.len(), 2);
        assert_eq!(config.credentials.lookup("s3cret"), Some(Role::SuperAdmin));
        assert_eq!(config.credentials.lookup("admin"), None);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config: GateConfig = toml::from_str("").unwrap();
        assert_eq!(config, GateConfig::default());
    }
}
