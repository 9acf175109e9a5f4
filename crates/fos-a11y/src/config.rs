//! Audit Configuration
//!
//! JSON-shaped standards overrides, applied once to build the role registry.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::roles::{NameFrom, RegistryBuilder, RoleRegistry};
use crate::A11yError;

/// Override for a single role
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleOverride {
    /// Replaces the role's allow-list
    #[serde(default)]
    pub allowed_attrs: Vec<String>,
    pub required_attrs: Option<Vec<String>>,
    pub name_from: Option<NameFrom>,
}

impl RoleOverride {
    /// Override that only sets the allow-list
    pub fn allowing<I, S>(attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_attrs: attrs.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

/// Standards tables that may be overridden
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standards {
    #[serde(default)]
    pub aria_roles: BTreeMap<String, RoleOverride>,
}

/// Audit configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct A11yConfig {
    #[serde(default)]
    pub standards: Standards,
}

impl A11yConfig {
    /// Parse `{ "standards": { "ariaRoles": { ... } } }`
    pub fn from_json(json: &str) -> Result<Self, A11yError> {
        let config: Self = serde_json::from_str(json)?;

        if let Some(role) = config.standards.aria_roles.keys().find(|r| r.trim().is_empty()) {
            return Err(A11yError::InvalidRole(role.clone()));
        }
        Ok(config)
    }

    /// Apply the overrides on top of `builder`
    pub fn apply(&self, builder: RegistryBuilder) -> RegistryBuilder {
        builder.configure(
            self.standards.aria_roles.iter()
                .map(|(role, over)| (role.trim().to_ascii_lowercase(), over.clone())),
        )
    }

    /// Build and freeze the registry this configuration describes
    pub fn registry(&self) -> RoleRegistry {
        self.apply(RoleRegistry::builder()).build()
    }
}
