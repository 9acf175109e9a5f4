//! fOS Accessibility
//!
//! Accessibility semantics over a parsed document.
//!
//! Features:
//! - Accessible name computation (labelledby, aria-label, native labels, contents)
//! - Form control values as name fragments
//! - ARIA allowed-attribute validation per role
//! - Configurable role registry

pub mod attributes;
pub mod roles;
pub mod config;
pub mod tree;
pub mod text;
pub mod label;
pub mod form_value;
pub mod name;
pub mod allowed_attr;

pub use roles::{NameFrom, RoleDefinition, RoleRegistry, RegistryBuilder};
pub use config::{A11yConfig, RoleOverride, Standards};
pub use tree::AccessibilityTree;
pub use text::sanitize;
pub use label::LabelResolver;
pub use form_value::ControlKind;
pub use name::NameComputer;
pub use allowed_attr::{AllowedAttrCheck, AllowedAttrOptions, CheckContext, CheckOutcome, DiagnosticSink};

/// Accessibility error
#[derive(Debug, thiserror::Error)]
pub enum A11yError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid ARIA role: {0:?}")]
    InvalidRole(String),
}
