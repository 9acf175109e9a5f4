//! Role Registry
//!
//! Per-role ARIA attribute allow-lists and naming policy. A registry is
//! assembled through [`RegistryBuilder`] and frozen into an immutable
//! [`RoleRegistry`] before any check runs.

use std::collections::{BTreeSet, HashMap};

use serde::Deserialize;

use crate::config::RoleOverride;
use NameFrom::{Author, Contents};

/// Where an element with a given role takes its accessible name from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameFrom {
    /// Only from author-supplied attributes or native labels
    #[default]
    Author,
    /// From descendant content as well
    Contents,
    /// Naming is not allowed
    Prohibited,
}

/// Attribute rules for one role
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoleDefinition {
    pub allowed_attrs: Vec<String>,
    pub required_attrs: Vec<String>,
    pub name_from: NameFrom,
}

impl RoleDefinition {
    fn from_static(name_from: NameFrom, required: &[&str], allowed: &[&str]) -> Self {
        Self {
            allowed_attrs: allowed.iter().map(|s| s.to_string()).collect(),
            required_attrs: required.iter().map(|s| s.to_string()).collect(),
            name_from,
        }
    }

    /// Whether `attr` is in the allow-list or required by this role
    pub fn permits(&self, attr: &str) -> bool {
        self.allowed_attrs.iter().chain(&self.required_attrs).any(|a| a == attr)
    }
}

/// (role, name-from, required attributes, allowed attributes)
type StaticRole = (&'static str, NameFrom, &'static [&'static str], &'static [&'static str]);

const CELL_ATTRS: &[&str] = &["aria-colindex", "aria-colspan", "aria-rowindex", "aria-rowspan"];
const HEADER_ATTRS: &[&str] = &[
    "aria-colindex", "aria-colspan", "aria-expanded", "aria-readonly",
    "aria-required", "aria-rowindex", "aria-rowspan", "aria-selected", "aria-sort",
];
const TEXTBOX_ATTRS: &[&str] = &[
    "aria-activedescendant", "aria-autocomplete", "aria-multiline",
    "aria-placeholder", "aria-readonly", "aria-required",
];
const MENU_ATTRS: &[&str] = &["aria-activedescendant", "aria-expanded", "aria-orientation"];
const RANGE_ATTRS: &[&str] = &["aria-valuemax", "aria-valuemin", "aria-valuenow", "aria-valuetext"];

static STANDARD_ROLES: &[StaticRole] = &[
    ("alert", Author, &[], &["aria-expanded"]),
    ("alertdialog", Author, &[], &["aria-expanded", "aria-modal"]),
    ("application", Author, &[], &["aria-activedescendant", "aria-expanded"]),
    ("article", Author, &[], &["aria-expanded", "aria-posinset", "aria-setsize"]),
    ("banner", Author, &[], &["aria-expanded"]),
    ("button", Contents, &[], &["aria-expanded", "aria-pressed"]),
    ("cell", Contents, &[], CELL_ATTRS),
    ("checkbox", Contents, &["aria-checked"], &["aria-readonly", "aria-required"]),
    ("columnheader", Contents, &[], HEADER_ATTRS),
    ("combobox", Author, &["aria-expanded"], &[
        "aria-activedescendant", "aria-autocomplete", "aria-orientation",
        "aria-readonly", "aria-required",
    ]),
    ("complementary", Author, &[], &["aria-expanded"]),
    ("contentinfo", Author, &[], &["aria-expanded"]),
    ("definition", Author, &[], &["aria-expanded"]),
    ("dialog", Author, &[], &["aria-expanded", "aria-modal"]),
    ("directory", Author, &[], &["aria-expanded"]),
    ("document", Author, &[], &["aria-expanded"]),
    ("feed", Author, &[], &["aria-expanded", "aria-setsize"]),
    ("figure", Author, &[], &["aria-expanded"]),
    ("form", Author, &[], &["aria-expanded"]),
    ("generic", Contents, &[], &[]),
    ("grid", Author, &[], &[
        "aria-activedescendant", "aria-colcount", "aria-expanded", "aria-level",
        "aria-multiselectable", "aria-readonly", "aria-rowcount",
    ]),
    ("gridcell", Contents, &[], &[
        "aria-colindex", "aria-colspan", "aria-expanded", "aria-readonly",
        "aria-required", "aria-rowindex", "aria-rowspan", "aria-selected",
    ]),
    ("group", Author, &[], &["aria-activedescendant", "aria-expanded"]),
    ("heading", Contents, &[], &["aria-expanded", "aria-level"]),
    ("img", Author, &[], &["aria-expanded"]),
    ("link", Contents, &[], &["aria-expanded"]),
    ("list", Author, &[], &["aria-expanded"]),
    ("listbox", Author, &[], &[
        "aria-activedescendant", "aria-expanded", "aria-multiselectable",
        "aria-orientation", "aria-readonly", "aria-required",
    ]),
    ("listitem", Author, &[], &["aria-expanded", "aria-level", "aria-posinset", "aria-setsize"]),
    ("log", Author, &[], &["aria-expanded"]),
    ("main", Author, &[], &["aria-expanded"]),
    ("marquee", Author, &[], &["aria-expanded"]),
    ("math", Author, &[], &["aria-expanded"]),
    ("menu", Author, &[], MENU_ATTRS),
    ("menubar", Author, &[], MENU_ATTRS),
    ("menuitem", Contents, &[], &["aria-expanded", "aria-posinset", "aria-setsize"]),
    ("menuitemcheckbox", Contents, &["aria-checked"], &["aria-expanded", "aria-posinset", "aria-setsize"]),
    ("menuitemradio", Contents, &["aria-checked"], &[
        "aria-expanded", "aria-posinset", "aria-selected", "aria-setsize",
    ]),
    ("navigation", Author, &[], &["aria-expanded"]),
    ("none", Contents, &[], &[]),
    ("note", Author, &[], &["aria-expanded"]),
    ("option", Contents, &["aria-selected"], &["aria-checked", "aria-posinset", "aria-setsize"]),
    ("presentation", Contents, &[], &[]),
    ("progressbar", Author, &[], RANGE_ATTRS),
    ("radio", Contents, &["aria-checked"], &["aria-posinset", "aria-required", "aria-setsize"]),
    ("radiogroup", Author, &[], &[
        "aria-activedescendant", "aria-expanded", "aria-orientation",
        "aria-readonly", "aria-required",
    ]),
    ("region", Author, &[], &["aria-expanded"]),
    ("row", Contents, &[], &[
        "aria-activedescendant", "aria-colindex", "aria-expanded",
        "aria-level", "aria-rowindex", "aria-selected",
    ]),
    ("rowgroup", Contents, &[], &["aria-activedescendant", "aria-expanded"]),
    ("rowheader", Contents, &[], HEADER_ATTRS),
    ("scrollbar", Author, &["aria-controls", "aria-valuenow"], &[
        "aria-orientation", "aria-valuemax", "aria-valuemin", "aria-valuetext",
    ]),
    ("search", Author, &[], &["aria-expanded"]),
    ("searchbox", Author, &[], TEXTBOX_ATTRS),
    ("separator", Author, &[], &[
        "aria-expanded", "aria-orientation", "aria-valuemax",
        "aria-valuemin", "aria-valuenow", "aria-valuetext",
    ]),
    ("slider", Author, &["aria-valuenow"], &[
        "aria-orientation", "aria-readonly", "aria-valuemax", "aria-valuemin", "aria-valuetext",
    ]),
    ("spinbutton", Author, &["aria-valuenow"], &[
        "aria-readonly", "aria-required", "aria-valuemax", "aria-valuemin", "aria-valuetext",
    ]),
    ("status", Author, &[], &["aria-expanded"]),
    ("switch", Contents, &["aria-checked"], &["aria-readonly"]),
    ("tab", Contents, &[], &["aria-expanded", "aria-posinset", "aria-selected", "aria-setsize"]),
    ("table", Author, &[], &["aria-colcount", "aria-rowcount"]),
    ("tablist", Author, &[], &[
        "aria-activedescendant", "aria-level", "aria-multiselectable", "aria-orientation",
    ]),
    ("tabpanel", Author, &[], &["aria-expanded"]),
    ("term", Author, &[], &["aria-expanded"]),
    ("textbox", Author, &[], TEXTBOX_ATTRS),
    ("timer", Author, &[], &["aria-expanded"]),
    ("toolbar", Author, &[], MENU_ATTRS),
    ("tooltip", Contents, &[], &["aria-expanded"]),
    ("tree", Author, &[], &[
        "aria-activedescendant", "aria-expanded", "aria-multiselectable",
        "aria-orientation", "aria-required",
    ]),
    ("treegrid", Author, &[], &[
        "aria-activedescendant", "aria-colcount", "aria-expanded", "aria-level",
        "aria-multiselectable", "aria-orientation", "aria-readonly",
        "aria-required", "aria-rowcount",
    ]),
    ("treeitem", Contents, &[], &[
        "aria-checked", "aria-expanded", "aria-level",
        "aria-posinset", "aria-selected", "aria-setsize",
    ]),
];

/// Frozen role table
///
/// Has no mutating methods; build a new one through [`RegistryBuilder`].
#[derive(Debug, Clone)]
pub struct RoleRegistry {
    roles: HashMap<String, RoleDefinition>,
}

impl RoleRegistry {
    /// The unconfigured ARIA role table
    pub fn standard() -> Self {
        let roles = STANDARD_ROLES
            .iter()
            .map(|(name, from, required, allowed)| {
                (name.to_string(), RoleDefinition::from_static(*from, required, allowed))
            })
            .collect();
        Self { roles }
    }

    /// Start from the standard table
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder { registry: Self::standard() }
    }

    /// Definition of a role
    pub fn get(&self, role: &str) -> Option<&RoleDefinition> {
        self.roles.get(role)
    }

    pub fn contains(&self, role: &str) -> bool {
        self.roles.contains_key(role)
    }

    /// Allow-list union required attributes; `None` for unknown roles
    pub fn allowed_attrs(&self, role: &str) -> Option<BTreeSet<&str>> {
        let def = self.get(role)?;
        Some(
            def.allowed_attrs.iter()
                .chain(&def.required_attrs)
                .map(String::as_str)
                .collect(),
        )
    }

    /// Required attributes; empty for unknown roles
    pub fn required_attrs(&self, role: &str) -> &[String] {
        self.get(role).map(|def| def.required_attrs.as_slice()).unwrap_or_default()
    }

    /// Naming policy; `None` for unknown roles
    pub fn name_from(&self, role: &str) -> Option<NameFrom> {
        self.get(role).map(|def| def.name_from)
    }

    /// Number of roles
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Mutable staging area for a [`RoleRegistry`]
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    registry: RoleRegistry,
}

impl RegistryBuilder {
    /// Merge role overrides.
    ///
    /// Unknown roles are added. For known roles the allow-list is replaced,
    /// and required attributes / naming policy are replaced when supplied.
    pub fn configure<I, S>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (S, RoleOverride)>,
        S: Into<String>,
    {
        for (role, over) in overrides {
            let role = role.into();
            match self.registry.roles.get_mut(&role) {
                Some(def) => {
                    tracing::debug!("Replacing allow-list of role {}", role);
                    def.allowed_attrs = over.allowed_attrs;
                    if let Some(required) = over.required_attrs {
                        def.required_attrs = required;
                    }
                    if let Some(name_from) = over.name_from {
                        def.name_from = name_from;
                    }
                }
                None => {
                    tracing::debug!("Registering role {}", role);
                    self.registry.roles.insert(role, RoleDefinition {
                        allowed_attrs: over.allowed_attrs,
                        required_attrs: over.required_attrs.unwrap_or_default(),
                        name_from: over.name_from.unwrap_or_default(),
                    });
                }
            }
        }
        self
    }

    /// Freeze the registry
    pub fn build(self) -> RoleRegistry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes;

    #[test]
    fn test_standard_roles() {
        let registry = RoleRegistry::standard();
        assert!(registry.contains("checkbox"));
        assert_eq!(registry.name_from("link"), Some(NameFrom::Contents));
        assert_eq!(registry.name_from("alert"), Some(NameFrom::Author));
        assert_eq!(registry.required_attrs("checkbox"), ["aria-checked"]);
    }

    #[test]
    fn test_standard_attrs_are_recognized() {
        for (role, _, required, allowed) in STANDARD_ROLES {
            for attr in required.iter().chain(allowed.iter()) {
                assert!(attributes::is_valid_attr(attr), "{} lists unknown {}", role, attr);
            }
        }
    }

    #[test]
    fn test_allowed_includes_required() {
        let registry = RoleRegistry::standard();
        let allowed = registry.allowed_attrs("radio").unwrap();
        assert!(allowed.contains("aria-checked"));
        assert!(allowed.contains("aria-required"));
        assert!(!allowed.contains("aria-selected"));
    }

    #[test]
    fn test_unknown_role() {
        let registry = RoleRegistry::standard();
        assert!(registry.allowed_attrs("mccheddarton").is_none());
        assert!(registry.required_attrs("mccheddarton").is_empty());
        assert_eq!(registry.name_from("mccheddarton"), None);
    }

    #[test]
    fn test_configure_adds_role() {
        let registry = RoleRegistry::builder()
            .configure([("custom", RoleOverride::allowing(["aria-checked"]))])
            .build();

        let def = registry.get("custom").unwrap();
        assert_eq!(def.allowed_attrs, ["aria-checked"]);
        assert!(def.required_attrs.is_empty());
        assert_eq!(def.name_from, NameFrom::Author);
        assert_eq!(registry.len(), RoleRegistry::standard().len() + 1);
    }

    #[test]
    fn test_configure_replaces_allow_list() {
        let registry = RoleRegistry::builder()
            .configure([("link", RoleOverride::allowing(["aria-selected"]))])
            .build();

        let def = registry.get("link").unwrap();
        assert_eq!(def.allowed_attrs, ["aria-selected"]);
        assert!(!def.permits("aria-expanded"));
        // Untouched fields survive
        assert_eq!(def.name_from, NameFrom::Contents);
    }

    #[test]
    fn test_configure_replaces_required_when_given() {
        let over = RoleOverride {
            allowed_attrs: vec![],
            required_attrs: Some(vec!["aria-pressed".into()]),
            name_from: Some(NameFrom::Prohibited),
        };
        let registry = RoleRegistry::builder().configure([("checkbox", over)]).build();

        assert_eq!(registry.required_attrs("checkbox"), ["aria-pressed"]);
        assert_eq!(registry.name_from("checkbox"), Some(NameFrom::Prohibited));
    }
}
