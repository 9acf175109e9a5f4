//! ARIA Allowed-Attribute Check
//!
//! Flags recognized ARIA states and properties that the element's role does
//! not permit. Attributes outside the ARIA vocabulary are never reported.

use std::collections::{BTreeSet, HashMap};

use serde::Deserialize;

use crate::attributes;
use crate::roles::RoleRegistry;
use crate::tree::AccessibilityTree;
use crate::A11yError;

/// Per-role allow-lists supplied at evaluation time.
///
/// An entry replaces the registry's allow-list for that role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AllowedAttrOptions {
    roles: HashMap<String, Vec<String>>,
}

impl AllowedAttrOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `{ "role": ["aria-attr", ...], ... }`
    pub fn from_json(json: &str) -> Result<Self, A11yError> {
        let options: Self = serde_json::from_str(json)?;
        Ok(Self {
            roles: options
                .roles
                .into_iter()
                .map(|(role, attrs)| (role.trim().to_ascii_lowercase(), attrs))
                .collect(),
        })
    }

    /// Add or replace the allow-list for `role`
    pub fn with_role<I, S>(mut self, role: &str, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles.insert(
            role.trim().to_ascii_lowercase(),
            attrs.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub fn get(&self, role: &str) -> Option<&[String]> {
        self.roles.get(role).map(Vec::as_slice)
    }
}

/// Result of one check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub pass: bool,
    /// `name="value"` for each violation, in attribute order; `None` on pass
    pub diagnostics: Option<Vec<String>>,
}

impl CheckOutcome {
    fn passed() -> Self {
        Self { pass: true, diagnostics: None }
    }
}

/// Receives check diagnostics
pub trait DiagnosticSink {
    fn set_data(&mut self, data: Vec<String>);
}

/// Diagnostic sink for a single in-flight check
#[derive(Debug, Clone, Default)]
pub struct CheckContext {
    data: Option<Vec<String>>,
}

impl CheckContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics of the last failing check, if any
    pub fn data(&self) -> Option<&[String]> {
        self.data.as_deref()
    }

    /// Clear diagnostics before reuse
    pub fn reset(&mut self) {
        self.data = None;
    }
}

impl DiagnosticSink for CheckContext {
    fn set_data(&mut self, data: Vec<String>) {
        self.data = Some(data);
    }
}

/// Allowed-attribute validator bound to a frozen registry
pub struct AllowedAttrCheck<'a> {
    registry: &'a RoleRegistry,
}

impl<'a> AllowedAttrCheck<'a> {
    pub fn new(registry: &'a RoleRegistry) -> Self {
        Self { registry }
    }

    /// Validate `node` and return the outcome directly
    pub fn check<T: AccessibilityTree>(
        &self,
        tree: &T,
        node: T::Node,
        options: Option<&AllowedAttrOptions>,
    ) -> CheckOutcome {
        let Some(role) = tree.role(node) else {
            return CheckOutcome::passed();
        };

        let allowed: BTreeSet<&str> = match options.and_then(|o| o.get(&role)) {
            Some(list) => list.iter().map(String::as_str).collect(),
            None => match self.registry.allowed_attrs(&role) {
                Some(set) => set,
                None => return CheckOutcome::passed(),
            },
        };
        let required = self.registry.required_attrs(&role);

        let violations: Vec<String> = tree
            .attributes(node)
            .into_iter()
            .filter_map(|(name, value)| {
                let def = attributes::lookup(name)?;
                let permitted = def.global
                    || allowed.contains(def.name)
                    || required.iter().any(|r| r == def.name);
                (!permitted).then(|| format!("{}=\"{}\"", name, value))
            })
            .collect();

        if violations.is_empty() {
            CheckOutcome::passed()
        } else {
            tracing::debug!("Role {} does not allow {:?}", role, violations);
            CheckOutcome { pass: false, diagnostics: Some(violations) }
        }
    }

    /// Validate `node`, writing diagnostics to `sink` only on failure
    pub fn evaluate<T, S>(
        &self,
        tree: &T,
        node: T::Node,
        options: Option<&AllowedAttrOptions>,
        sink: &mut S,
    ) -> bool
    where
        T: AccessibilityTree,
        S: DiagnosticSink + ?Sized,
    {
        let outcome = self.check(tree, node, options);
        if let Some(data) = outcome.diagnostics {
            sink.set_data(data);
        }
        outcome.pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_dom::{DomTree, NodeId};

    fn div(tree: &mut DomTree, attrs: &[(&str, &str)]) -> NodeId {
        let id = tree.create_element("div");
        for (name, value) in attrs {
            tree.set_attribute(id, name, value).unwrap();
        }
        tree.append_child(tree.root(), id).unwrap();
        id
    }

    #[test]
    fn test_violation_order_follows_attributes() {
        let mut tree = DomTree::new();
        let node = div(&mut tree, &[
            ("aria-valuenow", "1"),
            ("role", "link"),
            ("aria-selected", "true"),
        ]);
        let registry = RoleRegistry::standard();

        let outcome = AllowedAttrCheck::new(&registry).check(&tree, node, None);
        assert!(!outcome.pass);
        assert_eq!(
            outcome.diagnostics.unwrap(),
            ["aria-valuenow=\"1\"", "aria-selected=\"true\""]
        );
    }

    #[test]
    fn test_globals_always_permitted() {
        let mut tree = DomTree::new();
        let node = div(&mut tree, &[("role", "presentation"), ("aria-hidden", "true")]);
        let registry = RoleRegistry::standard();
        let options = AllowedAttrOptions::new().with_role("presentation", Vec::<String>::new());

        let check = AllowedAttrCheck::new(&registry);
        assert!(check.check(&tree, node, None).pass);
        assert!(check.check(&tree, node, Some(&options)).pass);
    }

    #[test]
    fn test_required_permitted_under_options() {
        let mut tree = DomTree::new();
        let node = div(&mut tree, &[("role", "checkbox"), ("aria-checked", "mixed")]);
        let registry = RoleRegistry::standard();
        let options = AllowedAttrOptions::new().with_role("checkbox", ["aria-readonly"]);

        assert!(AllowedAttrCheck::new(&registry).check(&tree, node, Some(&options)).pass);
    }

    #[test]
    fn test_sink_untouched_on_pass() {
        let mut tree = DomTree::new();
        let bad = div(&mut tree, &[("role", "link"), ("aria-selected", "true")]);
        let good = div(&mut tree, &[("role", "link"), ("aria-expanded", "true")]);
        let registry = RoleRegistry::standard();
        let check = AllowedAttrCheck::new(&registry);
        let mut ctx = CheckContext::new();

        assert!(!check.evaluate(&tree, bad, None, &mut ctx));
        assert!(check.evaluate(&tree, good, None, &mut ctx));
        assert_eq!(ctx.data().unwrap(), ["aria-selected=\"true\""]);

        ctx.reset();
        assert!(ctx.data().is_none());
    }

    #[test]
    fn test_options_from_json() {
        let options = AllowedAttrOptions::from_json(r#"{ "Bagley": ["aria-selected"] }"#).unwrap();
        assert_eq!(options.get("bagley").unwrap(), ["aria-selected"]);
        assert!(options.get("mccheddarton").is_none());
        assert!(AllowedAttrOptions::from_json("[]").is_err());
    }
}
