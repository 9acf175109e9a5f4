//! Form Control Values
//!
//! The value a form control contributes to an accessible name.

use crate::text::{join_fragments, sanitize};
use crate::tree::AccessibilityTree;

/// Input types whose value is never rendered as text
const NON_TEXT_INPUT_TYPES: &[&str] = &[
    "hidden", "password", "checkbox", "radio", "file", "image",
    "submit", "reset", "button", "range", "color",
];

/// Form control kind, as far as value extraction is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// `textarea`
    MultiLine,
    /// `select` without `multiple`
    SingleSelect,
    /// `select multiple`
    MultiSelect,
    /// `input` with no type or a text-like type
    TextBearing,
    /// `input` with a type that renders no text value
    NonTextBearing,
    /// Not a form control
    Other,
}

impl ControlKind {
    pub fn classify<T: AccessibilityTree>(tree: &T, node: T::Node) -> Self {
        match tree.tag_name(node) {
            Some("textarea") => Self::MultiLine,
            Some("select") if tree.has_attribute(node, "multiple") => Self::MultiSelect,
            Some("select") => Self::SingleSelect,
            Some("input") => {
                let input_type = tree
                    .attribute(node, "type")
                    .map(|t| t.trim().to_ascii_lowercase())
                    .unwrap_or_default();
                if NON_TEXT_INPUT_TYPES.contains(&input_type.as_str()) {
                    Self::NonTextBearing
                } else {
                    Self::TextBearing
                }
            }
            _ => Self::Other,
        }
    }

    /// `input`, `select` or `textarea`
    pub fn is_form_control(self) -> bool {
        self != Self::Other
    }
}

/// Value text of `node`; empty for anything that carries none
pub fn extract<T: AccessibilityTree>(tree: &T, node: T::Node) -> String {
    match ControlKind::classify(tree, node) {
        ControlKind::MultiLine => tree.text_content(node),
        ControlKind::SingleSelect => selected_options(tree, node)
            .last()
            .map(|&option| sanitize(&tree.text_content(option)))
            .unwrap_or_default(),
        ControlKind::MultiSelect => join_fragments(
            selected_options(tree, node)
                .into_iter()
                .map(|option| sanitize(&tree.text_content(option))),
        ),
        ControlKind::TextBearing => tree.attribute(node, "value").unwrap_or_default().to_string(),
        ControlKind::NonTextBearing | ControlKind::Other => String::new(),
    }
}

/// Selected `option` descendants in document order
fn selected_options<T: AccessibilityTree>(tree: &T, select: T::Node) -> Vec<T::Node> {
    tree.descendants(select)
        .into_iter()
        .filter(|&n| tree.tag_name(n) == Some("option") && tree.has_attribute(n, "selected"))
        .collect()
}
