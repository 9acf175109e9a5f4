//! Accessible Name Computation
//!
//! Computes the text an assistive technology announces for an element.
//! Sources are tried in priority order and the first non-empty one wins:
//!
//! 1. `aria-labelledby` references
//! 2. `aria-label`
//! 3. native `label` element
//! 4. form control value
//! 5. `alt` on images
//! 6. descendant contents, when the role names from contents
//! 7. `title`
//!
//! Each top-level call keeps one visited set. An element whose text has been
//! computed once contributes nothing when reached again, which both ends
//! reference cycles and keeps a label from being counted twice.

use std::collections::HashSet;

use crate::form_value::{self, ControlKind};
use crate::label::LabelResolver;
use crate::roles::{NameFrom, RoleRegistry};
use crate::text::{join_fragments, sanitize};
use crate::tree::AccessibilityTree;

/// Elements that can be associated with a `label`
const LABELABLE: &[&str] = &["button", "input", "meter", "output", "progress", "select", "textarea"];

/// Per-node computation state
#[derive(Debug, Clone, Copy)]
struct Frame<N> {
    /// Inside an `aria-labelledby` traversal; references are not followed again
    in_labelled_by: bool,
    /// Element whose label text is being computed, if any
    labelling: Option<N>,
    /// Reached through a parent's contents or a label traversal
    descendant: bool,
    /// May re-enter an already visited node (self reference in `aria-labelledby`)
    revisit: bool,
}

impl<N: Copy> Frame<N> {
    fn top() -> Self {
        Self { in_labelled_by: false, labelling: None, descendant: false, revisit: false }
    }

    fn child(self) -> Self {
        Self { descendant: true, revisit: false, ..self }
    }
}

/// Accessible name computer over a tree and a frozen role registry
pub struct NameComputer<'a, T: AccessibilityTree> {
    tree: &'a T,
    registry: &'a RoleRegistry,
}

impl<'a, T: AccessibilityTree> NameComputer<'a, T> {
    pub fn new(tree: &'a T, registry: &'a RoleRegistry) -> Self {
        Self { tree, registry }
    }

    /// Accessible name of `node`; empty when nothing names it
    pub fn compute(&self, node: T::Node) -> String {
        let mut visited = HashSet::new();
        self.compute_frame(node, Frame::top(), &mut visited)
    }

    fn compute_frame(&self, node: T::Node, frame: Frame<T::Node>, visited: &mut HashSet<T::Node>) -> String {
        if let Some(text) = self.tree.text(node) {
            return sanitize(text);
        }
        if !self.tree.is_element(node) {
            return String::new();
        }
        if !visited.insert(node) && !frame.revisit {
            tracing::trace!("Skipping visited node {:?}", node);
            return String::new();
        }

        let kind = ControlKind::classify(self.tree, node);

        // 1. aria-labelledby
        if !frame.in_labelled_by {
            let name = self.labelled_by(node, visited);
            if !name.is_empty() {
                return name;
            }
        }

        // A control inside another element's label contributes its value only
        if kind.is_form_control() && frame.labelling.is_some_and(|target| target != node) {
            return sanitize(&form_value::extract(self.tree, node));
        }

        // 2. aria-label
        if let Some(label) = self.tree.attribute(node, "aria-label") {
            let label = sanitize(label);
            if !label.is_empty() {
                return label;
            }
        }

        // 3. native label
        if self.is_labelable(node) {
            if let Some(label) = LabelResolver::new(self.tree).resolve(node) {
                tracing::trace!("Using label {:?} for {:?}", label, node);
                let label_frame = Frame {
                    in_labelled_by: frame.in_labelled_by,
                    labelling: Some(node),
                    descendant: true,
                    revisit: false,
                };
                let name = self.compute_frame(label, label_frame, visited);
                if !name.is_empty() {
                    return name;
                }
            }
        }

        // 4. form value
        let value = sanitize(&form_value::extract(self.tree, node));
        if !value.is_empty() {
            return value;
        }

        // 5. alt
        if self.uses_alt(node) {
            let alt = sanitize(self.tree.attribute(node, "alt").unwrap_or_default());
            if !alt.is_empty() {
                return alt;
            }
        }

        // 6. contents
        if !kind.is_form_control() && self.names_from_contents(node, frame) {
            let fragments: Vec<String> = self
                .tree
                .children(node)
                .into_iter()
                .filter(|&child| !self.hides_contents(child))
                .map(|child| self.compute_frame(child, frame.child(), visited))
                .collect();
            let name = sanitize(&join_fragments(&fragments));
            if !name.is_empty() {
                return name;
            }
        }

        // 7. title
        sanitize(self.tree.attribute(node, "title").unwrap_or_default())
    }

    fn labelled_by(&self, node: T::Node, visited: &mut HashSet<T::Node>) -> String {
        let Some(ids) = self.tree.attribute(node, "aria-labelledby") else {
            return String::new();
        };

        let mut fragments = Vec::new();
        for id in ids.split_whitespace() {
            let Some(target) = self.tree.element_by_id(id) else {
                tracing::trace!("aria-labelledby target {} not found", id);
                continue;
            };
            tracing::trace!("Following aria-labelledby from {:?} to {:?}", node, target);

            let target_frame = if target == node {
                Frame { in_labelled_by: true, labelling: None, descendant: true, revisit: true }
            } else {
                Frame { in_labelled_by: true, labelling: Some(node), descendant: true, revisit: false }
            };
            fragments.push(self.compute_frame(target, target_frame, visited));
        }
        sanitize(&join_fragments(&fragments))
    }

    fn is_labelable(&self, node: T::Node) -> bool {
        self.tree.tag_name(node).is_some_and(|tag| LABELABLE.contains(&tag))
    }

    fn uses_alt(&self, node: T::Node) -> bool {
        match self.tree.tag_name(node) {
            Some("img") => true,
            Some("input") => self
                .tree
                .attribute(node, "type")
                .is_some_and(|t| t.trim().eq_ignore_ascii_case("image")),
            _ => false,
        }
    }

    fn names_from_contents(&self, node: T::Node, frame: Frame<T::Node>) -> bool {
        if frame.descendant {
            return true;
        }
        match self.tree.role(node) {
            None => true,
            Some(role) => self
                .registry
                .name_from(&role)
                .is_none_or(|name_from| name_from == NameFrom::Contents),
        }
    }

    /// Explicitly roled children whose role does not name from contents
    fn hides_contents(&self, child: T::Node) -> bool {
        let Some(explicit) = self.tree.explicit_role(child) else {
            return false;
        };
        if self.tree.implicit_role(child) == Some(explicit.as_str()) {
            return false;
        }
        self.registry
            .name_from(&explicit)
            .is_some_and(|name_from| name_from != NameFrom::Contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_dom::{DomTree, NodeId};

    struct Fixture {
        tree: DomTree,
    }

    impl Fixture {
        fn new() -> Self {
            Self { tree: DomTree::new() }
        }

        fn element(&mut self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
            let id = self.tree.create_element(tag);
            for (name, value) in attrs {
                self.tree.set_attribute(id, name, value).unwrap();
            }
            self.tree.append_child(parent, id).unwrap();
            id
        }

        fn text(&mut self, parent: NodeId, content: &str) {
            let id = self.tree.create_text(content);
            self.tree.append_child(parent, id).unwrap();
        }

        fn name(&self, node: NodeId) -> String {
            let registry = RoleRegistry::standard();
            NameComputer::new(&self.tree, &registry).compute(node)
        }
    }

    #[test]
    fn test_contents_of_generic_element() {
        let mut f = Fixture::new();
        let root = f.tree.root();
        let div = f.element(root, "div", &[]);
        f.text(div, "  Hello ");
        let b = f.element(div, "b", &[]);
        f.text(b, "world\n");

        assert_eq!(f.name(div), "Hello world");
    }

    #[test]
    fn test_aria_label_trimmed() {
        let mut f = Fixture::new();
        let root = f.tree.root();
        let button = f.element(root, "button", &[("aria-label", "  Close ")]);
        f.text(button, "X");

        assert_eq!(f.name(button), "Close");
    }

    #[test]
    fn test_aria_label_whitespace_collapsed() {
        let mut f = Fixture::new();
        let root = f.tree.root();
        let button = f.element(root, "button", &[("aria-label", "Close\n    dialog")]);

        assert_eq!(f.name(button), "Close dialog");
    }

    #[test]
    fn test_password_hidden_from_contents() {
        let mut f = Fixture::new();
        let root = f.tree.root();
        let div = f.element(root, "div", &[]);
        f.text(div, "Login ");
        f.element(div, "input", &[("type", "password"), ("value", "hunter2")]);

        assert_eq!(f.name(div), "Login");
    }

    #[test]
    fn test_blank_aria_label_ignored() {
        let mut f = Fixture::new();
        let root = f.tree.root();
        let button = f.element(root, "button", &[("aria-label", "   ")]);
        f.text(button, "Save");

        assert_eq!(f.name(button), "Save");
    }

    #[test]
    fn test_author_role_skips_contents() {
        let mut f = Fixture::new();
        let root = f.tree.root();
        let nav = f.element(root, "nav", &[("title", "Site")]);
        f.text(nav, "Home About");

        assert_eq!(f.name(nav), "Site");
    }

    #[test]
    fn test_unknown_role_names_from_contents() {
        let mut f = Fixture::new();
        let root = f.tree.root();
        let div = f.element(root, "div", &[("role", "mccheddarton")]);
        f.text(div, "Cheese");

        assert_eq!(f.name(div), "Cheese");
    }

    #[test]
    fn test_labelledby_cycle_terminates() {
        let mut f = Fixture::new();
        let root = f.tree.root();
        let a = f.element(root, "div", &[("id", "a"), ("aria-labelledby", "b")]);
        f.text(a, "Alpha");
        let b = f.element(root, "div", &[("id", "b"), ("aria-labelledby", "a")]);
        f.text(b, "Beta");

        assert_eq!(f.name(a), "Beta");
        assert_eq!(f.name(b), "Alpha");
    }

    #[test]
    fn test_missing_labelledby_target_falls_through() {
        let mut f = Fixture::new();
        let root = f.tree.root();
        let div = f.element(root, "div", &[("aria-labelledby", "nowhere"), ("aria-label", "Fallback")]);

        assert_eq!(f.name(div), "Fallback");
    }

    #[test]
    fn test_title_fallback() {
        let mut f = Fixture::new();
        let root = f.tree.root();
        let input = f.element(root, "input", &[("type", "checkbox"), ("title", "Agree")]);

        assert_eq!(f.name(input), "Agree");
    }

    #[test]
    fn test_non_element_nodes() {
        let mut f = Fixture::new();
        let root = f.tree.root();
        let comment = f.tree.create_comment("note");
        f.tree.append_child(root, comment).unwrap();

        assert_eq!(f.name(comment), "");
    }
}
