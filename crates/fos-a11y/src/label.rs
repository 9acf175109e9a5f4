//! Native Label Association
//!
//! Finds the `label` element that names a form control, either through a
//! `for` reference or by wrapping the control.

use crate::tree::AccessibilityTree;

/// Resolves the native label of a control
pub struct LabelResolver<'a, T: AccessibilityTree> {
    tree: &'a T,
}

impl<'a, T: AccessibilityTree> LabelResolver<'a, T> {
    pub fn new(tree: &'a T) -> Self {
        Self { tree }
    }

    /// First `label[for=id]` in document order, else the nearest `label` ancestor
    pub fn resolve(&self, node: T::Node) -> Option<T::Node> {
        self.by_reference(node).or_else(|| self.by_ancestry(node))
    }

    fn by_reference(&self, node: T::Node) -> Option<T::Node> {
        let id = self.tree.attribute(node, "id").filter(|id| !id.is_empty())?;
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&n| self.is_label(n) && self.tree.attribute(n, "for") == Some(id))
    }

    fn by_ancestry(&self, node: T::Node) -> Option<T::Node> {
        self.tree.ancestors(node).into_iter().find(|&n| self.is_label(n))
    }

    fn is_label(&self, node: T::Node) -> bool {
        self.tree.tag_name(node) == Some("label")
    }
}
