//! DOM Tree (arena-based allocation)

use crate::{DomError, Node, NodeId};

/// Arena-based DOM tree for memory efficiency
///
/// Slot 0 always holds the document node.
#[derive(Debug)]
pub struct DomTree {
    pub(crate) nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self { nodes: vec![Node::document()] }
    }

    /// Document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push(Node::element(name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content))
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// A child that is already attached elsewhere is moved.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let parent_node = self.get(parent).ok_or(DomError::InvalidNode(parent))?;
        if self.get(child).is_none() {
            return Err(DomError::InvalidNode(child));
        }
        if !parent_node.is_container()
            || child == NodeId::ROOT
            || parent == child
            || self.ancestors(parent).any(|a| a == child)
        {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        self.detach(child);
        self.link_child(parent, child);
        Ok(())
    }

    /// Link a detached child without validation
    pub(crate) fn link_child(&mut self, parent: NodeId, child: NodeId) {
        let last = self.nodes[parent.index()].last_child;

        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }

        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
    }

    fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[id.index()];
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Set an attribute on an element
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.get_mut(id)
            .ok_or(DomError::InvalidNode(id))?
            .as_element_mut()
            .ok_or(DomError::NotAnElement(id))?
            .set_attr(name, value);
        Ok(())
    }

    /// Lower-cased tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_element().map(|e| e.name.as_str())
    }

    /// Attribute value of an element
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?.as_element()?.get_attr(name)
    }

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Iterate direct children
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Iterate all descendants of `id` in document order (pre-order, `id` excluded)
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root: id,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Iterate ancestors from the parent outward
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.get(id).map_or(NodeId::NONE, |n| n.parent),
        }
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            return text.to_string();
        }
        self.descendants(id)
            .filter_map(|d| self.get(d).and_then(Node::as_text))
            .collect()
    }

    /// First element in document order whose id equals `id`
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root()).find(|&n| {
            self.get(n)
                .and_then(Node::as_element)
                .is_some_and(|e| e.id.as_deref() == Some(id))
        })
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children, yielding `(id, node)` pairs
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order iterator over a subtree
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next;
        let node = self.tree.get(current)?;

        self.next = if node.first_child.is_valid() {
            node.first_child
        } else {
            // Climb until a next sibling exists, never leaving the subtree
            let mut cursor = current;
            loop {
                if cursor == self.root {
                    break NodeId::NONE;
                }
                let Some(n) = self.tree.get(cursor) else {
                    break NodeId::NONE;
                };
                if n.next_sibling.is_valid() {
                    break n.next_sibling;
                }
                cursor = n.parent;
            }
        };

        Some(current)
    }
}

/// Iterator walking parent links outward
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next;
        self.next = self.tree.get(current)?.parent;
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build() -> (DomTree, NodeId, NodeId, NodeId, NodeId) {
        // <div><span>a</span><p>b</p></div>
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let span = tree.create_element("span");
        let a = tree.create_text("a");
        let p = tree.create_element("p");
        let b = tree.create_text("b");

        tree.append_child(tree.root(), div).unwrap();
        tree.append_child(div, span).unwrap();
        tree.append_child(span, a).unwrap();
        tree.append_child(div, p).unwrap();
        tree.append_child(p, b).unwrap();
        (tree, div, span, p, b)
    }

    #[test]
    fn test_children_order() {
        let (tree, div, span, p, _) = build();
        let ids: Vec<NodeId> = tree.children(div).map(|(id, _)| id).collect();
        assert_eq!(ids, [span, p]);
    }

    #[test]
    fn test_descendants_stay_in_subtree() {
        let (mut tree, div, span, p, b) = build();
        let sibling = tree.create_element("footer");
        tree.append_child(tree.root(), sibling).unwrap();

        let ids: Vec<NodeId> = tree.descendants(span).collect();
        assert_eq!(ids.len(), 1);

        let ids: Vec<NodeId> = tree.descendants(div).collect();
        assert_eq!(ids.len(), 4);
        assert_eq!(ids[2], p);
        assert_eq!(ids[3], b);
        assert!(!ids.contains(&sibling));
    }

    #[test]
    fn test_ancestors_and_text() {
        let (tree, div, _, p, b) = build();
        let up: Vec<NodeId> = tree.ancestors(b).collect();
        assert_eq!(up, [p, div, NodeId::ROOT]);
        assert_eq!(tree.text_content(div), "ab");
    }

    #[test]
    fn test_append_rejects_cycles() {
        let (mut tree, div, span, _, b) = build();
        assert!(matches!(
            tree.append_child(span, div),
            Err(DomError::HierarchyRequest { .. })
        ));
        assert!(tree.append_child(b, span).is_err());
    }

    #[test]
    fn test_append_moves_child() {
        let (mut tree, div, span, p, _) = build();
        tree.append_child(p, span).unwrap();

        let ids: Vec<NodeId> = tree.children(div).map(|(id, _)| id).collect();
        assert_eq!(ids, [p]);
        assert_eq!(tree.parent(span), Some(p));
    }

    #[test]
    fn test_get_element_by_id() {
        let (mut tree, _, _, p, _) = build();
        tree.set_attribute(p, "id", "para").unwrap();
        assert_eq!(tree.get_element_by_id("para"), Some(p));
        assert_eq!(tree.get_element_by_id("missing"), None);
    }
}
