//! Document - High-level document API

use crate::{DomTree, NodeId};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with an html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.link_child(tree.root(), html);
        tree.link_child(html, head);
        tree.link_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate html/head/body after the tree was filled externally
    pub fn finalize(&mut self) {
        let tree = &self.tree;
        let find = |parent: NodeId, tag: &str| {
            tree.children(parent)
                .find(|(_, node)| node.as_element().is_some_and(|e| e.name == tag))
                .map_or(NodeId::NONE, |(id, _)| id)
        };

        let html = find(tree.root(), "html");
        let (head, body) = if html.is_valid() {
            (find(html, "head"), find(html, "body"))
        } else {
            (NodeId::NONE, NodeId::NONE)
        };

        tracing::trace!("Finalized document {}: html={:?} head={:?} body={:?}", self.url, html, head, body);
        self.html_element = html;
        self.head_element = head;
        self.body_element = body;
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get document title
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }

        self.tree.children(self.head_element)
            .find(|(_, node)| node.as_element().is_some_and(|e| e.name == "title"))
            .map(|(id, _)| self.tree.text_content(id).trim().to_string())
            .unwrap_or_default()
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.get_element_by_id(id)
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton() {
        let doc = Document::new("about:blank");
        assert_eq!(doc.tree().tag_name(doc.document_element()), Some("html"));
        assert_eq!(doc.tree().tag_name(doc.body()), Some("body"));
        assert_eq!(doc.title(), "");
    }

    #[test]
    fn test_finalize_finds_structure() {
        let mut doc = Document::empty("test://doc");
        let tree = doc.tree_mut();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let title = tree.create_element("title");
        let text = tree.create_text(" Hello ");
        let body = tree.create_element("body");
        tree.append_child(tree.root(), html).unwrap();
        tree.append_child(html, head).unwrap();
        tree.append_child(head, title).unwrap();
        tree.append_child(title, text).unwrap();
        tree.append_child(html, body).unwrap();

        doc.finalize();
        assert_eq!(doc.body(), body);
        assert_eq!(doc.title(), "Hello");
    }
}
