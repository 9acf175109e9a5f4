//! Tree Provider
//!
//! Read-only view of a flattened markup tree, as consumed by the name
//! computation and the attribute checks. Implemented for `fos_dom::DomTree`.

use std::fmt::Debug;
use std::hash::Hash;

use fos_dom::{DomTree, Node, NodeId};

/// Read-only tree access
pub trait AccessibilityTree {
    /// Opaque node handle
    type Node: Copy + Eq + Hash + Debug;

    /// Document root
    fn root(&self) -> Self::Node;

    /// Lower-cased tag name; `None` for non-element nodes
    fn tag_name(&self, node: Self::Node) -> Option<&str>;

    /// Content of a text node
    fn text(&self, node: Self::Node) -> Option<&str>;

    /// Attribute value, case-insensitive name
    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    /// All attributes in enumeration order
    fn attributes(&self, node: Self::Node) -> Vec<(&str, &str)>;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Direct children in document order
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// First element in document order with the given id
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    fn is_element(&self, node: Self::Node) -> bool {
        self.tag_name(node).is_some()
    }

    fn has_attribute(&self, node: Self::Node, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Explicit role: first token of the `role` attribute, lower-cased
    fn explicit_role(&self, node: Self::Node) -> Option<String> {
        self.attribute(node, "role")?
            .split_ascii_whitespace()
            .next()
            .map(str::to_ascii_lowercase)
    }

    /// Role implied by the host language semantics of the element
    fn implicit_role(&self, node: Self::Node) -> Option<&'static str> {
        let tag = self.tag_name(node)?;
        let attr = |name: &str| self.attribute(node, name);

        Some(match tag {
            "a" | "area" if attr("href").is_some() => "link",
            "article" => "article",
            "aside" => "complementary",
            "button" => "button",
            "datalist" => "listbox",
            "dd" => "definition",
            "details" | "fieldset" | "optgroup" => "group",
            "dialog" => "dialog",
            "dt" => "term",
            "figure" => "figure",
            "footer" => "contentinfo",
            "form" => "form",
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => "heading",
            "header" => "banner",
            "hr" => "separator",
            "img" if attr("alt") == Some("") => "presentation",
            "img" => "img",
            "input" => return input_role(attr("type")),
            "li" => "listitem",
            "main" => "main",
            "math" => "math",
            "menu" | "ol" | "ul" => "list",
            "nav" => "navigation",
            "option" => "option",
            "output" => "status",
            "progress" => "progressbar",
            "section" => "region",
            "select" => {
                let multi_row = attr("size")
                    .and_then(|s| s.trim().parse::<u32>().ok())
                    .is_some_and(|s| s > 1);
                if attr("multiple").is_some() || multi_row { "listbox" } else { "combobox" }
            }
            "table" => "table",
            "tbody" | "tfoot" | "thead" => "rowgroup",
            "td" => "cell",
            "textarea" => "textbox",
            "th" => "columnheader",
            "tr" => "row",
            _ => return None,
        })
    }

    /// Resolved role: explicit, else implicit
    fn role(&self, node: Self::Node) -> Option<String> {
        self.explicit_role(node)
            .or_else(|| self.implicit_role(node).map(str::to_string))
    }

    /// Ancestors from the parent outward
    fn ancestors(&self, node: Self::Node) -> Vec<Self::Node> {
        let mut out = Vec::new();
        let mut current = self.parent(node);
        while let Some(n) = current {
            out.push(n);
            current = self.parent(n);
        }
        out
    }

    /// Descendants in document order, `node` excluded
    fn descendants(&self, node: Self::Node) -> Vec<Self::Node> {
        let mut out = Vec::new();
        let mut stack: Vec<Self::Node> = self.children(node).into_iter().rev().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).into_iter().rev());
        }
        out
    }

    /// Concatenated descendant text
    fn text_content(&self, node: Self::Node) -> String {
        if let Some(text) = self.text(node) {
            return text.to_string();
        }
        self.descendants(node)
            .into_iter()
            .filter_map(|n| self.text(n))
            .collect()
    }
}

fn input_role(input_type: Option<&str>) -> Option<&'static str> {
    let input_type = input_type.map(|t| t.trim().to_ascii_lowercase());
    Some(match input_type.as_deref().unwrap_or("text") {
        "button" | "image" | "reset" | "submit" => "button",
        "checkbox" => "checkbox",
        "radio" => "radio",
        "range" => "slider",
        "number" => "spinbutton",
        "search" => "searchbox",
        "hidden" | "color" | "date" | "datetime-local" | "file" | "month" | "password" | "time" | "week" => {
            return None;
        }
        // email, tel, text, url and unknown types all behave as text
        _ => "textbox",
    })
}

impl AccessibilityTree for DomTree {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        DomTree::root(self)
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        DomTree::tag_name(self, node)
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        self.get(node).and_then(Node::as_text)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        DomTree::attribute(self, node, name)
    }

    fn attributes(&self, node: NodeId) -> Vec<(&str, &str)> {
        self.get(node)
            .and_then(Node::as_element)
            .map(|e| e.attrs().map(|a| (a.name.as_str(), a.value.as_str())).collect())
            .unwrap_or_default()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        DomTree::parent(self, node)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        DomTree::children(self, node).map(|(id, _)| id).collect()
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.get_element_by_id(id)
    }

    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        DomTree::descendants(self, node).collect()
    }

    fn text_content(&self, node: NodeId) -> String {
        DomTree::text_content(self, node)
    }
}
