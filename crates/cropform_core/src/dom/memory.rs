//! Arena-backed in-memory document.
//!
//! Used by tests, the CLI and the FFI session. Nodes are never freed;
//! a removed node keeps its handle and subtree and can be re-attached.

use crate::dom::{Document, DomError, DomResult, NodeId, ScrollIntoView};

#[derive(Debug, Clone)]
struct ElementData {
    tag_name: String,
    /// Insertion-ordered so snapshots are deterministic.
    attributes: Vec<(String, String)>,
    /// Live `value` property; falls back to the `value` attribute when unset.
    value: Option<String>,
}

#[derive(Debug, Clone)]
enum NodeKind {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

/// In-memory [`Document`] with `<html>`, `<head>` and `<body>` pre-created.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    scroll_requests: Vec<(NodeId, ScrollIntoView)>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId::from_raw(0),
            head: NodeId::from_raw(0),
            body: NodeId::from_raw(0),
            scroll_requests: Vec::new(),
        };
        doc.root = doc.create_element("html");
        doc.head = doc.create_element("head");
        doc.body = doc.create_element("body");
        doc.nodes[doc.head.raw()].parent = Some(doc.root);
        doc.nodes[doc.body.raw()].parent = Some(doc.root);
        doc.nodes[doc.root.raw()].children = vec![doc.head, doc.body];
        doc
    }

    /// Scroll-into-view requests in the order they were made.
    pub fn scroll_requests(&self) -> &[(NodeId, ScrollIntoView)] {
        &self.scroll_requests
    }

    /// Serializes `node` and its subtree as HTML.
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    /// Serializes the whole document.
    pub fn document_html(&self) -> String {
        format!("<!DOCTYPE html>{}", self.to_html(self.root))
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(entry) = self.nodes.get(node.raw()) else {
            return;
        };
        match &entry.kind {
            NodeKind::Text(text) => out.push_str(&escape_html(text, false)),
            NodeKind::Element(element) => {
                out.push('<');
                out.push_str(&element.tag_name);
                for (name, value) in &element.attributes {
                    out.push(' ');
                    out.push_str(name);
                    if !value.is_empty() {
                        out.push_str("=\"");
                        out.push_str(&escape_html(value, true));
                        out.push('"');
                    }
                }
                out.push('>');
                if is_void_element(&element.tag_name) {
                    return;
                }
                for child in &entry.children {
                    self.write_html(*child, out);
                }
                out.push_str("</");
                out.push_str(&element.tag_name);
                out.push('>');
            }
        }
    }

    fn node(&self, node: NodeId) -> DomResult<&Node> {
        self.nodes.get(node.raw()).ok_or(DomError::UnknownNode(node))
    }

    fn element_mut(&mut self, node: NodeId) -> DomResult<&mut ElementData> {
        let entry = self
            .nodes
            .get_mut(node.raw())
            .ok_or(DomError::UnknownNode(node))?;
        match &mut entry.kind {
            NodeKind::Element(element) => Ok(element),
            NodeKind::Text(_) => Err(DomError::NotAnElement(node)),
        }
    }

    fn element(&self, node: NodeId) -> Option<&ElementData> {
        match &self.nodes.get(node.raw())?.kind {
            NodeKind::Element(element) => Some(element),
            NodeKind::Text(_) => None,
        }
    }

    fn push_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::from_raw(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            kind,
        });
        id
    }

    fn detach(&mut self, node: NodeId) -> bool {
        let Some(parent) = self.nodes[node.raw()].parent.take() else {
            return false;
        };
        self.nodes[parent.raw()].children.retain(|child| *child != node);
        true
    }
}

impl Document for MemoryDocument {
    fn root(&self) -> NodeId {
        self.root
    }

    fn head(&self) -> NodeId {
        self.head
    }

    fn body(&self) -> NodeId {
        self.body
    }

    fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.push_node(NodeKind::Element(ElementData {
            tag_name: tag_name.to_ascii_lowercase(),
            attributes: Vec::new(),
            value: None,
        }))
    }

    fn create_text(&mut self, text: &str) -> NodeId {
        self.push_node(NodeKind::Text(text.to_string()))
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        if self.element(parent).is_none() {
            self.node(parent)?;
            return Err(DomError::NotAnElement(parent));
        }
        self.node(child)?;
        if child == self.root {
            return Err(DomError::HierarchyRequest(
                "document root cannot be re-parented".to_string(),
            ));
        }

        let mut cursor = Some(parent);
        while let Some(current) = cursor {
            if current == child {
                return Err(DomError::HierarchyRequest(format!(
                    "appending {child} under {parent} would create a cycle"
                )));
            }
            cursor = self.nodes[current.raw()].parent;
        }

        self.detach(child);
        self.nodes[child.raw()].parent = Some(parent);
        self.nodes[parent.raw()].children.push(child);
        Ok(())
    }

    fn remove(&mut self, node: NodeId) -> DomResult<bool> {
        self.node(node)?;
        if node == self.root {
            return Err(DomError::HierarchyRequest(
                "document root cannot be removed".to_string(),
            ));
        }
        Ok(self.detach(node))
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.raw())?.parent
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node.raw())
            .map(|entry| entry.children.clone())
            .unwrap_or_default()
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|element| element.tag_name.as_str())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let name = name.to_ascii_lowercase();
        self.element(node)?
            .attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.clone())
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> DomResult<()> {
        let name = name.to_ascii_lowercase();
        let element = self.element_mut(node)?;
        match element.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => element.attributes.push((name, value.to_string())),
        }
        Ok(())
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) -> DomResult<()> {
        let name = name.to_ascii_lowercase();
        let element = self.element_mut(node)?;
        element.attributes.retain(|(key, _)| *key != name);
        Ok(())
    }

    fn value(&self, node: NodeId) -> String {
        let Some(element) = self.element(node) else {
            return String::new();
        };
        match &element.value {
            Some(value) => value.clone(),
            None => self.attribute(node, "value").unwrap_or_default(),
        }
    }

    fn set_value(&mut self, node: NodeId, value: &str) -> DomResult<()> {
        self.element_mut(node)?.value = Some(value.to_string());
        Ok(())
    }

    fn text_content(&self, node: NodeId) -> String {
        let Some(entry) = self.nodes.get(node.raw()) else {
            return String::new();
        };
        match &entry.kind {
            NodeKind::Text(text) => text.clone(),
            NodeKind::Element(_) => entry
                .children
                .iter()
                .map(|child| self.text_content(*child))
                .collect(),
        }
    }

    fn set_text_content(&mut self, node: NodeId, text: &str) -> DomResult<()> {
        self.element_mut(node)?;
        self.clear_children(node)?;
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.append_child(node, text_node)?;
        }
        Ok(())
    }

    fn scroll_into_view(&mut self, node: NodeId, options: ScrollIntoView) -> DomResult<()> {
        self.element_mut(node)?;
        self.scroll_requests.push((node, options));
        Ok(())
    }
}

fn is_void_element(tag_name: &str) -> bool {
    matches!(tag_name, "input" | "br" | "hr" | "img" | "meta" | "link")
}

fn escape_html(value: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}
