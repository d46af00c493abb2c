//! Document abstraction consumed by every page component.
//!
//! # Responsibility
//! - Define the minimal tree/attribute/class API the components need.
//! - Provide selector queries and class/style helpers on top of it.
//!
//! # Invariants
//! - Node handles are stable for the document's lifetime; detaching a node
//!   never invalidates its handle.
//! - Removal is idempotent: removing a detached node is `Ok(false)`.
//! - Classes and inline styles live in the `class` / `style` attributes.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod selector;

pub use memory::MemoryDocument;
pub use selector::Selector;

pub type DomResult<T> = Result<T, DomError>;

/// Opaque handle to one node of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Wraps a host-specific node index.
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> usize {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Document access errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// Handle does not belong to this document.
    UnknownNode(NodeId),
    /// Operation requires an element but got a text node.
    NotAnElement(NodeId),
    /// Selector uses syntax outside the supported subset.
    UnsupportedSelector(String),
    /// Tree mutation would break the hierarchy (cycles, root moves).
    HierarchyRequest(String),
}

impl Display for DomError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownNode(node) => write!(f, "unknown node: {node}"),
            Self::NotAnElement(node) => write!(f, "node is not an element: {node}"),
            Self::UnsupportedSelector(selector) => {
                write!(f, "unsupported selector: `{selector}`")
            }
            Self::HierarchyRequest(details) => write!(f, "invalid tree mutation: {details}"),
        }
    }
}

impl Error for DomError {}

/// Scroll animation style for [`Document::scroll_into_view`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

/// Vertical alignment for [`Document::scroll_into_view`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBlock {
    Start,
    Center,
    End,
    Nearest,
}

/// Options for bringing an element into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollIntoView {
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

impl ScrollIntoView {
    /// Smooth scroll aligning the element's top with the viewport's top.
    pub const fn smooth_start() -> Self {
        Self {
            behavior: ScrollBehavior::Smooth,
            block: ScrollBlock::Start,
        }
    }
}

/// Mutable document tree reachable from a single event-loop thread.
///
/// Implementors provide tree and attribute primitives; queries, class lists
/// and inline styles are derived from them.
pub trait Document {
    /// The `<html>` element. Queries search its descendants.
    fn root(&self) -> NodeId;
    fn head(&self) -> NodeId;
    fn body(&self) -> NodeId;

    /// Creates a detached element.
    fn create_element(&mut self, tag_name: &str) -> NodeId;
    /// Creates a detached text node.
    fn create_text(&mut self, text: &str) -> NodeId;

    /// Appends `child` to `parent`, detaching it from any previous parent.
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()>;
    /// Detaches `node` from its parent.
    ///
    /// Returns `Ok(false)` when the node was already detached.
    fn remove(&mut self, node: NodeId) -> DomResult<bool>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;
    fn children(&self, node: NodeId) -> Vec<NodeId>;
    /// Lowercase tag name; `None` for text nodes and unknown handles.
    fn tag_name(&self, node: NodeId) -> Option<&str>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> DomResult<()>;
    fn remove_attribute(&mut self, node: NodeId, name: &str) -> DomResult<()>;

    /// Current form-control value (the live property, not the attribute).
    fn value(&self, node: NodeId) -> String;
    fn set_value(&mut self, node: NodeId, value: &str) -> DomResult<()>;

    /// Concatenated text of the node's subtree.
    fn text_content(&self, node: NodeId) -> String;
    /// Replaces all children with one text node.
    fn set_text_content(&mut self, node: NodeId, text: &str) -> DomResult<()>;

    fn scroll_into_view(&mut self, node: NodeId, options: ScrollIntoView) -> DomResult<()>;

    /// Returns whether `node` is attached under [`Document::root`].
    fn is_connected(&self, node: NodeId) -> bool {
        let root = self.root();
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == root {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Descendants of `scope` in document order, `scope` excluded.
    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).into_iter().rev());
        }
        out
    }

    /// All matches of `selector` under `scope`, in document order.
    fn query_selector_all(&self, scope: NodeId, selector: &str) -> DomResult<Vec<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .descendants(scope)
            .into_iter()
            .filter(|node| selector.matches(self, *node))
            .collect())
    }

    /// First match of `selector` under `scope`.
    fn query_selector(&self, scope: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .descendants(scope)
            .into_iter()
            .find(|node| selector.matches(self, *node)))
    }

    /// First connected element whose `id` attribute equals `id`.
    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|node| self.attribute(*node, "id").as_deref() == Some(id))
    }

    /// Nearest inclusive ancestor matching `selector`.
    fn closest(&self, node: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if selector.matches(self, current) {
                return Ok(Some(current));
            }
            cursor = self.parent(current);
        }
        Ok(None)
    }

    fn class_list(&self, node: NodeId) -> Vec<String> {
        self.attribute(node, "class")
            .map(|value| value.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.class_list(node).iter().any(|value| value == class)
    }

    fn add_class(&mut self, node: NodeId, class: &str) -> DomResult<()> {
        let mut classes = self.class_list(node);
        if classes.iter().any(|value| value == class) {
            return Ok(());
        }
        classes.push(class.to_string());
        self.set_attribute(node, "class", &classes.join(" "))
    }

    fn remove_class(&mut self, node: NodeId, class: &str) -> DomResult<()> {
        let classes = self.class_list(node);
        if !classes.iter().any(|value| value == class) {
            return Ok(());
        }
        let kept = classes
            .into_iter()
            .filter(|value| value != class)
            .collect::<Vec<_>>();
        self.set_attribute(node, "class", &kept.join(" "))
    }

    fn is_disabled(&self, node: NodeId) -> bool {
        self.attribute(node, "disabled").is_some()
    }

    fn set_disabled(&mut self, node: NodeId, disabled: bool) -> DomResult<()> {
        if disabled {
            self.set_attribute(node, "disabled", "")
        } else {
            self.remove_attribute(node, "disabled")
        }
    }

    /// Reads one inline style property (`background`, `backdrop-filter`, ...).
    fn style_property(&self, node: NodeId, property: &str) -> Option<String> {
        parse_style_declarations(self.attribute(node, "style").as_deref())
            .into_iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value)
    }

    /// Sets one inline style property; an empty value removes it.
    fn set_style_property(&mut self, node: NodeId, property: &str, value: &str) -> DomResult<()> {
        let mut declarations = parse_style_declarations(self.attribute(node, "style").as_deref());
        match declarations.iter().position(|(name, _)| name == property) {
            Some(index) if value.is_empty() => {
                declarations.remove(index);
            }
            Some(index) => declarations[index].1 = value.to_string(),
            None if value.is_empty() => {}
            None => declarations.push((property.to_string(), value.to_string())),
        }
        if declarations.is_empty() {
            self.remove_attribute(node, "style")
        } else {
            self.set_attribute(node, "style", &serialize_style_declarations(&declarations))
        }
    }

    /// Detaches every child of `node`.
    fn clear_children(&mut self, node: NodeId) -> DomResult<()> {
        for child in self.children(node) {
            self.remove(child)?;
        }
        Ok(())
    }
}

fn parse_style_declarations(style: Option<&str>) -> Vec<(String, String)> {
    let Some(style) = style else {
        return Vec::new();
    };
    style
        .split(';')
        .filter_map(|declaration| {
            let (name, value) = declaration.split_once(':')?;
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim();
            if name.is_empty() || value.is_empty() {
                return None;
            }
            Some((name, value.to_string()))
        })
        .collect()
}

fn serialize_style_declarations(declarations: &[(String, String)]) -> String {
    declarations
        .iter()
        .map(|(name, value)| format!("{name}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::{Document, MemoryDocument};

    #[test]
    fn class_helpers_keep_list_unique() {
        let mut doc = MemoryDocument::new();
        let div = doc.create_element("div");
        doc.add_class(div, "alert").expect("add class");
        doc.add_class(div, "alert").expect("add class again");
        doc.add_class(div, "show").expect("add class");
        assert_eq!(doc.attribute(div, "class").as_deref(), Some("alert show"));

        doc.remove_class(div, "alert").expect("remove class");
        assert!(!doc.has_class(div, "alert"));
        assert!(doc.has_class(div, "show"));
    }

    #[test]
    fn style_helpers_update_single_property() {
        let mut doc = MemoryDocument::new();
        let nav = doc.create_element("nav");
        doc.set_style_property(nav, "background", "red").expect("set");
        doc.set_style_property(nav, "backdrop-filter", "blur(10px)")
            .expect("set");
        doc.set_style_property(nav, "background", "blue").expect("update");

        assert_eq!(doc.style_property(nav, "background").as_deref(), Some("blue"));
        assert_eq!(
            doc.attribute(nav, "style").as_deref(),
            Some("background: blue; backdrop-filter: blur(10px);")
        );

        doc.set_style_property(nav, "background", "").expect("clear");
        doc.set_style_property(nav, "backdrop-filter", "").expect("clear");
        assert_eq!(doc.attribute(nav, "style"), None);
    }

    #[test]
    fn closest_includes_the_node_itself() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let alert = doc.create_element("div");
        doc.add_class(alert, "alert").expect("class");
        let button = doc.create_element("button");
        doc.append_child(body, alert).expect("append");
        doc.append_child(alert, button).expect("append");

        assert_eq!(doc.closest(button, ".alert").expect("closest"), Some(alert));
        assert_eq!(doc.closest(alert, ".alert").expect("closest"), Some(alert));
        assert_eq!(doc.closest(body, ".alert").expect("closest"), None);
    }
}
