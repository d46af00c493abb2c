//! Compound CSS selector subset.
//!
//! Supported: comma-separated groups of compound selectors made of an
//! optional tag, `#id`, `.class` and `[attr]`, `[attr=value]`,
//! `[attr^=value]` parts. Combinators and pseudo-classes are rejected.

use crate::dom::{Document, DomError, DomResult, NodeId};
use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*").expect("valid tag regex"));
static PART_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?:#(?P<id>[A-Za-z_][\w-]*)|\.(?P<class>-?[A-Za-z_][\w-]*)|\[\s*(?P<attr>[A-Za-z_][\w-]*)\s*(?:(?P<op>\^?=)\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<bare>[\w-]+))\s*)?\])"#,
    )
    .expect("valid selector part regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttributeMatch {
    Exists,
    Equals(String),
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributeSelector {
    name: String,
    matcher: AttributeMatch,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CompoundSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeSelector>,
}

impl CompoundSelector {
    fn parse(input: &str, full: &str) -> DomResult<Self> {
        let unsupported = || DomError::UnsupportedSelector(full.to_string());
        let mut compound = Self::default();
        let mut rest = input;

        if let Some(tag) = TAG_RE.find(rest) {
            compound.tag = Some(tag.as_str().to_ascii_lowercase());
            rest = &rest[tag.end()..];
        }

        while !rest.is_empty() {
            let captures = PART_RE.captures(rest).ok_or_else(unsupported)?;
            if let Some(id) = captures.name("id") {
                compound.id = Some(id.as_str().to_string());
            } else if let Some(class) = captures.name("class") {
                compound.classes.push(class.as_str().to_string());
            } else if let Some(attr) = captures.name("attr") {
                let value = captures
                    .name("dq")
                    .or_else(|| captures.name("sq"))
                    .or_else(|| captures.name("bare"))
                    .map(|value| value.as_str().to_string());
                let matcher = match (captures.name("op").map(|op| op.as_str()), value) {
                    (None, _) => AttributeMatch::Exists,
                    (Some("="), Some(value)) => AttributeMatch::Equals(value),
                    (Some("^="), Some(value)) => AttributeMatch::Prefix(value),
                    _ => return Err(unsupported()),
                };
                compound.attributes.push(AttributeSelector {
                    name: attr.as_str().to_ascii_lowercase(),
                    matcher,
                });
            }
            let consumed = captures.get(0).ok_or_else(unsupported)?.end();
            rest = &rest[consumed..];
        }

        if compound == Self::default() {
            return Err(unsupported());
        }
        Ok(compound)
    }

    fn matches<D: Document + ?Sized>(&self, doc: &D, node: NodeId) -> bool {
        let Some(tag_name) = doc.tag_name(node) else {
            return false;
        };
        if let Some(tag) = &self.tag {
            if tag != tag_name {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if doc.attribute(node, "id").as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.is_empty() {
            let classes = doc.class_list(node);
            if !self.classes.iter().all(|class| classes.contains(class)) {
                return false;
            }
        }
        self.attributes.iter().all(|selector| {
            let Some(actual) = doc.attribute(node, &selector.name) else {
                return false;
            };
            match &selector.matcher {
                AttributeMatch::Exists => true,
                AttributeMatch::Equals(expected) => actual == *expected,
                // An empty prefix never matches, as in CSS.
                AttributeMatch::Prefix(prefix) => !prefix.is_empty() && actual.starts_with(prefix),
            }
        })
    }
}

/// Parsed selector list; matches when any group matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    groups: Vec<CompoundSelector>,
}

impl Selector {
    /// Parses a selector list.
    ///
    /// # Errors
    /// - Returns `DomError::UnsupportedSelector` for empty groups, combinators,
    ///   pseudo-classes or malformed parts.
    pub fn parse(input: &str) -> DomResult<Self> {
        let groups = input
            .split(',')
            .map(|group| CompoundSelector::parse(group.trim(), input))
            .collect::<DomResult<Vec<_>>>()?;
        Ok(Self { groups })
    }

    pub fn matches<D: Document + ?Sized>(&self, doc: &D, node: NodeId) -> bool {
        self.groups.iter().any(|group| group.matches(doc, node))
    }
}
