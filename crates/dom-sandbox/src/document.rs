//! Minimal document model: a body holding a flat list of child nodes.
//!
//! Elements keep their content as raw markup; the sandbox never parses it.
//! Only direct children of the body have identity, which is all the
//! mount/restore protocol needs to reason about.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use a11y_core_types::NodeId;
use once_cell::sync::Lazy;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::errors::MountError;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    id: NodeId,
    tag_name: String,
    attributes: Vec<(String, String)>,
    inner_html: String,
}

impl Element {
    /// Creates a detached element.
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            id: NodeId::next(),
            tag_name: tag_name.into().trim().to_ascii_lowercase(),
            attributes: Vec::new(),
            inner_html: String::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_inner_html(mut self, html: impl Into<String>) -> Self {
        self.inner_html = html.into();
        self
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn set_inner_html(&mut self, html: impl Into<String>) {
        self.inner_html = html.into();
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }

    pub fn outer_html(&self) -> String {
        let mut out = String::with_capacity(self.inner_html.len() + 16);
        out.push('<');
        out.push_str(&self.tag_name);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&html_escape::encode_double_quoted_attribute(value));
            out.push('"');
        }
        out.push('>');
        if self.inner_html.is_empty() && VOID_ELEMENTS.contains(&self.tag_name.as_str()) {
            return out;
        }
        out.push_str(&self.inner_html);
        out.push_str("</");
        out.push_str(&self.tag_name);
        out.push('>');
        out
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            Node::Element(element) => element.outer_html(),
            Node::Text(text) => html_escape::encode_text(text).into_owned(),
        }
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Node::Element(value)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentBody {
    children: Vec<Node>,
}

impl DocumentBody {
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child_element_count(&self) -> usize {
        self.children
            .iter()
            .filter(|node| node.as_element().is_some())
            .count()
    }

    pub fn first_element(&self) -> Option<&Element> {
        self.children.iter().find_map(Node::as_element)
    }

    pub fn append_element(&mut self, element: Element) -> NodeId {
        let id = element.id();
        self.children.push(Node::Element(element));
        id
    }

    pub fn append_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    pub fn remove_child(&mut self, id: NodeId) -> Option<Element> {
        let index = self
            .children
            .iter()
            .position(|node| matches!(node, Node::Element(el) if el.id() == id))?;
        match self.children.remove(index) {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.children
            .iter()
            .filter_map(Node::as_element)
            .find(|el| el.id() == id)
    }

    pub fn inner_html(&self) -> String {
        self.children.iter().map(Node::to_html).collect()
    }

    pub(crate) fn snapshot(&self) -> Vec<Node> {
        self.children.clone()
    }

    pub(crate) fn replace_children(&mut self, children: Vec<Node>) {
        self.children = children;
    }
}

static GLOBAL_DOCUMENT: Lazy<SharedDocument> = Lazy::new(SharedDocument::new);

/// Handle to a document body shared between checks.
///
/// Every mutation goes through a [`DocumentLease`], which holds exclusive
/// access until dropped.
#[derive(Clone, Debug, Default)]
pub struct SharedDocument {
    body: Arc<Mutex<DocumentBody>>,
}

impl SharedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide document.
    pub fn global() -> Self {
        GLOBAL_DOCUMENT.clone()
    }

    pub async fn lease(&self) -> DocumentLease {
        DocumentLease {
            guard: Arc::clone(&self.body).lock_owned().await,
        }
    }

    pub fn try_lease(&self) -> Result<DocumentLease, MountError> {
        Arc::clone(&self.body)
            .try_lock_owned()
            .map(|guard| DocumentLease { guard })
            .map_err(|_| MountError::DocumentBusy)
    }

    pub fn ptr_eq(&self, other: &SharedDocument) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }
}

#[derive(Debug)]
pub struct DocumentLease {
    guard: OwnedMutexGuard<DocumentBody>,
}

impl Deref for DocumentLease {
    type Target = DocumentBody;

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl DerefMut for DocumentLease {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.guard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn outer_html_escapes_attribute_values() {
        let el = Element::new("A")
            .with_attribute("href", "/search?q=\"x\"&y")
            .with_inner_html("Search");
        assert_eq!(
            el.outer_html(),
            "<a href=\"/search?q=&quot;x&quot;&amp;y\">Search</a>"
        );
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let el = Element::new("img").with_attribute("src", "#");
        assert_eq!(el.outer_html(), "<img src=\"#\">");
    }

    #[test]
    fn set_attribute_replaces_existing_value() {
        let mut el = Element::new("div").with_attribute("id", "a");
        el.set_attribute("ID", "b");
        assert_eq!(el.attributes().len(), 1);
        assert_eq!(el.attribute("id"), Some("b"));
    }

    #[test]
    fn body_tracks_direct_children() {
        let mut body = DocumentBody::default();
        let id = body.append_element(Element::new("div"));
        body.append_text("note");
        assert!(body.contains(id));
        assert_eq!(body.child_element_count(), 1);
        assert_eq!(body.inner_html(), "<div></div>note");

        let removed = body.remove_child(id).unwrap();
        assert_eq!(removed.id(), id);
        assert!(!body.contains(id));
    }

    #[tokio::test]
    async fn try_lease_fails_while_leased() {
        let document = SharedDocument::new();
        let lease = document.lease().await;
        assert!(matches!(document.try_lease(), Err(MountError::DocumentBusy)));
        drop(lease);
        assert!(document.try_lease().is_ok());
    }

    #[test]
    fn global_document_is_shared() {
        assert!(SharedDocument::global().ptr_eq(&SharedDocument::global()));
        assert!(!SharedDocument::new().ptr_eq(&SharedDocument::global()));
    }
}
