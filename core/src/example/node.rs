#![deny(missing_docs)]

//! # XML Tree
//!
//! An immutable XML tree built bottom-up by the example builder and written out
//! in one pass. The same tree is produced when reading request documents, so
//! the unmarshaller and the tests share one representation.

use crate::error::{AppError, AppResult};
use crate::model::QName;
use indexmap::IndexMap;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

/// A node of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// A nested element.
    Element(XmlElement),
    /// Character data.
    Text(String),
}

/// A namespaced attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// Attribute name.
    pub name: QName,
    /// Attribute value.
    pub value: String,
}

/// An element with its attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// Element name.
    pub name: QName,
    /// Attributes in insertion order.
    pub attributes: Vec<XmlAttribute>,
    /// Child nodes in document order.
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// Creates an empty element.
    pub fn new(name: QName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Returns the element with an attribute set (replacing one of the same name).
    pub fn with_attribute(mut self, name: QName, value: impl Into<String>) -> Self {
        set_attribute(&mut self.attributes, name, value.into());
        self
    }

    /// Returns the element with a child element appended.
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    /// Returns the element with child elements appended.
    pub fn with_children(mut self, children: impl IntoIterator<Item = XmlElement>) -> Self {
        self.children
            .extend(children.into_iter().map(XmlNode::Element));
        self
    }

    /// Returns the element with a text node appended.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    /// Returns the element with populated content merged in.
    pub(crate) fn with_content(mut self, content: Content) -> Self {
        for attribute in content.attributes {
            set_attribute(&mut self.attributes, attribute.name, attribute.value);
        }
        self.children.extend(content.children);
        self
    }

    /// Concatenated text of the direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                XmlNode::Text(text) => Some(text.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    /// Direct child elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// The first direct child element with the given local name.
    pub fn child(&self, local: &str) -> Option<&XmlElement> {
        self.child_elements().find(|c| c.name.local == local)
    }

    /// The value of the attribute with the given local name.
    pub fn attribute(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.local == local)
            .map(|a| a.value.as_str())
    }
}

fn set_attribute(attributes: &mut Vec<XmlAttribute>, name: QName, value: String) {
    match attributes.iter_mut().find(|a| a.name == name) {
        Some(existing) => existing.value = value,
        None => attributes.push(XmlAttribute { name, value }),
    }
}

/// Attributes and children produced for one element by a populate pass.
///
/// Supertype passes write into the same element, so their content is merged.
#[derive(Debug, Default)]
pub(crate) struct Content {
    pub(crate) attributes: Vec<XmlAttribute>,
    pub(crate) children: Vec<XmlNode>,
}

impl Content {
    pub(crate) fn set_attribute(&mut self, name: QName, value: String) {
        set_attribute(&mut self.attributes, name, value);
    }

    pub(crate) fn push_element(&mut self, element: XmlElement) {
        self.children.push(XmlNode::Element(element));
    }

    pub(crate) fn push_text(&mut self, text: String) {
        self.children.push(XmlNode::Text(text));
    }

    pub(crate) fn merge(&mut self, other: Content) {
        for attribute in other.attributes {
            self.set_attribute(attribute.name, attribute.value);
        }
        self.children.extend(other.children);
    }
}

/// A complete document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    /// The document element.
    pub root: XmlElement,
}

impl XmlDocument {
    /// Wraps a document element.
    pub fn new(root: XmlElement) -> Self {
        Self { root }
    }

    /// Writes the document with 2-space indentation and no XML declaration.
    ///
    /// Default namespace declarations are emitted wherever the element
    /// namespace differs from its parent's; namespaced attributes get
    /// generated `nsN` prefixes declared on the element that uses them.
    pub fn to_xml_string(&self) -> AppResult<String> {
        self.to_xml_string_with_prefixes(&IndexMap::new())
    }

    /// Like [`to_xml_string`](Self::to_xml_string), with a namespace URI to
    /// prefix map whose entries are all declared on the document element and
    /// used for namespaced attributes.
    pub fn to_xml_string_with_prefixes(
        &self,
        prefixes: &IndexMap<String, String>,
    ) -> AppResult<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        let mut scope = PrefixScope {
            fixed: prefixes,
            generated: IndexMap::new(),
        };
        write_element(&mut writer, &self.root, None, &mut scope, true)?;
        String::from_utf8(writer.into_inner()).map_err(|e| AppError::Generation(e.to_string()))
    }

    /// Reads a document. Whitespace-only text nodes are dropped.
    pub fn parse(text: &str) -> AppResult<Self> {
        let doc = roxmltree::Document::parse(text)
            .map_err(|e| AppError::Unmarshal(format!("Malformed XML document: {}", e)))?;
        Ok(Self::new(read_element(doc.root_element())))
    }
}

struct PrefixScope<'p> {
    fixed: &'p IndexMap<String, String>,
    generated: IndexMap<String, String>,
}

impl PrefixScope<'_> {
    /// The prefix for `namespace`, and whether the element must declare it.
    fn prefix(&mut self, namespace: &str) -> (String, bool) {
        if let Some(prefix) = self.fixed.get(namespace) {
            return (prefix.clone(), false);
        }
        if let Some(prefix) = self.generated.get(namespace) {
            return (prefix.clone(), true);
        }
        let mut index = self.generated.len();
        let prefix = loop {
            let candidate = format!("ns{}", index);
            if !self.fixed.values().any(|taken| *taken == candidate) {
                break candidate;
            }
            index += 1;
        };
        self.generated.insert(namespace.to_owned(), prefix.clone());
        (prefix, true)
    }
}

fn write_element<W: Write>(
    writer: &mut Writer<W>,
    element: &XmlElement,
    inherited_namespace: Option<&str>,
    scope: &mut PrefixScope<'_>,
    root: bool,
) -> AppResult<()> {
    let name = element.name.local.as_str();
    let namespace = element.name.namespace();
    let mut start = BytesStart::new(name);

    if namespace != inherited_namespace {
        start.push_attribute(("xmlns", namespace.unwrap_or("")));
    }
    if root {
        for (uri, prefix) in scope.fixed {
            start.push_attribute((format!("xmlns:{}", prefix).as_str(), uri.as_str()));
        }
    }

    let mut declared: Vec<&str> = Vec::new();
    let mut qualified: Vec<(String, &str)> = Vec::with_capacity(element.attributes.len());
    for attribute in &element.attributes {
        match attribute.name.namespace() {
            None => qualified.push((attribute.name.local.clone(), &attribute.value)),
            Some(attribute_ns) => {
                let (prefix, declare) = scope.prefix(attribute_ns);
                if declare && !declared.contains(&attribute_ns) {
                    start.push_attribute((format!("xmlns:{}", prefix).as_str(), attribute_ns));
                    declared.push(attribute_ns);
                }
                qualified.push((format!("{}:{}", prefix, attribute.name.local), &attribute.value));
            }
        }
    }
    for (key, value) in &qualified {
        start.push_attribute((key.as_str(), *value));
    }

    if element.children.is_empty() {
        return emit(writer, Event::Empty(start));
    }

    emit(writer, Event::Start(start))?;
    for child in &element.children {
        match child {
            XmlNode::Text(text) => emit(writer, Event::Text(BytesText::new(text)))?,
            XmlNode::Element(nested) => write_element(writer, nested, namespace, scope, false)?,
        }
    }
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> AppResult<()> {
    writer
        .write_event(event)
        .map_err(|e| AppError::Generation(format!("Failed to write XML: {}", e)))
}

fn read_element(node: roxmltree::Node<'_, '_>) -> XmlElement {
    let tag = node.tag_name();
    let mut element = XmlElement::new(QName::new(tag.namespace(), tag.name()));
    for attribute in node.attributes() {
        element = element.with_attribute(
            QName::new(attribute.namespace(), attribute.name()),
            attribute.value(),
        );
    }
    for child in node.children() {
        if child.is_element() {
            element = element.with_child(read_element(child));
        } else if let Some(text) = child.text().filter(|_| child.is_text()) {
            if !text.trim().is_empty() {
                element = element.with_text(text);
            }
        }
    }
    element
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ns(namespace: &str, local: &str) -> QName {
        QName::new(Some(namespace), local)
    }

    #[test]
    fn test_write_nested_with_indentation() {
        let doc = XmlDocument::new(
            XmlElement::new(QName::local("order"))
                .with_attribute(QName::local("id"), "7")
                .with_child(XmlElement::new(QName::local("item")).with_text("...")),
        );
        let xml = doc.to_xml_string().unwrap();
        assert!(!xml.starts_with("<?xml"));
        assert!(xml.contains("<order id=\"7\">"));
        assert!(xml.contains("\n  <item>...</item>"));
        assert!(xml.trim_end().ends_with("</order>"));
    }

    #[test]
    fn test_namespace_declarations_follow_scope() {
        let doc = XmlDocument::new(
            XmlElement::new(ns("urn:a", "root"))
                .with_child(XmlElement::new(ns("urn:a", "same")).with_text("x"))
                .with_child(XmlElement::new(QName::local("bare")).with_text("y")),
        );
        let xml = doc.to_xml_string().unwrap();
        assert!(xml.contains("<root xmlns=\"urn:a\">"));
        assert!(xml.contains("<same>x</same>"));
        assert!(xml.contains("<bare xmlns=\"\">y</bare>"));

        let parsed = XmlDocument::parse(&xml).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_namespaced_attribute_gets_prefix() {
        let doc = XmlDocument::new(
            XmlElement::new(QName::local("root")).with_attribute(ns("urn:attr", "lang"), "en"),
        );
        let xml = doc.to_xml_string().unwrap();
        assert!(xml.contains("xmlns:ns0=\"urn:attr\""));
        assert!(xml.contains("ns0:lang=\"en\""));

        let parsed = XmlDocument::parse(&xml).unwrap();
        assert_eq!(parsed.root.attributes[0].name, ns("urn:attr", "lang"));
    }

    #[test]
    fn test_configured_prefixes_declared_on_root() {
        let mut prefixes = IndexMap::new();
        prefixes.insert("urn:shop".to_owned(), "shop".to_owned());
        prefixes.insert("urn:other".to_owned(), "ns0".to_owned());
        let doc = XmlDocument::new(
            XmlElement::new(QName::local("root"))
                .with_child(
                    XmlElement::new(QName::local("item"))
                        .with_attribute(ns("urn:shop", "sku"), "A1")
                        .with_attribute(ns("urn:attr", "lang"), "en"),
                ),
        );
        let xml = doc.to_xml_string_with_prefixes(&prefixes).unwrap();
        assert!(xml.starts_with("<root xmlns:shop=\"urn:shop\" xmlns:ns0=\"urn:other\">"));
        assert!(xml.contains("<item xmlns:ns1=\"urn:attr\" shop:sku=\"A1\" ns1:lang=\"en\"/>"));

        let parsed = XmlDocument::parse(&xml).unwrap();
        let item = parsed.root.child("item").unwrap();
        assert_eq!(item.attributes[0].name, ns("urn:shop", "sku"));
        assert_eq!(item.attributes[1].name, ns("urn:attr", "lang"));
    }

    #[test]
    fn test_text_is_escaped() {
        let doc = XmlDocument::new(XmlElement::new(QName::local("t")).with_text("a < b & c"));
        let xml = doc.to_xml_string().unwrap();
        assert!(xml.contains("a &lt; b &amp; c"));
        assert_eq!(XmlDocument::parse(&xml).unwrap().root.text(), "a < b & c");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let err = XmlDocument::parse("<open>").unwrap_err();
        assert!(matches!(err, AppError::Unmarshal(_)));
    }

    #[test]
    fn test_attribute_replacement() {
        let element = XmlElement::new(QName::local("e"))
            .with_attribute(QName::local("a"), "1")
            .with_attribute(QName::local("a"), "2");
        assert_eq!(element.attributes.len(), 1);
        assert_eq!(element.attribute("a"), Some("2"));
    }
}
