#![deny(missing_docs)]

//! # Type Metadata
//!
//! The pre-resolved JAXB type graph: complex type definitions with their
//! attributes, elements, simple content, supertype and open-content point.
//!
//! Complex references are stored as qualified names and resolved through
//! [`TypeRegistry`](crate::model::TypeRegistry), so cyclic graphs need no shared ownership.

use crate::error::{AppError, AppResult};
use crate::model::qname::QName;
use serde::{Deserialize, Serialize};

/// Sentinel used by annotation processors for "value not set".
pub const UNSET_SENTINEL: &str = "##default";

/// Built-in XML Schema scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SimpleType {
    /// `xs:string`
    #[default]
    String,
    /// `xs:normalizedString`
    NormalizedString,
    /// `xs:token`
    Token,
    /// `xs:anyURI`
    #[serde(rename = "anyURI")]
    AnyUri,
    /// `xs:anySimpleType`
    AnySimpleType,
    /// `xs:boolean`
    Boolean,
    /// `xs:byte`
    Byte,
    /// `xs:short`
    Short,
    /// `xs:int`
    Int,
    /// `xs:integer`
    Integer,
    /// `xs:long`
    Long,
    /// `xs:float`
    Float,
    /// `xs:double`
    Double,
    /// `xs:decimal`
    Decimal,
    /// `xs:date`
    Date,
    /// `xs:dateTime`
    DateTime,
    /// `xs:time`
    Time,
    /// `xs:duration`
    Duration,
    /// `xs:base64Binary`
    Base64Binary,
    /// `xs:hexBinary`
    HexBinary,
    /// `xs:QName`
    #[serde(rename = "QName")]
    QName,
}

impl SimpleType {
    /// Whether values of this type are plain text and need no unmarshalling.
    pub fn is_textual(self) -> bool {
        matches!(
            self,
            SimpleType::String
                | SimpleType::NormalizedString
                | SimpleType::Token
                | SimpleType::AnyUri
                | SimpleType::AnySimpleType
        )
    }
}

/// The declared value type of an attribute, element or parameter.
///
/// Written as a single-key map in both YAML and JSON: `{ simple: int }` or
/// `{ complex: com.example.Address }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "XmlTypeRepr", into = "XmlTypeRepr")]
pub enum XmlType {
    /// A scalar schema type.
    Simple(SimpleType),
    /// A reference to a complex type by qualified name.
    Complex(String),
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct XmlTypeRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    simple: Option<SimpleType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    complex: Option<String>,
}

impl TryFrom<XmlTypeRepr> for XmlType {
    type Error = AppError;

    fn try_from(repr: XmlTypeRepr) -> Result<Self, Self::Error> {
        match (repr.simple, repr.complex) {
            (Some(simple), None) => Ok(XmlType::Simple(simple)),
            (None, Some(complex)) => Ok(XmlType::Complex(complex)),
            _ => Err(AppError::General(
                "A type needs exactly one of 'simple' or 'complex'".into(),
            )),
        }
    }
}

impl From<XmlType> for XmlTypeRepr {
    fn from(ty: XmlType) -> Self {
        match ty {
            XmlType::Simple(simple) => XmlTypeRepr {
                simple: Some(simple),
                complex: None,
            },
            XmlType::Complex(complex) => XmlTypeRepr {
                simple: None,
                complex: Some(complex),
            },
        }
    }
}

impl Default for XmlType {
    fn default() -> Self {
        XmlType::Simple(SimpleType::String)
    }
}

impl XmlType {
    /// Whether this type is bound as plain text.
    pub fn is_textual(&self) -> bool {
        matches!(self, XmlType::Simple(simple) if simple.is_textual())
    }
}

/// Documentation hints controlling the example value of a model item.
///
/// `tag` is the `documentationExample` javadoc tag; `value`, `value2` and
/// `exclude` come from the example annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentationExample {
    /// Javadoc override. Blank tags are ignored.
    pub tag: Option<String>,
    /// Primary annotation value.
    pub value: Option<String>,
    /// Alternate annotation value, used for the second example slot.
    pub value2: Option<String>,
    /// Leave the item out of examples entirely.
    pub exclude: bool,
}

impl DocumentationExample {
    /// The non-blank javadoc override, trimmed.
    pub fn override_tag(&self) -> Option<&str> {
        self.tag.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// The primary annotation value, if set.
    pub fn primary(&self) -> Option<&str> {
        set_value(&self.value)
    }

    /// The alternate annotation value, if set.
    pub fn alternate(&self) -> Option<&str> {
        set_value(&self.value2)
    }
}

fn set_value(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| *v != UNSET_SENTINEL)
}

/// Common view over annotated model items.
pub trait Annotated {
    /// Deprecation message, when the item is deprecated.
    fn deprecation(&self) -> Option<&str>;
    /// Facet tags attached to the item.
    fn facets(&self) -> &[String];
    /// Documentation example hints.
    fn example(&self) -> &DocumentationExample;
}

/// An XML attribute of a complex type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name.
    pub name: String,
    /// Attribute namespace (`None` = no namespace).
    #[serde(default)]
    pub namespace: Option<String>,
    /// Declared value type.
    #[serde(rename = "type", default)]
    pub xml_type: XmlType,
    /// Example hints.
    #[serde(default)]
    pub example: DocumentationExample,
    /// Deprecation message.
    #[serde(default)]
    pub deprecated: Option<String>,
    /// Facet tags.
    #[serde(default)]
    pub facets: Vec<String>,
}

impl Annotated for Attribute {
    fn deprecation(&self) -> Option<&str> {
        self.deprecated.as_deref()
    }

    fn facets(&self) -> &[String] {
        &self.facets
    }

    fn example(&self) -> &DocumentationExample {
        &self.example
    }
}

/// Wrapper element around a collection-valued element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementWrapper {
    /// Wrapper element name.
    pub name: String,
    /// Wrapper namespace.
    #[serde(default)]
    pub namespace: Option<String>,
}

/// A child element declaration.
///
/// An element with `choices` is a choice group; each alternative is itself an
/// element. An element without alternatives is its own single choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Element name.
    pub name: String,
    /// Element namespace (`None` = no namespace).
    #[serde(default)]
    pub namespace: Option<String>,
    /// Declared value type.
    #[serde(rename = "type", default)]
    pub xml_type: XmlType,
    /// Example hints.
    #[serde(default)]
    pub example: DocumentationExample,
    /// Deprecation message.
    #[serde(default)]
    pub deprecated: Option<String>,
    /// Facet tags.
    #[serde(default)]
    pub facets: Vec<String>,
    /// Optional wrapper element.
    #[serde(default)]
    pub wrapper: Option<ElementWrapper>,
    /// Substitutable alternatives at this position.
    #[serde(default)]
    pub choices: Vec<Element>,
}

impl Element {
    /// The alternatives permitted at this position.
    pub fn choices(&self) -> &[Element] {
        if self.choices.is_empty() {
            std::slice::from_ref(self)
        } else {
            &self.choices
        }
    }

    /// The qualified element name.
    pub fn qname(&self) -> QName {
        QName::new(self.namespace.as_deref(), self.name.as_str())
    }
}

impl Annotated for Element {
    fn deprecation(&self) -> Option<&str> {
        self.deprecated.as_deref()
    }

    fn facets(&self) -> &[String] {
        &self.facets
    }

    fn example(&self) -> &DocumentationExample {
        &self.example
    }
}

/// Text content of a simple-content complex type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleContent {
    /// Declared value type.
    #[serde(rename = "type", default)]
    pub xml_type: XmlType,
    /// Example hints.
    #[serde(default)]
    pub example: DocumentationExample,
}

/// An `xs:any` open-content point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnyElement {
    /// Deprecation message.
    #[serde(default)]
    pub deprecated: Option<String>,
}

/// A global element bound to a type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementDeclaration {
    /// Element name.
    pub name: String,
    /// Element namespace.
    #[serde(default)]
    pub namespace: Option<String>,
}

/// A complex type definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefinition {
    /// Identity of the type (the bound class name, e.g. `com.example.Person`).
    pub qualified_name: String,
    /// Explicit simple name; derived from `qualified_name` when absent.
    #[serde(default)]
    pub simple_name: Option<String>,
    /// XML type namespace.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Attributes in declaration order.
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    /// Child elements in declaration order.
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Simple content (mutually exclusive with `elements`).
    #[serde(default)]
    pub value: Option<SimpleContent>,
    /// Supertype.
    #[serde(default)]
    pub base_type: Option<XmlType>,
    /// Open-content point.
    #[serde(default)]
    pub any_element: Option<AnyElement>,
    /// Root element binding.
    #[serde(default)]
    pub element: Option<ElementDeclaration>,
}

impl TypeDefinition {
    /// Creates an empty type with the given identity.
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            ..Self::default()
        }
    }

    /// The simple (unqualified) type name.
    pub fn simple_name(&self) -> &str {
        match &self.simple_name {
            Some(name) => name,
            None => self
                .qualified_name
                .rsplit(['.', '$'])
                .next()
                .unwrap_or(&self.qualified_name),
        }
    }

    /// Checks the structural invariants of the definition.
    pub fn validate(&self) -> AppResult<()> {
        if self.qualified_name.trim().is_empty() {
            return Err(AppError::General(
                "Type definition without a qualified name".into(),
            ));
        }
        if self.value.is_some() && !self.elements.is_empty() {
            return Err(AppError::General(format!(
                "Type '{}' declares both simple content and child elements",
                self.qualified_name
            )));
        }
        Ok(())
    }

    /// Every complex type referenced from attributes, elements, choices and the supertype.
    pub fn referenced_types(&self) -> Vec<&str> {
        fn complex(ty: &XmlType) -> Option<&str> {
            match ty {
                XmlType::Complex(name) => Some(name),
                XmlType::Simple(_) => None,
            }
        }

        let mut refs: Vec<&str> = Vec::new();
        refs.extend(self.attributes.iter().filter_map(|a| complex(&a.xml_type)));
        for element in &self.elements {
            refs.extend(element.choices().iter().filter_map(|c| complex(&c.xml_type)));
        }
        if let Some(value) = &self.value {
            refs.extend(complex(&value.xml_type));
        }
        if let Some(base) = &self.base_type {
            refs.extend(complex(base));
        }
        refs
    }
}
