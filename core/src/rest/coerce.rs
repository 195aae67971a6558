//! # Typed Coercion
//!
//! Turns raw request strings and body documents into typed values. Textual
//! targets take the raw string; anything else is wrapped in a throwaway
//! element and handed to an [`Unmarshaller`].

use crate::error::{AppError, AppResult};
use crate::example::{XmlDocument, XmlElement};
use crate::model::{QName, SimpleType, TypeDefinition, TypeRegistry, XmlType};
use crate::rest::operation::ParamType;
use serde_json::{Map, Number, Value};
use std::sync::Arc;

/// Name of the element raw values are wrapped in before unmarshalling.
const WRAPPER_ELEMENT: &str = "unimportant";

/// Key holding simple content when a complex value is unmarshalled.
const CONTENT_KEY: &str = "value";

/// The binding subsystem used to turn XML into typed values.
pub trait Unmarshaller: Send + Sync {
    /// Unmarshals an element into a value of `ty`.
    fn unmarshal(&self, element: &XmlElement, ty: &XmlType) -> AppResult<Value>;

    /// Unmarshals a raw request body.
    fn unmarshal_document(&self, body: &[u8], ty: &XmlType) -> AppResult<Value> {
        let text = std::str::from_utf8(body)
            .map_err(|e| AppError::Unmarshal(format!("Request body is not UTF-8: {}", e)))?;
        let document = XmlDocument::parse(text)?;
        self.unmarshal(&document.root, ty)
    }
}

/// Default unmarshaller backed by the type registry.
#[derive(Debug, Clone)]
pub struct XmlUnmarshaller {
    registry: Arc<TypeRegistry>,
}

impl XmlUnmarshaller {
    /// Creates an unmarshaller over `registry`.
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self { registry }
    }

    fn complex(&self, element: &XmlElement, ty: &TypeDefinition) -> AppResult<Value> {
        let mut object = Map::new();
        self.fill(element, ty, &mut object)?;
        Ok(Value::Object(object))
    }

    fn fill(
        &self,
        element: &XmlElement,
        ty: &TypeDefinition,
        object: &mut Map<String, Value>,
    ) -> AppResult<()> {
        if let Some(base) = &ty.base_type {
            if let Some(base) = self.registry.complex_type(base)? {
                self.fill(element, base, object)?;
            }
        }

        for attribute in &ty.attributes {
            if let Some(raw) = element.attribute(&attribute.name) {
                let value = self.unmarshal(&text_element(raw), &attribute.xml_type)?;
                object.insert(attribute.name.clone(), value);
            }
        }

        if let Some(content) = &ty.value {
            let value = self.unmarshal(element, &content.xml_type)?;
            object.insert(CONTENT_KEY.to_owned(), value);
        }

        for declared in &ty.elements {
            let scope = match &declared.wrapper {
                Some(wrapper) => match element.child(&wrapper.name) {
                    Some(scope) => scope,
                    None => continue,
                },
                None => element,
            };
            for choice in declared.choices() {
                let mut values = scope
                    .child_elements()
                    .filter(|c| c.name.local == choice.name)
                    .map(|c| self.unmarshal(c, &choice.xml_type))
                    .collect::<AppResult<Vec<_>>>()?;
                let value = match values.len() {
                    0 => continue,
                    1 if declared.wrapper.is_none() => values.remove(0),
                    _ => Value::Array(values),
                };
                object.insert(choice.name.clone(), value);
            }
        }
        Ok(())
    }
}

impl Unmarshaller for XmlUnmarshaller {
    fn unmarshal(&self, element: &XmlElement, ty: &XmlType) -> AppResult<Value> {
        match ty {
            XmlType::Simple(simple) => coerce_scalar(&element.text(), *simple),
            XmlType::Complex(name) => {
                let definition = self.registry.get(name).ok_or_else(|| {
                    AppError::Unmarshal(format!("Unknown type '{}'", name))
                })?;
                self.complex(element, definition)
            }
        }
    }
}

fn text_element(raw: &str) -> XmlElement {
    XmlElement::new(QName::new(None, WRAPPER_ELEMENT)).with_text(raw)
}

/// Coerces lexical XML Schema text into a JSON value of the given scalar type.
pub fn coerce_scalar(raw: &str, ty: SimpleType) -> AppResult<Value> {
    let mismatch = || AppError::Unmarshal(format!("'{}' is not a valid {:?} value", raw, ty));
    let trimmed = raw.trim();
    let value = match ty {
        SimpleType::Boolean => match trimmed {
            "true" | "1" => Value::Bool(true),
            "false" | "0" => Value::Bool(false),
            _ => return Err(mismatch()),
        },
        SimpleType::Byte => Value::from(trimmed.parse::<i8>().map_err(|_| mismatch())?),
        SimpleType::Short => Value::from(trimmed.parse::<i16>().map_err(|_| mismatch())?),
        SimpleType::Int => Value::from(trimmed.parse::<i32>().map_err(|_| mismatch())?),
        SimpleType::Integer | SimpleType::Long => {
            Value::from(trimmed.parse::<i64>().map_err(|_| mismatch())?)
        }
        SimpleType::Float | SimpleType::Double | SimpleType::Decimal => {
            let number = trimmed.parse::<f64>().map_err(|_| mismatch())?;
            Value::Number(Number::from_f64(number).ok_or_else(mismatch)?)
        }
        SimpleType::NormalizedString | SimpleType::Token => {
            Value::String(trimmed.split_whitespace().collect::<Vec<_>>().join(" "))
        }
        SimpleType::String | SimpleType::AnyUri | SimpleType::AnySimpleType => {
            Value::String(raw.to_owned())
        }
        SimpleType::Date
        | SimpleType::DateTime
        | SimpleType::Time
        | SimpleType::Duration
        | SimpleType::Base64Binary
        | SimpleType::HexBinary
        | SimpleType::QName => {
            if trimmed.is_empty() {
                return Err(mismatch());
            }
            Value::String(trimmed.to_owned())
        }
    };
    Ok(value)
}

/// Coerces one raw request string into `ty`.
pub fn coerce_text(raw: &str, ty: &XmlType, unmarshaller: &dyn Unmarshaller) -> AppResult<Value> {
    if ty.is_textual() {
        return Ok(Value::String(raw.to_owned()));
    }
    unmarshaller.unmarshal(&text_element(raw), ty)
}

/// Coerces the raw values of a parameter by its declared shape.
///
/// Returns `None` when there are no raw values.
pub fn coerce_values(
    raw: &[&str],
    ty: &ParamType,
    unmarshaller: &dyn Unmarshaller,
) -> AppResult<Option<Value>> {
    if raw.is_empty() {
        return Ok(None);
    }
    match ty {
        ParamType::Scalar(component) => coerce_text(raw[0], component, unmarshaller).map(Some),
        ParamType::Sequence(component) => raw
            .iter()
            .map(|value| coerce_text(value, component, unmarshaller))
            .collect::<AppResult<Vec<_>>>()
            .map(|values| Some(Value::Array(values))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn unmarshaller(yaml: &str) -> XmlUnmarshaller {
        XmlUnmarshaller::new(Arc::new(TypeRegistry::from_yaml_str(yaml).unwrap()))
    }

    #[test]
    fn test_coerce_scalars() {
        assert_eq!(coerce_scalar("42", SimpleType::Int).unwrap(), json!(42));
        assert_eq!(coerce_scalar(" true ", SimpleType::Boolean).unwrap(), json!(true));
        assert_eq!(coerce_scalar("2.5", SimpleType::Double).unwrap(), json!(2.5));
        assert_eq!(
            coerce_scalar("  a \n b ", SimpleType::Token).unwrap(),
            json!("a b")
        );
        assert!(coerce_scalar("300", SimpleType::Byte).is_err());
        assert!(coerce_scalar("yes", SimpleType::Boolean).is_err());
        assert!(coerce_scalar("NaN?", SimpleType::Float).is_err());
    }

    #[test]
    fn test_textual_targets_take_raw_string() {
        let u = unmarshaller("types: []");
        let value = coerce_text(" 07 ", &XmlType::Simple(SimpleType::String), &u).unwrap();
        assert_eq!(value, json!(" 07 "));
        let number = coerce_text(" 07 ", &XmlType::Simple(SimpleType::Int), &u).unwrap();
        assert_eq!(number, json!(7));
    }

    #[test]
    fn test_coerce_values_by_shape() {
        let u = unmarshaller("types: []");
        let raw = ["red", "blue"];
        let scalar = ParamType::Scalar(XmlType::Simple(SimpleType::String));
        let sequence = ParamType::Sequence(XmlType::Simple(SimpleType::String));
        assert_eq!(coerce_values(&raw, &scalar, &u).unwrap(), Some(json!("red")));
        assert_eq!(
            coerce_values(&raw, &sequence, &u).unwrap(),
            Some(json!(["red", "blue"]))
        );
        assert_eq!(coerce_values(&[], &sequence, &u).unwrap(), None);
    }

    #[test]
    fn test_unmarshal_complex_document() {
        let u = unmarshaller(
            r#"
types:
  - qualifiedName: com.example.Base
    attributes:
      - name: id
        type: { simple: long }
  - qualifiedName: com.example.Order
    baseType: { complex: com.example.Base }
    elements:
      - name: note
      - name: line
        type: { simple: int }
        wrapper: { name: lines }
"#,
        );
        let body = br#"<order id="9"><note>rush</note><lines><line>1</line><line>2</line></lines></order>"#;
        let value = u
            .unmarshal_document(body, &XmlType::Complex("com.example.Order".into()))
            .unwrap();
        assert_eq!(value, json!({ "id": 9, "note": "rush", "line": [1, 2] }));
    }

    #[test]
    fn test_unmarshal_failures() {
        let u = unmarshaller("types: []");
        assert!(matches!(
            u.unmarshal_document(b"<broken>", &XmlType::Simple(SimpleType::Int)),
            Err(AppError::Unmarshal(_))
        ));
        assert!(matches!(
            u.unmarshal_document(b"<x/>", &XmlType::Complex("com.example.Nope".into())),
            Err(AppError::Unmarshal(_))
        ));
    }
}
