//! # JSON Example Builder
//!
//! The JSON rendition of the example document. It walks the type graph with the
//! same guard, visibility rules and value resolution as the XML builder; names
//! become object keys and namespaces are dropped.

use crate::error::AppResult;
use crate::example::context::{content_value, RenderContext, PLACEHOLDER};
use crate::example::xml::ExampleBuilder;
use crate::example::ContainerKind;
use crate::model::TypeDefinition;
use serde_json::{Map, Value};

/// Key holding the text of a simple-content type.
pub const VALUE_KEY: &str = "value";

impl ExampleBuilder<'_> {
    /// Builds the JSON example for `ty`, wrapped in `containers` (first container innermost).
    ///
    /// Sequence containers become a one-item array, `map` an object keyed by `"..."`.
    pub fn build_json_example(
        &self,
        ty: &TypeDefinition,
        containers: &[ContainerKind],
    ) -> AppResult<Value> {
        let mut ctx = RenderContext::new(self.slot());
        let root = Value::Object(self.build_json(ty, &mut ctx)?);
        Ok(containers
            .iter()
            .fold(root, |inner, container| match container {
                ContainerKind::Map => {
                    let mut map = Map::new();
                    map.insert(PLACEHOLDER.to_owned(), inner);
                    Value::Object(map)
                }
                ContainerKind::Array | ContainerKind::Collection | ContainerKind::List => {
                    Value::Array(vec![inner])
                }
            }))
    }

    fn build_json(
        &self,
        ty: &TypeDefinition,
        ctx: &mut RenderContext,
    ) -> AppResult<Map<String, Value>> {
        if !ctx.may_enter(&ty.qualified_name) {
            return Ok(Map::new());
        }
        ctx.enter(&ty.qualified_name, |ctx| self.populate_json(ty, ctx))
    }

    fn populate_json(
        &self,
        ty: &TypeDefinition,
        ctx: &mut RenderContext,
    ) -> AppResult<Map<String, Value>> {
        let mut object = Map::new();

        for attribute in ty.attributes.iter().filter(|a| self.is_visible(*a)) {
            if let Some(example) = ctx.example_value(&attribute.example) {
                object.insert(attribute.name.clone(), Value::String(example));
            }
        }

        if let Some(value) = &ty.value {
            object.insert(VALUE_KEY.to_owned(), Value::String(content_value(&value.example)));
        } else {
            for element in ty.elements.iter().filter(|e| self.is_visible(*e)) {
                let mut members = Map::new();
                for choice in element.choices() {
                    let value = match self.registry().complex_type(&choice.xml_type)? {
                        Some(child_type) => Value::Object(self.build_json(child_type, ctx)?),
                        None => match ctx.example_value(&choice.example) {
                            Some(example) => Value::String(example),
                            None => continue,
                        },
                    };
                    members.insert(choice.name.clone(), value);
                }

                match &element.wrapper {
                    Some(wrapper) => {
                        object.insert(wrapper.name.clone(), Value::Object(members));
                    }
                    None => object.extend(members),
                }
            }
        }

        if let Some(base) = &ty.base_type {
            if let Some(supertype) = self.registry().complex_type(base)? {
                for (key, value) in self.build_json(supertype, ctx)? {
                    object.entry(key).or_insert(value);
                }
            }
        }

        if ty.any_element.as_ref().is_some_and(|any| any.deprecated.is_none()) {
            for name in ["extension1", "extension2"] {
                object.insert(name.to_owned(), Value::String(PLACEHOLDER.to_owned()));
            }
        }

        Ok(object)
    }
}
