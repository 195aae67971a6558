#![deny(missing_docs)]

//! # XML Example Builder
//!
//! Synthesizes a representative instance document for a complex type.
//!
//! The type graph is walked depth-first: attributes, then simple content or
//! child elements, then the supertype (merged into the same element), then the
//! open-content placeholders. Expansion stops once more than two types are open
//! or when a type is already being expanded, so cyclic graphs terminate.

use crate::error::AppResult;
use crate::example::context::{content_value, ExampleSlot, RenderContext, PLACEHOLDER};
use crate::example::node::{Content, XmlDocument, XmlElement};
use crate::example::ContainerKind;
use crate::model::{Annotated, FacetFilter, QName, TypeDefinition, TypeRegistry};

/// Result of populating one element: its content and the subtree's default
/// namespace (`None` once any namespace-less node was produced).
struct Populated {
    content: Content,
    default_namespace: Option<String>,
}

/// Builds example documents from a [`TypeRegistry`].
///
/// The builder is immutable; each call creates its own render context, so one
/// builder can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct ExampleBuilder<'a> {
    registry: &'a TypeRegistry,
    facets: FacetFilter,
    slot: ExampleSlot,
}

impl<'a> ExampleBuilder<'a> {
    /// Creates a builder accepting every facet and rendering primary values.
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self {
            registry,
            facets: FacetFilter::default(),
            slot: ExampleSlot::Primary,
        }
    }

    /// Sets the facet filter.
    pub fn with_facet_filter(mut self, facets: FacetFilter) -> Self {
        self.facets = facets;
        self
    }

    /// Sets the example slot.
    pub fn with_slot(mut self, slot: ExampleSlot) -> Self {
        self.slot = slot;
        self
    }

    pub(crate) fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    pub(crate) fn slot(&self) -> ExampleSlot {
        self.slot
    }

    /// Whether an attribute or element shows up in examples at all.
    pub(crate) fn is_visible(&self, item: &impl Annotated) -> bool {
        item.deprecation().is_none() && self.facets.accept(item)
    }

    /// Builds the example document for `ty`, wrapped in `containers`
    /// (first container innermost).
    pub fn build_example(
        &self,
        ty: &TypeDefinition,
        containers: &[ContainerKind],
    ) -> AppResult<XmlDocument> {
        let root_name = root_element_name(ty);
        let mut ctx = RenderContext::new(self.slot);
        let populated = self.build(ty, root_name.namespace(), &mut ctx)?;
        let root = XmlElement::new(root_name).with_content(populated.content);

        let document_element = containers.iter().fold(root, |inner, container| {
            XmlElement::new(QName::local(container.element_name())).with_child(inner)
        });
        Ok(XmlDocument::new(document_element))
    }

    /// Builds and serializes the example document.
    pub fn build_example_xml(
        &self,
        ty: &TypeDefinition,
        containers: &[ContainerKind],
    ) -> AppResult<String> {
        self.build_example(ty, containers)?.to_xml_string()
    }

    fn build(
        &self,
        ty: &TypeDefinition,
        element_namespace: Option<&str>,
        ctx: &mut RenderContext,
    ) -> AppResult<Populated> {
        if !ctx.may_enter(&ty.qualified_name) {
            return Ok(Populated {
                content: Content::default(),
                default_namespace: element_namespace.map(str::to_owned),
            });
        }
        ctx.enter(&ty.qualified_name, |ctx| {
            self.populate(ty, element_namespace, ctx)
        })
    }

    fn populate(
        &self,
        ty: &TypeDefinition,
        element_namespace: Option<&str>,
        ctx: &mut RenderContext,
    ) -> AppResult<Populated> {
        let mut default_namespace = element_namespace.map(str::to_owned);
        let mut content = Content::default();

        for attribute in ty.attributes.iter().filter(|a| self.is_visible(*a)) {
            let Some(example) = ctx.example_value(&attribute.example) else {
                continue;
            };
            content.set_attribute(
                QName::new(attribute.namespace.as_deref(), attribute.name.as_str()),
                example,
            );
            if attribute.namespace.is_none() {
                default_namespace = None;
            }
        }

        if let Some(value) = &ty.value {
            content.push_text(content_value(&value.example));
        } else {
            for element in ty.elements.iter().filter(|e| self.is_visible(*e)) {
                let mut children = Vec::new();
                for choice in element.choices() {
                    if choice.namespace.is_none() {
                        default_namespace = None;
                    }
                    let child = XmlElement::new(choice.qname());
                    match self.registry.complex_type(&choice.xml_type)? {
                        Some(child_type) => {
                            let populated =
                                self.build(child_type, choice.namespace.as_deref(), ctx)?;
                            if populated.default_namespace.is_none() {
                                default_namespace = None;
                            }
                            children.push(child.with_content(populated.content));
                        }
                        None => {
                            let Some(example) = ctx.example_value(&choice.example) else {
                                continue;
                            };
                            children.push(child.with_text(example));
                        }
                    }
                }

                match &element.wrapper {
                    Some(wrapper) => {
                        if wrapper.namespace.is_none() {
                            default_namespace = None;
                        }
                        let name = QName::new(wrapper.namespace.as_deref(), wrapper.name.as_str());
                        content.push_element(XmlElement::new(name).with_children(children));
                    }
                    None => children
                        .into_iter()
                        .for_each(|child| content.push_element(child)),
                }
            }
        }

        if let Some(base) = &ty.base_type {
            if let Some(supertype) = self.registry.complex_type(base)? {
                let populated = self.build(supertype, element_namespace, ctx)?;
                if populated.default_namespace.is_none() {
                    default_namespace = None;
                }
                content.merge(populated.content);
            }
        }

        if ty.any_element.as_ref().is_some_and(|any| any.deprecated.is_none()) {
            for name in ["extension1", "extension2"] {
                content.push_element(
                    XmlElement::new(QName::new(default_namespace.as_deref(), name))
                        .with_text(PLACEHOLDER),
                );
            }
        }

        Ok(Populated {
            content,
            default_namespace,
        })
    }
}

/// The document element name: the bound element declaration, or the simple
/// type name with a lower-cased first letter in the type's namespace.
pub fn root_element_name(ty: &TypeDefinition) -> QName {
    match &ty.element {
        Some(declaration) => QName::new(declaration.namespace.as_deref(), declaration.name.as_str()),
        None => {
            let simple = ty.simple_name();
            let mut chars = simple.chars();
            let name: String = match chars.next() {
                Some(first) => first.to_lowercase().chain(chars).collect(),
                None => String::new(),
            };
            QName::new(ty.namespace.as_deref(), name)
        }
    }
}
