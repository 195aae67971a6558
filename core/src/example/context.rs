//! # Render Context
//!
//! Per-call state of an example build: the stack of type names currently being
//! expanded and the example slot being rendered.

use crate::model::DocumentationExample;
use tracing::debug;

/// Placeholder used when no example value is documented.
pub const PLACEHOLDER: &str = "...";

/// Deepest stack of open types that may still be expanded.
const MAX_OPEN_TYPES: usize = 2;

/// Which annotation value feeds the example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExampleSlot {
    /// The primary `value`.
    #[default]
    Primary,
    /// The alternate `value2`, falling back to the primary value.
    Alternate,
}

/// Guard state for one top-level build call. Never shared between calls.
#[derive(Debug)]
pub(crate) struct RenderContext {
    stack: Vec<String>,
    slot: ExampleSlot,
}

impl RenderContext {
    pub(crate) fn new(slot: ExampleSlot) -> Self {
        Self {
            stack: Vec::new(),
            slot,
        }
    }

    pub(crate) fn slot(&self) -> ExampleSlot {
        self.slot
    }

    /// Whether `qualified_name` may be expanded at the current depth.
    pub(crate) fn may_enter(&self, qualified_name: &str) -> bool {
        if self.stack.len() > MAX_OPEN_TYPES {
            debug!(
                type_name = qualified_name,
                depth = self.stack.len(),
                "Example depth limit reached"
            );
            return false;
        }
        if self.stack.iter().any(|open| open == qualified_name) {
            debug!(
                type_name = qualified_name,
                stack = ?self.stack,
                "Type already being expanded"
            );
            return false;
        }
        true
    }

    /// Runs `f` with `qualified_name` pushed on the stack.
    pub(crate) fn enter<T>(&mut self, qualified_name: &str, f: impl FnOnce(&mut Self) -> T) -> T {
        self.stack.push(qualified_name.to_owned());
        let result = f(self);
        self.stack.pop();
        result
    }

    /// Example text for an attribute or element alternative; `None` when excluded.
    ///
    /// Resolution order: non-blank javadoc override, then the alternate value
    /// (alternate slot only), then the primary value, then [`PLACEHOLDER`].
    pub(crate) fn example_value(&self, example: &DocumentationExample) -> Option<String> {
        if example.exclude {
            return None;
        }
        let alternate = match self.slot {
            ExampleSlot::Alternate => example.alternate(),
            ExampleSlot::Primary => None,
        };
        let value = example
            .override_tag()
            .or(alternate)
            .or_else(|| example.primary())
            .unwrap_or(PLACEHOLDER);
        Some(value.to_owned())
    }
}

/// Example text for simple content, which has no alternate slot and cannot be excluded.
pub(crate) fn content_value(example: &DocumentationExample) -> String {
    example
        .override_tag()
        .or_else(|| example.primary())
        .unwrap_or(PLACEHOLDER)
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example(tag: Option<&str>, value: Option<&str>, value2: Option<&str>) -> DocumentationExample {
        DocumentationExample {
            tag: tag.map(String::from),
            value: value.map(String::from),
            value2: value2.map(String::from),
            exclude: false,
        }
    }

    #[test]
    fn test_depth_and_cycle_guard() {
        let mut ctx = RenderContext::new(ExampleSlot::Primary);
        assert!(ctx.may_enter("a.A"));
        ctx.enter("a.A", |ctx| {
            assert!(!ctx.may_enter("a.A"));
            ctx.enter("a.B", |ctx| {
                ctx.enter("a.C", |ctx| {
                    // three open types: nothing else may be expanded
                    assert!(!ctx.may_enter("a.D"));
                });
                assert!(ctx.may_enter("a.D"));
            });
        });
        assert!(ctx.may_enter("a.A"));
    }

    #[test]
    fn test_resolution_order() {
        let ctx = RenderContext::new(ExampleSlot::Primary);
        assert_eq!(
            ctx.example_value(&example(Some("tag"), Some("v"), Some("v2"))),
            Some("tag".to_string())
        );
        assert_eq!(
            ctx.example_value(&example(None, Some("v"), Some("v2"))),
            Some("v".to_string())
        );
        assert_eq!(
            ctx.example_value(&example(Some(" "), None, None)),
            Some(PLACEHOLDER.to_string())
        );
    }

    #[test]
    fn test_alternate_slot() {
        let ctx = RenderContext::new(ExampleSlot::Alternate);
        assert_eq!(
            ctx.example_value(&example(None, Some("v"), Some("v2"))),
            Some("v2".to_string())
        );
        assert_eq!(
            ctx.example_value(&example(None, Some("v"), None)),
            Some("v".to_string())
        );
    }

    #[test]
    fn test_exclusion_is_never_defaulted() {
        let ctx = RenderContext::new(ExampleSlot::Primary);
        let mut excluded = example(Some("tag"), None, None);
        excluded.exclude = true;
        assert_eq!(ctx.example_value(&excluded), None);
    }

    #[test]
    fn test_content_value() {
        assert_eq!(content_value(&example(None, None, Some("v2"))), PLACEHOLDER);
        assert_eq!(content_value(&example(None, Some("42"), None)), "42");
    }
}
