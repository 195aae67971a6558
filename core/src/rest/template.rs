//! # URI Templates
//!
//! Matches request paths against a resource template such as
//! `/stores/{store}/orders/{}`: `{name}` is a context parameter, `{}` is the
//! proper noun slot. A trailing proper noun slot may be omitted by the request.

use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use percent_encoding::percent_decode_str;
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Context(String),
    ProperNoun,
}

/// Raw values extracted from a matched path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathValues {
    /// The proper noun segment, when present.
    pub proper_noun: Option<String>,
    /// Context parameter values by name, in template order.
    pub context: IndexMap<String, String>,
}

/// A compiled resource URI template.
#[derive(Debug, Clone)]
pub struct UriTemplate {
    template: String,
    regex: Regex,
    slots: Vec<Slot>,
}

impl UriTemplate {
    /// Compiles a template.
    pub fn parse(template: &str) -> AppResult<Self> {
        let segments: Vec<&str> = template.split('/').filter(|s| !s.is_empty()).collect();
        let mut pattern = String::with_capacity(template.len() + 16);
        pattern.push('^');
        let mut slots = Vec::new();

        for (i, segment) in segments.iter().enumerate() {
            let is_last = i + 1 == segments.len();
            if *segment == "{}" {
                if slots.contains(&Slot::ProperNoun) {
                    return Err(AppError::General(format!(
                        "Template '{}' declares more than one proper noun slot",
                        template
                    )));
                }
                slots.push(Slot::ProperNoun);
                pattern.push_str(if is_last {
                    "(?:/([^/]+))?"
                } else {
                    "/([^/]+)"
                });
            } else if let Some(name) = segment
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
            {
                if slots.contains(&Slot::Context(name.to_owned())) {
                    return Err(AppError::General(format!(
                        "Template '{}' repeats context parameter '{}'",
                        template, name
                    )));
                }
                slots.push(Slot::Context(name.to_owned()));
                pattern.push_str("/([^/]+)");
            } else {
                pattern.push('/');
                pattern.push_str(&regex::escape(segment));
            }
        }
        pattern.push_str("/?$");

        let regex = Regex::new(&pattern).map_err(|e| {
            AppError::General(format!("Invalid URI template '{}': {}", template, e))
        })?;
        Ok(Self {
            template: template.to_owned(),
            regex,
            slots,
        })
    }

    /// The template text.
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Names of the context parameters in template order.
    pub fn context_parameters(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Context(name) => Some(name.as_str()),
            Slot::ProperNoun => None,
        })
    }

    /// Extracts the slot values of `path`, or `None` when it does not match.
    pub fn match_path(&self, path: &str) -> Option<PathValues> {
        let captures = self.regex.captures(path)?;
        let mut values = PathValues::default();
        for (i, slot) in self.slots.iter().enumerate() {
            let Some(raw) = captures.get(i + 1) else {
                continue;
            };
            let decoded = percent_decode_str(raw.as_str())
                .decode_utf8_lossy()
                .into_owned();
            match slot {
                Slot::ProperNoun => values.proper_noun = Some(decoded),
                Slot::Context(name) => {
                    values.context.insert(name.clone(), decoded);
                }
            }
        }
        Some(values)
    }
}
