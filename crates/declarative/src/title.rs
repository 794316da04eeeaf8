//! Title patterns - turning a raw resource title into identity attributes
//!
//! A resource type declares an ordered list of patterns. Each pattern is a
//! regex plus one extractor per capture group naming the attribute it fills.
//! The first pattern that matches the whole title wins.

use crate::error::{Error, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

/// Transforms a captured substring into an attribute value
pub type Extractor = fn(&str) -> String;

/// Extractor that keeps the capture unchanged
pub fn identity(capture: &str) -> String {
    capture.to_string()
}

/// One (pattern, extractors) rule
pub struct TitlePattern {
    regex: Regex,
    bindings: Vec<(&'static str, Extractor)>,
}

impl TitlePattern {
    /// Build a rule; `bindings[i]` receives capture group `i + 1`
    pub fn new(
        pattern: &str,
        bindings: Vec<(&'static str, Extractor)>,
    ) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            bindings,
        })
    }

    /// The regex source of this rule
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Attribute names this rule fills, in capture order
    pub fn attributes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.bindings.iter().map(|(name, _)| *name)
    }

    /// Apply the rule to a title
    ///
    /// Returns `None` unless the regex matches the entire title.
    pub fn apply(&self, title: &str) -> Option<BTreeMap<String, String>> {
        let captures = self.regex.captures(title)?;
        let whole = captures.get(0)?;
        if whole.start() != 0 || whole.end() != title.len() {
            return None;
        }

        let mut attributes = BTreeMap::new();
        for (index, (name, extract)) in self.bindings.iter().enumerate() {
            if let Some(capture) = captures.get(index + 1) {
                attributes.insert((*name).to_string(), extract(capture.as_str()));
            }
        }
        Some(attributes)
    }
}

impl fmt::Debug for TitlePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TitlePattern")
            .field("pattern", &self.regex.as_str())
            .field("attributes", &self.attributes().collect::<Vec<_>>())
            .finish()
    }
}

/// Resolve a title against a type's patterns, first match wins
pub fn resolve_title(
    resource_type: &str,
    patterns: &[TitlePattern],
    title: &str,
) -> Result<BTreeMap<String, String>> {
    for pattern in patterns {
        if let Some(attributes) = pattern.apply(title) {
            log::trace!(
                "{resource_type}: title {title:?} matched {}",
                pattern.pattern()
            );
            return Ok(attributes);
        }
    }

    Err(Error::InvalidIdentity {
        resource_type: resource_type.to_string(),
        title: title.to_string(),
    })
}
