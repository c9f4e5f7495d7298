//! Configuration management for `sanitizer-core`.
//!
//! This module defines `RuleSpec`, the caller-facing table of attribute rule
//! strings. A `RuleSpec` can be built in code or deserialized from a YAML or
//! JSON document the caller already holds in memory, and two specs can be
//! merged so that per-deployment overrides replace shared defaults.
//!
//! License: MIT OR Apache-2.0

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::SanitizerError;

/// Attribute name to rule-specification string, e.g. `"name" => "trim|capitalize"`.
///
/// A `RuleSpec` is only read while a `Sanitizer` is constructed; after that the
/// engine works exclusively from the parsed form.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RuleSpec {
    rules: BTreeMap<String, String>,
}

impl RuleSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the rule string for `attribute`.
    pub fn with_rule(mut self, attribute: impl Into<String>, rules: impl Into<String>) -> Self {
        self.rules.insert(attribute.into(), rules.into());
        self
    }

    /// Parses a YAML mapping of attribute names to rule strings.
    pub fn from_yaml_str(text: &str) -> Result<Self, SanitizerError> {
        let spec: RuleSpec = serde_yml::from_str(text)
            .map_err(|e| SanitizerError::InvalidRuleSpec(format!("YAML: {}", e)))?;
        debug!("Loaded rule spec with {} attribute(s) from YAML.", spec.len());
        Ok(spec)
    }

    /// Parses a JSON object of attribute names to rule strings.
    pub fn from_json_str(text: &str) -> Result<Self, SanitizerError> {
        let spec: RuleSpec = serde_json::from_str(text)
            .map_err(|e| SanitizerError::InvalidRuleSpec(format!("JSON: {}", e)))?;
        debug!("Loaded rule spec with {} attribute(s) from JSON.", spec.len());
        Ok(spec)
    }

    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.rules.get(attribute).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RuleSpec
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            rules: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Merges override rules on top of defaults.
///
/// An attribute present in `overrides` takes its rule string from there in
/// full; rule chains are not concatenated.
pub fn merge_rules(defaults: RuleSpec, overrides: Option<RuleSpec>) -> RuleSpec {
    debug!("merge_rules called. Default attributes: {}", defaults.len());

    let mut merged = defaults.rules;
    if let Some(user) = overrides {
        debug!("Overrides provided. Merging {} attribute(s).", user.len());
        for (attribute, rules) in user.rules {
            if let Some(previous) = merged.insert(attribute.clone(), rules) {
                debug!("Overriding rules for '{}' (was '{}').", attribute, previous);
            }
        }
    }

    debug!("Final attribute count after merge: {}", merged.len());
    RuleSpec { rules: merged }
}
