// sanitizer-core/src/engine.rs
//! The sanitization engine.
//!
//! A `Sanitizer` is built from the caller's data, rule specification and filter
//! registry. Rules are parsed exactly once, at construction. `sanitize()` then
//! folds each attribute's value through its rule chain, left to right, and
//! returns a fresh map with the same keys as the input.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, trace, warn};
use serde_json::{Map, Value};

use crate::config::RuleSpec;
use crate::errors::SanitizerError;
use crate::filter::FilterRegistry;
use crate::rules::parser::{parse_rules, ParsedRule, ParsedRules};

/// Attribute name to value, as received from (and returned to) the caller.
pub type Attributes = Map<String, Value>;

/// Returns true when `value` should bypass filtering.
///
/// `null`, `""`, `false`, `[]` and `{}` are empty. Numbers are never empty,
/// including `0`, and neither is the string `"0"`.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(_) => false,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Applies the filter registered under `name` to `value`.
///
/// The registry is consulted before the emptiness check, so a rule naming an
/// unregistered filter fails even when the value would have been skipped.
pub fn apply_filter(
    registry: &FilterRegistry,
    name: &str,
    value: Value,
    options: &[String],
) -> Result<Value, SanitizerError> {
    let filter = registry
        .lookup(name)
        .ok_or_else(|| SanitizerError::unknown_filter(name))?;

    if is_empty_value(&value) {
        trace!("Skipping filter '{}' for empty value.", name);
        return Ok(value);
    }

    trace!("Applying filter '{}' with options {:?}.", name, options);
    Ok(filter.apply(value, options))
}

/// Folds `value` through `chain` in declaration order.
pub fn sanitize_attribute(
    registry: &FilterRegistry,
    chain: &[ParsedRule],
    value: Value,
) -> Result<Value, SanitizerError> {
    chain.iter().try_fold(value, |value, rule| {
        apply_filter(registry, &rule.name, value, &rule.options)
    })
}

/// Sanitizes every attribute of `data` against already parsed rules.
///
/// Attributes without rules are copied unchanged. The first unknown filter
/// aborts the whole call; no partial result is returned.
pub fn sanitize(
    data: &Attributes,
    parsed_rules: &ParsedRules,
    registry: &FilterRegistry,
) -> Result<Attributes, SanitizerError> {
    let mut sanitized = Map::with_capacity(data.len());

    for (attribute, value) in data {
        let value = match parsed_rules.get(attribute) {
            Some(chain) => {
                debug!("Sanitizing '{}' through {} rule(s).", attribute, chain.len());
                sanitize_attribute(registry, chain, value.clone())?
            }
            None => value.clone(),
        };
        sanitized.insert(attribute.clone(), value);
    }

    Ok(sanitized)
}

/// Holds one payload together with its parsed rules and filters.
///
/// `Sanitizer` is immutable once built and is `Send + Sync`, so repeated or
/// concurrent calls to [`Sanitizer::sanitize`] all see the same inputs.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    data: Attributes,
    rules: ParsedRules,
    filters: FilterRegistry,
}

impl Sanitizer {
    /// Creates a sanitizer, parsing `rules` immediately.
    pub fn new(data: Attributes, rules: &RuleSpec, filters: FilterRegistry) -> Self {
        Self::from_parsed(data, parse_rules(rules), filters)
    }

    /// Creates a sanitizer from rules that were parsed ahead of time.
    pub fn from_parsed(data: Attributes, rules: ParsedRules, filters: FilterRegistry) -> Self {
        for name in rules.filter_names() {
            if !filters.contains(name) {
                warn!("Rules reference filter '{}' which is not registered.", name);
            }
        }

        Self {
            data,
            rules,
            filters,
        }
    }

    /// Returns the sanitized copy of the data this sanitizer was built with.
    pub fn sanitize(&self) -> Result<Attributes, SanitizerError> {
        sanitize(&self.data, &self.rules, &self.filters)
    }

    pub fn data(&self) -> &Attributes {
        &self.data
    }

    pub fn parsed_rules(&self) -> &ParsedRules {
        &self.rules
    }

    pub fn rules_for(&self, attribute: &str) -> Option<&[ParsedRule]> {
        self.rules.get(attribute)
    }

    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn attrs(value: Value) -> Attributes {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {}", other),
        }
    }

    fn trim_registry() -> FilterRegistry {
        FilterRegistry::new().with_fn("trim", |value: Value, _: &[String]| match value {
            Value::String(s) => Value::String(s.trim().to_string()),
            other => other,
        })
    }

    #[test]
    fn emptiness_boundaries() {
        for empty in [json!(null), json!(""), json!(false), json!([]), json!({})] {
            assert!(is_empty_value(&empty), "{} should be empty", empty);
        }
        for present in [json!(0), json!(0.0), json!(-1), json!("0"), json!(" "), json!(true), json!([null]), json!({"a": null})] {
            assert!(!is_empty_value(&present), "{} should not be empty", present);
        }
    }

    #[test]
    fn apply_filter_rejects_unknown_names_before_checking_emptiness() {
        let registry = trim_registry();
        let err = apply_filter(&registry, "slugify", json!(""), &[String::new()]).unwrap_err();
        assert!(matches!(err, SanitizerError::UnknownFilter { ref name } if name == "slugify"));
    }

    #[test]
    fn apply_filter_skips_empty_values() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let registry = FilterRegistry::new().with_fn("spy", move |value: Value, _: &[String]| {
            counter.fetch_add(1, Ordering::SeqCst);
            value
        });

        for empty in [json!(null), json!(""), json!([])] {
            let out = apply_filter(&registry, "spy", empty.clone(), &[String::new()]).unwrap();
            assert_eq!(out, empty);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        apply_filter(&registry, "spy", json!(0), &[String::new()]).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn chain_composes_in_declaration_order() {
        let registry = FilterRegistry::new()
            .with_fn("append", |value: Value, options: &[String]| {
                Value::String(format!("{}{}", value.as_str().unwrap_or_default(), options[0]))
            })
            .with_fn("wrap", |value: Value, options: &[String]| {
                Value::String(format!("{}{}{}", options[0], value.as_str().unwrap_or_default(), options[1]))
            });
        let rules = RuleSpec::new().with_rule("v", "append:x|wrap:<, >");
        let sanitizer = Sanitizer::new(attrs(json!({"v": "a"})), &rules, registry);

        assert_eq!(sanitizer.sanitize().unwrap()["v"], json!("<ax>"));
    }

    #[test]
    fn unruled_attributes_pass_through() {
        let rules = RuleSpec::new().with_rule("name", "trim");
        let data = attrs(json!({"name": " Bob ", "age": 0, "meta": {"k": [1, 2]}}));
        let sanitizer = Sanitizer::new(data, &rules, trim_registry());

        let out = sanitizer.sanitize().unwrap();
        assert_eq!(out["name"], json!("Bob"));
        assert_eq!(out["age"], json!(0));
        assert_eq!(out["meta"], json!({"k": [1, 2]}));
    }

    #[test]
    fn rules_for_missing_attributes_are_ignored() {
        let rules = RuleSpec::new().with_rule("absent", "slugify");
        let sanitizer = Sanitizer::new(attrs(json!({"name": "x"})), &rules, trim_registry());
        assert_eq!(sanitizer.sanitize().unwrap(), attrs(json!({"name": "x"})));
    }

    #[test]
    fn sanitize_does_not_mutate_inputs() {
        let rules = RuleSpec::new().with_rule("name", "trim");
        let sanitizer = Sanitizer::new(attrs(json!({"name": "  x  "})), &rules, trim_registry());

        let first = sanitizer.sanitize().unwrap();
        let second = sanitizer.sanitize().unwrap();
        assert_eq!(first, second);
        assert_eq!(sanitizer.data()["name"], json!("  x  "));
        assert_eq!(sanitizer.rules_for("name").map(<[ParsedRule]>::len), Some(1));
    }
}
