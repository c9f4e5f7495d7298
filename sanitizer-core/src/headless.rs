// sanitizer-core/src/headless.rs

//! `headless.rs`
//! Convenience wrapper for one-shot sanitization, when the caller has no use
//! for the `Sanitizer` value itself.

use crate::config::RuleSpec;
use crate::engine::{Attributes, Sanitizer};
use crate::errors::SanitizerError;
use crate::filter::FilterRegistry;

/// Parses `rules`, sanitizes `data` and returns the result in a single call.
///
/// # Arguments
///
/// * `data` - The attribute map to sanitize.
/// * `rules` - Rule strings per attribute.
/// * `filters` - The filters the rules may reference.
pub fn headless_sanitize(
    data: Attributes,
    rules: &RuleSpec,
    filters: FilterRegistry,
) -> Result<Attributes, SanitizerError> {
    Sanitizer::new(data, rules, filters).sanitize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::{json, Value};

    #[test]
    fn test_headless_sanitize() -> Result<()> {
        let data = json!({"email": "  Alice@Example.COM "});
        let Value::Object(data) = data else { unreachable!() };
        let rules = RuleSpec::from_yaml_str("email: trim|lowercase")?;
        let filters = FilterRegistry::new()
            .with_fn("trim", |v: Value, _: &[String]| json!(v.as_str().unwrap_or_default().trim()))
            .with_fn("lowercase", |v: Value, _: &[String]| {
                json!(v.as_str().unwrap_or_default().to_lowercase())
            });

        let out = headless_sanitize(data, &rules, filters)?;
        assert_eq!(out["email"], json!("alice@example.com"));
        Ok(())
    }

    #[test]
    fn test_headless_sanitize_unknown_filter() {
        let Value::Object(data) = json!({"email": "x"}) else { unreachable!() };
        let rules = RuleSpec::new().with_rule("email", "trim");

        let result = headless_sanitize(data, &rules, FilterRegistry::new());
        assert!(matches!(result, Err(SanitizerError::UnknownFilter { .. })));
    }
}
