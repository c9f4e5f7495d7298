// sanitizer-core/src/lib.rs
//! # Sanitizer Core Library
//!
//! `sanitizer-core` cleans a map of named attribute values (form fields, API
//! payload fields) by running each attribute through a declared chain of named
//! filters. Rules are written in a compact string grammar:
//!
//! ```text
//! "trim|truncate:20, ..."
//! ```
//!
//! which parses into two filter invocations, `trim` with options `[""]` and
//! `truncate` with options `["20", "..."]`. Filters themselves are supplied by
//! the caller through a [`FilterRegistry`]; this crate only parses rules and
//! dispatches to them.
//!
//! ## Modules
//!
//! * `config`: Defines [`RuleSpec`], the attribute-to-rule-string table, and [`merge_rules`].
//! * `rules`: Parses rule strings into [`ParsedRule`]s.
//! * `filter`: Defines the [`Filter`] capability and the [`FilterRegistry`].
//! * `engine`: Defines the [`Sanitizer`] and the empty-value predicate.
//! * `headless`: One-shot convenience wrapper.
//! * `errors`: The [`SanitizerError`] type.
//!
//! ## Usage Example
//!
//! ```rust
//! use sanitizer_core::{FilterRegistry, RuleSpec, Sanitizer, SanitizerError};
//! use serde_json::{json, Value};
//!
//! fn main() -> Result<(), SanitizerError> {
//!     let Value::Object(data) = json!({"name": " Bob ", "age": 0}) else {
//!         unreachable!()
//!     };
//!     let rules = RuleSpec::new().with_rule("name", "trim");
//!     let filters = FilterRegistry::new().with_fn("trim", |value: Value, _: &[String]| {
//!         match value {
//!             Value::String(s) => Value::String(s.trim().to_string()),
//!             other => other,
//!         }
//!     });
//!
//!     let sanitized = Sanitizer::new(data, &rules, filters).sanitize()?;
//!     assert_eq!(sanitized["name"], json!("Bob"));
//!     assert_eq!(sanitized["age"], json!(0));
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! The only runtime failure is a rule naming a filter that is not registered,
//! reported as [`SanitizerError::UnknownFilter`]. Rules with an empty filter
//! name are dropped during parsing rather than reported.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod errors;
pub mod filter;
pub mod headless;
pub mod rules;

/// Re-exports the rule specification table and merge helper.
pub use config::{merge_rules, RuleSpec};

/// Re-exports the custom error type for clear error reporting.
pub use errors::SanitizerError;

/// Re-exports the engine and its building blocks.
pub use engine::{apply_filter, is_empty_value, sanitize, sanitize_attribute, Attributes, Sanitizer};

/// Re-exports the filter capability and registry.
pub use filter::{Filter, FilterRegistry};

pub use headless::headless_sanitize;

pub use rules::parser::{parse_rule, parse_rules, ParsedRule, ParsedRules};

/// Attribute values are plain JSON values.
pub use serde_json::Value;
