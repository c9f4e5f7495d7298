//! parser.rs - Parses rule-specification strings into structured rules.
//!
//! The grammar is deliberately small:
//!
//! ```text
//! ruleset     := rule ( "|" rule )*
//! rule        := filterName [ ":" optionList ]
//! optionList  := option ( "," option )*
//! ```
//!
//! Parsing is total. A rule with an empty filter name yields `None` and is
//! dropped rather than reported as an error.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use std::collections::HashMap;

use crate::config::RuleSpec;

/// Separates the individual rules of an attribute's rule string.
pub const RULE_DELIMITER: char = '|';
/// Separates a filter name from its options. Only the first occurrence counts.
pub const OPTIONS_DELIMITER: char = ':';
/// Separates the options of a single rule.
pub const OPTION_SEPARATOR: char = ',';

/// A single filter invocation parsed from a rule string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRule {
    /// Filter name, used verbatim for the registry lookup (never trimmed).
    pub name: String,
    /// Options handed to the filter, each trimmed of surrounding whitespace.
    /// Always contains at least one element: a bare `name` yields `[""]`.
    pub options: Vec<String>,
}

impl ParsedRule {
    pub fn new(name: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }
}

/// The parsed rule chains of every attribute that has at least one valid rule.
///
/// Attributes without rules are absent, which the engine treats as
/// "pass through unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRules {
    rules: HashMap<String, Vec<ParsedRule>>,
}

impl ParsedRules {
    /// Returns the ordered rule chain for `attribute`, if it has one.
    pub fn get(&self, attribute: &str) -> Option<&[ParsedRule]> {
        self.rules.get(attribute).map(Vec::as_slice)
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.rules.contains_key(attribute)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ParsedRule])> {
        self.rules
            .iter()
            .map(|(attribute, chain)| (attribute.as_str(), chain.as_slice()))
    }

    /// Every distinct filter name referenced by any attribute, sorted.
    pub fn filter_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .rules
            .values()
            .flatten()
            .map(|rule| rule.name.as_str())
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

/// Parses a single rule string formatted as `filterName:option1, option2` or
/// just `filterName`.
///
/// Returns `None` when no filter name is present. The options portion is split
/// on `,` only; any further `:` inside it is kept. An absent options portion is
/// treated as an empty string, which splits into one empty option, so `"trim"`
/// parses to `options == [""]`.
pub fn parse_rule(rule: &str) -> Option<ParsedRule> {
    let (name, options) = rule.split_once(OPTIONS_DELIMITER).unwrap_or((rule, ""));
    if name.is_empty() {
        return None;
    }

    let options = options
        .split(OPTION_SEPARATOR)
        .map(|option| option.trim().to_string())
        .collect();

    Some(ParsedRule::new(name, options))
}

/// Parses every attribute's rule string into an ordered rule chain.
///
/// Empty rules are skipped without a placeholder, and attributes left with no
/// valid rule are omitted from the result.
pub fn parse_rules(raw_rules: &RuleSpec) -> ParsedRules {
    debug!("Parsing rule strings for {} attribute(s).", raw_rules.len());

    let mut rules = HashMap::with_capacity(raw_rules.len());
    for (attribute, rule_string) in raw_rules.iter() {
        let mut chain = Vec::new();
        for raw_rule in rule_string.split(RULE_DELIMITER) {
            match parse_rule(raw_rule) {
                Some(parsed) => chain.push(parsed),
                None => debug!(
                    "Dropping empty rule '{}' for attribute '{}'.",
                    raw_rule, attribute
                ),
            }
        }

        if chain.is_empty() {
            debug!("Attribute '{}' has no valid rules; it will pass through.", attribute);
            continue;
        }

        debug!("Attribute '{}' parsed into {} rule(s).", attribute, chain.len());
        rules.insert(attribute.to_string(), chain);
    }

    debug!("Finished parsing rules. Attributes with rules: {}.", rules.len());
    ParsedRules { rules }
}
