//! errors.rs - Custom error types for the sanitizer-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `sanitizer-core` library.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream `match` statements.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SanitizerError {
    /// A rule named a filter the registry does not provide. This is a wiring
    /// mistake on the caller's side, never a data problem.
    #[error("No filter found by the name of {name}")]
    UnknownFilter { name: String },

    #[error("Invalid rule specification: {0}")]
    InvalidRuleSpec(String),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}

impl SanitizerError {
    pub fn unknown_filter(name: impl Into<String>) -> Self {
        Self::UnknownFilter { name: name.into() }
    }
}
