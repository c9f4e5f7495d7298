//! Rule grammar handling for the sanitizer.
//!
//! This module is responsible for turning the caller's compact rule strings
//! (`"trim|truncate:20, ..."`) into structured, ordered filter invocations.
//! Parsing happens once, when a `Sanitizer` is constructed, and the result is
//! never mutated afterwards.
//!
//! This module works closely with `config` (for the raw `RuleSpec` tables) and
//! `engine` (which folds values through the parsed rules).

pub mod parser;
