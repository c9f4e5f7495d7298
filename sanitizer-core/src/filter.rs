// sanitizer-core/src/filter.rs
//! Defines the `Filter` capability and the caller-owned `FilterRegistry`.
//!
//! A filter is anything that can turn one attribute value into another given
//! the options parsed from its rule. Two shapes are accepted: a plain closure
//! `Fn(Value, &[String]) -> Value`, or a type implementing [`Filter`]. Both are
//! stored as `Arc<dyn Filter>`, so the engine dispatches the same way
//! regardless of how a filter was written.
//!
//! License: MIT OR APACHE 2.0

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A named transformation applied to a single attribute value.
///
/// Implementations must be `Send + Sync` so a `Sanitizer` can be shared across
/// threads. A filter that needs interior state is responsible for its own
/// synchronization.
pub trait Filter: Send + Sync {
    /// Transforms `value` using the options parsed from the rule string.
    ///
    /// `options` always has at least one element; a rule without options
    /// passes `[""]`.
    fn apply(&self, value: Value, options: &[String]) -> Value;
}

impl<F> Filter for F
where
    F: Fn(Value, &[String]) -> Value + Send + Sync,
{
    fn apply(&self, value: Value, options: &[String]) -> Value {
        self(value, options)
    }
}

/// Read-only lookup from filter name to filter capability.
///
/// The registry is populated by the caller before the sanitizer is built; the
/// engine only ever calls [`FilterRegistry::lookup`]. Cloning is cheap since
/// filters are shared behind `Arc`.
#[derive(Clone, Default)]
pub struct FilterRegistry {
    filters: HashMap<String, Arc<dyn Filter>>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a filter implemented as a type.
    pub fn with_filter<T>(self, name: impl Into<String>, filter: T) -> Self
    where
        T: Filter + 'static,
    {
        self.with_shared(name, Arc::new(filter))
    }

    /// Registers a closure as a filter.
    pub fn with_fn<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Value, &[String]) -> Value + Send + Sync + 'static,
    {
        self.with_shared(name, Arc::new(f))
    }

    /// Registers an already shared filter, replacing any filter of the same name.
    pub fn with_shared(mut self, name: impl Into<String>, filter: Arc<dyn Filter>) -> Self {
        self.filters.insert(name.into(), filter);
        self
    }

    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn Filter>> {
        self.filters.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Registered filter names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.filters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("filters", &self.names())
            .finish()
    }
}

impl<K> FromIterator<(K, Arc<dyn Filter>)> for FilterRegistry
where
    K: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Arc<dyn Filter>)>>(iter: I) -> Self {
        Self {
            filters: iter.into_iter().map(|(k, f)| (k.into(), f)).collect(),
        }
    }
}
