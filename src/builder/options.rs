//! Options and fluent construction for combined reducers.

use super::map::{ReducerEntry, ReducerMap};
use crate::combine::{Combination, CombineError};
use crate::core::{Reducer, Value};
use crate::diagnostics::{BuildMode, TracingSink, WarningSink};
use std::fmt;
use std::sync::Arc;

/// Settings applied when combining a reducer map.
#[derive(Clone)]
pub struct CombineOptions {
    mode: BuildMode,
    sink: Arc<dyn WarningSink>,
}

impl CombineOptions {
    /// Options with the detected build mode and the `tracing` sink.
    pub fn new() -> Self {
        Self {
            mode: BuildMode::detect(),
            sink: Arc::new(TracingSink),
        }
    }

    /// Set the build mode.
    pub fn mode(mut self, mode: BuildMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set where development warnings go.
    pub fn sink(mut self, sink: Arc<dyn WarningSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn build_mode(&self) -> BuildMode {
        self.mode
    }

    pub fn warning_sink(&self) -> Arc<dyn WarningSink> {
        Arc::clone(&self.sink)
    }
}

impl Default for CombineOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CombineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombineOptions")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

/// Builder for combined reducers with a fluent API.
///
/// # Example
///
/// ```rust
/// use statecraft::builder::CombineBuilder;
/// use statecraft::core::{Action, Reducer, Value};
/// use statecraft::diagnostics::BuildMode;
///
/// let root = CombineBuilder::new()
///     .reducer("visible", Reducer::slice(Value::from(true), |v, _| v.clone()))
///     .mode(BuildMode::Production)
///     .try_build()
///     .unwrap();
///
/// let state = root.reduce(None, &Action::init()).unwrap();
/// assert_eq!(state.as_tree().unwrap().get("visible"), Some(&Value::from(true)));
/// ```
#[derive(Debug, Default)]
pub struct CombineBuilder {
    reducers: ReducerMap,
    options: CombineOptions,
}

impl CombineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reducer under `key`.
    pub fn reducer(mut self, key: impl Into<String>, reducer: impl Into<Reducer>) -> Self {
        self.reducers = self.reducers.reducer(key, reducer);
        self
    }

    /// Declare `key` without a reducer.
    pub fn unset(mut self, key: impl Into<String>) -> Self {
        self.reducers = self.reducers.unset(key);
        self
    }

    /// Store a non-reducer value under `key`.
    pub fn value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.reducers = self.reducers.value(key, value);
        self
    }

    /// Add every entry of `map`, after the entries already present.
    pub fn reducers(mut self, map: ReducerMap) -> Self {
        for (key, entry) in map {
            self.reducers.insert(key, entry);
        }
        self
    }

    pub fn entry(mut self, key: impl Into<String>, entry: ReducerEntry) -> Self {
        self.reducers.insert(key, entry);
        self
    }

    pub fn mode(mut self, mode: BuildMode) -> Self {
        self.options = self.options.mode(mode);
        self
    }

    pub fn sink(mut self, sink: Arc<dyn WarningSink>) -> Self {
        self.options = self.options.sink(sink);
        self
    }

    pub fn options(mut self, options: CombineOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the combination. Shape violations are deferred to the first call.
    pub fn build(self) -> Combination {
        Combination::build(self.reducers, self.options)
    }

    /// Build the combination, failing immediately on a shape violation.
    pub fn try_build(self) -> Result<Combination, CombineError> {
        let combination = self.build();
        match combination.shape_error() {
            Some(err) => Err(err.clone()),
            None => Ok(combination),
        }
    }
}
