//! Advisory checks on the state handed to a combined reducer.

use super::filter::FinalReducers;
use crate::core::{Action, Value};
use crate::diagnostics::WarningSink;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Stray keys already reported by one combination.
pub(crate) type UnexpectedKeyCache = HashSet<String>;

/// Reports unexpected state shapes, each stray key at most once.
pub(crate) struct ShapeWarner {
    sink: Arc<dyn WarningSink>,
    unexpected_keys: Mutex<UnexpectedKeyCache>,
}

impl ShapeWarner {
    pub(crate) fn new(sink: Arc<dyn WarningSink>) -> Self {
        Self {
            sink,
            unexpected_keys: Mutex::new(UnexpectedKeyCache::new()),
        }
    }

    pub(crate) fn sink(&self) -> &dyn WarningSink {
        self.sink.as_ref()
    }

    pub(crate) fn check(&self, state: &Value, reducers: &FinalReducers, action: &Action) {
        let message = {
            let mut cache = self.unexpected_keys.lock();
            unexpected_state_shape_message(state, reducers, action, &mut cache)
        };

        if let Some(message) = message {
            self.sink.warn(&message);
        }
    }
}

impl fmt::Debug for ShapeWarner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeWarner")
            .field("unexpected_keys", &*self.unexpected_keys.lock())
            .finish_non_exhaustive()
    }
}

/// Describe what is wrong with `state`, if anything.
///
/// Newly seen stray keys are recorded in `cache` so they are not reported
/// again. The state itself is never modified.
pub(crate) fn unexpected_state_shape_message(
    state: &Value,
    reducers: &FinalReducers,
    action: &Action,
    cache: &mut UnexpectedKeyCache,
) -> Option<String> {
    if reducers.is_empty() {
        return Some(
            "Store does not have a valid reducer. Make sure the argument passed to \
             combine_reducers is a map whose values are reducers."
                .to_string(),
        );
    }

    let argument_name = if action.is_init() {
        "preloaded state passed to the store"
    } else {
        "previous state received by the reducer"
    };
    let expected_keys = quoted_list(reducers.keys().map(String::as_str));

    let Some(tree) = state.as_tree() else {
        return Some(format!(
            "The {argument_name} has unexpected type of \"{}\". Expected argument to be a map \
             with the following keys: {expected_keys}",
            state.type_name()
        ));
    };

    let unexpected: Vec<&str> = tree
        .keys()
        .filter(|key| !reducers.contains_key(*key) && !cache.contains(*key))
        .collect();

    if unexpected.is_empty() {
        return None;
    }

    cache.extend(unexpected.iter().map(|key| key.to_string()));

    Some(format!(
        "Unexpected {} {} found in {argument_name}. Expected to find one of the known reducer \
         keys instead: {expected_keys}. Unexpected keys will be ignored.",
        if unexpected.len() > 1 { "keys" } else { "key" },
        quoted_list(unexpected.iter().copied()),
    ))
}

fn quoted_list<'a>(keys: impl Iterator<Item = &'a str>) -> String {
    keys.map(|key| format!("\"{key}\""))
        .collect::<Vec<_>>()
        .join(", ")
}
