//! The combined root reducer.

use super::error::CombineError;
use super::filter::{filter_reducers, FinalReducers};
use super::shape::first_final_violation;
use super::warning::ShapeWarner;
use crate::builder::{CombineOptions, ReducerMap};
use crate::core::{Action, Reducer, StateTree, Value};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Whether a combination passed its build-time probes.
///
/// Decided once at construction. An invalid combination never becomes valid.
#[derive(Debug, Clone, PartialEq)]
pub enum Lifecycle {
    Valid,
    Invalid(CombineError),
}

/// A root reducer assembled from a map of slice reducers.
///
/// Each call runs every reducer against its own slice and gathers the
/// results into a tree with the same keys. If no reducer changed its slice,
/// the input state is returned as is, so callers can detect a no-op dispatch
/// with [`Value::is_same`].
///
/// # Example
///
/// ```rust
/// use statecraft::builder::ReducerMap;
/// use statecraft::combine::combine_reducers;
/// use statecraft::core::{Action, Reducer, Value};
///
/// let root = combine_reducers(
///     ReducerMap::new()
///         .reducer("counter", Reducer::slice(Value::from(0), |count, action| {
///             match (action.is("INC"), count.as_i64()) {
///                 (true, Some(n)) => Value::from(n + 1),
///                 _ => count.clone(),
///             }
///         }))
///         .reducer("todos", Reducer::slice(Value::from(Vec::<Value>::new()), |todos, _| todos.clone())),
/// );
///
/// let state = root.reduce(None, &Action::init()).unwrap();
/// let state = root.reduce(Some(&state), &Action::new("INC")).unwrap();
/// assert_eq!(state.as_tree().unwrap().get("counter"), Some(&Value::from(1)));
///
/// let same = root.reduce(Some(&state), &Action::new("NOOP")).unwrap();
/// assert!(same.is_same(&state));
/// ```
pub struct Combination {
    reducers: FinalReducers,
    lifecycle: Lifecycle,
    warner: Option<ShapeWarner>,
}

impl Combination {
    pub(crate) fn build(map: ReducerMap, options: CombineOptions) -> Self {
        let declared = map.len();
        let warner = options
            .build_mode()
            .warnings_enabled()
            .then(|| ShapeWarner::new(options.warning_sink()));

        let reducers = filter_reducers(map, warner.as_ref().map(ShapeWarner::sink));
        let lifecycle = match first_final_violation(&reducers) {
            None => Lifecycle::Valid,
            Some(err) => Lifecycle::Invalid(err),
        };

        tracing::debug!(
            declared,
            kept = reducers.len(),
            valid = matches!(lifecycle, Lifecycle::Valid),
            "Combined reducers"
        );

        Self {
            reducers,
            lifecycle,
            warner,
        }
    }

    /// Run every reducer once and assemble the next state.
    ///
    /// An absent `state` is treated as an empty tree. A build-time shape
    /// error is returned before any reducer runs. A reducer that returns no
    /// value fails this call with [`CombineError::UndefinedSlice`]; the
    /// combination itself stays usable.
    pub fn reduce(&self, state: Option<&Value>, action: &Action) -> Result<Value, CombineError> {
        if let Lifecycle::Invalid(err) = &self.lifecycle {
            return Err(err.clone());
        }

        let empty;
        let state = match state {
            Some(state) => state,
            None => {
                empty = Value::Tree(StateTree::new());
                &empty
            }
        };

        if let Some(warner) = &self.warner {
            warner.check(state, &self.reducers, action);
        }

        let previous = state.as_tree();
        let mut changed = false;
        let mut next = IndexMap::with_capacity(self.reducers.len());

        for (key, reducer) in &self.reducers {
            let previous_slice = previous.and_then(|tree| tree.get(key));
            let Some(next_slice) = reducer.reduce(previous_slice, action)? else {
                return Err(CombineError::UndefinedSlice {
                    key: key.clone(),
                    action_type: action.action_type().cloned(),
                });
            };

            changed = changed || previous_slice.map_or(true, |slice| !slice.is_same(&next_slice));
            next.insert(key.clone(), next_slice);
        }

        if changed {
            Ok(Value::Tree(StateTree::from(next)))
        } else {
            Ok(state.clone())
        }
    }

    /// Keys of the reducers that survived filtering, in run order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.reducers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn is_valid(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Valid)
    }

    /// The deferred build-time error, if any.
    pub fn shape_error(&self) -> Option<&CombineError> {
        match &self.lifecycle {
            Lifecycle::Valid => None,
            Lifecycle::Invalid(err) => Some(err),
        }
    }

    /// Wrap the combination as a reducer so it can be nested in another map.
    pub fn into_reducer(self) -> Reducer {
        let combination = Arc::new(self);
        Reducer::fallible(move |state, action| combination.reduce(state, action).map(Some))
    }
}

impl From<Combination> for Reducer {
    fn from(combination: Combination) -> Self {
        combination.into_reducer()
    }
}

impl fmt::Debug for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Combination")
            .field("keys", &self.reducers.keys().collect::<Vec<_>>())
            .field("lifecycle", &self.lifecycle)
            .field("warner", &self.warner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{BuildMode, CollectingSink};

    fn counter() -> Reducer {
        Reducer::slice(Value::from(0), |count, action| {
            match (action.is("INC"), count.as_i64()) {
                (true, Some(n)) => Value::from(n + 1),
                _ => count.clone(),
            }
        })
    }

    fn todos() -> Reducer {
        Reducer::slice(Value::from(Vec::<Value>::new()), |todos, action| {
            match (action.is("ADD"), todos.as_list()) {
                (true, Some(items)) => {
                    let mut items = items.to_vec();
                    items.push(action.payload().clone());
                    Value::from(items)
                }
                _ => todos.clone(),
            }
        })
    }

    fn quiet() -> CombineOptions {
        CombineOptions::new().mode(BuildMode::Production)
    }

    fn sample() -> Combination {
        Combination::build(
            ReducerMap::new()
                .reducer("counter", counter())
                .reducer("todos", todos()),
            quiet(),
        )
    }

    #[test]
    fn init_builds_every_slice() {
        let state = sample().reduce(None, &Action::init()).unwrap();
        let tree = state.as_tree().unwrap();

        assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["counter", "todos"]);
        assert_eq!(tree.get("counter"), Some(&Value::from(0)));
        assert_eq!(tree.get("todos"), Some(&Value::from(Vec::<Value>::new())));
    }

    #[test]
    fn change_produces_new_tree_and_keeps_untouched_slices() {
        let root = sample();
        let before = root.reduce(None, &Action::init()).unwrap();
        let after = root.reduce(Some(&before), &Action::new("INC")).unwrap();

        assert!(!after.is_same(&before));
        let (before, after) = (before.as_tree().unwrap(), after.as_tree().unwrap());
        assert_eq!(after.get("counter"), Some(&Value::from(1)));
        assert!(after.get("todos").unwrap().is_same(before.get("todos").unwrap()));
    }

    #[test]
    fn no_op_returns_input_reference() {
        let root = sample();
        let state = root.reduce(None, &Action::init()).unwrap();
        let next = root.reduce(Some(&state), &Action::new("NOOP")).unwrap();

        assert!(next.is_same(&state));
    }

    #[test]
    fn shape_error_is_returned_before_reducers_run() {
        let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counted = {
            let calls = Arc::clone(&calls);
            Reducer::slice(Value::from(0), move |state, _| {
                calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                state.clone()
            })
        };
        let root = Combination::build(
            ReducerMap::new()
                .reducer("counted", counted)
                .reducer("a", Reducer::new(|_, _| None)),
            quiet(),
        );
        let probes = calls.load(std::sync::atomic::Ordering::SeqCst);

        let expected = CombineError::ReducerInitialization {
            key: "a".to_string(),
        };
        assert!(!root.is_valid());
        assert_eq!(root.shape_error(), Some(&expected));
        assert_eq!(root.reduce(None, &Action::init()), Err(expected.clone()));
        assert_eq!(root.reduce(None, &Action::new("INC")), Err(expected));
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), probes);
    }

    #[test]
    fn undefined_slice_fails_only_that_dispatch() {
        let fragile = Reducer::new(|state, action| {
            if action.is("BREAK") {
                None
            } else {
                Some(state.cloned().unwrap_or(Value::from(0)))
            }
        });
        let root = Combination::build(ReducerMap::new().reducer("fragile", fragile), quiet());
        let state = root.reduce(None, &Action::init()).unwrap();

        assert_eq!(
            root.reduce(Some(&state), &Action::new("BREAK")),
            Err(CombineError::UndefinedSlice {
                key: "fragile".to_string(),
                action_type: Some("BREAK".into()),
            })
        );
        assert!(root.reduce(Some(&state), &Action::new("OTHER")).is_ok());
    }

    #[test]
    fn non_map_state_is_rebuilt_from_scratch() {
        let root = sample();
        let next = root.reduce(Some(&Value::from(7)), &Action::new("NOOP")).unwrap();

        assert_eq!(next.as_tree().unwrap().get("counter"), Some(&Value::from(0)));
    }

    #[test]
    fn empty_combination_returns_its_input() {
        let root = Combination::build(ReducerMap::new(), quiet());
        let state = Value::from(StateTree::new().with("x", 1));

        assert!(root.is_empty());
        assert!(root.reduce(Some(&state), &Action::new("X")).unwrap().is_same(&state));
        assert_eq!(
            root.reduce(None, &Action::init()).unwrap(),
            Value::from(StateTree::new())
        );
    }

    #[test]
    fn stray_keys_are_dropped_from_new_trees() {
        let root = sample();
        let state = Value::from(StateTree::new().with("counter", 0).with("legacy", true));
        let next = root.reduce(Some(&state), &Action::new("INC")).unwrap();

        assert!(!next.as_tree().unwrap().contains_key("legacy"));
    }

    #[test]
    fn development_mode_reports_through_sink() {
        let sink = Arc::new(CollectingSink::new());
        let options = CombineOptions::new()
            .mode(BuildMode::Development)
            .sink(sink.clone());
        let root = Combination::build(
            ReducerMap::new().reducer("counter", counter()).unset("ghost"),
            options,
        );
        let state = Value::from(StateTree::new().with("counter", 0).with("stray", 1));

        root.reduce(Some(&state), &Action::new("INC")).unwrap();
        root.reduce(Some(&state), &Action::new("INC")).unwrap();

        let messages = sink.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], "No reducer provided for key \"ghost\"");
        assert!(messages[1].starts_with("Unexpected key \"stray\""));
    }

    #[test]
    fn production_mode_is_silent() {
        let sink = Arc::new(CollectingSink::new());
        let options = CombineOptions::new()
            .mode(BuildMode::Production)
            .sink(sink.clone());
        let root = Combination::build(
            ReducerMap::new().reducer("counter", counter()).unset("ghost"),
            options,
        );

        root.reduce(Some(&Value::from(3)), &Action::new("INC")).unwrap();
        assert!(sink.is_empty());
    }

    #[test]
    fn nested_combination_acts_as_a_slice() {
        let inner = Combination::build(ReducerMap::new().reducer("counter", counter()), quiet());
        let outer = Combination::build(
            ReducerMap::new()
                .reducer("inner", inner)
                .reducer("todos", todos()),
            quiet(),
        );

        let state = outer.reduce(None, &Action::init()).unwrap();
        let next = outer.reduce(Some(&state), &Action::new("INC")).unwrap();
        let inner_state = next.as_tree().unwrap().get("inner").unwrap();

        assert_eq!(inner_state.as_tree().unwrap().get("counter"), Some(&Value::from(1)));
        assert!(outer.reduce(Some(&next), &Action::new("NOOP")).unwrap().is_same(&next));
    }

    #[test]
    fn invalid_nested_combination_invalidates_parent() {
        let inner = Combination::build(
            ReducerMap::new().reducer("broken", Reducer::new(|_, _| None)),
            quiet(),
        );
        let outer = Combination::build(ReducerMap::new().reducer("inner", inner), quiet());

        assert_eq!(
            outer.shape_error(),
            Some(&CombineError::ReducerInitialization {
                key: "broken".to_string()
            })
        );
    }
}
