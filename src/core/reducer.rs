//! Reducers: pure functions from a prior slice and an action to the next slice.

use super::action::Action;
use super::value::Value;
use crate::combine::CombineError;
use std::fmt;
use std::sync::Arc;

type ReduceFn =
    dyn Fn(Option<&Value>, &Action) -> Result<Option<Value>, CombineError> + Send + Sync;

/// A shareable reducer.
///
/// A reducer receives its prior slice (`None` when there is none yet, meaning
/// "produce your initial state") and the dispatched action, and returns the
/// next slice. Returning `None` means "no value" and is always a programming
/// error: a reducer that does not recognise an action must hand back the
/// slice it was given.
///
/// Reducers must be pure and must not try to handle action types in the
/// private `@@statecraft/` namespace.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{Action, Reducer, Value};
///
/// let counter = Reducer::slice(Value::from(0), |count, action| {
///     match (action.is("INC"), count.as_i64()) {
///         (true, Some(n)) => Value::from(n + 1),
///         _ => count.clone(),
///     }
/// });
///
/// let initial = counter.reduce(None, &Action::init()).unwrap();
/// assert_eq!(initial, Some(Value::from(0)));
///
/// let next = counter.reduce(initial.as_ref(), &Action::new("INC")).unwrap();
/// assert_eq!(next, Some(Value::from(1)));
/// ```
#[derive(Clone)]
pub struct Reducer {
    reduce: Arc<ReduceFn>,
}

impl Reducer {
    /// Create a reducer from a pure function.
    pub fn new<F>(reduce: F) -> Self
    where
        F: Fn(Option<&Value>, &Action) -> Option<Value> + Send + Sync + 'static,
    {
        Self {
            reduce: Arc::new(move |state, action| Ok(reduce(state, action))),
        }
    }

    /// Create a reducer whose evaluation may fail.
    ///
    /// Combined reducers are stored this way when nested inside another
    /// reducer map, so that their errors reach the outer caller.
    pub fn fallible<F>(reduce: F) -> Self
    where
        F: Fn(Option<&Value>, &Action) -> Result<Option<Value>, CombineError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            reduce: Arc::new(reduce),
        }
    }

    /// Create a total reducer with an initial slice.
    ///
    /// `reduce` is called with `initial` whenever no prior slice exists, and
    /// its result is always a value.
    pub fn slice<F>(initial: Value, reduce: F) -> Self
    where
        F: Fn(&Value, &Action) -> Value + Send + Sync + 'static,
    {
        Self::new(move |state, action| Some(reduce(state.unwrap_or(&initial), action)))
    }

    /// Run the reducer once.
    pub fn reduce(
        &self,
        state: Option<&Value>,
        action: &Action,
    ) -> Result<Option<Value>, CombineError> {
        (self.reduce)(state, action)
    }
}

impl fmt::Debug for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reducer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_reducer_starts_from_initial() {
        let reducer = Reducer::slice(Value::from(10), |state, _| state.clone());

        assert_eq!(
            reducer.reduce(None, &Action::init()).unwrap(),
            Some(Value::from(10))
        );
        assert_eq!(
            reducer
                .reduce(Some(&Value::from(3)), &Action::new("ANY"))
                .unwrap(),
            Some(Value::from(3))
        );
    }

    #[test]
    fn slice_reducer_preserves_identity_when_ignoring() {
        let list = Value::from(vec![Value::from(1)]);
        let reducer = Reducer::slice(Value::from(Vec::<Value>::new()), |state, _| state.clone());

        let next = reducer.reduce(Some(&list), &Action::new("NOOP")).unwrap();
        assert!(next.unwrap().is_same(&list));
    }

    #[test]
    fn plain_reducer_may_return_nothing() {
        let reducer = Reducer::new(|_, _| None);
        assert_eq!(reducer.reduce(None, &Action::init()).unwrap(), None);
    }

    #[test]
    fn fallible_reducer_propagates_errors() {
        let reducer =
            Reducer::fallible(|_, _| Err(CombineError::ReducerFailed("bad input".to_string())));

        assert_eq!(
            reducer.reduce(None, &Action::new("X")),
            Err(CombineError::ReducerFailed("bad input".to_string()))
        );
    }

    #[test]
    fn clones_share_the_function() {
        let reducer = Reducer::slice(Value::from(1), |state, _| state.clone());
        let clone = reducer.clone();

        assert_eq!(
            clone.reduce(None, &Action::init()).unwrap(),
            reducer.reduce(None, &Action::init()).unwrap()
        );
    }
}
