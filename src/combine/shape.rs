//! Behavioural probing of reducers at build time.

use super::error::CombineError;
use super::filter::FinalReducers;
use crate::builder::ReducerMap;
use crate::core::{Action, Reducer};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of probing a set of reducers: every violation found.
pub type ShapeValidation = Validation<(), NonEmptyVec<CombineError>>;

/// Probe every reducer with the initialization action and an unknown action.
///
/// All violations are accumulated, one per offending reducer, in key order.
/// A reducer that fails initialization is not probed further. A reducer that
/// returns an error while being probed (typically a nested combination that
/// is itself invalid) contributes that error unchanged.
///
/// # Example
///
/// ```rust
/// use statecraft::builder::ReducerMap;
/// use statecraft::combine::assert_reducer_shape;
/// use statecraft::core::{Reducer, Value};
/// use stillwater::validation::Validation;
///
/// let map = ReducerMap::new()
///     .reducer("ok", Reducer::slice(Value::from(0), |s, _| s.clone()))
///     .reducer("broken", Reducer::new(|_, _| None));
///
/// assert!(matches!(assert_reducer_shape(&map), Validation::Failure(_)));
/// ```
pub fn assert_reducer_shape(map: &ReducerMap) -> ShapeValidation {
    let reducers = map
        .iter()
        .filter_map(|(key, entry)| entry.as_reducer().map(|reducer| (key, reducer)));
    probe_all(reducers)
}

/// First violation among the filtered reducers, the one a combination keeps.
///
/// Stops at the first offending reducer; later reducers are not run.
pub(crate) fn first_final_violation(reducers: &FinalReducers) -> Option<CombineError> {
    reducers
        .iter()
        .find_map(|(key, reducer)| check_reducer(key, reducer).err())
}

fn probe_all<'a>(reducers: impl Iterator<Item = (&'a str, &'a Reducer)>) -> ShapeValidation {
    let checks: Vec<ShapeValidation> = reducers
        .map(|(key, reducer)| match check_reducer(key, reducer) {
            Ok(()) => Validation::success(()),
            Err(err) => Validation::fail(err),
        })
        .collect();

    Validation::all_vec(checks).map(|_| ())
}

fn check_reducer(key: &str, reducer: &Reducer) -> Result<(), CombineError> {
    match reducer.reduce(None, &Action::init())? {
        Some(_) => {}
        None => {
            return Err(CombineError::ReducerInitialization {
                key: key.to_string(),
            })
        }
    }

    match reducer.reduce(None, &Action::probe())? {
        Some(_) => Ok(()),
        None => Err(CombineError::ReducerProbe {
            key: key.to_string(),
        }),
    }
}
