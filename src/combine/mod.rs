//! Combining slice reducers into one root reducer.
//!
//! Building a combination runs, once:
//! - key filtering, which drops entries that hold no reducer
//! - shape assertion, which probes each reducer with the initialization
//!   action and an unknown action
//!
//! Every call then runs the shape warner (development builds only) and the
//! combiner, which invokes each reducer on its slice and returns either a
//! new tree or the untouched input.
//!
//! A shape violation does not fail construction. It is kept and returned
//! from every call, so a combination can sit inside another reducer map and
//! only fail when actually used. Use [`CombineBuilder::try_build`] to fail
//! eagerly instead.
//!
//! [`CombineBuilder::try_build`]: crate::builder::CombineBuilder::try_build

mod combination;
mod error;
mod filter;
mod shape;
mod warning;

pub use combination::{Combination, Lifecycle};
pub use error::CombineError;
pub use shape::{assert_reducer_shape, ShapeValidation};

use crate::builder::{CombineOptions, ReducerMap};

/// Combine a reducer map with default options.
///
/// Defaults come from [`CombineOptions::default`]: the build mode is taken
/// from the environment and warnings go to `tracing`.
pub fn combine_reducers(reducers: ReducerMap) -> Combination {
    combine_reducers_with(reducers, CombineOptions::default())
}

/// Combine a reducer map with explicit options.
pub fn combine_reducers_with(reducers: ReducerMap, options: CombineOptions) -> Combination {
    Combination::build(reducers, options)
}
