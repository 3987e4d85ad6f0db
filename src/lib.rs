//! Statecraft: combine slice reducers into one root reducer
//!
//! A single-store application keeps its whole state in one tree. Statecraft
//! lets each part of that tree be owned by its own small reducer, and turns
//! the collection of reducers into the one root reducer the store calls on
//! every dispatch.
//!
//! # Core Concepts
//!
//! - **Value / StateTree**: immutable plain data, shared by reference
//! - **Reducer**: pure function from a prior slice and an action to the next slice
//! - **Combination**: the root reducer built from a `ReducerMap`
//! - **BuildMode**: development builds emit advisory warnings, production builds stay silent
//!
//! A combination probes every reducer once when it is built. Reducers must
//! return an initial slice when given none, and must return their current
//! slice for actions they do not handle. When no slice changes, the root
//! reducer returns its input unchanged, so a no-op dispatch can be detected
//! with [`Value::is_same`].
//!
//! # Example
//!
//! ```rust
//! use statecraft::{combine_reducers, reducers, Action, Reducer, Value};
//!
//! let root = combine_reducers(reducers! {
//!     counter => Reducer::slice(Value::from(0), |count, action| {
//!         match (action.is("INC"), count.as_i64()) {
//!             (true, Some(n)) => Value::from(n + 1),
//!             _ => count.clone(),
//!         }
//!     }),
//!     todos => Reducer::slice(Value::from(Vec::<Value>::new()), |todos, _| todos.clone()),
//! });
//!
//! let state = root.reduce(None, &Action::init()).unwrap();
//! let next = root.reduce(Some(&state), &Action::new("INC")).unwrap();
//!
//! let (before, after) = (state.as_tree().unwrap(), next.as_tree().unwrap());
//! assert_eq!(after.get("counter"), Some(&Value::from(1)));
//! assert!(after.get("todos").unwrap().is_same(before.get("todos").unwrap()));
//!
//! let unchanged = root.reduce(Some(&next), &Action::new("NOOP")).unwrap();
//! assert!(unchanged.is_same(&next));
//! ```

pub mod builder;
pub mod combine;
pub mod compose;
pub mod core;
pub mod diagnostics;

// Re-export commonly used types
pub use builder::{CombineBuilder, CombineOptions, ReducerEntry, ReducerMap};
pub use combine::{combine_reducers, combine_reducers_with, Combination, CombineError};
pub use core::{Action, ActionType, Reducer, StateTree, Value, INIT};
pub use diagnostics::{BuildMode, WarningSink};
