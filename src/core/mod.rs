//! Core value types shared by reducers and the combinator.
//!
//! This module contains the pure building blocks:
//! - `Value` and `StateTree`, immutable plain data with identity semantics
//! - `Action` and the reserved action-type namespace
//! - `Reducer`, a shareable pure state-transition function
//!
//! Nothing in this module performs I/O or keeps mutable state, apart from
//! the counter that makes probe action types unique.

mod action;
mod reducer;
mod value;

pub use action::{Action, ActionType, INIT, PRIVATE_NAMESPACE};
pub use reducer::Reducer;
pub use value::{StateTree, Value};
