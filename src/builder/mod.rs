//! Builder API for assembling reducer maps and combinations.
//!
//! This module provides fluent builders and macros for declaring reducer maps
//! and combining them with minimal boilerplate.

pub mod macros;
pub mod map;
pub mod options;

pub use map::{ReducerEntry, ReducerMap};
pub use options::{CombineBuilder, CombineOptions};
