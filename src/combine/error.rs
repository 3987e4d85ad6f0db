//! Errors raised by combined reducers.

use crate::core::ActionType;
use thiserror::Error;

/// Errors surfaced to the caller of a combined reducer.
///
/// The two shape variants are detected once, when the reducer map is
/// combined, and then returned from every call. `UndefinedSlice` is raised
/// by the single dispatch that produced it and is not remembered.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CombineError {
    #[error(
        "Reducer \"{key}\" returned no state during initialization. If the state passed to \
         the reducer is absent, you must explicitly return the initial state. The initial \
         state may not be absent; return Value::Null if the reducer should hold no value."
    )]
    ReducerInitialization { key: String },

    #[error(
        "Reducer \"{key}\" returned no state when probed with an unknown action type. Don't \
         try to handle @@statecraft/INIT or other actions in the \"@@statecraft/*\" namespace. They \
         are considered private. Instead, you must return the current state for any unknown \
         action, unless it is absent, in which case you must return the initial state, \
         regardless of the action type. The initial state may not be absent, but can be \
         Value::Null."
    )]
    ReducerProbe { key: String },

    #[error(
        "Given action {}, reducer \"{key}\" returned no state. To ignore an action, you must \
         explicitly return the previous state. If you want this reducer to hold no value, \
         you can return Value::Null instead.",
        describe_action(.action_type)
    )]
    UndefinedSlice {
        key: String,
        action_type: Option<ActionType>,
    },

    #[error("Reducer failed: {0}")]
    ReducerFailed(String),
}

impl CombineError {
    /// Whether the error was detected while probing reducers at build time.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::ReducerInitialization { .. } | Self::ReducerProbe { .. }
        )
    }

    /// Key of the offending reducer, when the error names one.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::ReducerInitialization { key }
            | Self::ReducerProbe { key }
            | Self::UndefinedSlice { key, .. } => Some(key),
            Self::ReducerFailed(_) => None,
        }
    }
}

fn describe_action(action_type: &Option<ActionType>) -> String {
    match action_type {
        Some(action_type) if !action_type.as_str().is_empty() => format!("\"{action_type}\""),
        _ => "an action".to_string(),
    }
}
