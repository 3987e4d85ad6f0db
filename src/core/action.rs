//! Actions and the reserved action-type namespace.

use super::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Prefix of every action type owned by the library.
///
/// Reducers must not handle types in this namespace. They should fall
/// through to returning their current (or initial) state.
pub const PRIVATE_NAMESPACE: &str = "@@statecraft/";

/// Action type dispatched once to ask every reducer for its initial state.
pub const INIT: &str = "@@statecraft/INIT";

const PROBE_PREFIX: &str = "@@statecraft/PROBE_UNKNOWN_ACTION_";

static PROBE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Discriminator of an action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionType(String);

impl ActionType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The reserved initialization type.
    pub fn init() -> Self {
        Self(INIT.to_string())
    }

    /// A fresh type nobody can be handling.
    ///
    /// Probe types live in the private namespace and carry a process-wide
    /// sequence number, so no two probes share a type.
    pub fn probe() -> Self {
        let n = PROBE_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self(format!("{PROBE_PREFIX}{n}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_init(&self) -> bool {
        self.0 == INIT
    }

    /// Whether the type belongs to the private namespace.
    pub fn is_reserved(&self) -> bool {
        self.0.starts_with(PRIVATE_NAMESPACE)
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActionType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ActionType {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A dispatched action.
///
/// The combinator forwards actions untouched. It only reads the type, to
/// describe errors and to recognise the initialization dispatch.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{Action, Value};
///
/// let action = Action::new("todos/add").with_payload(Value::from("buy milk"));
/// assert!(action.is("todos/add"));
/// assert_eq!(action.payload().as_str(), Some("buy milk"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    action_type: Option<ActionType>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    payload: Value,
}

impl Action {
    pub fn new(action_type: impl Into<ActionType>) -> Self {
        Self {
            action_type: Some(action_type.into()),
            payload: Value::Null,
        }
    }

    /// An action without a type. Only useful for exercising error paths.
    pub fn untyped() -> Self {
        Self {
            action_type: None,
            payload: Value::Null,
        }
    }

    pub fn init() -> Self {
        Self::new(ActionType::init())
    }

    pub(crate) fn probe() -> Self {
        Self::new(ActionType::probe())
    }

    pub fn with_payload(mut self, payload: impl Into<Value>) -> Self {
        self.payload = payload.into();
        self
    }

    pub fn action_type(&self) -> Option<&ActionType> {
        self.action_type.as_ref()
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Whether the action carries exactly this type.
    pub fn is(&self, name: &str) -> bool {
        self.action_type
            .as_ref()
            .is_some_and(|action_type| action_type.as_str() == name)
    }

    pub fn is_init(&self) -> bool {
        self.action_type.as_ref().is_some_and(ActionType::is_init)
    }
}
