//! Build mode and warning sinks.
//!
//! Warnings about reducer maps and state shapes are advisory. They are only
//! produced in [`BuildMode::Development`] and are delivered to a
//! [`WarningSink`]; the default sink forwards them to `tracing`.

mod mode;
mod sink;

pub use mode::{BuildMode, ParseModeError, MODE_ENV_VAR};
pub use sink::{CollectingSink, TracingSink, WarningSink};
