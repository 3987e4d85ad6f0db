//! Build mode selection.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Environment variable consulted by [`BuildMode::detect`].
pub const MODE_ENV_VAR: &str = "STATECRAFT_ENV";

/// Whether diagnostics are produced.
///
/// In `Development` the combinator reports unset reducer slots and
/// unexpected state shapes through its warning sink. In `Production` those
/// checks are skipped entirely and no message is ever built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    Production,
}

/// Error returned when parsing an unknown build mode name.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Unknown build mode \"{0}\", expected \"development\" or \"production\"")]
pub struct ParseModeError(String);

impl BuildMode {
    /// Pick the mode from `STATECRAFT_ENV`, falling back to the compile profile.
    ///
    /// Unrecognised values are ignored rather than rejected, the same as an
    /// unset variable.
    pub fn detect() -> Self {
        Self::from_env_value(std::env::var(MODE_ENV_VAR).ok().as_deref())
    }

    /// Resolve the mode from a raw variable value, if any.
    ///
    /// A value that does not parse counts as absent.
    pub fn from_env_value(value: Option<&str>) -> Self {
        value
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(Self::from_profile)
    }

    /// `Development` for debug builds, `Production` for release builds.
    pub fn from_profile() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }

    pub fn warnings_enabled(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl Default for BuildMode {
    fn default() -> Self {
        Self::detect()
    }
}

impl FromStr for BuildMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" | "test" => Ok(Self::Development),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}
