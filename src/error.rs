//! Error types for graph wiring and settings loading.
//!
//! The per-region simulation never fails; only operations that resolve a
//! region handle or read configuration can.

use std::fmt;

use crate::sim::RegionId;

/// Errors from [`crate::sim::RegionGraph`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The handle does not name a registered region.
    UnknownRegion(RegionId),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRegion(id) => write!(f, "unknown region {id}"),
        }
    }
}

impl std::error::Error for GraphError {}

/// Errors from loading or validating [`crate::Settings`].
#[derive(Debug)]
pub enum SettingsError {
    /// The settings file could not be read.
    Io(std::io::Error),
    /// The settings file is not valid JSON for `Settings`.
    Parse(serde_json::Error),
    /// The values parse but cannot drive a simulation.
    Invalid {
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read settings: {e}"),
            Self::Parse(e) => write!(f, "cannot parse settings: {e}"),
            Self::Invalid { reason } => write!(f, "invalid settings: {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<GraphError> for SettingsError {
    fn from(e: GraphError) -> Self {
        Self::Invalid {
            reason: e.to_string(),
        }
    }
}
