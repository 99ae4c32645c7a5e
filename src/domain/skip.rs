//! Dependencies left out of resolution

use super::Dependency;
use crate::error::{RepositoryError, VersionError};
use std::fmt;

/// Reason why a dependency could not be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Declared version is not a semantic version
    InvalidVersion(String),
    /// Repository index was not refreshed in this run
    RepositoryUnavailable,
    /// Chart is not listed in the repository index
    ChartNotFound,
    /// Chart has no stable, parseable version in the index
    NoVersion,
    /// Cached index could not be read
    IndexUnreadable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InvalidVersion(msg) => write!(f, "invalid version: {}", msg),
            SkipReason::RepositoryUnavailable => write!(f, "repository unavailable"),
            SkipReason::ChartNotFound => write!(f, "chart not found in repository"),
            SkipReason::NoVersion => write!(f, "no stable version in repository"),
            SkipReason::IndexUnreadable(msg) => write!(f, "index unreadable: {}", msg),
        }
    }
}

impl From<&RepositoryError> for SkipReason {
    fn from(err: &RepositoryError) -> Self {
        match err {
            RepositoryError::ChartNotFound { .. } => SkipReason::ChartNotFound,
            RepositoryError::NoVersion { .. } => SkipReason::NoVersion,
            RepositoryError::Unavailable { .. } => SkipReason::RepositoryUnavailable,
            other => SkipReason::IndexUnreadable(other.to_string()),
        }
    }
}

impl From<&VersionError> for SkipReason {
    fn from(err: &VersionError) -> Self {
        SkipReason::InvalidVersion(err.to_string())
    }
}

/// A dependency that was soft-skipped during resolution
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedDependency {
    /// The dependency as declared
    pub dependency: Dependency,
    /// Why it was skipped
    pub reason: SkipReason,
}

impl SkippedDependency {
    /// Creates a new skip record
    pub fn new(dependency: Dependency, reason: SkipReason) -> Self {
        Self { dependency, reason }
    }
}

impl fmt::Display for SkippedDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.dependency, self.reason)
    }
}
