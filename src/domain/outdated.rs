//! Outdated dependency findings

use super::Dependency;
use semver::Version;
use std::fmt;

/// A declared dependency for which the repository offers a newer version
#[derive(Debug, Clone, PartialEq)]
pub struct OutdatedDependency {
    /// The dependency as declared in requirements.yaml
    pub dependency: Dependency,
    /// Highest version published in the dependency's repository
    pub latest_version: Version,
}

impl OutdatedDependency {
    /// Creates a new finding
    pub fn new(dependency: Dependency, latest_version: Version) -> Self {
        Self {
            dependency,
            latest_version,
        }
    }

    /// Chart name
    pub fn name(&self) -> &str {
        &self.dependency.name
    }

    /// Version as declared
    pub fn version(&self) -> &str {
        &self.dependency.version
    }

    /// Repository URL
    pub fn repository(&self) -> &str {
        &self.dependency.repository
    }
}

impl fmt::Display for OutdatedDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {}",
            self.dependency.name, self.dependency.version, self.latest_version
        )
    }
}

/// Sort findings alphabetically by chart name
pub fn sort_outdated(results: &mut [OutdatedDependency]) {
    results.sort_by(|a, b| a.dependency.name.cmp(&b.dependency.name));
}
