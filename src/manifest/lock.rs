//! requirements.lock generation
//!
//! The lock file is a resolved snapshot of requirements.yaml. It is derived
//! entirely from the requirements document, so it can be regenerated at any
//! time.

use crate::domain::Requirements;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One locked dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedDependency {
    /// Chart name
    pub name: String,
    /// Locked version
    pub version: String,
    /// Repository URL
    pub repository: String,
}

/// Contents of requirements.lock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementsLock {
    /// Locked dependencies, sorted by name
    pub dependencies: Vec<LockedDependency>,
    /// "sha256:<hex>" digest of the locked dependencies
    pub digest: String,
    /// When the lock was generated
    pub generated: DateTime<Utc>,
}

impl RequirementsLock {
    /// Build a lock for the given requirements, generated at `now`
    pub fn from_requirements(requirements: &Requirements, now: DateTime<Utc>) -> Self {
        let mut dependencies: Vec<LockedDependency> = requirements
            .dependencies
            .iter()
            .map(|d| LockedDependency {
                name: d.name.clone(),
                version: d.version.clone(),
                repository: d.repository.clone(),
            })
            .collect();
        dependencies.sort_by(|a, b| a.name.cmp(&b.name));

        let digest = digest(&dependencies);
        Self {
            dependencies,
            digest,
            generated: now,
        }
    }

    /// Keep the timestamp of an earlier lock describing the same state.
    ///
    /// Regenerating an unchanged lock then yields identical bytes.
    pub fn reuse_timestamp(mut self, previous: Option<&RequirementsLock>) -> Self {
        if let Some(previous) = previous {
            if previous.digest == self.digest {
                self.generated = previous.generated;
            }
        }
        self
    }
}

/// Compute the "sha256:<hex>" digest of locked dependencies
pub fn digest(dependencies: &[LockedDependency]) -> String {
    // Serializing plain string fields cannot fail
    let encoded = serde_json::to_vec(dependencies).unwrap_or_default();
    format!("sha256:{}", hex::encode(Sha256::digest(&encoded)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Dependency;
    use chrono::TimeZone;

    fn sample_requirements() -> Requirements {
        Requirements::new(vec![
            Dependency::new("redis", "1.0.0", "https://charts.example.com"),
            Dependency::new("common", "0.1.0", "file://../common"),
        ])
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_lock_sorted_by_name() {
        let lock = RequirementsLock::from_requirements(&sample_requirements(), at(10));
        let names: Vec<_> = lock.dependencies.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["common", "redis"]);
        assert_eq!(lock.generated, at(10));
    }

    #[test]
    fn test_digest_format() {
        let lock = RequirementsLock::from_requirements(&sample_requirements(), at(10));
        assert!(lock.digest.starts_with("sha256:"));
        assert_eq!(lock.digest.len(), "sha256:".len() + 64);
    }

    #[test]
    fn test_digest_ignores_declaration_order() {
        let mut reversed = sample_requirements();
        reversed.dependencies.reverse();
        let a = RequirementsLock::from_requirements(&sample_requirements(), at(10));
        let b = RequirementsLock::from_requirements(&reversed, at(11));
        assert_eq!(a.digest, b.digest);
    }

    #[test]
    fn test_digest_changes_with_version() {
        let mut updated = sample_requirements();
        updated.dependencies[0].version = "1.1.0".to_string();
        let a = RequirementsLock::from_requirements(&sample_requirements(), at(10));
        let b = RequirementsLock::from_requirements(&updated, at(10));
        assert_ne!(a.digest, b.digest);
    }

    #[test]
    fn test_reuse_timestamp_when_unchanged() {
        let previous = RequirementsLock::from_requirements(&sample_requirements(), at(10));
        let lock = RequirementsLock::from_requirements(&sample_requirements(), at(12))
            .reuse_timestamp(Some(&previous));
        assert_eq!(lock.generated, at(10));
    }

    #[test]
    fn test_new_timestamp_when_changed() {
        let previous = RequirementsLock::from_requirements(&sample_requirements(), at(10));
        let mut updated = sample_requirements();
        updated.dependencies[0].version = "1.1.0".to_string();
        let lock = RequirementsLock::from_requirements(&updated, at(12)).reuse_timestamp(Some(&previous));
        assert_eq!(lock.generated, at(12));
    }

    #[test]
    fn test_lock_yaml_round_trip() {
        let lock = RequirementsLock::from_requirements(&sample_requirements(), at(10));
        let yaml = serde_yaml::to_string(&lock).unwrap();
        assert!(yaml.contains("2024-01-15T10:00:00Z"));
        let parsed: RequirementsLock = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, lock);
    }
}
