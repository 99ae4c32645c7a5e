//! Dependency and requirements document structures

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Repository scheme of charts vendored next to the parent chart
pub const LOCAL_REPOSITORY_SCHEME: &str = "file://";

/// One declared chart dependency.
///
/// Fields this tool does not interpret (condition, tags, alias, ...) are kept
/// in `extra` so they survive a rewrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    /// Chart name
    pub name: String,
    /// Declared version
    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub version: String,
    /// Repository URL
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub repository: String,
    /// Remaining fields, written back untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Dependency {
    /// Creates a new dependency without extra fields
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        repository: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            repository: repository.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Returns true if the chart is referenced from the local filesystem.
    ///
    /// Local charts have exactly one version, so there is nothing to resolve.
    pub fn is_local(&self) -> bool {
        self.repository.starts_with(LOCAL_REPOSITORY_SCHEME)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} [{}]", self.name, self.version, self.repository)
    }
}

/// Accepts unquoted numeric versions such as `version: 1.2`
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// The requirements document of a chart (requirements.yaml)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Requirements {
    /// Declared dependencies
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    /// Remaining top-level fields
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Requirements {
    /// Creates a requirements document from a list of dependencies
    pub fn new(dependencies: Vec<Dependency>) -> Self {
        Self {
            dependencies,
            extra: BTreeMap::new(),
        }
    }

    /// Sorts dependencies alphabetically by name (stable for equal names)
    pub fn sort_by_name(&mut self) {
        self.dependencies.sort_by(|a, b| a.name.cmp(&b.name));
    }

    /// Returns dependencies that have to be resolved against a remote repository
    pub fn remote_dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies.iter().filter(|d| !d.is_local())
    }

    /// Returns the number of declared dependencies
    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    /// Returns true if no dependency is declared
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}
