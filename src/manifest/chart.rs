//! Chart directory loading
//!
//! A chart directory holds Chart.yaml (metadata), an optional
//! requirements.yaml (declared dependencies) and requirements.lock.

use super::{CHART_METADATA_FILE, REQUIREMENTS_FILE};
use crate::domain::Requirements;
use crate::error::ChartError;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Chart.yaml contents.
///
/// Kept as a generic mapping so every field survives a version bump in its
/// original order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartMetadata {
    path: PathBuf,
    document: Mapping,
}

impl ChartMetadata {
    /// Load Chart.yaml from a chart directory
    pub fn load(chart_dir: &Path) -> Result<Self, ChartError> {
        let path = chart_dir.join(CHART_METADATA_FILE);
        let content = match read_optional(&path)? {
            Some(content) => content,
            None => return Err(ChartError::not_found(chart_dir)),
        };

        let document = match serde_yaml::from_str::<Value>(&content)
            .map_err(|e| ChartError::yaml_parse_error(&path, e.to_string()))?
        {
            Value::Mapping(map) => map,
            Value::Null => Mapping::new(),
            _ => {
                return Err(ChartError::yaml_parse_error(
                    &path,
                    "expected a mapping at the top level",
                ))
            }
        };

        Ok(Self { path, document })
    }

    /// Path of the Chart.yaml file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Chart name, if declared
    pub fn name(&self) -> Option<String> {
        self.field("name")
    }

    /// Chart version, if declared
    pub fn version(&self) -> Option<String> {
        self.field("version")
    }

    /// Replace the chart version, keeping the field's position
    pub fn set_version(&mut self, version: impl Into<String>) {
        self.document.insert(
            Value::String("version".to_string()),
            Value::String(version.into()),
        );
    }

    /// The full document
    pub fn document(&self) -> &Mapping {
        &self.document
    }

    fn field(&self, key: &str) -> Option<String> {
        match self.document.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Load the requirements document of a chart.
///
/// Returns `Ok(None)` when the chart declares no requirements file; this is
/// not an error. The chart itself (Chart.yaml) must exist and parse.
pub fn load_requirements(chart_dir: &Path) -> Result<Option<Requirements>, ChartError> {
    ChartMetadata::load(chart_dir)?;

    let path = chart_dir.join(REQUIREMENTS_FILE);
    let Some(content) = read_optional(&path)? else {
        return Ok(None);
    };

    if content.trim().is_empty() {
        return Ok(Some(Requirements::default()));
    }

    serde_yaml::from_str(&content)
        .map(Some)
        .map_err(|e| ChartError::yaml_parse_error(&path, e.to_string()))
}

/// Read a file, mapping "not found" to `None`
pub(crate) fn read_optional(path: &Path) -> Result<Option<String>, ChartError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ChartError::read_error(path, e)),
    }
}
