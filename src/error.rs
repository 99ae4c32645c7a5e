//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ChartError: Chart directory, metadata and requirements loading/writing
//! - RepositoryError: Chart repository index download and lookup
//! - VersionError: Semantic version parsing

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Chart loading or write-back errors
    #[error(transparent)]
    Chart(#[from] ChartError),

    /// Chart repository related errors
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Version parsing errors
    #[error(transparent)]
    Version(#[from] VersionError),
}

/// Errors related to the chart directory and its files
#[derive(Error, Debug)]
pub enum ChartError {
    /// Chart directory or Chart.yaml not found
    #[error("chart not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read a chart file
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a chart file
    #[error("failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("failed to parse YAML in {path}: {message}")]
    YamlParseError { path: PathBuf, message: String },

    /// YAML serialization error
    #[error("failed to serialize {path}: {message}")]
    YamlWriteError { path: PathBuf, message: String },

    /// The chart has no requirements.yaml
    #[error("chart {path} has no requirements")]
    NoRequirements { path: PathBuf },

    /// Chart.yaml has no version field
    #[error("chart {path} has no version")]
    MissingVersion { path: PathBuf },

    /// Chart.yaml version is not a valid semantic version
    #[error("chart {path} has an invalid version: {source}")]
    InvalidChartVersion {
        path: PathBuf,
        #[source]
        source: VersionError,
    },
}

/// Errors related to chart repositories and their index files
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Network request failed
    #[error("failed to fetch index from {url}: {message}")]
    NetworkError { url: String, message: String },

    /// Repository answered with a non-success status
    #[error("repository {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Index file could not be parsed
    #[error("invalid index for {url}: {message}")]
    InvalidIndex { url: String, message: String },

    /// Failed to read or write the cached index
    #[error("index cache error at {path}: {source}")]
    CacheError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Chart name absent from the index
    #[error("chart '{chart}' not found in repository {repository}")]
    ChartNotFound { chart: String, repository: String },

    /// Chart present but without any usable version
    #[error("no valid version of chart '{chart}' in repository {repository}")]
    NoVersion { chart: String, repository: String },

    /// Repository index was not refreshed during this run
    #[error("repository {repository} is unavailable")]
    Unavailable { repository: String },
}

/// Errors related to semantic version handling
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// Invalid semantic version string
    #[error("invalid version '{version}': {message}")]
    Invalid { version: String, message: String },
}

impl ChartError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ChartError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ChartError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ChartError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new YamlParseError
    pub fn yaml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ChartError::YamlParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new YamlWriteError
    pub fn yaml_write_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ChartError::YamlWriteError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl RepositoryError {
    /// Creates a new NetworkError
    pub fn network_error(url: impl Into<String>, message: impl Into<String>) -> Self {
        RepositoryError::NetworkError {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidIndex error
    pub fn invalid_index(url: impl Into<String>, message: impl Into<String>) -> Self {
        RepositoryError::InvalidIndex {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new ChartNotFound error
    pub fn chart_not_found(chart: impl Into<String>, repository: impl Into<String>) -> Self {
        RepositoryError::ChartNotFound {
            chart: chart.into(),
            repository: repository.into(),
        }
    }
}

impl VersionError {
    /// Creates a new Invalid error
    pub fn invalid(version: impl Into<String>, message: impl Into<String>) -> Self {
        VersionError::Invalid {
            version: version.into(),
            message: message.into(),
        }
    }
}
