//! Chart version increment kinds

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which component of the chart version to bump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IncrementKind {
    /// x.0.0
    Major,
    /// 0.x.0
    Minor,
    /// 0.0.x
    #[default]
    Patch,
}

impl fmt::Display for IncrementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IncrementKind::Major => "major",
            IncrementKind::Minor => "minor",
            IncrementKind::Patch => "patch",
        };
        write!(f, "{}", label)
    }
}
