//! Semantic version parsing, comparison and incrementing
//!
//! Thin layer over the `semver` crate. Chart and dependency versions in the
//! wild are written loosely ("v1.2.3", "1.2"), so parsing strips a leading
//! `v` and pads missing minor/patch components before handing off.

use crate::domain::IncrementKind;
use crate::error::VersionError;
use semver::{BuildMetadata, Prerelease, Version};
use std::cmp::Ordering;

/// Parse a version string into a semver::Version.
///
/// Examples:
/// - "1" -> 1.0.0
/// - "v1.2" -> 1.2.0
/// - "1.2.3-rc.1" -> 1.2.3-rc.1
pub fn parse(version: &str) -> Result<Version, VersionError> {
    let trimmed = version.trim();
    let stripped = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    if stripped.is_empty() {
        return Err(VersionError::invalid(version, "empty version string"));
    }

    // Pad only the numeric core; pre-release and build parts stay as written
    let core_end = stripped.find(['-', '+']).unwrap_or(stripped.len());
    let (core, suffix) = stripped.split_at(core_end);
    let normalized = match core.split('.').count() {
        1 => format!("{}.0.0{}", core, suffix),
        2 => format!("{}.0{}", core, suffix),
        _ => stripped.to_string(),
    };

    Version::parse(&normalized).map_err(|e| VersionError::invalid(version, e.to_string()))
}

/// Compare two versions using semantic version precedence.
///
/// Build metadata does not take part in precedence.
pub fn compare(a: &Version, b: &Version) -> Ordering {
    a.cmp_precedence(b)
}

/// Returns true if `latest` strictly exceeds `current`
pub fn is_newer(current: &Version, latest: &Version) -> bool {
    compare(latest, current) == Ordering::Greater
}

/// Increment the major component, resetting minor and patch
pub fn increment_major(v: &Version) -> Version {
    Version::new(v.major + 1, 0, 0)
}

/// Increment the minor component, resetting patch
pub fn increment_minor(v: &Version) -> Version {
    Version::new(v.major, v.minor + 1, 0)
}

/// Increment the patch component.
///
/// A pre-release is promoted to its release instead: 1.2.3-rc.1 -> 1.2.3.
pub fn increment_patch(v: &Version) -> Version {
    if !v.pre.is_empty() {
        let mut released = v.clone();
        released.pre = Prerelease::EMPTY;
        released.build = BuildMetadata::EMPTY;
        return released;
    }
    Version::new(v.major, v.minor, v.patch + 1)
}

/// Increment a version by the given kind
pub fn increment(v: &Version, kind: IncrementKind) -> Version {
    match kind {
        IncrementKind::Major => increment_major(v),
        IncrementKind::Minor => increment_minor(v),
        IncrementKind::Patch => increment_patch(v),
    }
}
