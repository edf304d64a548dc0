//! Provider version constraints.
//!
//! The provider declaration pins the Terraform provider with the pessimistic
//! operator, so `0.3.7` becomes `~> 0.3.7` (any `0.3.x` at or above `0.3.7`).
//!
//! # Examples
//!
//! ```
//! use amplience_render::version::VersionConstraint;
//!
//! let constraint = VersionConstraint::pessimistic("0.3.7").unwrap();
//! assert_eq!(constraint.to_string(), "~> 0.3.7");
//!
//! assert!(VersionConstraint::pessimistic("latest").is_err());
//! ```

use std::fmt;

use crate::error::{Error, Result};

/// A `~>` constraint built from a validated provider version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConstraint {
    version: semver::Version,
    /// The version as configured, `major.minor` or `major.minor.patch`
    raw: String,
}

impl VersionConstraint {
    /// Build a pessimistic constraint for `version`.
    ///
    /// Accepts `major.minor` (patch defaults to 0) or a full semver version.
    pub fn pessimistic(version: &str) -> Result<Self> {
        let raw = version.trim().to_string();
        let parsed = normalize_version(&raw).map_err(|reason| Error::InvalidProviderVersion {
            version: version.to_string(),
            reason,
        })?;
        Ok(Self {
            version: parsed,
            raw,
        })
    }

    /// The parsed version, with a missing patch filled in as 0.
    pub fn version(&self) -> &semver::Version {
        &self.version
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "~> {}", self.raw)
    }
}

/// Normalize a version string to semver by appending `.0` for missing patch.
///
/// - `"1.2"` -> `"1.2.0"`
/// - `"1.2.3"` -> `"1.2.3"`
/// - `"1"` -> error
fn normalize_version(s: &str) -> std::result::Result<semver::Version, String> {
    if s.is_empty() {
        return Err("version is empty".to_string());
    }

    if let Ok(v) = semver::Version::parse(s) {
        return Ok(v);
    }

    let with_patch = format!("{s}.0");
    semver::Version::parse(&with_patch).map_err(|e| format!("expected major.minor[.patch]: {e}"))
}
