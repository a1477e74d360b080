//! Library build handle
//!
//! Test cases dispatch on the version reported here, so a run can be pointed
//! at an older build's behavior with `--joi <version>`.

use super::error::LibraryError;
use super::Preferences;

/// Version of the build compiled into this binary
pub const BUILD_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A loaded library build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    version: String,
}

impl Library {
    /// The build compiled into this binary
    pub fn current() -> Self {
        Self {
            version: BUILD_VERSION.to_string(),
        }
    }

    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    /// Resolve a CLI reference: `.` (or empty) is the current build,
    /// anything else must be a version such as `1.4.0` or `v2`.
    pub fn load(reference: &str) -> Result<Self, LibraryError> {
        let reference = reference.trim();
        if reference.is_empty() || reference == "." {
            return Ok(Self::current());
        }

        let version = reference.strip_prefix('v').unwrap_or(reference);
        let well_formed = version.starts_with(|c: char| c.is_ascii_digit())
            && version
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '+');
        if !well_formed {
            return Err(LibraryError::InvalidReference(reference.to_string()));
        }
        Ok(Self::with_version(version))
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn major(&self) -> Option<u64> {
        self.version.split('.').next()?.parse().ok()
    }

    /// Default preferences of this build
    ///
    /// 1.x builds reported every error; later builds abort early.
    pub fn preferences(&self) -> Preferences {
        Preferences {
            abort_early: self.major() != Some(1),
            ..Preferences::default()
        }
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::current()
    }
}
