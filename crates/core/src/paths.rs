//! Install-root configuration for the engine binary.
//!
//! The install root is an explicit value threaded through provisioning and
//! delegation instead of a fixed implicit location, so tests can point both
//! at a scratch directory. In the standalone form the root is the directory
//! containing the launcher executable itself; in the plugin form the host
//! dependency manager supplies it.

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// File name of the installed engine binary.
///
/// At most one file ever occupies this name under a given root; it is either
/// fully absent or present and executable.
pub const ENGINE_BINARY: &str = "relay-engine";

/// The directory that holds (or will hold) the engine binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRoot(PathBuf);

impl InstallRoot {
    /// Wrap an explicit directory, e.g. one provided by a host tool.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self(dir.into())
    }

    /// Discover the standalone install root: the directory containing the
    /// running launcher executable.
    ///
    /// # Errors
    ///
    /// Returns an error if the current executable path cannot be determined.
    pub fn discover() -> Result<Self> {
        let exe = std::env::current_exe()
            .map_err(|e| Error::io(e, None, "locate launcher executable"))?;
        let dir = exe.parent().map(Path::to_path_buf).ok_or_else(|| {
            Error::io(
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "executable has no parent directory",
                ),
                Some(exe.clone()),
                "locate launcher executable",
            )
        })?;
        Ok(Self(dir))
    }

    /// The directory itself.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.0
    }

    /// The fixed path of the installed engine under this root.
    #[must_use]
    pub fn engine_path(&self) -> PathBuf {
        self.0.join(ENGINE_BINARY)
    }
}

impl std::fmt::Display for InstallRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
