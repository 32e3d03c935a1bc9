//! Error types for the relay launcher

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for relay operations
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The running host is not covered by the release support table
    #[error("unsupported platform: {platform}")]
    #[diagnostic(
        code(relay::platform::unsupported),
        help("Prebuilt engine binaries exist for linux-amd64, darwin-amd64 and darwin-arm64. Install one manually from https://github.com/relay-dev/relay/releases")
    )]
    UnsupportedPlatform {
        /// The detected `{os}-{arch}` token
        platform: String,
    },

    /// Downloading the release archive failed (transport or HTTP status)
    #[error("failed to download {url}: {message}")]
    #[diagnostic(code(relay::provision::download))]
    Download {
        /// The URL that was attempted
        url: String,
        /// What went wrong
        message: String,
    },

    /// The downloaded archive could not be decoded
    #[error("failed to extract release archive: {message}")]
    #[diagnostic(code(relay::provision::extract))]
    Extraction {
        /// Decoder error detail
        message: String,
    },

    /// The archive decoded but did not contain the expected file at its root
    #[error("extracted engine binary not found at {}", path.display())]
    #[diagnostic(
        code(relay::provision::missing_artifact),
        help("The release archive must contain exactly one file named after the asset at its root")
    )]
    MissingArtifact {
        /// Where the artifact was expected inside the extraction directory
        path: Box<std::path::Path>,
    },

    /// The engine binary is absent, or present but not executable
    #[error("engine binary not installed at {}", path.display())]
    #[diagnostic(
        code(relay::exec::not_installed),
        help("Run 'relay provision' to download the engine for this platform")
    )]
    NotInstalled {
        /// The install path that was checked
        path: Box<std::path::Path>,
    },

    /// I/O error with path context
    #[error("I/O error during {operation}: {source}")]
    #[diagnostic(code(relay::io::error))]
    Io {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// The path where the I/O error occurred, if applicable
        path: Option<Box<std::path::Path>>,
        /// Description of the operation that failed
        operation: String,
    },
}

impl Error {
    /// Create an unsupported platform error from the detected token
    #[must_use]
    pub fn unsupported_platform(platform: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            platform: platform.into(),
        }
    }

    /// Create a download error carrying the attempted URL
    #[must_use]
    pub fn download(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Download {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an extraction error
    #[must_use]
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction {
            message: message.into(),
        }
    }

    /// Create a missing artifact error for the expected path
    #[must_use]
    pub fn missing_artifact(path: impl Into<PathBuf>) -> Self {
        Self::MissingArtifact {
            path: path.into().into_boxed_path(),
        }
    }

    /// Create a not-installed error for the checked path
    #[must_use]
    pub fn not_installed(path: impl Into<PathBuf>) -> Self {
        Self::NotInstalled {
            path: path.into().into_boxed_path(),
        }
    }

    /// Create an I/O error with context
    #[must_use]
    pub fn io(source: std::io::Error, path: Option<PathBuf>, operation: impl Into<String>) -> Self {
        Self::Io {
            source,
            path: path.map(|p| p.into_boxed_path()),
            operation: operation.into(),
        }
    }
}

/// Result type for relay operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_names_url() {
        let err = Error::download("https://example.test/a.tar.gz", "HTTP 404");
        let rendered = err.to_string();
        assert!(rendered.contains("https://example.test/a.tar.gz"));
        assert!(rendered.contains("HTTP 404"));
    }

    #[test]
    fn test_not_installed_names_path() {
        let err = Error::not_installed(PathBuf::from("/opt/relay/relay-engine"));
        assert!(err.to_string().contains("/opt/relay/relay-engine"));
    }

    #[test]
    fn test_unsupported_platform_names_token() {
        let err = Error::unsupported_platform("windows-arm64");
        assert!(err.to_string().contains("windows-arm64"));
    }

    #[test]
    fn test_io_error_context() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::io(io, Some(PathBuf::from("/tmp/x")), "rename engine");
        assert!(err.to_string().contains("rename engine"));
    }
}
