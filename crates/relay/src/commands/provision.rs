//! Provision command: the host install/update lifecycle entrypoint.

use crate::cli::CliError;
use relay_core::InstallRoot;
use relay_provision::ReleaseFetcher;
use std::path::PathBuf;
use tracing::info;

/// Fetch and install the engine for the current platform.
///
/// Succeeds silently (exit 0); every failure surfaces as one diagnostic
/// line on stderr and exit 1. A failed run never degrades a previously
/// installed engine.
///
/// # Errors
///
/// Returns an error when the platform is unsupported or when the
/// fetch/extract/verify pipeline fails.
pub async fn execute_provision(install_root: Option<PathBuf>) -> Result<(), CliError> {
    let root = match install_root {
        Some(dir) => InstallRoot::new(dir),
        None => InstallRoot::discover()?,
    };

    let fetcher = ReleaseFetcher::new();
    let installed = relay_provision::provision(&root, &fetcher).await?;
    info!(engine = %installed.display(), "Provisioning complete");
    Ok(())
}
