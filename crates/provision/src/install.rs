//! Archive extraction and atomic engine installation.
//!
//! The archive is unpacked into a fresh uniquely named directory created
//! beside the final install path, so the last step is a same-filesystem
//! rename. The rename replaces any previous engine without a prior unlink:
//! a reader polling the install path sees either the old binary or the new
//! one, never an absent or partially written file. Permission bits are set
//! before the move for the same reason.

use flate2::read::GzDecoder;
use relay_core::{Error, InstallRoot, Platform, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use tar::Archive;
use tracing::{debug, info};

use crate::fetch::ReleaseFetcher;

/// Fetch, extract and install the engine for the current platform.
///
/// This is the host lifecycle hook's entry point: resolver → fetcher →
/// installer, each step blocking until complete. Temporary artifacts (the
/// downloaded archive, the extraction directory) are released on every exit
/// path by drop.
///
/// # Errors
///
/// Returns [`Error::UnsupportedPlatform`] when the host is outside the
/// support table, or any fetch/extract/verify error from the steps below.
pub async fn provision(root: &InstallRoot, fetcher: &ReleaseFetcher) -> Result<PathBuf> {
    let platform = Platform::current();
    let asset = platform
        .release_asset()
        .ok_or_else(|| Error::unsupported_platform(platform.to_string()))?;

    info!(%platform, asset, "Provisioning engine");
    let archive = fetcher.download(asset).await?;
    let installed = install_archive(archive.path(), asset, root)?;
    info!(engine = %installed.display(), "Engine installed");
    Ok(installed)
}

/// Extract a downloaded archive and move the engine into place.
///
/// The archive must be a gzip tar containing exactly one file named `asset`
/// at its root. A pre-existing engine is left untouched by every failure
/// before the final rename.
///
/// # Errors
///
/// Returns [`Error::Extraction`] if the archive cannot be decoded,
/// [`Error::MissingArtifact`] if the expected file is absent from the
/// archive root, or [`Error::Io`] for filesystem failures.
pub fn install_archive(archive: &Path, asset: &str, root: &InstallRoot) -> Result<PathBuf> {
    let dest = root.engine_path();
    std::fs::create_dir_all(root.dir())
        .map_err(|e| Error::io(e, Some(root.dir().to_path_buf()), "create install root"))?;

    // Unique per-invocation directory on the destination filesystem; removed
    // on drop whether installation succeeds or fails.
    let extract_dir = tempfile::Builder::new()
        .prefix(".relay-extract-")
        .tempdir_in(root.dir())
        .map_err(|e| Error::io(e, Some(root.dir().to_path_buf()), "create extraction dir"))?;

    let file = File::open(archive)
        .map_err(|e| Error::io(e, Some(archive.to_path_buf()), "open downloaded archive"))?;
    Archive::new(GzDecoder::new(file))
        .unpack(extract_dir.path())
        .map_err(|e| Error::extraction(e.to_string()))?;

    // The release layout is flat: one file, named after the asset, at the
    // archive root. Anything else means we downloaded the wrong thing.
    let extracted = extract_dir.path().join(asset);
    if !extracted.is_file() {
        return Err(Error::missing_artifact(extracted));
    }

    set_executable(&extracted)?;

    std::fs::rename(&extracted, &dest)
        .map_err(|e| Error::io(e, Some(dest.clone()), "move engine into place"))?;
    debug!(engine = %dest.display(), "Engine moved into place");

    Ok(dest)
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = std::fs::metadata(path)
        .map_err(|e| Error::io(e, Some(path.to_path_buf()), "stat extracted engine"))?
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms)
        .map_err(|e| Error::io(e, Some(path.to_path_buf()), "mark engine executable"))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}
