//! Run command: delegate an invocation to the installed engine.

use crate::cli::CliError;
use relay_core::InstallRoot;
use relay_exec::{ExecutionRequest, OutputStream, run_passthrough, run_streamed};
use std::path::PathBuf;
use tracing::debug;

/// Delegate `args` to the engine and return its exit code.
///
/// With an explicit `install_root` (the host-plugin form) the engine's
/// output is captured and re-emitted line by line on the matching channel;
/// without one (the standalone form) the engine inherits the launcher's
/// streams directly. Net user-visible behavior is identical live streaming.
///
/// # Errors
///
/// Returns an error if the engine is not installed under the resolved root
/// or cannot be spawned. Nothing is spawned in the not-installed case.
#[allow(clippy::print_stdout, clippy::print_stderr)]
pub async fn execute_run(install_root: Option<PathBuf>, args: Vec<String>) -> Result<i32, CliError> {
    match install_root {
        Some(dir) => {
            let root = InstallRoot::new(dir);
            debug!(%root, "Delegating via host-managed install root");
            let request = ExecutionRequest::new(&root, args)?;
            let code = run_streamed(&request, |stream, line| match stream {
                OutputStream::Stdout => println!("{line}"),
                OutputStream::Stderr => eprintln!("{line}"),
            })
            .await?;
            Ok(code)
        }
        None => {
            let root = InstallRoot::discover()?;
            debug!(%root, "Delegating via launcher-relative install root");
            let request = ExecutionRequest::new(&root, args)?;
            Ok(run_passthrough(&request).await?)
        }
    }
}
