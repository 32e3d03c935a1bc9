//! Delegated execution of the installed engine.
//!
//! Every invocation of the launcher ends here: locate the engine under the
//! configured install root, validate it, spawn it with the caller's argument
//! vector, and hand its exit status back to the shell. Two flavors share the
//! contract:
//!
//! - [`run_passthrough`] inherits the parent's standard streams directly
//!   (the standalone launcher form);
//! - [`run_streamed`] captures stdout/stderr and forwards each line to a
//!   caller-supplied callback tagged by channel (the host-plugin form),
//!   requesting interactivity only when stdin is a terminal.
//!
//! The engine is spawned directly with an argument vector; no shell ever
//! interprets the command line. Neither flavor imposes a timeout.

use relay_core::{Error, InstallRoot, Result, shell};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, warn};

/// Exit code substituted when the child terminates without a retrievable
/// numeric status (killed by a signal, or the runtime reports none).
pub const FALLBACK_EXIT_CODE: i32 = 1;

/// Which channel a streamed output line arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    /// The engine's standard output.
    Stdout,
    /// The engine's standard error.
    Stderr,
}

/// A validated request to run the engine.
///
/// Construction is the only path to a spawn and fails fast when the engine
/// is absent or not executable, so no process is ever started against an
/// invalid install.
#[derive(Debug)]
pub struct ExecutionRequest {
    program: PathBuf,
    args: Vec<String>,
}

impl ExecutionRequest {
    /// Resolve and validate the engine under `root`.
    ///
    /// Argument elements are opaque and forwarded verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInstalled`] when the engine binary does not exist
    /// at the fixed path or lacks executable permission.
    pub fn new(root: &InstallRoot, args: Vec<String>) -> Result<Self> {
        let program = root.engine_path();
        if !is_executable(&program) {
            return Err(Error::not_installed(program));
        }
        Ok(Self { program, args })
    }

    /// Path of the engine binary to spawn.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments forwarded to the engine.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Render the invocation as a single shell-safe command line.
    ///
    /// Display only; the spawn itself never goes through a shell.
    #[must_use]
    pub fn command_line(&self) -> String {
        let program = self.program.to_string_lossy();
        shell::join(std::iter::once(program.as_ref()).chain(self.args.iter().map(String::as_str)))
    }
}

/// Run the engine with the parent's standard streams inherited directly.
///
/// Blocks until the engine exits and returns its status verbatim, or
/// [`FALLBACK_EXIT_CODE`] when no status is retrievable.
///
/// # Errors
///
/// Returns [`Error::Io`] if the engine cannot be spawned.
pub async fn run_passthrough(request: &ExecutionRequest) -> Result<i32> {
    debug!(command = %request.command_line(), "Delegating to engine");
    let status = Command::new(&request.program)
        .args(&request.args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| Error::io(e, Some(request.program.clone()), "spawn engine"))?;
    Ok(exit_code(status))
}

/// Run the engine, forwarding each output line to `on_output` as it arrives.
///
/// stdout and stderr are piped and tagged with their [`OutputStream`]; the
/// callback is invoked from the caller's task, in arrival order per channel.
/// stdin is inherited only when the launcher's own stdin is a terminal, so
/// interactive engines keep working under a terminal without blocking
/// non-interactive hosts. The engine may run indefinitely.
///
/// # Errors
///
/// Returns [`Error::Io`] if the engine cannot be spawned or its pipes
/// cannot be captured.
pub async fn run_streamed<F>(request: &ExecutionRequest, mut on_output: F) -> Result<i32>
where
    F: FnMut(OutputStream, &str),
{
    debug!(command = %request.command_line(), "Delegating to engine (streamed)");

    let interactive = std::io::stdin().is_terminal();
    let mut child = Command::new(&request.program)
        .args(&request.args)
        .stdin(if interactive {
            Stdio::inherit()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::io(e, Some(request.program.clone()), "spawn engine"))?;

    let stdout = child.stdout.take().ok_or_else(|| {
        Error::io(
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout pipe not available"),
            Some(request.program.clone()),
            "capture engine output",
        )
    })?;
    let stderr = child.stderr.take().ok_or_else(|| {
        Error::io(
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stderr pipe not available"),
            Some(request.program.clone()),
            "capture engine output",
        )
    })?;

    // Reader tasks funnel both channels into one queue so the callback runs
    // on a single task; the queue drains when both readers hit EOF.
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let stdout_tx = tx.clone();
    let stdout_task = tokio::spawn(async move {
        let mut lines = BufReader::new(stdout).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if stdout_tx.send((OutputStream::Stdout, line)).is_err() {
                break;
            }
        }
    });

    let stderr_tx = tx;
    let stderr_task = tokio::spawn(async move {
        let mut lines = BufReader::new(stderr).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if stderr_tx.send((OutputStream::Stderr, line)).is_err() {
                break;
            }
        }
    });

    while let Some((stream, line)) = rx.recv().await {
        on_output(stream, &line);
    }

    let status = child
        .wait()
        .await
        .map_err(|e| Error::io(e, Some(request.program.clone()), "wait for engine"))?;

    let _ = stdout_task.await;
    let _ = stderr_task.await;

    Ok(exit_code(status))
}

/// Map a child exit status onto the delegate's numeric result.
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or_else(|| {
        warn!(%status, "Engine terminated without an exit status");
        FALLBACK_EXIT_CODE
    })
}

fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path)
            .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }
    #[cfg(not(unix))]
    {
        path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::ENGINE_BINARY;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn write_engine(dir: &Path, script: &str) {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(ENGINE_BINARY);
        std::fs::write(&path, script).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
    }

    #[test]
    fn test_missing_engine_fails_before_spawn() {
        let temp = TempDir::new().unwrap();
        let root = InstallRoot::new(temp.path());
        let err = ExecutionRequest::new(&root, vec![]).unwrap_err();
        assert!(matches!(err, Error::NotInstalled { .. }));
        assert!(err.to_string().contains(ENGINE_BINARY));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_engine_is_not_installed() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(ENGINE_BINARY), b"#!/bin/sh\n").unwrap();

        let root = InstallRoot::new(temp.path());
        let err = ExecutionRequest::new(&root, vec![]).unwrap_err();
        assert!(matches!(err, Error::NotInstalled { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_status_propagates_verbatim() {
        let temp = TempDir::new().unwrap();
        write_engine(temp.path(), "#!/bin/sh\nexit 7\n");

        let root = InstallRoot::new(temp.path());
        let request = ExecutionRequest::new(&root, vec![]).unwrap();
        assert_eq!(run_passthrough(&request).await.unwrap(), 7);

        write_engine(temp.path(), "#!/bin/sh\nexit 0\n");
        let request = ExecutionRequest::new(&root, vec![]).unwrap();
        assert_eq!(run_passthrough(&request).await.unwrap(), 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_signal_death_yields_fallback_code() {
        let temp = TempDir::new().unwrap();
        write_engine(temp.path(), "#!/bin/sh\nkill -9 $$\n");

        let root = InstallRoot::new(temp.path());
        let request = ExecutionRequest::new(&root, vec![]).unwrap();
        assert_eq!(run_passthrough(&request).await.unwrap(), FALLBACK_EXIT_CODE);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_streamed_output_is_tagged_by_channel() {
        let temp = TempDir::new().unwrap();
        write_engine(
            temp.path(),
            "#!/bin/sh\necho out-line\necho err-line >&2\nexit 3\n",
        );

        let root = InstallRoot::new(temp.path());
        let request = ExecutionRequest::new(&root, vec![]).unwrap();

        let mut seen = Vec::new();
        let code = run_streamed(&request, |stream, line| {
            seen.push((stream, line.to_string()));
        })
        .await
        .unwrap();

        assert_eq!(code, 3);
        assert!(seen.contains(&(OutputStream::Stdout, "out-line".to_string())));
        assert!(seen.contains(&(OutputStream::Stderr, "err-line".to_string())));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_arguments_arrive_unsplit() {
        let temp = TempDir::new().unwrap();
        // Each argv element on its own line; an arg with spaces must stay whole.
        write_engine(temp.path(), "#!/bin/sh\nprintf '%s\\n' \"$@\"\n");

        let root = InstallRoot::new(temp.path());
        let args = vec!["a b".to_string(), "it's".to_string(), String::new()];
        let request = ExecutionRequest::new(&root, args).unwrap();

        let mut lines = Vec::new();
        let code = run_streamed(&request, |stream, line| {
            if stream == OutputStream::Stdout {
                lines.push(line.to_string());
            }
        })
        .await
        .unwrap();

        assert_eq!(code, 0);
        assert_eq!(lines, vec!["a b", "it's", ""]);
    }

    #[test]
    fn test_command_line_rendering_quotes_unsafe_args() {
        let temp = TempDir::new().unwrap();

        #[cfg(unix)]
        write_engine(temp.path(), "#!/bin/sh\n");
        #[cfg(not(unix))]
        std::fs::write(temp.path().join(ENGINE_BINARY), b"").unwrap();

        let root = InstallRoot::new(temp.path());
        let request =
            ExecutionRequest::new(&root, vec!["run".to_string(), "a b".to_string()]).unwrap();
        let rendered = request.command_line();
        assert!(rendered.ends_with("run 'a b'"));
    }
}
