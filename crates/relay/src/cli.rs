//! Command-line definition and error rendering for the relay launcher.

use clap::{Parser, Subcommand};
use miette::{Diagnostic, Report};
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Successful exit.
pub const EXIT_OK: i32 = 0;
/// Any launcher failure: resolver, fetch, extract, verify or delegation.
pub const EXIT_FAILURE: i32 = 1;

/// CLI-level error wrapper.
///
/// Every failure in the launcher is terminal for the invocation and maps to
/// exit code 1; the diagnostic detail lives in [`relay_core::Error`].
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// A launcher operation failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Launcher(#[from] relay_core::Error),
}

/// Map a CLI error to its process exit code.
#[must_use]
pub const fn exit_code_for(_err: &CliError) -> i32 {
    EXIT_FAILURE
}

/// Render an error as a single human-readable diagnostic on stderr.
#[allow(clippy::print_stderr)]
pub fn render_error(err: CliError) {
    let report = Report::new(err);
    eprintln!("{report:?}");
    // Ensure output is flushed before potential process exit
    let _ = io::stderr().flush();
}

/// Main CLI entry point for relay.
///
/// Provisions a platform-specific prebuilt engine binary on first use and
/// thereafter delegates all invocations to it.
#[derive(Parser, Debug)]
#[command(name = "relay")]
#[command(about = "Provision the relay engine and delegate invocations to it")]
#[command(version)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Logging verbosity level.
    #[arg(
        short = 'L',
        long,
        global = true,
        help = "Set logging level",
        default_value = "warn",
        value_enum
    )]
    pub level: crate::tracing::LogLevel,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the installed engine, forwarding all arguments verbatim.
    #[command(about = "Run the installed engine, forwarding all arguments verbatim")]
    Run {
        /// Host-managed directory containing the engine. Defaults to the
        /// directory of the launcher executable itself.
        #[arg(
            long,
            value_name = "DIR",
            help = "Directory containing the engine (defaults to the launcher's own directory)"
        )]
        install_root: Option<PathBuf>,

        /// Arguments passed through to the engine, uninterpreted.
        #[arg(
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_name = "ENGINE_ARGS",
            help = "Arguments passed through to the engine"
        )]
        args: Vec<String>,
    },
    /// Download and install the engine for this platform.
    #[command(about = "Download and install the engine for this platform")]
    Provision {
        /// Host-managed directory to install the engine into. Defaults to
        /// the directory of the launcher executable itself.
        #[arg(
            long,
            value_name = "DIR",
            help = "Directory to install the engine into (defaults to the launcher's own directory)"
        )]
        install_root: Option<PathBuf>,
    },
}

/// Parse CLI arguments from the process environment.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_collects_trailing_args_verbatim() {
        let cli = Cli::parse_from(["relay", "run", "list", "--processors", "8"]);
        match cli.command {
            Commands::Run { args, install_root } => {
                assert_eq!(args, vec!["list", "--processors", "8"]);
                assert!(install_root.is_none());
            }
            Commands::Provision { .. } => panic!("expected run"),
        }
    }

    #[test]
    fn test_run_accepts_install_root() {
        let cli = Cli::parse_from(["relay", "run", "--install-root", "/opt/relay", "run"]);
        match cli.command {
            Commands::Run { args, install_root } => {
                assert_eq!(install_root, Some(PathBuf::from("/opt/relay")));
                assert_eq!(args, vec!["run"]);
            }
            Commands::Provision { .. } => panic!("expected run"),
        }
    }

    #[test]
    fn test_provision_takes_no_engine_args() {
        let cli = Cli::parse_from(["relay", "provision"]);
        assert!(matches!(
            cli.command,
            Commands::Provision { install_root: None }
        ));
    }

    #[test]
    fn test_exit_code_mapping() {
        let err = CliError::from(relay_core::Error::unsupported_platform("other-other"));
        assert_eq!(exit_code_for(&err), EXIT_FAILURE);
    }
}
