//! relay CLI entry point.

// CLI binary needs to report fatal startup failures to stderr before the
// tracing infrastructure exists.
#![allow(clippy::print_stderr)]

use relay::cli::{self, Cli, Commands, EXIT_OK, exit_code_for, render_error};
use relay::commands;
use relay::tracing::init as init_tracing;

fn main() {
    // NOTE: eprintln! in the panic hook is intentional - tracing may be
    // unusable while panicking, so use the most reliable output path.
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("relay panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    let cli = cli::parse();

    if let Err(e) = init_tracing(cli.level) {
        eprintln!("Fatal error: {e}");
        std::process::exit(1);
    }

    std::process::exit(run(cli));
}

/// Create the runtime, dispatch the subcommand and map the outcome to an
/// exit code.
fn run(cli: Cli) -> i32 {
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Fatal error: Failed to create tokio runtime: {e}");
            return 1;
        }
    };

    let result = rt.block_on(async {
        match cli.command {
            Commands::Run { install_root, args } => {
                commands::run::execute_run(install_root, args).await
            }
            Commands::Provision { install_root } => {
                commands::provision::execute_provision(install_root)
                    .await
                    .map(|()| EXIT_OK)
            }
        }
    });

    match result {
        Ok(code) => code,
        Err(err) => {
            let code = exit_code_for(&err);
            render_error(err);
            code
        }
    }
}
