//! kitup CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use kitup::cli::{Cli, CommandDispatcher, Commands, RunArgs};
use kitup::shell::is_ci;
use kitup::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("kitup=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kitup=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let mut cli = Cli::parse();
    if cli.command.is_none() {
        // bare `kitup` is `kitup run`, KITUP_MODE included
        cli.command = Some(Commands::Run(RunArgs::from_env().unwrap_or_else(|e| e.exit())));
    }
    init_tracing(cli.debug);

    tracing::debug!("kitup starting with args: {:?}", cli);

    let output_mode = OutputMode::from_flags(cli.verbose, cli.quiet);

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // create_ui also falls back to non-interactive when stdout is not a TTY
    let is_interactive = !cli.non_interactive() && !is_ci();
    let mut ui = create_ui(is_interactive, output_mode);

    let dispatcher = CommandDispatcher::new(cli.config.clone());

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
