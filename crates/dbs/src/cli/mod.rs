//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the dbs binary.

mod commands;
mod plan;
mod process;

pub use commands::{Cli, Commands, legacy_reference};
pub use plan::handle_plan_command;
pub use process::process_reference;

use clap::CommandFactory;
use dbs::DbsResult;
use std::process::ExitCode;

/// Dispatch a parsed command.
///
/// Unknown subcommands print usage on stderr and yield exit code 2, matching
/// clap's own usage errors.
pub async fn run(command: Commands) -> DbsResult<ExitCode> {
    match command {
        Commands::Process { reference } => {
            process_reference(&reference.join(" ")).await?;
        }

        Commands::Plan(plan_cmd) => {
            handle_plan_command(plan_cmd).await?;
        }

        Commands::Legacy(words) => match legacy_reference(&words) {
            Some(reference) => process_reference(&reference).await?,
            None => {
                eprintln!("error: unrecognized command '{}'\n", words.join(" "));
                eprintln!("{}", Cli::command().render_help());
                return Ok(ExitCode::from(2));
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}

/// One-line message for a failed command.
pub fn failure_message(err: &dbs::DbsError) -> String {
    format!("Error: {}", err)
}
