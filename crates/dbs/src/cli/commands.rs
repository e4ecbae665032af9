//! CLI command definitions.

use clap::{Parser, Subcommand};
use dbs::StudyStatus;

/// dbs - turn a scripture reference into OBS verse scenes and illustrations
#[derive(Parser, Debug)]
#[command(name = "dbs")]
#[command(
    about = "Turn a scripture reference into OBS verse scenes and illustrations",
    long_about = None
)]
#[command(version)]
#[command(after_help = "A bare reference is also accepted:\n  dbs John 3:16-18")]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process a scripture reference, e.g. `dbs process John 3:16-18`
    Process {
        /// Reference words, joined with spaces
        #[arg(required = true, num_args = 1..)]
        reference: Vec<String>,
    },

    /// Study plan commands
    #[command(subcommand)]
    Plan(PlanCommands),

    /// Bare reference, e.g. `dbs 1 cor 13:4-7`
    #[command(external_subcommand)]
    Legacy(Vec<String>),
}

/// Study plan subcommands
#[derive(Subcommand, Debug)]
pub enum PlanCommands {
    /// Add a reference to the plan
    Add {
        /// Reference words, joined with spaces
        #[arg(required = true, num_args = 1..)]
        reference: Vec<String>,
    },

    /// List all items in the plan
    List,

    /// Process the next pending item
    Next,

    /// Set the status of a reference, e.g. `dbs plan mark "John 3:16" complete`
    Mark {
        /// Reference exactly as it appears in the plan
        reference: String,

        /// pending, processed or complete
        status: StudyStatus,
    },
}

/// Reference words from a bare invocation, or `None` when they cannot be a
/// reference (no `chapter:verse`), i.e. an unknown subcommand.
pub fn legacy_reference(words: &[String]) -> Option<String> {
    let reference = words.join(" ");
    reference.contains(':').then_some(reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_joins_words() {
        let cli = Cli::try_parse_from(["dbs", "process", "1", "cor", "13:4"]).unwrap();
        match cli.command {
            Commands::Process { reference } => assert_eq!(reference.join(" "), "1 cor 13:4"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn bare_reference_is_legacy() {
        let cli = Cli::try_parse_from(["dbs", "John", "3:16"]).unwrap();
        match cli.command {
            Commands::Legacy(words) => assert_eq!(words, vec!["John", "3:16"]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn unknown_word_is_not_a_reference() {
        let words = |args: &[&str]| args.iter().map(|a| a.to_string()).collect::<Vec<_>>();
        assert_eq!(
            legacy_reference(&words(&["1", "cor", "13:4-7"])).as_deref(),
            Some("1 cor 13:4-7")
        );
        assert_eq!(legacy_reference(&words(&["foo"])), None);
        assert_eq!(legacy_reference(&words(&["John", "3"])), None);
    }

    #[test]
    fn mark_parses_status_case_insensitively() {
        let cli =
            Cli::try_parse_from(["dbs", "-v", "plan", "mark", "John 3:16", "Complete"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Plan(PlanCommands::Mark { reference, status }) => {
                assert_eq!(reference, "John 3:16");
                assert_eq!(status, StudyStatus::Complete);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn mark_rejects_unknown_status() {
        assert!(Cli::try_parse_from(["dbs", "plan", "mark", "John 3:16", "done"]).is_err());
    }

    #[test]
    fn no_arguments_is_an_error() {
        assert!(Cli::try_parse_from(["dbs"]).is_err());
        assert!(Cli::try_parse_from(["dbs", "plan"]).is_err());
    }
}
