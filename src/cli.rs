//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Vocabulary flashcard generator - pronunciation, explanation, examples and an illustration.
#[derive(Parser, Debug)]
#[command(name = "flashcard", version, about)]
pub struct Cli {
    /// What to do.
    #[command(subcommand)]
    pub command: Command,

    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Verbose output (debug-level logs).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate one card and print it.
    Card {
        /// The English word or expression.
        expression: String,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Serve the web form.
    Serve {
        /// Listen address (overrides the config file).
        #[arg(short, long)]
        addr: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_with_defaults() {
        let cli = Cli::parse_from(["flashcard", "card", "anticipate"]);
        match cli.command {
            Command::Card { expression, format } => {
                assert_eq!(expression, "anticipate");
                assert_eq!(format, OutputFormat::Text);
            }
            Command::Serve { .. } => panic!("expected card"),
        }
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn card_json_with_globals() {
        let cli = Cli::parse_from([
            "flashcard",
            "card",
            "break a leg",
            "--format",
            "json",
            "-v",
            "--config",
            "my.toml",
        ]);
        match cli.command {
            Command::Card { expression, format } => {
                assert_eq!(expression, "break a leg");
                assert_eq!(format, OutputFormat::Json);
            }
            Command::Serve { .. } => panic!("expected card"),
        }
        assert!(cli.verbose);
        assert_eq!(cli.config.as_deref(), Some("my.toml"));
    }

    #[test]
    fn serve_addr() {
        let cli = Cli::parse_from(["flashcard", "serve", "--addr", "0.0.0.0:9000"]);
        match cli.command {
            Command::Serve { addr } => assert_eq!(addr.as_deref(), Some("0.0.0.0:9000")),
            Command::Card { .. } => panic!("expected serve"),
        }
    }

    #[test]
    fn card_requires_expression() {
        assert!(Cli::try_parse_from(["flashcard", "card"]).is_err());
    }

    #[test]
    fn unknown_format_rejected() {
        assert!(Cli::try_parse_from(["flashcard", "card", "x", "--format", "xml"]).is_err());
    }
}
