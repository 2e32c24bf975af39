//! Flashcard - vocabulary cards from a language model and an image model.

mod adapters;
mod card;
mod cassette;
mod cli;
mod config;
mod context;
mod error;
mod generator;
mod html;
mod output;
mod params;
mod ports;
mod prompts;
mod server;

use std::process;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::FlashcardError;
use crate::output::render;
use crate::params::validate_expression;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    // A missing .env is fine.
    let _ = dotenv::dotenv();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "flashcard=debug" } else { "flashcard=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn run(cli: Cli) -> Result<(), FlashcardError> {
    let config_path = config::discover_config_path(cli.config.as_deref());
    debug!(path = %config_path.display(), "loading config");
    let config = Config::load(&config_path).map_err(FlashcardError::Config)?;

    // Validate before any adapter (and its API key) is needed.
    if let Command::Card { ref expression, .. } = cli.command {
        validate_expression(expression).map_err(FlashcardError::InvalidArgument)?;
    }

    let (ctx, recording_session) = ServiceContext::from_env(&config)?;
    let generator = ctx.generator(&config);

    let result = match cli.command {
        Command::Card { expression, format } => {
            let card = generator.generate(&expression).await;
            render(&card, format).map(|rendered| println!("{}", rendered.trim_end()))
        }
        Command::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| config.server.addr.clone());
            server::serve(generator, &addr).await
        }
    };

    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => warn!(error = %e, "failed to save cassette"),
        }
    }

    result
}
