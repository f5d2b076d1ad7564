//! # askdoc CLI
//!
//! Ask questions about a single document from the command line.
//!
//! ## Usage
//!
//! ```bash
//! askdoc ask <file> "<question>"
//! askdoc chat <file>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `askdoc ask <file> "<q>"` | Ingest the document and answer one question |
//! | `askdoc chat <file>` | Ingest the document and answer questions interactively |
//!
//! All commands accept `--config <path>` pointing to a TOML file; every
//! setting has a default, so the flag is optional. The chat model needs
//! an API key in the environment (`GROQ_API_KEY` or `OPENAI_API_KEY`
//! depending on the configured provider).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use askdoc::config::{load_config, Config};
use askdoc::error::AskError;
use askdoc::model::{create_model, ChatModel};
use askdoc::session::Session;

/// askdoc — answer questions about one document using term-frequency
/// retrieval and a chat model constrained to the retrieved context.
#[derive(Parser)]
#[command(
    name = "askdoc",
    about = "Ask questions about a single document",
    version,
    long_about = "askdoc ingests one document (PDF or plain text), indexes it with \
    lightweight term-frequency vectors, and answers questions by sending only the \
    most relevant chunks to a chat model. Each session is limited to a fixed number \
    of questions."
)]
struct Cli {
    /// Path to configuration file (TOML). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a document and answer a single question.
    Ask {
        /// Document to ingest (PDF or plain text).
        file: PathBuf,
        /// The question to answer from the document.
        question: String,
    },

    /// Ingest a document and answer questions interactively.
    ///
    /// Reads questions from stdin until EOF, `exit`, or the session
    /// quota is exhausted.
    Chat {
        /// Document to ingest (PDF or plain text).
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("askdoc=warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Ask { file, question } => {
            let (mut session, doc, model) = ingest_file(config, &file)?;
            match session.answer(&doc, model.as_ref(), &question).await {
                Ok(answer) => {
                    println!("{}", answer);
                    println!();
                    println!(
                        "requests used: {}/{}",
                        session.requests_used(),
                        session.requests_used() + session.remaining_quota()
                    );
                }
                Err(e) => report_error(&e)?,
            }
        }
        Commands::Chat { file } => {
            let (mut session, doc, model) = ingest_file(config, &file)?;
            println!(
                "Loaded {} ({} chunks). Ask away; 'exit' to quit.",
                file.display(),
                doc.len()
            );

            let stdin = std::io::stdin();
            loop {
                print!("> ");
                std::io::stdout().flush()?;

                let mut line = String::new();
                if stdin.lock().read_line(&mut line)? == 0 {
                    break;
                }
                let question = line.trim();
                if question == "exit" || question == "quit" {
                    break;
                }

                match session.answer(&doc, model.as_ref(), question).await {
                    Ok(answer) => {
                        println!("{}", answer);
                        println!("({} requests left)", session.remaining_quota());
                    }
                    Err(AskError::EmptyQuestion) => {
                        println!("Please enter a question.");
                    }
                    Err(e @ AskError::QuotaExceeded { .. }) => {
                        println!("{}", e);
                        break;
                    }
                    Err(e) => report_error(&e)?,
                }
            }
        }
    }

    Ok(())
}

/// Read and ingest the document, and build the configured chat model.
fn ingest_file(
    config: Config,
    file: &Path,
) -> Result<(Session, askdoc::models::IngestedDocument, Box<dyn ChatModel>)> {
    let bytes = std::fs::read(file)
        .with_context(|| format!("Failed to read document: {}", file.display()))?;

    let model = create_model(&config.model)?;
    let session = Session::new(config);
    let doc = session.ingest(&bytes)?;

    Ok((session, doc, model))
}

/// Surface a pipeline error to the user without fabricating an answer.
fn report_error(err: &AskError) -> Result<()> {
    match err {
        AskError::EmptyDocument => {
            println!("The document has no extractable text, nothing to answer from.");
            Ok(())
        }
        other => Err(anyhow::anyhow!("{}", other)),
    }
}
