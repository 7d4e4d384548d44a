//! Author Chat - Administrative CLI
//!
//! Prepares the database and loads authors and their books.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;

use author_chat::application::use_cases::authors::{AuthorProfile, SetupAuthorUseCase};
use author_chat::application::use_cases::books::{BookCatalog, SetupBooksUseCase};
use author_chat::infrastructure::driven_adapters::config::AppConfig;
use author_chat::infrastructure::driven_adapters::{
    database, PdfTextExtractor, PostgresAuthorRepository, PostgresBookRepository,
};
use author_chat::infrastructure::logging;

#[derive(Parser)]
#[command(name = "author-chat-admin")]
#[command(about = "Database setup and content loading for Author Chat")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create or upgrade the database schema
    Migrate,

    /// Create or update an author from a metadata JSON file
    Author {
        /// Author name
        #[arg(long)]
        author: String,

        /// JSON file with conversation_style, bio, author_metadata and whatsapp_number
        #[arg(long)]
        metadata: PathBuf,

        /// WhatsApp number users write to, overriding the metadata file
        #[arg(long)]
        whatsapp_number: Option<String>,
    },

    /// Load every PDF in a directory as a book of an existing author
    Books {
        /// Author name
        #[arg(long)]
        author: String,

        /// Directory containing the PDF files
        #[arg(long)]
        books_dir: PathBuf,

        /// JSON file with per-title publication_year and metadata
        #[arg(long)]
        metadata: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = ?e, "Command failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    logging::init(&config.logging)?;

    let pool = database::create_pool(&config.database)
        .await
        .context("Failed to connect to the database")?;

    match cli.command {
        Command::Migrate => {
            database::run_migrations(&pool)
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Database schema is up to date");
        }
        Command::Author {
            author,
            metadata,
            whatsapp_number,
        } => {
            let profile: AuthorProfile = read_json(&metadata)?;
            let use_case = SetupAuthorUseCase::new(Arc::new(PostgresAuthorRepository::new(pool)));
            let (author, outcome) = use_case
                .execute(&author, profile, whatsapp_number.as_deref())
                .await?;
            tracing::info!(author = %author.name, ?outcome, "Author setup completed");
        }
        Command::Books {
            author,
            books_dir,
            metadata,
        } => {
            let catalog: BookCatalog = match metadata {
                Some(path) => read_json(&path)?,
                None => BookCatalog::default(),
            };
            let use_case = SetupBooksUseCase::new(
                Arc::new(PostgresAuthorRepository::new(pool.clone())),
                Arc::new(PostgresBookRepository::new(pool)),
                Arc::new(PdfTextExtractor::new()),
            );
            let report = use_case.execute(&author, &books_dir, &catalog).await?;
            tracing::info!(
                author = %author,
                stored = report.stored,
                total = report.total,
                "Books setup completed"
            );
        }
    }

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path.display()))
}
