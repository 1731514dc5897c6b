use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;

use betterreads_core::{AppConfig, Database, ExitCode, LoaderError, run_pipeline};

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "betterreads",
    about = "Load Open Library author and work dumps into the betterreads store",
    version,
    long_about = None
)]
struct Cli {
    /// Inspect the store instead of loading. Without a subcommand both dumps are loaded.
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output in JSON format.
    /// Also enabled by setting BETTERREADS_JSON=1.
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up an author.
    Author {
        #[command(subcommand)]
        action: AuthorAction,
    },

    /// Look up a book.
    Book {
        #[command(subcommand)]
        action: BookAction,
    },

    /// Show row counts.
    Stats,

    /// Config management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum AuthorAction {
    /// Get an author by ID (e.g. OL23919A).
    Get { id: String },
}

#[derive(Subcommand)]
enum BookAction {
    /// Get a book by work ID (e.g. OL45804W).
    Get { id: String },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show effective config values, after environment overrides.
    List,
}

// ─── Main ────────────────────────────────────────────────────────────────────

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,betterreads=info,betterreads_core=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        error!("{err:#}");
        let code = err
            .downcast_ref::<LoaderError>()
            .map(LoaderError::exit_code)
            .unwrap_or(ExitCode::GeneralError);
        std::process::exit(code as i32);
    }
}

fn run(cli: Cli) -> Result<()> {
    let start = Instant::now();
    let json_output = cli.json || std::env::var("BETTERREADS_JSON").as_deref() == Ok("1");
    let config = AppConfig::load()?;

    match cli.command {
        None => {
            let db = open_db(&config)?;
            let report = run_pipeline(&db, &config)?;
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": report,
                    "meta": { "duration_ms": dur }
                }))?;
            } else {
                println!("{}", report.authors);
                println!("{}", report.works);
            }
        }

        Some(Commands::Author { action: AuthorAction::Get { id } }) => {
            let db = open_db(&config)?;
            let author = db.get_author(&id)?;
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({"status":"ok","data":author,"meta":{"duration_ms":dur}}))?;
            } else {
                println!("{}  {}", author.id, author.name);
                if !author.personal_name.is_empty() {
                    println!("  personal name: {}", author.personal_name);
                }
            }
        }

        Some(Commands::Book { action: BookAction::Get { id } }) => {
            let db = open_db(&config)?;
            let book = db.get_book(&id)?;
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({"status":"ok","data":book,"meta":{"duration_ms":dur}}))?;
            } else {
                println!("{}  {}", book.id, book.name);
                for (author_id, name) in book.authors() {
                    println!("  by {name} ({author_id})");
                }
                if let Some(date) = book.published_date {
                    println!("  published: {date}");
                }
                if !book.cover_ids.is_empty() {
                    println!("  covers: {}", book.cover_ids.join(", "));
                }
                if let Some(description) = book.description.as_deref().filter(|d| !d.is_empty()) {
                    println!();
                    println!("{description}");
                }
            }
        }

        Some(Commands::Stats) => {
            let db = open_db(&config)?;
            let authors = db.count_authors()?;
            let books = db.count_books()?;
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": { "authors": authors, "books": books },
                    "meta": { "duration_ms": dur }
                }))?;
            } else {
                println!("Authors: {authors}");
                println!("Books:   {books}");
            }
        }

        Some(Commands::Config { action: ConfigAction::List }) => {
            if json_output {
                print_json(&serde_json::json!({"status":"ok","data":config}))?;
            } else {
                println!("config file:           {}", AppConfig::config_path().display());
                println!("datadump.author:       {}", config.datadump.author);
                println!("datadump.works:        {}", config.datadump.works);
                println!("database.path:         {}", config.database.path);
                println!("ingest.cache_author_names: {}", config.ingest.cache_author_names);
                println!("ingest.progress_interval:  {}", config.ingest.progress_interval);
            }
        }
    }

    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn print_json(val: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(val)?);
    Ok(())
}

fn open_db(config: &AppConfig) -> Result<Database> {
    Ok(Database::open(&config.database_path())?)
}
