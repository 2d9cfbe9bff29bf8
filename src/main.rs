//! cdmnav CLI - command-line interface for the CDM field explorer

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cdmnav::backend::{BackendClient, ChatMessage, ChatSession, DEFAULT_BASE_URL, Role};
use cdmnav::query::SearchEngine;
use cdmnav::storage::FieldStore;
use cdmnav::ui::progress::ImportMessage;
use cdmnav::{config, data, import, server, ui};

#[derive(Parser)]
#[command(name = "cdmnav")]
#[command(version)]
#[command(about = "CDM Navigator - explore, search and map Common Domain Model field definitions")]
#[command(long_about = r#"
cdmnav keeps a local, durable dictionary of CDM field definitions and lets you:
  • Search it instantly with paginated substring matching
  • Replace the whole dataset from a delimited export
  • Ask the AI assistant questions and get source-to-CDM mapping suggestions

Example usage:
  cdmnav init
  cdmnav search --query "account"
  cdmnav import --file fields.csv
  cdmnav chat --prompt "What is a TradeState?"
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and seed the built-in field definitions
    Init {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Replace the dataset from a delimited text file
    Import {
        /// Path to the delimited file to import
        #[arg(short, long)]
        file: PathBuf,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Search field definitions
    Search {
        /// Search query; empty matches every field
        #[arg(short, long, default_value = "")]
        query: String,

        /// Page size
        #[arg(short, long, default_value = "50")]
        limit: usize,

        /// Zero-based page number
        #[arg(short, long, default_value = "0")]
        page: usize,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show statistics about the stored dataset
    Stats {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Run the explorer HTTP API
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Assistant backend base URL
        #[arg(short, long)]
        backend: Option<String>,
    },

    /// Ask the AI assistant a question
    Chat {
        /// The question to ask
        #[arg(short, long)]
        prompt: String,

        /// Continue an existing session by id
        #[arg(short, long)]
        session: Option<String>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Assistant backend base URL
        #[arg(short, long)]
        backend: Option<String>,
    },

    /// Get source-to-CDM mapping suggestions for tabular data
    Map {
        /// File containing the source data (headers or sample rows)
        #[arg(short, long)]
        file: PathBuf,

        /// Assistant backend base URL
        #[arg(short, long)]
        backend: Option<String>,
    },

    /// List stored chat sessions
    Sessions {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Init { database } => {
            let path = resolve_database(database)?;
            config::ensure_db_dir(&path)?;

            let mut store = open_store(&path)?;
            if store.count()? == 0 {
                let seeded = store.insert_all(&data::initial_fields(), None)?;
                ui::success(&format!("Seeded {} field definitions", seeded));
            } else {
                ui::info("Already initialized", &format!("{} fields", store.count()?));
            }
            ui::info("Database", &path.display().to_string());
        }

        Commands::Import { file, database } => {
            let path = resolve_database(database)?;
            config::ensure_db_dir(&path)?;

            let text = std::fs::read_to_string(&file)?;
            let fields = import::parse_delimited(&text)?;
            tracing::info!("Parsed {} records from {}", fields.len(), file.display());

            let mut store = open_store(&path)?;
            let (progress, tx) = ui::ProgressManager::new(fields.len());

            let sender = tx.clone();
            let mut on_progress = move |count: usize| {
                let _ = sender.send(ImportMessage::Committed(count));
            };
            let imported = store.replace_all(&fields, Some(&mut on_progress))?;

            let _ = tx.send(ImportMessage::Finished);
            drop(tx);
            progress.clear();

            ui::success(&format!("Imported {} field definitions", imported));
            ui::info("Total in store", &store.count()?.to_string());
        }

        Commands::Search {
            query,
            limit,
            page,
            database,
            format,
        } => {
            let path = resolve_database(database)?;
            let store = open_store(&path)?;
            let engine = SearchEngine::new(&store);

            let offset = page * limit;
            let result = engine.search(&query, limit, offset)?;

            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else if result.records.is_empty() {
                println!("No fields match '{}'.", query.trim());
            } else {
                println!("{}", ui::field_table(&result.records));
                let shown = offset + result.records.len();
                if result.has_more {
                    println!(
                        "Showing {}-{} of {} matches (next: --page {})",
                        offset + 1,
                        shown,
                        result.total,
                        page + 1
                    );
                } else {
                    println!("Showing {} of {} matches", result.records.len(), result.total);
                }
            }
        }

        Commands::Stats { database } => {
            let path = resolve_database(database)?;
            let store = open_store(&path)?;
            let stats = store.stats()?;

            ui::header(&format!("cdmnav store ({})", path.display()));
            println!(
                "{}",
                ui::stats_table(&[
                    ("Fields", &stats.fields.to_string()),
                    ("Chat sessions", &stats.sessions.to_string()),
                ])
            );
        }

        Commands::Serve {
            port,
            database,
            backend,
        } => {
            let path = resolve_database(database)?;
            config::ensure_db_dir(&path)?;
            let backend_url = resolve_backend(backend)?;

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(server::start_server(port, path, backend_url))?;
        }

        Commands::Chat {
            prompt,
            session,
            database,
            backend,
        } => {
            let path = resolve_database(database)?;
            config::ensure_db_dir(&path)?;
            let store = open_store(&path)?;
            let client = BackendClient::new(resolve_backend(backend)?);

            let mut chat_session = match &session {
                Some(id) => store
                    .load_session(id)?
                    .ok_or_else(|| anyhow::anyhow!("no session with id {id}"))?,
                None => ChatSession::new(title_from(&prompt)),
            };

            let spinner = ui::Spinner::new("Asking the assistant...");
            let answer = client.chat(&prompt, &chat_session.messages);
            spinner.finish_and_clear();
            let answer = answer?;

            chat_session.messages.push(ChatMessage {
                role: Role::User,
                content: prompt,
            });
            chat_session.messages.push(ChatMessage {
                role: Role::Model,
                content: answer.clone(),
            });
            store.save_session(&chat_session)?;

            println!("{answer}");
            println!();
            ui::info("Session", &chat_session.id);
        }

        Commands::Map { file, backend } => {
            let client = BackendClient::new(resolve_backend(backend)?);
            let source_data = std::fs::read_to_string(&file)?;

            let spinner = ui::Spinner::new("Requesting mapping suggestions...");
            let suggestions = client.map_fields(&source_data);
            spinner.finish_and_clear();

            if suggestions.is_empty() {
                ui::warn("No mapping suggestions (backend unavailable or no matches)");
            } else {
                println!("{}", ui::mapping_table(&suggestions));
            }
        }

        Commands::Sessions { database } => {
            let path = resolve_database(database)?;
            let store = open_store(&path)?;
            let sessions = store.load_sessions()?;

            if sessions.is_empty() {
                println!("No chat sessions stored.");
            } else {
                for session in sessions {
                    println!(
                        "- {} [{}] ({} messages)",
                        session.title,
                        session.id,
                        session.messages.len()
                    );
                }
            }
        }
    }

    Ok(())
}

fn open_store(path: &Path) -> anyhow::Result<FieldStore> {
    let store = FieldStore::open(path)?;
    let interval = config::load_config(None)?.and_then(|c| c.progress_interval);
    Ok(match interval {
        Some(interval) => store.with_progress_interval(interval),
        None => store,
    })
}

fn resolve_database(flag: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if let Some(config) = config::load_config(None)? {
        if let Some(database) = config.database {
            return Ok(PathBuf::from(database));
        }
    }
    Ok(config::default_database_path_in(Path::new(".")))
}

fn resolve_backend(flag: Option<String>) -> anyhow::Result<String> {
    if let Some(url) = flag {
        return Ok(url);
    }
    if let Some(config) = config::load_config(None)? {
        if let Some(url) = config.backend_url {
            return Ok(url);
        }
    }
    Ok(DEFAULT_BASE_URL.to_string())
}

fn title_from(prompt: &str) -> String {
    const MAX: usize = 40;
    let prompt = prompt.trim();
    if prompt.chars().count() <= MAX {
        prompt.to_string()
    } else {
        let cut: String = prompt.chars().take(MAX).collect();
        format!("{cut}...")
    }
}
