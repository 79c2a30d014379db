//! `linux_helper search`
//!
//! Loads the catalog once, then answers queries.
//!
//! Usage (single query):
//!   cargo run --bin search -- query znajdź duże pliki
//!
//! Usage (interactive REPL):
//!   cargo run --bin search -- query
//!
//! Scope to a category:
//!   cargo run --bin search -- query --category network ping

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::warn;

use linux_helper::bookmarks::Bookmarks;
use linux_helper::config::Config;
use linux_helper::export::{export, ExportFormat};
use linux_helper::history::SearchHistory;
use linux_helper::search::search_and_print;
use linux_helper::{logging, Catalog, MemoryCatalog, SearchEngine};

const DEFAULT_TOP_K: usize = 10;

#[derive(Parser)]
#[command(name = "search", about = "Find Linux commands by describing the task", version)]
struct Cli {
    /// Config file (default: platform config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog; starts a REPL when no words are given
    Query {
        words: Vec<String>,

        /// files, processes, network, system or all
        #[arg(short = 'k', long)]
        category: Option<String>,

        /// Maximum results to print
        #[arg(short, long, default_value_t = DEFAULT_TOP_K)]
        limit: usize,
    },

    /// List catalog records
    List {
        #[arg(short = 'k', long)]
        category: Option<String>,
    },

    /// Show or clear recent searches
    History {
        #[arg(long)]
        clear: bool,

        /// Show every stored entry, not just the most recent
        #[arg(short, long)]
        all: bool,
    },

    /// Manage bookmarked commands
    Bookmark {
        #[command(subcommand)]
        action: BookmarkAction,
    },

    /// Export commands to a script, alias file or text list
    Export {
        /// Command ids; defaults to all bookmarks
        ids: Vec<String>,

        /// bash, aliases or text
        #[arg(short, long, default_value = "bash")]
        format: String,

        #[arg(short, long, default_value = linux_helper::constants::DEFAULT_SCRIPT_NAME)]
        name: String,

        /// Write here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum BookmarkAction {
    Add { id: String },
    Remove { id: String },
    List,
}

fn run_query(
    engine: &SearchEngine<MemoryCatalog>,
    config: &Config,
    query: &str,
    category: Option<&str>,
    limit: usize,
) -> Result<()> {
    let count = search_and_print(engine, query, category, limit);
    if query.trim().is_empty() {
        return Ok(());
    }
    let mut history = SearchHistory::load(&config.history.path, config.history.max_items)?;
    history.add(query, count);
    if let Err(e) = history.save(&config.history.path) {
        warn!(error = %e, "could not save search history");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    logging::init(if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    });
    config.log_summary();

    // ── Load catalog ────────────────────────────────────────────────────────
    let catalog = MemoryCatalog::load_or_builtin(&config.catalog.path)
        .with_context(|| format!("loading catalog from {}", config.catalog.path.display()))?;
    let engine = SearchEngine::new(catalog);

    match cli.command {
        Commands::Query { words, category, limit } => {
            let category = category.as_deref();
            if !words.is_empty() {
                return run_query(&engine, &config, &words.join(" "), category, limit);
            }

            // ── Interactive REPL ────────────────────────────────────────────
            println!("Type a query and press Enter. Ctrl-D / empty line to exit.");
            let stdin = io::stdin();
            loop {
                print!("> ");
                io::stdout().flush()?;

                let mut line = String::new();
                if stdin.lock().read_line(&mut line)? == 0 || line.trim().is_empty() {
                    break;
                }
                run_query(&engine, &config, line.trim(), category, limit)?;
            }
        }

        Commands::List { category } => {
            let records = engine.catalog().get_by_category(category.as_deref().unwrap_or("all"));
            for cmd in &records {
                println!("{}  [{}] {}\n    $ {}", cmd.id, cmd.category, cmd.title, cmd.command);
            }
            println!("{} commands", records.len());
        }

        Commands::History { clear, all } => {
            let mut history = SearchHistory::load(&config.history.path, config.history.max_items)?;
            if clear {
                history.clear();
                history.save(&config.history.path)?;
                println!("History cleared.");
            } else if history.is_empty() {
                println!("No recent searches.");
            } else {
                let items = if all {
                    history.items()
                } else {
                    history.recent_default()
                };
                for item in items {
                    println!("{:>4} results  {}", item.results_count, item.query);
                }
            }
        }

        Commands::Bookmark { action } => {
            let path = &config.bookmarks.path;
            let mut bookmarks = Bookmarks::load(path)?;
            match action {
                BookmarkAction::Add { id } => {
                    let Some(cmd) = engine.catalog().get(&id) else {
                        bail!("no command with id '{id}'");
                    };
                    if bookmarks.add(cmd) {
                        bookmarks.save(path)?;
                        println!("Bookmarked: {}", cmd.title);
                    } else {
                        println!("Already bookmarked: {}", cmd.title);
                    }
                }
                BookmarkAction::Remove { id } => {
                    if bookmarks.remove(&id) {
                        bookmarks.save(path)?;
                        println!("Removed bookmark {id}");
                    } else {
                        println!("No bookmark with id '{id}'");
                    }
                }
                BookmarkAction::List => {
                    for cmd in bookmarks.items() {
                        println!("{}  {}\n    $ {}", cmd.id, cmd.title, cmd.command);
                    }
                }
            }
        }

        Commands::Export { ids, format, name, output } => {
            let ids = if ids.is_empty() {
                Bookmarks::load(&config.bookmarks.path)?.ids()
            } else {
                ids
            };
            if ids.is_empty() {
                bail!("no command ids given and no bookmarks saved");
            }
            let commands = engine.catalog().get_by_ids(&ids);
            let script = export(&commands, ExportFormat::from_name(&format), &name, chrono::Utc::now())
                .context("exporting commands")?;

            match output {
                Some(dir_or_file) => {
                    let path = if dir_or_file.is_dir() {
                        dir_or_file.join(&script.filename)
                    } else {
                        dir_or_file
                    };
                    fs::write(&path, &script.content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Exported {} commands to '{}'.", commands.len(), path.display());
                }
                None => print!("{}", script.content),
            }
        }
    }

    Ok(())
}
