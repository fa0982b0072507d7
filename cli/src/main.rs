mod snip;
mod store;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use snip::{generate_name, SnipRecord};
use snip_core::{gather_context, index_document, rank, search_terms, SledIndexStore};
use store::SnipStore;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "snip")]
#[command(about = "Personal snippet store with full-text search", long_about = None)]
struct Cli {
    /// Database directory (falls back to SNIP_DB, then ".snip")
    #[arg(long)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new snip from a file or stdin
    Add {
        /// Read text from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
        /// Name for the snip; generated from the text when omitted
        #[arg(long)]
        name: Option<String>,
    },
    /// Show one snip
    Get {
        /// Full id or unique prefix
        id: String,
        /// Print only the raw text
        #[arg(long, default_value_t = false)]
        raw: bool,
    },
    /// List snips
    Ls {
        /// Maximum number of entries, 0 for all
        #[arg(long, default_value_t = 0)]
        limit: usize,
    },
    /// Rename a snip
    Rename { id: String, name: String },
    /// Delete a snip and its index rows
    Rm { id: String },
    /// Import snips from a .txt/.json file or a directory of them
    Import { path: PathBuf },
    /// Rebuild the search index for every snip
    Reindex,
    /// Search the index
    Search {
        /// Query terms
        #[arg(required = true)]
        terms: Vec<String>,
        /// Keep documents matching any term instead of requiring all
        #[arg(long, default_value_t = false)]
        any: bool,
        /// Maximum number of results, 0 for all
        #[arg(long, default_value_t = 0)]
        limit: usize,
        /// Context words shown on each side of a match
        #[arg(long, default_value_t = 6)]
        window: usize,
    },
}

/// Imported documents may carry their own name; plain text files do not.
#[derive(Debug, Deserialize)]
struct ImportDoc {
    name: Option<String>,
    text: String,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let db_path = cli
        .db
        .or_else(|| std::env::var("SNIP_DB").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(".snip"));
    let db = sled::open(&db_path)
        .with_context(|| format!("opening database at {}", db_path.display()))?;
    let snips = SnipStore::open(&db)?;
    let index = SledIndexStore::open(&db)?;

    match cli.command {
        Commands::Add { file, name } => add(&snips, &index, file, name),
        Commands::Get { id, raw } => get(&snips, &id, raw),
        Commands::Ls { limit } => ls(&snips, limit),
        Commands::Rename { id, name } => rename(&snips, &id, name),
        Commands::Rm { id } => rm(&snips, &index, &id),
        Commands::Import { path } => import(&snips, &index, &path),
        Commands::Reindex => reindex(&snips, &index),
        Commands::Search {
            terms,
            any,
            limit,
            window,
        } => search(&snips, &index, &terms, any, limit, window),
    }
}

fn add(
    snips: &SnipStore,
    index: &SledIndexStore,
    file: Option<PathBuf>,
    name: Option<String>,
) -> Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    if text.trim().is_empty() {
        bail!("refusing to add an empty snip");
    }
    let name = name.unwrap_or_else(|| generate_name(&text, 5));
    let rec = SnipRecord::new(name, text);
    snips.insert(&rec)?;
    index_document(index, rec.id, &rec.text)?;
    println!("{} {}", rec.short_id(), rec.name);
    Ok(())
}

fn get(snips: &SnipStore, id: &str, raw: bool) -> Result<()> {
    let rec = snips.get(snips.resolve(id)?)?;
    if raw {
        print!("{}", rec.text);
        return Ok(());
    }
    println!("id:        {}", rec.id);
    println!("name:      {}", rec.name);
    println!("timestamp: {}", rec.timestamp);
    println!("words:     {}", rec.count_words());
    println!();
    println!("{}", rec.text);
    Ok(())
}

fn ls(snips: &SnipStore, limit: usize) -> Result<()> {
    for rec in snips.list(limit)? {
        println!("{} {} {}", rec.short_id(), rec.timestamp, rec.name);
    }
    Ok(())
}

fn rename(snips: &SnipStore, id: &str, name: String) -> Result<()> {
    let mut rec = snips.get(snips.resolve(id)?)?;
    rec.name = name;
    snips.insert(&rec)?;
    Ok(())
}

fn rm(snips: &SnipStore, index: &SledIndexStore, id: &str) -> Result<()> {
    let id = snips.resolve(id)?;
    snips.remove(id)?;
    snip_core::IndexStore::delete_all_for_document(index, id)?;
    Ok(())
}

fn import(snips: &SnipStore, index: &SledIndexStore, path: &Path) -> Result<()> {
    let mut files: Vec<PathBuf> = Vec::new();
    if path.is_dir() {
        for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "txt" | "json") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if path.is_file() {
        files.push(path.to_path_buf());
    } else {
        bail!("no such path: {}", path.display());
    }

    let mut imported = 0usize;
    for file in files {
        if file.extension().and_then(|s| s.to_str()) == Some("json") {
            imported += import_json(snips, index, &file)?;
        } else {
            imported += import_text(snips, index, &file)?;
        }
    }
    tracing::info!(imported, "import complete");
    println!("imported {imported} snips");
    Ok(())
}

fn import_text(snips: &SnipStore, index: &SledIndexStore, file: &Path) -> Result<usize> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    if text.trim().is_empty() {
        return Ok(0);
    }
    let name = file
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_owned)
        .unwrap_or_else(|| generate_name(&text, 5));
    let rec = SnipRecord::new(name, text);
    snips.insert(&rec)?;
    index_document(index, rec.id, &rec.text)?;
    Ok(1)
}

/// JSON imports are a single object or an array of `{name?, text}`.
fn import_json(snips: &SnipStore, index: &SledIndexStore, file: &Path) -> Result<usize> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let json: serde_json::Value = serde_json::from_str(&raw)?;
    let docs: Vec<ImportDoc> = match json {
        serde_json::Value::Array(_) => serde_json::from_value(json)?,
        serde_json::Value::Object(_) => vec![serde_json::from_value(json)?],
        _ => bail!("unsupported JSON shape in {}", file.display()),
    };

    let mut imported = 0usize;
    for doc in docs {
        if doc.text.trim().is_empty() {
            continue;
        }
        let name = doc.name.unwrap_or_else(|| generate_name(&doc.text, 5));
        let rec = SnipRecord::new(name, doc.text);
        snips.insert(&rec)?;
        index_document(index, rec.id, &rec.text)?;
        imported += 1;
    }
    Ok(imported)
}

fn reindex(snips: &SnipStore, index: &SledIndexStore) -> Result<()> {
    let mut count = 0usize;
    for id in snips.ids()? {
        let rec = snips.get(id)?;
        index_document(index, id, &rec.text)?;
        count += 1;
    }
    tracing::info!(count, "reindex complete");
    println!("indexed {count} snips");
    Ok(())
}

fn search(
    snips: &SnipStore,
    index: &SledIndexStore,
    terms: &[String],
    any: bool,
    limit: usize,
    window: usize,
) -> Result<()> {
    let results = search_terms(index, terms, !any)?;
    if results.is_empty() {
        eprintln!("no results for {terms:?}");
        return Ok(());
    }

    let mut scores = rank(index, terms, results)?;
    if limit != 0 && scores.len() > limit {
        scores.truncate(limit);
    }

    for score in &scores {
        let rec = snips.get(score.document_id)?;
        println!("{}", rec.name);
        print!(
            "  {} (score: {:.6}, words: {})",
            rec.short_id(),
            score.value,
            rec.count_words()
        );
        let stats: Vec<String> = score
            .matches
            .iter()
            .map(|m| format!("{}: {}", m.stem, m.count))
            .collect();
        println!(" [{}]", stats.join(", "));

        for term in terms {
            for ctx in gather_context(index, snips, score.document_id, term, window)? {
                let before = ctx.before.join(" ");
                let after = ctx.after.join(" ");
                print!("    [{}-{}] \"", ctx.before_start, ctx.after_end);
                if !before.is_empty() {
                    print!("{before} ");
                }
                print!("{}", ctx.term);
                if !after.is_empty() {
                    print!(" {after}");
                }
                println!("\"");
            }
        }
        println!();
    }
    Ok(())
}
