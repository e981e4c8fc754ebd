//! # FaqDesk — FAQ service with similarity search
//!
//! Stores question/answer entries in SQLite and serves them over HTTP,
//! including free-text search ranked by hashed bag-of-words cosine similarity.
//!
//! Usage:
//!   faqdesk                              # Start server (default 127.0.0.1:8000)
//!   faqdesk --port 8080                  # Custom port
//!   faqdesk --seed                       # Insert the built-in FAQ set and exit
//!   faqdesk --seed --seed-file faqs.json # Seed from a JSON file and exit

use anyhow::Result;
use clap::Parser;
use faqdesk_core::FaqDeskConfig;
use faqdesk_gateway::{AppState, FaqDb, seed};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "faqdesk",
    version,
    about = "📚 FaqDesk — FAQ service with similarity search"
)]
struct Cli {
    /// Config file (default: $FAQDESK_CONFIG or ~/.faqdesk/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// HTTP port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Database path (overrides config and DATABASE_URL)
    #[arg(long)]
    db_path: Option<String>,

    /// Seed the database and exit
    #[arg(long)]
    seed: bool,

    /// JSON seed file (used with --seed; default: built-in set)
    #[arg(long, requires = "seed")]
    seed_file: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "faqdesk=debug,faqdesk_gateway=debug,tower_http=debug"
    } else {
        "faqdesk=info,faqdesk_gateway=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .init();

    let mut config = FaqDeskConfig::resolve(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.gateway.host = host;
    }
    if let Some(port) = cli.port {
        config.gateway.port = port;
    }
    if let Some(db_path) = cli.db_path {
        config.database.path = db_path;
    }

    // Ensure the database directory exists
    let db_path = config.database.resolved_path();
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let db = FaqDb::open(&db_path)?;

    // --seed: insert entries and exit
    if cli.seed {
        let entries = match &cli.seed_file {
            Some(path) => seed::load_seed_file(path)?,
            None => seed::default_seed()?,
        };
        let report = seed::run_seed(&db, &entries)?;
        println!(
            "🌱 Seeding complete. Inserted: {}, Skipped/Existing: {}",
            report.inserted, report.skipped
        );
        return Ok(());
    }

    let faq_count = db.count()?;
    if faq_count == 0 {
        tracing::warn!("FAQ store is empty. Run with --seed to load the built-in set.");
    }

    println!("📚 FaqDesk v{}", env!("CARGO_PKG_VERSION"));
    println!("   🌐 API:        http://{}:{}/api/faq", config.gateway.host, config.gateway.port);
    println!("   🔎 Search:     http://{}:{}/api/search?query=...", config.gateway.host, config.gateway.port);
    println!("   🗄️  Database:   {} ({} FAQs)", db_path.display(), faq_count);
    println!(
        "   📐 Vectorizer: {} dims, limit {}/{}, min similarity {}",
        config.search.dimensions,
        config.search.default_limit,
        config.search.max_limit,
        config.search.min_similarity
    );
    println!();

    let state = AppState::new(config, db)?;
    faqdesk_gateway::start(state).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_seed_file_requires_seed() {
        let err = Cli::try_parse_from(["faqdesk", "--seed-file", "faqs.json"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let cli = Cli::try_parse_from(["faqdesk", "--seed", "--seed-file", "faqs.json"]).unwrap();
        assert!(cli.seed);
        assert_eq!(cli.seed_file, Some(PathBuf::from("faqs.json")));
    }
}
