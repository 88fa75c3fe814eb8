//! Book dashboard CLI application.

use anyhow::{Context, Result};
use catalog::{EnrichOptions, OpenLibraryClient};
use clap::Parser;
use dashboard::{shell, Dashboard, TableState};
use shared::Config;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging (also echoed to stderr)
    #[arg(short, long)]
    verbose: bool,

    /// Initial author search
    #[arg(short, long)]
    query: Option<String>,

    /// Initial page size (10, 50 or 100)
    #[arg(long)]
    page_size: Option<usize>,

    /// Export the current view to this CSV file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Render the table once and exit
    #[arg(long)]
    no_interactive: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Initialize logging
    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        config.log_level()
    };

    shared::logging::init(shared::LogConfig {
        log_dir: config.log_dir().to_string_lossy().to_string(),
        component: "book-dashboard".to_string(),
        default_level: log_level,
        console: args.verbose || config.logging.console,
        file: config.logging.file,
        json_format: config.logging.json_format,
    })?;

    info!("Book dashboard starting");
    info!(config_file = %args.config.display(), "Loaded configuration");

    let page_size = args.page_size.unwrap_or(config.dashboard.page_size);
    let table = TableState::with_page_size(page_size).context("Invalid page size")?;

    let client = OpenLibraryClient::new(&config.catalog)
        .context("Failed to create Open Library client")?;

    let mut dashboard = Dashboard::new(table);
    println!("{}", dashboard.render());
    dashboard
        .load(&client, EnrichOptions::from(&config.enrichment))
        .await;

    if let Some(query) = &args.query {
        dashboard.search(query);
    }

    if let Some(path) = &args.export {
        let written = dashboard.export(Some(path.as_path()), &config.export_dir())?;
        println!("Exported {} books to {}", dashboard.view().len(), written.display());
        return Ok(());
    }

    if args.no_interactive {
        println!("{}", dashboard.render());
        return Ok(());
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    shell::run(&mut dashboard, &config.export_dir(), stdin.lock(), stdout.lock())?;

    info!("Book dashboard finished");
    Ok(())
}
