//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `sitemap_core` linkage with deterministic output.
//! - Start core file logging when a log directory is given.
//! - Print the table view of the seed map, or of a demo import when a URL
//!   argument is given, followed by the JSON export.

use clap::Parser;
use sitemap_core::{
    default_log_level, export_notes, init_logging, DemoImportSource, ExportFormat, SiteMapConfig,
    SiteMapStore,
};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "sitemap", version, about = "Site map core smoke run")]
struct Cli {
    /// Site URL to run through the demo importer.
    url: Option<String>,

    /// Absolute directory for rotating log files; logging stays off without it.
    #[arg(long, env = "SITEMAP_LOG_DIR")]
    log_dir: Option<String>,

    /// Log level (trace|debug|info|warn|error); defaults by build profile.
    #[arg(long, env = "SITEMAP_LOG_LEVEL")]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    println!("sitemap_core ping={}", sitemap_core::ping());
    println!("sitemap_core version={}", sitemap_core::core_version());

    let config = SiteMapConfig::default();
    let source = Arc::new(DemoImportSource::new(config.import_latency()));
    let mut store = SiteMapStore::with_sample_data(config, source);

    if let Some(url) = cli.url.as_deref() {
        match store.import_from(url).await {
            Ok(summary) => println!(
                "import mode={} notes={} connections={}",
                summary.mode.as_str(),
                summary.notes_added,
                summary.connections_added
            ),
            Err(err) => eprintln!("import failed: {err}"),
        }
    }

    for row in store.table_rows() {
        println!(
            "{}{} | parent={} | {}",
            "  ".repeat(row.level),
            row.title,
            row.parent_title,
            row.color
        );
    }

    match export_notes(store.notes(), ExportFormat::Json) {
        Ok(artifact) => println!("{}", String::from_utf8_lossy(&artifact.bytes)),
        Err(err) => eprintln!("export failed: {err}"),
    }
}
