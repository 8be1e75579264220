// =============================================================================
// verify-data — sanity-check the saved CSV files
// =============================================================================
//
// Walks the data directory and prints, per CSV file: row count, first/last
// timestamp, column names and the number of empty cells.  Purely descriptive;
// a file that fails to parse is reported and skipped.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fx_pipeline::settings::Settings;
use fx_pipeline::storage;

fn main() -> Result<()> {
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load("settings.json")?;
    let dir = PathBuf::from(&settings.data_dir);

    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .with_context(|| format!("failed to read {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    files.sort();

    println!("Found {} files\n", files.len());

    for path in &files {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        match storage::summarize_file(path) {
            Ok(summary) => {
                println!("{stem}");
                println!("  Rows      : {}", summary.rows);
                println!("  From      : {}", summary.first.as_deref().unwrap_or("-"));
                println!("  To        : {}", summary.last.as_deref().unwrap_or("-"));
                println!("  Columns   : {:?}", summary.columns);
                println!("  Empty     : {}", summary.empty_cells);
                println!();
            }
            Err(e) => {
                error!(file = %path.display(), error = %e, "failed to summarize");
            }
        }
    }

    info!(files = files.len(), "verification complete");
    Ok(())
}
