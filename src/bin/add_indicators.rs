// =============================================================================
// add-indicators — enrich saved OHLCV series with the indicator columns
// =============================================================================
//
// Loads each raw CSV in the data directory (or a single file passed as the
// first argument), runs the enrichment engine and writes the result next to
// the input as `<stem>_indicators.csv`, reporting the resulting shape.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fx_pipeline::enrich::add_indicators;
use fx_pipeline::settings::Settings;
use fx_pipeline::storage;

fn enrich_file(path: &Path) -> Result<()> {
    let candles = storage::load_candles(path)?;
    let enriched = add_indicators(&candles);

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input file has no usable stem")?;
    let out_path = path.with_file_name(format!("{stem}_indicators.csv"));
    storage::save_enriched(&out_path, &enriched)?;

    info!(
        input = %path.display(),
        output = %out_path.display(),
        rows_in = candles.len(),
        rows_out = enriched.len(),
        columns = storage::RAW_HEADER.len() + storage::INDICATOR_COLUMNS.len(),
        "enriched"
    );
    Ok(())
}

fn main() -> Result<()> {
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let targets: Vec<PathBuf> = match std::env::args().nth(1) {
        Some(file) => vec![PathBuf::from(file)],
        None => {
            // No argument: enrich every raw CSV in the data directory.
            let settings = Settings::load("settings.json")?;
            let dir = PathBuf::from(&settings.data_dir);
            let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
                .with_context(|| format!("failed to read {}", dir.display()))?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| {
                    p.extension().is_some_and(|ext| ext == "csv")
                        && !p
                            .file_stem()
                            .is_some_and(|s| s.to_string_lossy().ends_with("_indicators"))
                })
                .collect();
            files.sort();
            files
        }
    };

    anyhow::ensure!(!targets.is_empty(), "no raw CSV files to enrich");

    for path in &targets {
        enrich_file(path)?;
    }

    info!(files = targets.len(), "all series enriched");
    Ok(())
}
