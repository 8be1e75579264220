// =============================================================================
// fetch-historical — download hourly OHLCV for the configured FX pairs
// =============================================================================
//
// The provider caps hourly history per request, so each instrument is fetched
// in chunks, deduplicated and sorted before being written to one CSV per
// pair.  A failing instrument does not abort the run; the summary at the end
// lists who succeeded and who failed.

use anyhow::Result;
use chrono::{Duration, Utc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fx_pipeline::provider::YahooClient;
use fx_pipeline::settings::Settings;
use fx_pipeline::storage;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load("settings.json")?;
    let client = YahooClient::new();

    let end = Utc::now();
    let start = end - Duration::days(settings.years as i64 * 365);

    info!(
        instruments = settings.instruments.len(),
        years = settings.years,
        interval = %settings.interval,
        "starting historical download"
    );

    let mut succeeded = Vec::new();
    let mut failed = Vec::new();

    for instrument in &settings.instruments {
        info!(name = %instrument.name, ticker = %instrument.ticker, "downloading");

        match client
            .fetch_range(&instrument.ticker, start, end, &settings.interval)
            .await
        {
            Ok(candles) if candles.is_empty() => {
                error!(name = %instrument.name, "no data returned");
                failed.push(instrument.name.clone());
            }
            Ok(candles) => {
                let path = format!("{}/{}.csv", settings.data_dir, instrument.file_stem());
                match storage::save_candles(&path, &candles) {
                    Ok(()) => {
                        info!(name = %instrument.name, rows = candles.len(), path, "saved");
                        succeeded.push(instrument.name.clone());
                    }
                    Err(e) => {
                        error!(name = %instrument.name, error = %e, "save failed");
                        failed.push(instrument.name.clone());
                    }
                }
            }
            Err(e) => {
                error!(name = %instrument.name, error = %e, "download failed");
                failed.push(instrument.name.clone());
            }
        }
    }

    info!(
        succeeded = succeeded.len(),
        failed = failed.len(),
        total = settings.instruments.len(),
        "download summary"
    );
    if !succeeded.is_empty() {
        info!(instruments = %succeeded.join(", "), "succeeded");
    }
    if !failed.is_empty() {
        error!(instruments = %failed.join(", "), "failed");
        anyhow::bail!("{} of {} downloads failed", failed.len(), settings.instruments.len());
    }

    Ok(())
}
