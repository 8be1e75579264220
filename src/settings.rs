// =============================================================================
// Pipeline Settings — instrument list and download parameters
// =============================================================================
//
// All fields carry `#[serde(default)]` so that adding new fields never breaks
// loading an older settings file.  `Settings::load` falls back to defaults
// when the file is missing or malformed, matching how the binaries are meant
// to run out of the box.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_instruments() -> Vec<Instrument> {
    [
        ("EUR/USD", "EURUSD=X"),
        ("GBP/USD", "GBPUSD=X"),
        ("USD/JPY", "USDJPY=X"),
        ("AUD/USD", "AUDUSD=X"),
        ("USD/CAD", "USDCAD=X"),
        ("NZD/USD", "NZDUSD=X"),
    ]
    .into_iter()
    .map(|(name, ticker)| Instrument {
        name: name.to_string(),
        ticker: ticker.to_string(),
    })
    .collect()
}

fn default_years() -> u32 {
    3
}

fn default_interval() -> String {
    "1h".to_string()
}

fn default_data_dir() -> String {
    "data/historical".to_string()
}

// =============================================================================
// Types
// =============================================================================

/// One instrument to download: display name plus the provider's ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instrument {
    /// Human-readable pair name, e.g. "EUR/USD".
    pub name: String,
    /// Provider ticker, e.g. "EURUSD=X".
    pub ticker: String,
}

impl Instrument {
    /// File stem used for the instrument's CSV ("EUR/USD" -> "EUR_USD").
    pub fn file_stem(&self) -> String {
        self.name.replace('/', "_")
    }
}

/// Tunable parameters for the download and verification binaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Instruments to download. Defaults to the six major FX pairs.
    #[serde(default = "default_instruments")]
    pub instruments: Vec<Instrument>,

    /// Years of history to fetch per instrument.
    #[serde(default = "default_years")]
    pub years: u32,

    /// Bar interval understood by the provider.
    #[serde(default = "default_interval")]
    pub interval: String,

    /// Directory where raw and enriched CSVs live.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            instruments: default_instruments(),
            years: default_years(),
            interval: default_interval(),
            data_dir: default_data_dir(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults when the file
    /// is absent.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(path = %path.display(), "settings file not found, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        info!(
            path = %path.display(),
            instruments = settings.instruments.len(),
            years = settings.years,
            "settings loaded"
        );
        Ok(settings)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_six_majors() {
        let settings = Settings::default();
        assert_eq!(settings.instruments.len(), 6);
        assert_eq!(settings.years, 3);
        assert_eq!(settings.interval, "1h");
        assert!(settings
            .instruments
            .iter()
            .any(|i| i.name == "EUR/USD" && i.ticker == "EURUSD=X"));
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "years": 1 }"#).unwrap();
        assert_eq!(settings.years, 1);
        assert_eq!(settings.interval, "1h");
        assert_eq!(settings.instruments.len(), 6);
    }

    #[test]
    fn file_stem_replaces_slash() {
        let settings = Settings::default();
        assert_eq!(settings.instruments[0].file_stem(), "EUR_USD");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = Settings::load("does/not/exist.json").unwrap();
        assert_eq!(settings.instruments.len(), 6);
    }
}
