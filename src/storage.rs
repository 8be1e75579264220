// =============================================================================
// CSV Storage — raw and enriched series on disk
// =============================================================================
//
// One CSV per instrument under the configured data directory.  The raw file
// layout is `Datetime,Open,High,Low,Close,Volume` with RFC 3339 timestamps;
// the enriched file appends every indicator column.  `summarize_file` reads
// any of these back schema-agnostically for the verify binary.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::enrich::EnrichedCandle;
use crate::series::Candle;

/// Header of a raw series file.
pub const RAW_HEADER: [&str; 6] = ["Datetime", "Open", "High", "Low", "Close", "Volume"];

/// Indicator columns appended to the raw header in an enriched file.
pub const INDICATOR_COLUMNS: [&str; 15] = [
    "RSI_14", "SMA_20", "SMA_50", "SMA_200", "EMA_9", "ATR_14", "BB_upper", "BB_middle",
    "BB_lower", "swing_high", "swing_low", "body_size", "candle_range", "body_ratio",
    "momentum_10",
];

/// Write a raw OHLCV series to `path`, creating parent directories as needed.
pub fn save_candles(path: impl AsRef<Path>, candles: &[Candle]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to open {} for writing", path.display()))?;

    writer.write_record(RAW_HEADER)?;
    for c in candles {
        writer.write_record(&[
            c.timestamp.to_rfc3339(),
            c.open.to_string(),
            c.high.to_string(),
            c.low.to_string(),
            c.close.to_string(),
            c.volume.to_string(),
        ])?;
    }

    writer.flush().context("failed to flush CSV writer")?;
    Ok(())
}

/// Load a raw OHLCV series from `path`.
pub fn load_candles(path: impl AsRef<Path>) -> Result<Vec<Candle>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut candles = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("bad record in {}", path.display()))?;
        let field = |i: usize| -> Result<&str> {
            record
                .get(i)
                .with_context(|| format!("missing column {i} at data row {line}"))
        };

        let timestamp = DateTime::parse_from_rfc3339(field(0)?)
            .with_context(|| format!("bad timestamp at data row {line}"))?
            .with_timezone(&Utc);
        let num = |i: usize| -> Result<f64> {
            field(i)?
                .parse::<f64>()
                .with_context(|| format!("non-numeric column {i} at data row {line}"))
        };

        candles.push(Candle {
            timestamp,
            open: num(1)?,
            high: num(2)?,
            low: num(3)?,
            close: num(4)?,
            volume: num(5)?,
        });
    }

    Ok(candles)
}

/// Write an enriched series (raw columns plus every indicator column).
pub fn save_enriched(path: impl AsRef<Path>, rows: &[EnrichedCandle]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to open {} for writing", path.display()))?;

    let header: Vec<&str> = RAW_HEADER
        .iter()
        .chain(INDICATOR_COLUMNS.iter())
        .copied()
        .collect();
    writer.write_record(&header)?;

    for r in rows {
        let c = &r.candle;
        writer.write_record(&[
            c.timestamp.to_rfc3339(),
            c.open.to_string(),
            c.high.to_string(),
            c.low.to_string(),
            c.close.to_string(),
            c.volume.to_string(),
            r.rsi_14.to_string(),
            r.sma_20.to_string(),
            r.sma_50.to_string(),
            r.sma_200.to_string(),
            r.ema_9.to_string(),
            r.atr_14.to_string(),
            r.bb_upper.to_string(),
            r.bb_middle.to_string(),
            r.bb_lower.to_string(),
            r.swing_high.to_string(),
            r.swing_low.to_string(),
            r.body_size.to_string(),
            r.candle_range.to_string(),
            r.body_ratio.to_string(),
            r.momentum_10.to_string(),
        ])?;
    }

    writer.flush().context("failed to flush CSV writer")?;
    Ok(())
}

/// Schema-agnostic summary of one CSV file, for the verify binary.
#[derive(Debug)]
pub struct FileSummary {
    pub rows: usize,
    pub columns: Vec<String>,
    /// First and last value of the index (first) column, in file order.
    pub first: Option<String>,
    pub last: Option<String>,
    /// Number of empty cells across all data rows.
    pub empty_cells: usize,
}

/// Read any pipeline CSV back and report shape, index range and empty cells.
pub fn summarize_file(path: impl AsRef<Path>) -> Result<FileSummary> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let columns: Vec<String> = reader
        .headers()
        .with_context(|| format!("failed to read header of {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = 0usize;
    let mut empty_cells = 0usize;
    let mut first = None;
    let mut last = None;

    for record in reader.records() {
        let record = record.with_context(|| format!("bad record in {}", path.display()))?;
        rows += 1;
        empty_cells += record.iter().filter(|cell| cell.is_empty()).count();

        let index_value = record.get(0).unwrap_or("").to_string();
        if first.is_none() {
            first = Some(index_value.clone());
        }
        last = Some(index_value);
    }

    Ok(FileSummary {
        rows,
        columns,
        first,
        last,
        empty_cells,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::PathBuf;

    fn scratch_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("fx-pipeline-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    fn sample_candles(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| Candle {
                timestamp: Utc.timestamp_opt(i as i64 * 3600, 0).unwrap(),
                open: 1.1 + i as f64 * 0.001,
                high: 1.2 + i as f64 * 0.001,
                low: 1.0 + i as f64 * 0.001,
                close: 1.15 + i as f64 * 0.001,
                volume: 1000.0,
            })
            .collect()
    }

    #[test]
    fn save_then_load_preserves_series() {
        let path = scratch_file("raw.csv");
        let candles = sample_candles(10);
        save_candles(&path, &candles).unwrap();
        let loaded = load_candles(&path).unwrap();
        assert_eq!(loaded, candles);
    }

    #[test]
    fn summarize_reports_shape_and_range() {
        let path = scratch_file("summary.csv");
        let candles = sample_candles(5);
        save_candles(&path, &candles).unwrap();

        let summary = summarize_file(&path).unwrap();
        assert_eq!(summary.rows, 5);
        assert_eq!(summary.columns, RAW_HEADER.map(String::from).to_vec());
        assert_eq!(summary.empty_cells, 0);
        assert_eq!(summary.first.as_deref(), Some("1970-01-01T00:00:00+00:00"));
        assert_eq!(summary.last.as_deref(), Some("1970-01-01T04:00:00+00:00"));
    }

    #[test]
    fn enriched_header_has_all_columns() {
        let path = scratch_file("enriched.csv");
        let candles = sample_candles(210);
        let enriched = crate::enrich::add_indicators(&candles);
        assert!(!enriched.is_empty());
        save_enriched(&path, &enriched).unwrap();

        let summary = summarize_file(&path).unwrap();
        assert_eq!(summary.columns.len(), RAW_HEADER.len() + INDICATOR_COLUMNS.len());
        assert_eq!(summary.rows, enriched.len());
        assert_eq!(summary.empty_cells, 0);
    }

    #[test]
    fn load_rejects_non_numeric_cells() {
        let path = scratch_file("bad.csv");
        std::fs::write(
            &path,
            "Datetime,Open,High,Low,Close,Volume\n1970-01-01T00:00:00+00:00,a,2,1,1.5,10\n",
        )
        .unwrap();
        assert!(load_candles(&path).is_err());
    }
}
