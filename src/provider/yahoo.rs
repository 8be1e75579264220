// =============================================================================
// Yahoo Finance chart-API client — chunked historical OHLCV download
// =============================================================================
//
// Yahoo caps hourly history at roughly two years per request, so a full range
// is fetched as a sequence of fixed-size windows walked backwards from the
// end date.  Chunks overlap at their seams; the merge step deduplicates
// timestamps (keeping the first occurrence, i.e. the newer chunk's copy) and
// sorts ascending before the series is handed to anyone else.
//
// The quote arrays routinely contain nulls for illiquid hours.  Those records
// are skipped at decode time — null-row elimination is the only repair this
// client performs.

use std::collections::HashSet;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::series::Candle;

/// Window size per request, in days. Yahoo rejects hourly ranges above 730.
pub const CHUNK_DAYS: i64 = 729;

// -----------------------------------------------------------------------------
// Wire types (subset of the chart response we actually read)
// -----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

// -----------------------------------------------------------------------------
// Client
// -----------------------------------------------------------------------------

/// HTTP client for the Yahoo Finance chart API.
#[derive(Clone)]
pub struct YahooClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooClient {
    /// Create a new client. Yahoo rejects requests without a browser-ish
    /// User-Agent, so one is pinned on every request.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("failed to build reqwest client");

        debug!("YahooClient initialised (base_url=https://query1.finance.yahoo.com)");

        Self {
            client,
            base_url: "https://query1.finance.yahoo.com".to_string(),
        }
    }

    /// Create a client pointed at a different base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut c = Self::new();
        c.base_url = base_url.into();
        c
    }

    /// GET /v8/finance/chart/{ticker} for a single window.
    ///
    /// Records whose quote arrays contain a null in any OHLCV field are
    /// skipped.  The result is in the order Yahoo returned it (ascending).
    #[instrument(skip(self), name = "yahoo::fetch_chunk")]
    pub async fn fetch_chunk(
        &self,
        ticker: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        interval: &str,
    ) -> Result<Vec<Candle>> {
        let url = format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval={}",
            self.base_url,
            ticker,
            start.timestamp(),
            end.timestamp(),
            interval
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("chart request for {ticker} failed"))?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("chart request for {ticker} returned {status}");
        }

        let body: ChartResponse = resp
            .json()
            .await
            .with_context(|| format!("failed to parse chart response for {ticker}"))?;

        parse_chart(body, ticker)
    }

    /// Fetch the full [start, end) range in `CHUNK_DAYS`-sized windows walked
    /// backwards from `end`, then merge: dedup timestamps keeping the first
    /// occurrence, sort ascending.
    #[instrument(skip(self), name = "yahoo::fetch_range")]
    pub async fn fetch_range(
        &self,
        ticker: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        interval: &str,
    ) -> Result<Vec<Candle>> {
        let mut chunks: Vec<Vec<Candle>> = Vec::new();
        let mut chunk_end = end;

        while chunk_end > start {
            let chunk_start = (chunk_end - chrono::Duration::days(CHUNK_DAYS)).max(start);
            let candles = self
                .fetch_chunk(ticker, chunk_start, chunk_end, interval)
                .await?;
            if candles.is_empty() {
                warn!(ticker, %chunk_start, %chunk_end, "empty chunk");
            } else {
                chunks.push(candles);
            }
            chunk_end = chunk_start;
        }

        Ok(merge_chunks(chunks))
    }
}

/// Flatten the chart payload into candles, skipping null records.
fn parse_chart(body: ChartResponse, ticker: &str) -> Result<Vec<Candle>> {
    if let Some(err) = body.chart.error {
        anyhow::bail!("chart API error for {ticker}: {} ({})", err.description, err.code);
    }

    let result = body
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
        .with_context(|| format!("chart response for {ticker} carried no result"))?;

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .with_context(|| format!("chart response for {ticker} carried no quote block"))?;

    let mut candles = Vec::with_capacity(result.timestamp.len());
    let mut skipped = 0usize;

    for (i, &ts) in result.timestamp.iter().enumerate() {
        let fields = (
            quote.open.get(i).copied().flatten(),
            quote.high.get(i).copied().flatten(),
            quote.low.get(i).copied().flatten(),
            quote.close.get(i).copied().flatten(),
            quote.volume.get(i).copied().flatten(),
        );
        match fields {
            (Some(open), Some(high), Some(low), Some(close), Some(volume)) => {
                candles.push(Candle {
                    timestamp: Utc
                        .timestamp_opt(ts, 0)
                        .single()
                        .with_context(|| format!("invalid timestamp {ts} for {ticker}"))?,
                    open,
                    high,
                    low,
                    close,
                    volume,
                });
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(ticker, skipped, "dropped records with null quote fields");
    }

    Ok(candles)
}

/// Merge chunks fetched newest-first: deduplicate timestamps keeping the
/// first occurrence, then sort ascending.
pub fn merge_chunks(chunks: Vec<Vec<Candle>>) -> Vec<Candle> {
    let mut seen = HashSet::new();
    let mut merged: Vec<Candle> = chunks
        .into_iter()
        .flatten()
        .filter(|c| seen.insert(c.timestamp))
        .collect();
    merged.sort_by_key(|c| c.timestamp);
    merged
}
