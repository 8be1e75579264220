// =============================================================================
// FX Pipeline — historical forex data and technical indicators
// =============================================================================
//
// Library surface for the three pipeline binaries:
//   fetch-historical  — download hourly OHLCV per instrument and save CSVs
//   add-indicators    — enrich a saved series with indicator columns
//   verify-data       — sanity-check saved CSV files
//
// The only piece with real domain logic is `enrich::add_indicators`; the rest
// is thin plumbing around the data provider and the CSV files on disk.

pub mod enrich;
pub mod indicators;
pub mod provider;
pub mod series;
pub mod settings;
pub mod storage;
