pub mod yahoo;

// Re-export the client for convenient access (e.g. `use fx_pipeline::provider::YahooClient`).
pub use yahoo::YahooClient;
