//! Data models and structures for testmynet-cli

pub mod config;
pub mod metrics;

// Re-export main model types
pub use config::Config;
pub use metrics::Measurement;
