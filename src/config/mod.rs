//! Configuration management module

pub mod locations;
pub mod parser;

// Re-export main functionality
pub use locations::{Location, LOCATIONS, find_location};
pub use parser::{ConfigParser, Resolution, load_config, display_config_summary};

// Re-export from models for convenience
pub use crate::models::Config;
