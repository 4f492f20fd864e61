//! testmynet-cli
//!
//! A command-line bandwidth tester. It downloads a fixed-size payload from a
//! testmy.net server, times the transfer and reports the throughput, while
//! refusing to hit the service more often than once every few minutes.

pub mod app;
pub mod cli;
pub mod config;
pub mod client;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod throttle;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{Config, Measurement};
pub use client::{Downloader, HttpDownloader};
pub use throttle::OverloadGuard;
pub use logging::{Logger, LogLevel};
pub use output::{OutputFormatter, OutputFormatterFactory};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Build metadata, as shown by `--version`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("BUILD_TIME"),
    " for ",
    env!("TARGET_TRIPLE"),
    ")"
);

/// Short git revision the binary was built from, when known.
pub fn git_commit() -> Option<&'static str> {
    option_env!("GIT_COMMIT")
}

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_LOCATION: &str = "ca";
    pub const DEFAULT_SIZE_KB: u64 = 10240;
    pub const TESTMYNET_DOMAIN: &str = "testmy.net";

    /// Pseudo-location that lists the known locations instead of testing.
    pub const HELP_LOCATION: &str = "help";

    /// State file, relative to the user's home directory.
    pub const STATE_FILE: &str = ".testmynet-cli.state";
    pub const MIN_RUN_INTERVAL: Duration = Duration::from_secs(15 * 60);

    // Values reported by a dry run instead of a real measurement.
    pub const DRY_RUN_BYTES: u64 = 1_000_000;
    pub const DRY_RUN_DURATION: Duration = Duration::from_secs(8);
}
