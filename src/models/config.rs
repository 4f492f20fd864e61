//! Configuration data model

use crate::types::OutputFormat;
use serde::{Deserialize, Serialize};

/// Resolved run configuration
///
/// Built once by [`crate::config::ConfigParser`] and only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Result line format
    pub output_format: OutputFormat,

    /// Base URL of the test server, without a trailing path
    pub server: String,

    /// Location code the server was resolved from
    pub location: String,

    /// Payload size in KB, used verbatim in the download path
    pub size_kb: u64,

    /// Issue the request but report fixed values instead of timing it
    pub dry_run: bool,

    /// Skip the rate limiter entirely
    pub force: bool,

    /// Number of `--verbose` switches
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        let location = crate::defaults::DEFAULT_LOCATION.to_string();
        Self {
            output_format: OutputFormat::default(),
            server: server_for_location(&location),
            location,
            size_kb: crate::defaults::DEFAULT_SIZE_KB,
            dry_run: false,
            force: false,
            verbosity: 0,
        }
    }
}

impl Config {
    /// Full URL of the payload to download
    pub fn download_url(&self) -> String {
        download_url(&self.server, self.size_kb)
    }
}

/// testmy.net server for a location code
pub fn server_for_location(location: &str) -> String {
    format!("http://{}.{}", location, crate::defaults::TESTMYNET_DOMAIN)
}

/// `<server>/dl-<size>`
pub fn download_url(server: &str, size_kb: u64) -> String {
    format!("{}/dl-{}", server, size_kb)
}
