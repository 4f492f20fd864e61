//! Command-line interface

pub mod help;

pub use help::location_list;

use clap::{ArgAction, Parser};
use std::io::IsTerminal;

/// CLI based network bandwidth tester using testmy.net
#[derive(Parser, Debug, Clone)]
#[command(name = "testmynet-cli")]
#[command(version, long_version = crate::LONG_VERSION, about, long_about = None)]
#[command(after_help = help::EXAMPLES)]
pub struct Cli {
    /// Output results in csv
    #[arg(long)]
    pub csv: bool,

    /// TestMyNet server (overrides location)
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// TestMyNet location (use "help" to list all locations)
    #[arg(long, value_name = "CODE", default_value = crate::defaults::DEFAULT_LOCATION)]
    pub location: String,

    /// Test size in KBytes
    #[arg(long, value_name = "KB", default_value_t = crate::defaults::DEFAULT_SIZE_KB)]
    pub size: u64,

    /// Dry-run mode
    #[arg(long)]
    pub dry_run: bool,

    /// Allow program to hit testmy.net more often than it should
    #[arg(long = "I-WANT-TO-GET-BANNED")]
    pub force: bool,

    /// Verbose mode (use multiple times to increase level)
    #[arg(long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Explicit server, if one was given and is not empty
    pub fn explicit_server(&self) -> Option<&str> {
        self.server.as_deref().filter(|s| !s.is_empty())
    }

    /// Whether the location listing was requested instead of a test
    pub fn wants_location_help(&self) -> bool {
        self.location == crate::defaults::HELP_LOCATION
    }
}

/// Whether error output on stderr should be colored
pub fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    std::io::stderr().is_terminal()
}
