//! Type definitions and aliases

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the result line is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// A sentence meant for people
    #[default]
    Human,
    /// `server,bytes,seconds,mbps`
    Csv,
}

impl OutputFormat {
    pub fn from_csv_flag(csv: bool) -> Self {
        if csv {
            Self::Csv
        } else {
            Self::Human
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Outcome of the rate limiter check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardStatus {
    /// No earlier run was recorded
    FirstRun,
    /// The last recorded run is old enough
    IntervalElapsed,
    /// The check was bypassed by the force flag
    Bypassed,
}
