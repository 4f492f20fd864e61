//! Overload protection
//!
//! testmy.net bans clients that test too often. Before reporting a result
//! the program compares the current time against the timestamp left in a
//! state file under the home directory by the previous run, refuses to
//! continue if that run is too recent, and otherwise records the current
//! time for the next one.
//!
//! The check and the write are not atomic: two runs started at the same
//! moment can both pass.

pub mod home;
pub mod timestamp;

pub use home::{resolve_home_dir, HomeDirProvider, SystemHome};
pub use timestamp::{format_timestamp, parse_timestamp, TimestampError};

use crate::{
    error::{AppError, Result},
    logging::Logger,
    output::format_duration,
    types::GuardStatus,
};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Enforces a minimum interval between runs through a timestamp file
pub struct OverloadGuard {
    /// State file name, relative to the home directory
    state_file: PathBuf,
    min_interval: Duration,
    home: Box<dyn HomeDirProvider>,
    logger: Logger,
}

impl OverloadGuard {
    pub fn new(state_file: impl Into<PathBuf>, min_interval: Duration, logger: Logger) -> Self {
        Self {
            state_file: state_file.into(),
            min_interval,
            home: Box::new(SystemHome),
            logger,
        }
    }

    /// Guard using the default state file and interval
    pub fn with_defaults(logger: Logger) -> Self {
        Self::new(crate::defaults::STATE_FILE, crate::defaults::MIN_RUN_INTERVAL, logger)
    }

    /// Replace the home directory source
    pub fn with_home_provider(mut self, provider: impl HomeDirProvider + 'static) -> Self {
        self.home = Box::new(provider);
        self
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Absolute path of the state file
    pub fn state_path(&self) -> Result<PathBuf> {
        let home = resolve_home_dir(self.home.as_ref())?;
        Ok(home.join(&self.state_file))
    }

    /// Check against the current time and record it
    pub fn check(&self) -> Result<GuardStatus> {
        self.check_at(Utc::now())
    }

    /// Check against `now` and record it.
    ///
    /// Fails without touching the file when the last run is less than the
    /// minimum interval before `now`, or when the file cannot be parsed.
    pub fn check_at(&self, now: DateTime<Utc>) -> Result<GuardStatus> {
        let path = self.state_path()?;
        self.logger.info(&format!("Reading state file: {:?}", path)).log();

        let status = match fs::read_to_string(&path) {
            Ok(content) => {
                self.ensure_interval_elapsed(&path, &content, now)?;
                GuardStatus::IntervalElapsed
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.logger.debug("No state file, first run").log();
                GuardStatus::FirstRun
            }
            Err(e) => {
                return Err(AppError::state_file(format!(
                    "unable to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        self.record(&path, now)?;
        Ok(status)
    }

    fn ensure_interval_elapsed(&self, path: &Path, content: &str, now: DateTime<Utc>) -> Result<()> {
        let last = parse_timestamp(content).map_err(|e| {
            AppError::state_parse(format!(
                "invalid timestamp {:?} in {}: {}",
                content.trim(),
                path.display(),
                e
            ))
        })?;

        let since = now.signed_duration_since(last);
        self.logger.info(&format!(
            "Last timestamp: {}, minimum interval: {}, elapsed: {}",
            last,
            format_duration(self.min_interval),
            format_signed_duration(since)
        ))
            .log();

        // A timestamp in the future never counts as elapsed
        let elapsed_enough = since
            .to_std()
            .map(|since| since >= self.min_interval)
            .unwrap_or(false);

        if !elapsed_enough {
            return Err(AppError::rate_limited(format!(
                "program ran less than {} ago ({})",
                format_duration(self.min_interval),
                format_signed_duration(since)
            )));
        }
        Ok(())
    }

    fn record(&self, path: &Path, now: DateTime<Utc>) -> Result<()> {
        let line = format_timestamp(now);
        self.logger.info(&format!("Re-writing current time ({}) to state file", line)).log();

        write_owner_only(path, format!("{}\n", line).as_bytes()).map_err(|e| {
            AppError::state_file(format!("unable to write {}: {}", path.display(), e))
        })
    }
}

/// Write `contents`, replacing the file, readable by the owner only
fn write_owner_only(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;

    // mode() only applies when the file is created
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(contents)
}

fn format_signed_duration(delta: chrono::TimeDelta) -> String {
    match delta.to_std() {
        Ok(elapsed) => format_duration(elapsed),
        Err(_) => {
            let ahead = (-delta).to_std().unwrap_or_default();
            format!("-{}", format_duration(ahead))
        }
    }
}
