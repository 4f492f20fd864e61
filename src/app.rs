//! Main application orchestration and execution

use crate::{
    client::Downloader,
    config::display_config_summary,
    error::Result,
    logging::Logger,
    models::Config,
    output::OutputFormatterFactory,
    throttle::OverloadGuard,
    types::GuardStatus,
};

/// Runs one bandwidth test from a resolved configuration
pub struct App {
    config: Config,
    logger: Logger,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config, logger: Logger) -> Self {
        Self { config, logger }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Download, consult the rate limiter and render the result line.
    ///
    /// The download happens before the rate limiter is consulted, so a
    /// rate-limited run still costs one request. Nothing is returned for
    /// printing unless every step succeeded.
    pub async fn run(&self, downloader: &dyn Downloader, guard: &OverloadGuard) -> Result<String> {
        self.logger
            .debug("Configuration")
            .field("summary", display_config_summary(&self.config))
            .field("url", self.config.download_url())
            .log();

        let measurement = downloader
            .download(&self.config.server, self.config.size_kb, self.config.dry_run)
            .await?;

        let status = if self.config.force {
            self.logger.warn("Overload protection disabled").log();
            GuardStatus::Bypassed
        } else {
            guard.check()?
        };

        self.logger
            .debug("Measurement complete")
            .field("bytes", measurement.bytes)
            .field("seconds", measurement.seconds())
            .field("guard", format!("{:?}", status))
            .log();

        let formatter = OutputFormatterFactory::create_formatter(self.config.output_format);
        Ok(formatter.format_result(&self.config.server, &measurement))
    }
}
