//! Configuration parsing from CLI arguments

use crate::{
    cli::{Cli, location_list},
    config::locations::{find_location, LOCATIONS},
    error::{AppError, Result},
    models::{config::server_for_location, Config},
    types::OutputFormat,
};

/// What the command line asked for
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Run a bandwidth test with this configuration
    Run(Config),
    /// Print this location listing and exit with status 2
    LocationHelp(String),
}

/// Turns parsed CLI arguments into a validated [`Config`]
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Validate the arguments and resolve the server URL.
    ///
    /// The location is validated even when `--server` overrides it.
    pub fn parse(&self) -> Result<Resolution> {
        if self.cli.wants_location_help() {
            return Ok(Resolution::LocationHelp(location_list(LOCATIONS)));
        }

        if find_location(&self.cli.location).is_none() {
            return Err(AppError::config(format!(
                "unable to find location {:?}. Use \"--location help\" to see all locations",
                self.cli.location
            )));
        }

        let server = match self.cli.explicit_server() {
            Some(server) => server.to_string(),
            None => server_for_location(&self.cli.location),
        };

        Ok(Resolution::Run(Config {
            output_format: OutputFormat::from_csv_flag(self.cli.csv),
            server,
            location: self.cli.location.clone(),
            size_kb: self.cli.size,
            dry_run: self.cli.dry_run,
            force: self.cli.force,
            verbosity: self.cli.verbose,
        }))
    }
}

/// Convenience function to resolve the configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Resolution> {
    ConfigParser::new(cli).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = Vec::new();

    summary.push(format!("Server: {}", config.server));
    summary.push(format!("Location: {}", config.location));
    summary.push(format!("Size: {} KB", config.size_kb));
    summary.push(format!("Output: {}", config.output_format));
    summary.push(format!("Dry run: {}", config.dry_run));
    summary.push(format!("Rate limit disabled: {}", config.force));
    summary.push(format!("Verbosity: {}", config.verbosity));

    summary.join("\n")
}
