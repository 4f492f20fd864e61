//! testmynet-cli - Main CLI Application
//!
//! Downloads a payload from a testmy.net server and prints the measured
//! bandwidth, either as a sentence or as a CSV record.

use clap::Parser;
use std::process;
use testmynet_cli::{
    app::App,
    cli::{supports_color, Cli},
    config::{load_config, Resolution},
    error::{AppError, ErrorReporter, Result},
    git_commit, HttpDownloader, Logger, OverloadGuard, LONG_VERSION, PKG_NAME,
};

#[tokio::main]
async fn main() {
    // Set up better panic handling
    std::panic::set_hook(Box::new(|panic_info| {
        let error = AppError::internal(format!("application panic: {}", panic_info));
        ErrorReporter::new(supports_color(), true).report_error(&error);
        process::exit(error.exit_code());
    }));

    let cli = Cli::parse();
    let verbosity = cli.verbose;

    match run_application(cli).await {
        Ok(Some(line)) => println!("{}", line),
        Ok(None) => process::exit(2),
        Err(e) => {
            ErrorReporter::new(supports_color(), verbosity > 0).report_error(&e);
            process::exit(e.exit_code());
        }
    }
}

/// Main application logic.
///
/// Returns the result line, or `None` once the location listing has been
/// printed.
async fn run_application(cli: Cli) -> Result<Option<String>> {
    let config = match load_config(cli)? {
        Resolution::Run(config) => config,
        Resolution::LocationHelp(listing) => {
            print!("{}", listing);
            return Ok(None);
        }
    };

    let mut logger = Logger::with_verbosity("MAIN", config.verbosity);
    logger.set_color(supports_color());

    logger
        .debug(&format!("{} {}", PKG_NAME, LONG_VERSION))
        .field("commit", git_commit().unwrap_or("unknown"))
        .log();

    let downloader = HttpDownloader::new(logger.named("NET"))?;
    let guard = OverloadGuard::with_defaults(logger.named("STATE"));
    let app = App::new(config, logger.named("APP"));

    app.run(&downloader, &guard).await.map(Some)
}
