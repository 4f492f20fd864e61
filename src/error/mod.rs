//! Error handling for testmynet-cli

use thiserror::Error;

/// Custom error types for testmynet-cli
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network connectivity errors
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP request errors
    #[error("HTTP request error: {0}")]
    HttpRequest(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Home directory could not be determined
    #[error("Home directory error: {0}")]
    HomeDir(String),

    /// State file could not be read or written
    #[error("State file error: {0}")]
    StateFile(String),

    /// State file exists but does not hold a valid timestamp
    #[error("State file parse error: {0}")]
    StateParse(String),

    /// The program ran again before the minimum interval elapsed
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    /// Create a new HTTP request error
    pub fn http_request<S: Into<String>>(message: S) -> Self {
        Self::HttpRequest(message.into())
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    /// Create a new home directory error
    pub fn home_dir<S: Into<String>>(message: S) -> Self {
        Self::HomeDir(message.into())
    }

    /// Create a new state file error
    pub fn state_file<S: Into<String>>(message: S) -> Self {
        Self::StateFile(message.into())
    }

    /// Create a new state file parse error
    pub fn state_parse<S: Into<String>>(message: S) -> Self {
        Self::StateParse(message.into())
    }

    /// Create a new rate limit error
    pub fn rate_limited<S: Into<String>>(message: S) -> Self {
        Self::RateLimited(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Classify a reqwest error, prefixing its message with `context`
    pub fn from_reqwest(context: impl std::fmt::Display, error: reqwest::Error) -> Self {
        let message = format!("{}: {}", context, error);
        Self::classify_reqwest(&error, message)
    }

    fn classify_reqwest(error: &reqwest::Error, message: String) -> Self {
        if error.is_timeout() {
            Self::timeout(message)
        } else if error.is_connect() || error.is_request() || error.is_body() || error.is_decode() {
            Self::network(message)
        } else {
            Self::http_request(message)
        }
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::Validation(_) => "VALIDATION",
            Self::Network(_) => "NETWORK",
            Self::HttpRequest(_) => "HTTP",
            Self::Timeout(_) => "TIMEOUT",
            Self::HomeDir(_) => "HOME",
            Self::StateFile(_) => "STATE",
            Self::StateParse(_) => "STATE",
            Self::RateLimited(_) => "RATE_LIMIT",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Config(msg) | Self::Validation(msg) => {
                format!("Invalid command line: {}\n\nSuggestion: Run with --help to see the available options.", msg)
            }
            Self::Network(msg) | Self::HttpRequest(msg) => {
                format!("Download failed: {}\n\nSuggestion: Check your internet connection or pick another server with --location.", msg)
            }
            Self::Timeout(msg) => {
                format!("The server stopped responding: {}\n\nSuggestion: Try again later or pick another server with --location.", msg)
            }
            Self::HomeDir(msg) => {
                format!("Unable to locate your home directory: {}\n\nSuggestion: Make sure HOME points to an existing directory.", msg)
            }
            Self::StateFile(msg) => {
                format!("File operation failed: {}\n\nSuggestion: Check permissions on your home directory.", msg)
            }
            Self::StateParse(msg) => {
                format!("The state file is corrupted: {}\n\nSuggestion: Inspect the file and remove it if it does not hold a timestamp.", msg)
            }
            Self::RateLimited(msg) => {
                format!("Too soon: {}\n\nSuggestion: Wait a few minutes before testing again. testmy.net bans clients that test too often.", msg)
            }
            Self::Internal(msg) => {
                format!("Internal error: {}\n\nThis is likely a bug. Please report this issue with the error details.", msg)
            }
        }
    }

    /// Get exit code for this error type
    ///
    /// Status 2 is left to the location listing and to clap usage errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) => 1,
            Self::Network(_) | Self::HttpRequest(_) | Self::Timeout(_) => 3,
            Self::RateLimited(_) => 4,
            Self::HomeDir(_) | Self::StateFile(_) | Self::StateParse(_) => 5,
            Self::Internal(_) => 99,
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Config(_) | Self::Validation(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::Network(_) | Self::HttpRequest(_) | Self::Timeout(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::RateLimited(_) => {
                    format!("[{}] {}", category.magenta().bold(), message.magenta())
                }
                Self::HomeDir(_) | Self::StateFile(_) | Self::StateParse(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
                Self::Internal(_) => {
                    format!("[{}] {}", category.bright_red().bold(), message.bright_red())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

impl From<url::ParseError> for AppError {
    fn from(error: url::ParseError) -> Self {
        Self::validation(format!("URL parse error: {}", error))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        let message = error.to_string();
        Self::classify_reqwest(&error, message)
    }
}

/// Custom Result type for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Prints fatal errors to stderr
pub struct ErrorReporter {
    pub use_color: bool,
    pub verbose: bool,
}

impl ErrorReporter {
    /// Create a new error reporter
    pub fn new(use_color: bool, verbose: bool) -> Self {
        Self { use_color, verbose }
    }

    /// Render an error the way `report_error` prints it
    pub fn render(&self, error: &AppError) -> String {
        let mut out = format!("Error: {}", error.format_for_console(self.use_color));
        if self.verbose {
            out.push_str("\n\n");
            out.push_str(&error.user_friendly_message());
        }
        out
    }

    /// Report an error to the user
    pub fn report_error(&self, error: &AppError) {
        eprintln!("{}", self.render(error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_error = AppError::config("Invalid configuration");
        assert_eq!(config_error.category(), "CONFIG");
        assert_eq!(config_error.exit_code(), 1);

        let network_error = AppError::network("Connection failed");
        assert_eq!(network_error.category(), "NETWORK");
        assert_eq!(network_error.exit_code(), 3);
    }

    #[test]
    fn test_error_display() {
        let error = AppError::rate_limited("program ran less than 15m0s ago (1m0s)");
        let display = error.to_string();
        assert!(display.starts_with("Rate limited:"));
        assert!(display.contains("15m0s"));
    }

    #[test]
    fn test_error_categories() {
        let errors = [
            AppError::config("config"),
            AppError::validation("validation"),
            AppError::network("network"),
            AppError::http_request("http"),
            AppError::timeout("timeout"),
            AppError::home_dir("home"),
            AppError::state_file("state"),
            AppError::state_parse("state"),
            AppError::rate_limited("rate"),
            AppError::internal("internal"),
        ];

        let expected_categories = [
            "CONFIG", "VALIDATION", "NETWORK", "HTTP", "TIMEOUT", "HOME",
            "STATE", "STATE", "RATE_LIMIT", "INTERNAL",
        ];

        for (error, expected) in errors.iter().zip(expected_categories.iter()) {
            assert_eq!(error.category(), *expected);
        }
    }

    #[test]
    fn test_exit_codes_never_collide_with_help_listing() {
        let errors = [
            AppError::config("x"),
            AppError::validation("x"),
            AppError::network("x"),
            AppError::http_request("x"),
            AppError::timeout("x"),
            AppError::home_dir("x"),
            AppError::state_file("x"),
            AppError::state_parse("x"),
            AppError::rate_limited("x"),
            AppError::internal("x"),
        ];

        for error in &errors {
            assert_ne!(error.exit_code(), 0);
            assert_ne!(error.exit_code(), 2);
        }
        assert_eq!(AppError::rate_limited("x").exit_code(), 4);
        assert_eq!(AppError::state_parse("x").exit_code(), 5);
        assert_eq!(AppError::internal("x").exit_code(), 99);
    }

    #[test]
    fn test_error_conversions() {
        let url_error = url::Url::parse("not a url").unwrap_err();
        let app_error: AppError = url_error.into();
        assert_eq!(app_error.category(), "VALIDATION");
    }

    #[test]
    fn test_console_formatting() {
        let error = AppError::config("Test error");
        let formatted_no_color = error.format_for_console(false);
        let formatted_color = error.format_for_console(true);

        assert_eq!(formatted_no_color, "[CONFIG] Configuration error: Test error");
        assert!(formatted_color.contains("CONFIG"));
        assert!(formatted_color.contains("Test error"));
    }

    #[test]
    fn test_reporter_render() {
        let error = AppError::home_dir("\"/nope\" must exist and be a directory");

        let terse = ErrorReporter::new(false, false).render(&error);
        assert_eq!(terse, "Error: [HOME] Home directory error: \"/nope\" must exist and be a directory");

        let verbose = ErrorReporter::new(false, true).render(&error);
        assert!(verbose.contains("Suggestion:"));
        assert!(verbose.contains("HOME"));
    }

    #[test]
    fn test_panic_report_render() {
        let error = AppError::internal("application panic: index out of bounds");
        let rendered = ErrorReporter::new(false, true).render(&error);

        assert!(rendered.starts_with("Error: [INTERNAL] Internal error: application panic"));
        assert!(rendered.contains("Please report this issue"));
        assert_eq!(error.exit_code(), 99);
    }

    #[test]
    fn test_reqwest_builder_error_conversion() {
        let error = reqwest::Client::builder()
            .user_agent("bad\nagent")
            .build()
            .unwrap_err();
        let app_error: AppError = error.into();
        assert_eq!(app_error.category(), "HTTP");
    }
}
