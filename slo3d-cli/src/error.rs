//! CLI error type.

use std::fmt;

use slo3d::config::ConfigError;
use slo3d::logging::LoggingError;
use slo3d::server::ServerError;

/// Errors that end the CLI with a non-zero exit status.
#[derive(Debug)]
pub enum CliError {
    /// The config file could not be loaded.
    Config(ConfigError),

    /// Logging could not be initialized.
    Logging(LoggingError),

    /// The Tokio runtime could not be created.
    Runtime(std::io::Error),

    /// The server failed.
    Server(ServerError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Logging(e) => write!(f, "Logging error: {}", e),
            CliError::Runtime(e) => write!(f, "Failed to create Tokio runtime: {}", e),
            CliError::Server(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Logging(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::Server(e) => Some(e),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e)
    }
}

impl From<ServerError> for CliError {
    fn from(e: ServerError) -> Self {
        CliError::Server(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_display() {
        let err = CliError::Runtime(std::io::Error::other("no threads"));
        assert!(err.to_string().contains("Tokio runtime"));
        assert!(err.to_string().contains("no threads"));
    }

    #[test]
    fn test_cli_error_from_config_error() {
        let config_err = ConfigError::InvalidValue {
            section: "server",
            key: "port",
            value: "x".to_string(),
        };
        let cli_err: CliError = config_err.into();
        assert!(matches!(cli_err, CliError::Config(_)));
        assert!(cli_err.to_string().starts_with("Configuration error"));
    }
}
