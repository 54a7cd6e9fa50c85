//! CLI command implementations.

pub mod bookings;
pub mod rooms;
pub mod users;

use secrecy::SecretString;
use staybook_backoffice::config::{ConfigError, StayApiConfig};
use staybook_backoffice::stay::StayClient;
use thiserror::Error;

/// Errors shared by all CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Stay API operation failed.
    #[error("Stay API error: {0}")]
    Stay(#[from] staybook_backoffice::stay::StayError),

    /// Coordinator-level failure.
    #[error("{0}")]
    Coordinator(String),

    /// Invalid command argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Output serialization failed.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<staybook_backoffice::coordinator::CoordinatorError> for CliError {
    fn from(err: staybook_backoffice::coordinator::CoordinatorError) -> Self {
        Self::Coordinator(err.to_string())
    }
}

/// Build a Stay API client from the environment.
///
/// Reads the same variables as the back-office service, plus the optional
/// `STAY_SESSION_TOKEN` for commands that need an operator session.
pub async fn stay_client() -> Result<StayClient, CliError> {
    dotenvy::dotenv().ok();

    let config = StayApiConfig::from_env()?;
    let client = StayClient::new(&config);

    if let Ok(token) = std::env::var("STAY_SESSION_TOKEN") {
        client.set_session_token(SecretString::from(token)).await;
    }

    Ok(client)
}

/// Pretty-print a value as JSON to stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
