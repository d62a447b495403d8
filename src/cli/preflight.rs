//! Pre-flight checks before starting the service.
//!
//! Validates that required configuration is available before any request
//! is accepted, so a missing credential fails the process, not a request.

use crate::config::{Settings, API_KEY_ENV};
use crate::error::{Result, TubelensError};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Serving requires the API key and a usable bind address.
    Serve,
    /// A one-off analysis requires the API key.
    Analyze,
}

/// Run pre-flight checks for the given operation.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    check_with(operation, settings, std::env::var(API_KEY_ENV).ok())
}

/// Run pre-flight checks with an explicit environment API key.
pub fn check_with(operation: Operation, settings: &Settings, env_key: Option<String>) -> Result<()> {
    settings.inference_config_with(env_key)?;
    check_limits(settings)?;

    if let Operation::Serve = operation {
        check_bind_address(&settings.server.host, settings.server.port)?;
    }
    Ok(())
}

/// Timeouts and sizes must all be positive.
fn check_limits(settings: &Settings) -> Result<()> {
    let limits = [
        ("openai.timeout_seconds", settings.openai.timeout_seconds as usize),
        ("transcript.timeout_seconds", settings.transcript.timeout_seconds as usize),
        ("transcript.max_prompt_chars", settings.transcript.max_prompt_chars),
        ("transcript.chunk_chars", settings.transcript.chunk_chars),
    ];

    match limits.iter().find(|(_, value)| *value == 0) {
        Some((name, _)) => Err(TubelensError::Config(format!("{} must not be 0", name))),
        None => Ok(()),
    }
}

/// Check that host and port form a valid socket address.
fn check_bind_address(host: &str, port: u16) -> Result<()> {
    if host.trim().is_empty() {
        return Err(TubelensError::Config("server.host is empty".to_string()));
    }
    if port == 0 {
        return Err(TubelensError::Config("server.port must not be 0".to_string()));
    }
    Ok(())
}
