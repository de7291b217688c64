use tracing_subscriber::EnvFilter;

use crate::{config::LoggingConfig, error::AppError};

/// Installs the global subscriber. Fails if the level directive does not
/// parse or a subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<(), AppError> {
    let filter = filter(&config.level)?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| AppError::Logging(e.to_string()))
}

fn filter(level: &str) -> Result<EnvFilter, AppError> {
    EnvFilter::try_new(level)
        .map_err(|e| AppError::Logging(format!("invalid log level {:?}: {}", level, e)))
}
