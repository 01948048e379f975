//! Tracing subscriber installation for the server binary.

use tracing_subscriber::EnvFilter;

use crate::config::ServiceSettings;
use crate::error::{ServiceError, ServiceResult};

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the configured log level.
pub fn init(settings: &ServiceSettings) -> ServiceResult<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.log_level).map_err(|e| {
            ServiceError::ConfigParseError {
                path: "service.yaml".to_string(),
                message: format!("invalid log_level '{}': {}", settings.log_level, e),
            }
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| ServiceError::Server {
            message: format!("failed to install tracing subscriber: {}", e),
        })
}
