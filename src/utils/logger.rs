use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::utils::error::{Result, SerializeError};

fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("fast_serializer=debug,info")
        } else {
            EnvFilter::new("fast_serializer=info")
        }
    })
}

fn already_installed(e: impl std::fmt::Display) -> SerializeError {
    SerializeError::ConfigValidationError {
        field: "logger".to_string(),
        message: format!("Failed to install tracing subscriber: {}", e),
    }
}

/// Human-readable compact logs for local runs.
pub fn init_logger(verbose: bool) -> Result<()> {
    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .map_err(already_installed)
}

/// JSON logs for hosted deployments that ship stdout to a log collector.
pub fn init_json_logger() -> Result<()> {
    tracing_subscriber::registry()
        .with(default_filter(false))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .try_init()
        .map_err(already_installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_logger_install_is_rejected() {
        let _ = init_logger(true);
        let err = init_json_logger().unwrap_err();
        assert!(err.to_string().contains("logger"));
    }
}
