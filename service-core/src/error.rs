use thiserror::Error;

/// Infrastructure failures raised while loading config, binding listeners
/// or talking to storage.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Database error: {0}")]
    DatabaseError(anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(anyhow::Error::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_keeps_the_inner_message() {
        let err = AppError::ConfigError(anyhow::anyhow!("MONGODB_URI is required but not set"));
        assert_eq!(
            err.to_string(),
            "Configuration error: MONGODB_URI is required but not set"
        );
    }

    #[test]
    fn io_errors_become_internal_errors() {
        let err = AppError::from(std::io::Error::other("address in use"));
        assert!(matches!(err, AppError::InternalError(_)));
        assert_eq!(err.to_string(), "Internal server error: address in use");
    }
}
