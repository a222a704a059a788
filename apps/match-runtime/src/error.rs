//! Error handling for the session runtime

use glossary_core::GameError;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Runtime error types
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session task has shut down")]
    SessionClosed,
}

/// Result type alias for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_config() {
        let error = RuntimeError::from(ConfigError::InvalidValue {
            key: "MATCH_PAIR_COUNT",
            value: "lots".to_string(),
        });
        assert_eq!(
            error.to_string(),
            "Config error: Invalid value for MATCH_PAIR_COUNT: \"lots\""
        );
    }

    #[test]
    fn test_error_display_game() {
        let error = RuntimeError::from(GameError::EmptyCatalog);
        assert_eq!(error.to_string(), "Game error: catalog has no entries");
    }

    #[test]
    fn test_error_display_closed() {
        assert_eq!(
            RuntimeError::SessionClosed.to_string(),
            "Session task has shut down"
        );
    }
}
