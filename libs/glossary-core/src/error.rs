//! Error types for glossary-core.

use crate::types::CardId;
use thiserror::Error;

/// Result type alias using GameError.
pub type Result<T> = std::result::Result<T, GameError>;

/// Errors raised by the game core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("pair count {requested} is outside 1..={available}")]
    InvalidPairCount { requested: usize, available: usize },

    #[error("catalog has no entries")]
    EmptyCatalog,

    #[error("invalid catalog: {0}")]
    CatalogFormat(String),

    #[error("card {0} is not part of the current deck")]
    UnknownCard(CardId),
}

impl GameError {
    /// True for errors that indicate a caller defect rather than bad configuration.
    pub fn is_implementation_error(&self) -> bool {
        matches!(self, Self::UnknownCard(_))
    }
}

/// Errors that can occur while parsing a markdown glossary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing term at line {line}")]
    MissingTerm { line: usize },

    #[error("missing definition at line {line}")]
    MissingDefinition { line: usize },
}

impl From<ParseError> for GameError {
    fn from(err: ParseError) -> Self {
        Self::CatalogFormat(err.to_string())
    }
}
