//! Error types for the test hand generator

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HandError {
    #[error("Deck must contain at least 7 cards to generate a hand. (found {found})")]
    DeckTooSmall { found: usize },

    #[error("Unresolved card identifier: {0}")]
    UnresolvedIdentifier(String),

    #[error("Remote lookup failed: {0}")]
    RemoteLookup(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed card payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Lookup timed out after {0} ms")]
    LookupTimeout(u64),

    #[error("No legal hand found after {attempts} attempts")]
    NoLegalHand { attempts: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Task join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

impl HandError {
    /// True for errors that only ever degrade a single card to a placeholder
    pub fn is_per_card(&self) -> bool {
        matches!(
            self,
            HandError::UnresolvedIdentifier(_)
                | HandError::RemoteLookup(_)
                | HandError::Http(_)
                | HandError::Json(_)
                | HandError::LookupTimeout(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, HandError>;
