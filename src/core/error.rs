use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionRowError {
    #[error("failed to read suggestions from {path}: {source}")]
    SuggestionsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid suggestions file {path}: {source}")]
    SuggestionsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("payload is not valid JSON: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("code viewer failed to load: {0}")]
    CodeViewerLoad(String),
}
