use reqwest::StatusCode;
use thiserror::Error;

/// Failures the font tooling classifies; everything else travels as plain
/// `anyhow` context.
#[derive(Debug, Error)]
pub enum FontFetchError {
    #[error("stylesheet request to {url} failed with status {status}")]
    StylesheetStatus { url: String, status: StatusCode },

    #[error("font download from {url} failed with status {status}")]
    FontStatus { url: String, status: StatusCode },

    #[error("invalid stylesheet url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unknown action '{0}' (expected FETCH_FONTS or MERGE_CSS)")]
    UnknownAction(String),
}
