// src/error.rs
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Non-success HTTP status (429 has its own variant)
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("Rate limited by {url}")]
    RateLimited { url: String },

    /// Connect/timeout/TLS failures
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered but reported an error in its body
    #[error("API error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),

    /// None of the extractor strategies matched
    #[error("No match for {0}")]
    NoMatch(String),

    /// Missing or invalid configuration; fatal for binaries
    #[error("Config error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("CSV error: {0}")]
    Csv(String),

    /// Bad operator input (interactive prompts, flags)
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Failures that only cost one source; the batch goes on.
    pub fn is_source_local(&self) -> bool {
        !matches!(self, Error::Config(_))
    }
}
