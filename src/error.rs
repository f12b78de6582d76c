use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {url} failed with status: {status}")]
    Status { url: String, status: u16 },

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Missing detail page element: {0}")]
    MissingElement(String),

    #[error("Malformed temperature: {raw:?}")]
    Temperature { raw: String },

    #[error("Invalid detail page URL {href:?}: {message}")]
    InvalidUrl { href: String, message: String },
}

pub type Result<T> = std::result::Result<T, ScraperError>;
