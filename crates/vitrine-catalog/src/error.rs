use crate::model::ProductId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Invalid catalog source '{input}': {reason}")]
    InvalidSource { input: String, reason: String },

    #[error("Catalog document must be a JSON array, found {0}")]
    NotAnArray(&'static str),

    #[error("No product with id {0}")]
    UnknownProduct(ProductId),

    #[error("Failed to open {link}")]
    Navigation {
        link: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;
