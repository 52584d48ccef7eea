//! Error handling for the cv matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CvMatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Role catalog error: {0}")]
    Catalog(String),

    #[error("Role not found: {role}{}", suggestion_hint(.suggestion))]
    RoleNotFound {
        role: String,
        suggestion: Option<String>,
    },

    #[error("Image error: {0}")]
    Image(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean '{}'?)", name),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, CvMatcherError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for CvMatcherError {
    fn from(err: anyhow::Error) -> Self {
        CvMatcherError::Processing(err.to_string())
    }
}
