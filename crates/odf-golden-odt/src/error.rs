//! ODT error types

use thiserror::Error;

/// Result type for ODT operations
pub type OdtResult<T> = std::result::Result<T, OdtError>;

/// Errors that can occur during ODT reading/writing
#[derive(Debug, Error)]
pub enum OdtError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Part content is not valid UTF-8
    #[error("Invalid UTF-8 in {part}: {source}")]
    Utf8 {
        part: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Invalid file format
    #[error("Invalid ODT format: {0}")]
    InvalidFormat(String),

    /// Missing required part
    #[error("Missing required part: {0}")]
    MissingPart(String),
}
