//! Error types for sitemap generation.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for sitemap operations.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// Priority outside of the inclusive range [0.0, 1.0]
    #[error("Invalid priority {0}: must be within 0.0 - 1.0")]
    InvalidPriority(f64),

    /// Location is not a valid URL once escaped
    #[error("Invalid location '{location}': {source}")]
    InvalidLocation {
        location: String,
        #[source]
        source: url::ParseError,
    },

    /// Generation was requested before any entry was added
    #[error("No sitemap entries: add entries before generating a sitemap")]
    EmptyStore,

    /// Output path has no file name to derive segment names from
    #[error("Output path has no file name: {0}")]
    InvalidOutputPath(PathBuf),

    /// Creating or writing a segment file failed
    #[error("Failed to write sitemap file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// XML serialization failed
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Type alias for Result with SitemapError
pub type Result<T> = std::result::Result<T, SitemapError>;
