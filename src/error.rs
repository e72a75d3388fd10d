use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a source document or writing its schemas.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported file format: {path} (expected .json or .xml, or pass --parser)")]
    UnsupportedFormat { path: PathBuf },

    #[error("unknown encoding label: {0}")]
    UnknownEncoding(String),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("malformed input: {0}")]
    Malformed(String),

    #[error("schema has no title")]
    MissingTitle,

    #[error("invalid schema id: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
