use thiserror::Error;

/// Failures surfaced by [`crate::PdfDocument`].
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("unknown builtin font family {0:?}")]
    UnknownFont(String),
    #[error("unsupported font encoding {0:?}")]
    UnsupportedEncoding(String),
    #[error("document has no pages")]
    NoPages,
    #[error("failed to write PDF output: {0}")]
    Io(#[from] std::io::Error),
}
