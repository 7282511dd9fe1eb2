use pdf_core::PdfError;
use thiserror::Error;

/// Why a set of records cannot be rendered.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("output path is empty")]
    EmptyOutputPath,
    #[error("{kind} cannot be rendered from {schema}")]
    KindMismatch {
        kind: &'static str,
        schema: &'static str,
    },
    #[error("required field `{0}` is empty")]
    MissingField(&'static str),
    #[error("invoice has no line items")]
    NoItems,
    #[error("line item {index} has quantity {quantity}; quantities must be positive")]
    InvalidQuantity { index: usize, quantity: i64 },
    #[error(
        "line item {index} has unit price {unit_price}; prices must be finite and not negative"
    )]
    InvalidUnitPrice { index: usize, unit_price: f64 },
    #[error("line item {index} makes the invoice amounts overflow")]
    AmountOverflow { index: usize },
    #[error("text to render is empty")]
    EmptyText,
}

/// Failures of the drawing backend.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("canvas could not be created: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Pdf(#[from] PdfError),
}

/// Outcome of a failed render, by pipeline stage.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),
    #[error("failed to set up the document: {0}")]
    ResourceAllocation(#[source] CanvasError),
    #[error("failed to save the document: {0}")]
    Persistence(#[source] CanvasError),
}
