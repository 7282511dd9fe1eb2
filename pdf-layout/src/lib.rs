//! Single-page business and clinical documents rendered to PDF.
//!
//! Records are validated, laid out into a list of [`DrawOp`]s by walking
//! a cursor down the page, and replayed onto a [`Canvas`]. The same
//! input always produces the same bytes.

pub mod canvas;
pub mod error;
pub mod format;
pub mod layout;
pub mod ops;
pub mod records;
pub mod render;
pub mod theme;
pub mod validate;

pub use canvas::{Canvas, CanvasProvider, PdfCanvas, PdfCanvasProvider};
pub use error::{CanvasError, RenderError, ValidationError};
pub use format::{describe, format_money, truncate};
pub use layout::{layout, Layout};
pub use ops::{DrawOp, Paint};
pub use records::{
    ClinicalReportRecords, DocumentKind, Finding, FindingSection, FindingStyle, InvoiceRecords,
    InvoiceTotals, LineItem, Party, Patient, PlainTextRecords, RecordSet, ReferringDoctor,
    TAX_RATE,
};
pub use render::{
    create_clinical_report_pdf, create_formal_invoice_pdf, create_invoice_pdf, create_text_pdf,
    default_example_text, render_document, RenderReport,
};
pub use theme::Theme;
pub use validate::validate;
