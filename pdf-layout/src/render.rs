use std::path::{Path, PathBuf};

use pdf_core::fonts::WIN_ANSI_ENCODING;
use pdf_core::BuiltinFont;

use crate::canvas::{Canvas, CanvasProvider, PdfCanvasProvider};
use crate::error::RenderError;
use crate::layout::layout;
use crate::records::{
    ClinicalReportRecords, DocumentKind, InvoiceRecords, InvoiceTotals, PlainTextRecords,
    RecordSet,
};
use crate::theme::Theme;
use crate::validate::validate;

const DEFAULT_TEXT: &str = "Hello from a plain text PDF example.";

/// What a successful render wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    pub kind: DocumentKind,
    pub path: PathBuf,
    pub op_count: usize,
    pub totals: Option<InvoiceTotals>,
    /// Fonts resolved for the text on the page.
    pub fonts: Vec<BuiltinFont>,
    /// Content was drawn over the footer band.
    pub overflow: bool,
}

/// Validate, lay out and save one single-page document.
///
/// Every font the laid-out text uses is resolved on the canvas before
/// drawing. Nothing is created when validation fails. The canvas is dropped on
/// every path out of this function, after a failed save included.
pub fn render_document<P: CanvasProvider>(
    provider: &P,
    kind: DocumentKind,
    records: RecordSet<'_>,
    theme: &Theme,
    output: &Path,
) -> Result<RenderReport, RenderError> {
    validate(kind, records, output)?;
    let laid = layout(kind, records, theme);

    let mut canvas = provider.create().map_err(RenderError::ResourceAllocation)?;
    canvas
        .add_page(laid.page_size)
        .map_err(RenderError::ResourceAllocation)?;
    log::debug!(
        "rendering {} on a {:.2}x{:.2} page",
        kind.name(),
        canvas.page_width().unwrap_or_default(),
        canvas.page_height().unwrap_or_default()
    );
    let fonts = laid
        .fonts()
        .into_iter()
        .map(|font| canvas.select_font(font.pdf_base_name(), Some(WIN_ANSI_ENCODING)))
        .collect::<Result<Vec<_>, _>>()
        .map_err(RenderError::ResourceAllocation)?;
    log::debug!("resolved fonts {:?}", fonts);
    canvas.set_title(&theme.title);
    for op in &laid.ops {
        canvas.draw(op);
    }
    canvas
        .save_to_file(output)
        .map_err(RenderError::Persistence)?;
    log::info!("saved {} to {}", kind.name(), output.display());

    Ok(RenderReport {
        kind,
        path: output.to_path_buf(),
        op_count: laid.ops.len(),
        totals: laid.totals,
        fonts,
        overflow: laid.overflow,
    })
}

fn render_or_warn(kind: DocumentKind, records: RecordSet<'_>, output: &Path) -> bool {
    let theme = Theme::for_kind(kind);
    match render_document(&PdfCanvasProvider::default(), kind, records, &theme, output) {
        Ok(_) => true,
        Err(err) => {
            log::warn!(
                "could not render {} to {}: {}",
                kind.name(),
                output.display(),
                err
            );
            false
        }
    }
}

/// Plain invoice with provider block, item table and totals.
pub fn create_invoice_pdf(invoice: &InvoiceRecords, output: impl AsRef<Path>) -> bool {
    render_or_warn(
        DocumentKind::Invoice,
        RecordSet::Invoice(invoice),
        output.as_ref(),
    )
}

/// Branded invoice with Ship To column, striped rows and signature line.
pub fn create_formal_invoice_pdf(invoice: &InvoiceRecords, output: impl AsRef<Path>) -> bool {
    render_or_warn(
        DocumentKind::FormalInvoice,
        RecordSet::Invoice(invoice),
        output.as_ref(),
    )
}

pub fn create_clinical_report_pdf(
    report: &ClinicalReportRecords,
    output: impl AsRef<Path>,
) -> bool {
    render_or_warn(
        DocumentKind::ClinicalReport,
        RecordSet::ClinicalReport(report),
        output.as_ref(),
    )
}

/// One line of Helvetica 12 at (50, 750).
pub fn create_text_pdf(output: impl AsRef<Path>, text: &str) -> bool {
    let records = PlainTextRecords {
        text: text.to_string(),
    };
    render_or_warn(
        DocumentKind::PlainText,
        RecordSet::PlainText(&records),
        output.as_ref(),
    )
}

/// Text used when no input text is available.
pub fn default_example_text() -> &'static str {
    DEFAULT_TEXT
}
