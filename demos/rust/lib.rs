//! Shared plumbing for the demo binaries: logging setup, sample
//! records, JSON record loading and the render call.
//!
//! Run with e.g.:
//!   cargo run -p pdf-demos --bin invoice_example -- out.pdf --compress

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use pdf_layout::{
    default_example_text, render_document, ClinicalReportRecords, DocumentKind, InvoiceRecords, LineItem, Party,
    Patient, PdfCanvasProvider, RecordSet, ReferringDoctor, RenderError, RenderReport, Theme,
};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("failed to read records from {path:?}: {source}")]
    ReadRecords { path: PathBuf, source: io::Error },
    #[error("failed to parse records in {path:?}: {source}")]
    ParseRecords {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to create {kind} PDF {path:?}: {source}")]
    Render {
        kind: &'static str,
        path: PathBuf,
        source: RenderError,
    },
}

/// Options every demo binary accepts besides its paths.
#[derive(clap::Args, Debug)]
pub struct RenderOptions {
    /// JSON file with records replacing the built-in sample
    #[arg(long = "records", value_name = "json_file")]
    pub records: Option<PathBuf>,
    /// Flate-compress page content streams
    #[arg(long)]
    pub compress: bool,
}

/// Log to stderr at `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<T, DemoError> {
    let content = fs::read_to_string(path).map_err(|source| DemoError::ReadRecords {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| DemoError::ParseRecords {
        path: path.to_path_buf(),
        source,
    })
}

/// Records from `--records` if given, otherwise `sample`.
pub fn records_or<T: DeserializeOwned>(
    options: &RenderOptions,
    sample: impl FnOnce() -> T,
) -> Result<T, DemoError> {
    match &options.records {
        Some(path) => load_records(path),
        None => Ok(sample()),
    }
}

pub fn render(
    kind: DocumentKind,
    records: RecordSet<'_>,
    output: &Path,
    compress: bool,
) -> Result<RenderReport, DemoError> {
    let theme = Theme::for_kind(kind);
    render_document(
        &PdfCanvasProvider { compress },
        kind,
        records,
        &theme,
        output,
    )
    .map_err(|source| DemoError::Render {
        kind: kind.name(),
        path: output.to_path_buf(),
        source,
    })
}

/// Text for the plain text page from the input file's contents.
///
/// Built-in text is used only when the file could not be read or has
/// no bytes at all. One trailing line break is dropped unless nothing
/// would be left, so a file holding just a newline renders that newline.
pub fn page_text(content: Option<String>) -> String {
    match content {
        Some(text) if !text.is_empty() => {
            let trimmed = text
                .strip_suffix('\n')
                .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
                .unwrap_or(text.as_str());
            if trimmed.is_empty() {
                text
            } else {
                trimmed.to_string()
            }
        }
        _ => default_example_text().to_string(),
    }
}

/// Log the outcome and turn it into the process exit code.
pub fn finish(result: Result<RenderReport, DemoError>) -> ExitCode {
    match result {
        Ok(report) => {
            if report.overflow {
                log::warn!("{} content overlaps the page footer", report.kind.name());
            }
            log::info!("created {} PDF: {}", report.kind.name(), report.path.display());
            ExitCode::SUCCESS
        }
        Err(error) => {
            log::error!("{}", error);
            ExitCode::FAILURE
        }
    }
}

pub fn sample_invoice() -> InvoiceRecords {
    InvoiceRecords::new(
        Party::new("Example Provider Ltd.")
            .with_address("42 Provider Street, Example City")
            .with_email("accounts@provider.example"),
        Party::new("Client Co.")
            .with_address("100 Client Avenue, Demo Town")
            .with_email("billing@client.example"),
        vec![
            LineItem::new("Design and planning", 6, 75.0),
            LineItem::new("Implementation", 12, 95.0),
            LineItem::new("Validation and handover", 4, 85.0),
        ],
    )
}

pub fn sample_formal_invoice() -> InvoiceRecords {
    let mut invoice = InvoiceRecords::new(
        Party::new("John Smith")
            .with_address("4490 Oak Drive, Albany, NY 12210")
            .with_email("john.smith@provider.example"),
        Party::new("Jessie M Horne")
            .with_address("4312 Wood Road, New York, NY 10031")
            .with_email("jessie.horne@client.example"),
        vec![
            LineItem::new("Front and rear brake cables", 1, 100.0),
            LineItem::new("New set of pedal arms", 2, 25.0),
            LineItem::new("Labor 3hrs", 3, 15.0),
        ],
    );
    invoice.number = Some("US-001".to_string());
    invoice.date = Some("11/02/2019".to_string());
    invoice
}

pub fn sample_clinical_report() -> ClinicalReportRecords {
    ClinicalReportRecords::ultrasound_kub(
        Patient {
            full_name: "Yashvi M. Patel".to_string(),
            age: 21,
            sex: "Female".to_string(),
            patient_id: "555".to_string(),
        },
        ReferringDoctor {
            name: "Dr. Hiren Shah".to_string(),
            specialty: "Radiologist".to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdf_layout::validate;

    #[test]
    fn samples_pass_validation() {
        let out = Path::new("sample.pdf");
        let invoice = sample_invoice();
        let formal = sample_formal_invoice();
        let report = sample_clinical_report();
        assert!(validate(DocumentKind::Invoice, RecordSet::Invoice(&invoice), out).is_ok());
        assert!(validate(DocumentKind::FormalInvoice, RecordSet::Invoice(&formal), out).is_ok());
        assert!(
            validate(DocumentKind::ClinicalReport, RecordSet::ClinicalReport(&report), out).is_ok()
        );
        assert_eq!(formal.totals().subtotal, 195.0);
    }

    #[test]
    fn records_load_from_json_file() {
        let path = std::env::temp_dir().join("pdf_demos_records.json");
        fs::write(&path, serde_json::to_string(&sample_formal_invoice()).unwrap()).unwrap();
        let options = RenderOptions {
            records: Some(path),
            compress: false,
        };
        let loaded: InvoiceRecords = records_or(&options, sample_invoice).unwrap();
        assert_eq!(loaded, sample_formal_invoice());
    }

    #[test]
    fn missing_records_file_names_the_path() {
        let err = load_records::<InvoiceRecords>(Path::new("/nonexistent/records.json"))
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/records.json"));
    }

    #[test]
    fn page_text_falls_back_only_without_content() {
        assert_eq!(page_text(None), default_example_text());
        assert_eq!(page_text(Some(String::new())), default_example_text());
    }

    #[test]
    fn page_text_drops_one_trailing_line_break() {
        assert_eq!(page_text(Some("Hello PDF\n".to_string())), "Hello PDF");
        assert_eq!(page_text(Some("Hello PDF\r\n".to_string())), "Hello PDF");
        assert_eq!(page_text(Some("Hello PDF\n\n".to_string())), "Hello PDF\n");
        assert_eq!(page_text(Some("Hello PDF".to_string())), "Hello PDF");
    }

    #[test]
    fn newline_only_file_is_kept() {
        assert_eq!(page_text(Some("\n".to_string())), "\n");
        assert_eq!(page_text(Some("\r\n".to_string())), "\r\n");
    }
}
