use std::path::Path;

use crate::error::ValidationError;
use crate::records::{
    ClinicalReportRecords, DocumentKind, InvoiceRecords, RecordSet, TAX_RATE,
};

/// Check that `records` can be rendered as `kind` into `output`.
///
/// Runs before any canvas exists, so a rejected call never creates a
/// file. Only zero-length values count as empty.
pub fn validate(
    kind: DocumentKind,
    records: RecordSet<'_>,
    output: &Path,
) -> Result<(), ValidationError> {
    if output.as_os_str().is_empty() {
        return Err(ValidationError::EmptyOutputPath);
    }
    if !kind.accepts(records) {
        return Err(ValidationError::KindMismatch {
            kind: kind.name(),
            schema: records.schema_name(),
        });
    }
    match records {
        RecordSet::Invoice(invoice) => validate_invoice(invoice),
        RecordSet::ClinicalReport(report) => validate_report(report),
        RecordSet::PlainText(text) if text.text.is_empty() => Err(ValidationError::EmptyText),
        RecordSet::PlainText(_) => Ok(()),
    }
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

fn validate_invoice(invoice: &InvoiceRecords) -> Result<(), ValidationError> {
    require(&invoice.provider.name, "provider.name")?;
    require(&invoice.client.name, "client.name")?;
    if invoice.items.is_empty() {
        return Err(ValidationError::NoItems);
    }
    let mut subtotal = 0.0;
    for (index, item) in invoice.items.iter().enumerate() {
        if item.quantity <= 0 {
            return Err(ValidationError::InvalidQuantity {
                index,
                quantity: item.quantity,
            });
        }
        if !item.unit_price.is_finite() || item.unit_price < 0.0 {
            return Err(ValidationError::InvalidUnitPrice {
                index,
                unit_price: item.unit_price,
            });
        }
        // Line total, subtotal and taxed total must all stay finite.
        subtotal += item.line_total();
        if !(subtotal * (1.0 + TAX_RATE)).is_finite() {
            return Err(ValidationError::AmountOverflow { index });
        }
    }
    Ok(())
}

fn validate_report(report: &ClinicalReportRecords) -> Result<(), ValidationError> {
    require(&report.patient.full_name, "patient.full_name")?;
    require(&report.patient.patient_id, "patient.patient_id")?;
    require(&report.doctor.name, "doctor.name")
}
