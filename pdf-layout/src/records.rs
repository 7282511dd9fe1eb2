use serde::{Deserialize, Serialize};

/// Fixed tax rate applied to every invoice subtotal.
pub const TAX_RATE: f64 = 0.05;

/// Provider or client on an invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Party {
    /// Required; printed first and in bold.
    pub name: String,
    /// Single line. Empty values are skipped like missing ones.
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Party {
    pub fn new(name: impl Into<String>) -> Self {
        Party {
            name: name.into(),
            ..Party::default()
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Name followed by whichever of address and email are non-empty.
    pub fn lines(&self) -> Vec<&str> {
        let mut lines = vec![self.name.as_str()];
        lines.extend(
            [&self.address, &self.email]
                .into_iter()
                .flatten()
                .map(String::as_str)
                .filter(|line| !line.is_empty()),
        );
        lines
    }
}

/// One billable row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub description: String,
    pub quantity: i64,
    pub unit_price: f64,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: i64, unit_price: f64) -> Self {
        LineItem {
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    /// `quantity * unit_price`, unrounded.
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// Everything either invoice layout prints.
///
/// The client doubles as the Ship To party on the formal invoice.
/// `number` and `date` only show there, and only when non-empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecords {
    pub provider: Party,
    pub client: Party,
    /// Rows in print order. At least one is required.
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl InvoiceRecords {
    pub fn new(provider: Party, client: Party, items: Vec<LineItem>) -> Self {
        InvoiceRecords {
            provider,
            client,
            items,
            number: None,
            date: None,
        }
    }

    pub fn totals(&self) -> InvoiceTotals {
        InvoiceTotals::from_items(&self.items)
    }
}

/// Invoice aggregates. Items are summed in input order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl InvoiceTotals {
    pub fn from_items(items: &[LineItem]) -> Self {
        let subtotal: f64 = items.iter().map(LineItem::line_total).sum();
        let tax = subtotal * TAX_RATE;
        InvoiceTotals {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

/// Subject of a clinical report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub full_name: String,
    /// Years, printed as is.
    #[serde(default)]
    pub age: i32,
    #[serde(default)]
    pub sex: String,
    /// Printed after `PID`. Must not be empty.
    pub patient_id: String,
}

/// Printed after `Ref. By` and again as a signature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferringDoctor {
    pub name: String,
    #[serde(default)]
    pub specialty: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingStyle {
    /// Indented line prefixed with a bullet.
    #[default]
    Bullet,
    /// Bold line flush with the heading.
    Emphasis,
    Plain,
}

/// One line under a section heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub text: String,
    #[serde(default)]
    pub style: FindingStyle,
}

impl Finding {
    pub fn bullet(text: impl Into<String>) -> Self {
        Finding {
            text: text.into(),
            style: FindingStyle::Bullet,
        }
    }

    pub fn emphasis(text: impl Into<String>) -> Self {
        Finding {
            text: text.into(),
            style: FindingStyle::Emphasis,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Finding {
            text: text.into(),
            style: FindingStyle::Plain,
        }
    }
}

/// Bold heading followed by its findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindingSection {
    pub heading: String,
    pub findings: Vec<Finding>,
}

impl FindingSection {
    pub fn new(heading: impl Into<String>, findings: Vec<Finding>) -> Self {
        FindingSection {
            heading: heading.into(),
            findings,
        }
    }
}

/// A single-study imaging report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalReportRecords {
    pub patient: Patient,
    pub doctor: ReferringDoctor,
    pub study_title: String,
    pub sections: Vec<FindingSection>,
    /// Name printed under the reporting radiologist's signature.
    pub radiologist: String,
}

impl ClinicalReportRecords {
    /// A kidney/ureter/bladder ultrasound report with unremarkable
    /// findings for the given patient.
    pub fn ultrasound_kub(patient: Patient, doctor: ReferringDoctor) -> Self {
        ClinicalReportRecords {
            patient,
            doctor,
            study_title: "ULTRASOUND KUB".to_string(),
            sections: vec![
                FindingSection::new(
                    "KIDNEYS",
                    vec![
                        Finding::bullet(
                            "Both kidneys are visualized and normal in size, shape and echotexture.",
                        ),
                        Finding::bullet(
                            "Right kidney measures 10.0 x 3.2 cm. Left kidney measures 9.7 x 4.2 cm.",
                        ),
                        Finding::bullet("No calculus, hydronephrosis, or focal lesion seen."),
                    ],
                ),
                FindingSection::new(
                    "URINARY BLADDER & UTERUS",
                    vec![
                        Finding::bullet("Urinary bladder is distended, lumen echo-free."),
                        Finding::bullet(
                            "Uterus appears normal in size and echotexture. Bilateral adnexa clear.",
                        ),
                    ],
                ),
                FindingSection::new(
                    "IMPRESSION",
                    vec![Finding::emphasis("NO SIGNIFICANT ABNORMALITY DETECTED")],
                ),
                FindingSection::new("ADVICE", vec![Finding::plain("CLINICAL CORRELATION")]),
            ],
            radiologist: "Dr. Vimal Shah".to_string(),
        }
    }
}

/// One line of text. Line breaks are not interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlainTextRecords {
    pub text: String,
}

/// The four document variants the renderers produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Invoice,
    FormalInvoice,
    ClinicalReport,
    PlainText,
}

impl DocumentKind {
    pub fn name(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "invoice",
            DocumentKind::FormalInvoice => "formal invoice",
            DocumentKind::ClinicalReport => "clinical report",
            DocumentKind::PlainText => "plain text",
        }
    }

    /// Whether `records` carries the schema this kind renders.
    pub fn accepts(&self, records: RecordSet<'_>) -> bool {
        matches!(
            (self, records),
            (
                DocumentKind::Invoice | DocumentKind::FormalInvoice,
                RecordSet::Invoice(_)
            ) | (DocumentKind::ClinicalReport, RecordSet::ClinicalReport(_))
                | (DocumentKind::PlainText, RecordSet::PlainText(_))
        )
    }
}

/// Borrowed view of the records handed to one render call.
#[derive(Debug, Clone, Copy)]
pub enum RecordSet<'a> {
    Invoice(&'a InvoiceRecords),
    ClinicalReport(&'a ClinicalReportRecords),
    PlainText(&'a PlainTextRecords),
}

impl RecordSet<'_> {
    pub fn schema_name(&self) -> &'static str {
        match self {
            RecordSet::Invoice(_) => "invoice records",
            RecordSet::ClinicalReport(_) => "clinical report records",
            RecordSet::PlainText(_) => "plain text records",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn party_lines_skip_missing_and_empty_fields() {
        let party = Party::new("Client Co.").with_email("");
        assert_eq!(party.lines(), ["Client Co."]);

        let party = Party::new("Client Co.")
            .with_address("100 Client Avenue, Demo Town")
            .with_email("billing@client.example");
        assert_eq!(
            party.lines(),
            [
                "Client Co.",
                "100 Client Avenue, Demo Town",
                "billing@client.example"
            ]
        );
    }

    #[test]
    fn totals_apply_fixed_tax_rate() {
        let items = vec![LineItem::new("a", 2, 10.0), LineItem::new("b", 1, 5.5)];
        let totals = InvoiceTotals::from_items(&items);
        assert_eq!(totals.subtotal, 25.5);
        assert!((totals.tax - 1.275).abs() < 1e-12);
        assert_eq!(totals.total, totals.subtotal + totals.tax);
    }

    #[test]
    fn kinds_accept_matching_schema_only() {
        let invoice = InvoiceRecords::default();
        let text = PlainTextRecords::default();
        assert!(DocumentKind::Invoice.accepts(RecordSet::Invoice(&invoice)));
        assert!(DocumentKind::FormalInvoice.accepts(RecordSet::Invoice(&invoice)));
        assert!(!DocumentKind::ClinicalReport.accepts(RecordSet::Invoice(&invoice)));
        assert!(DocumentKind::PlainText.accepts(RecordSet::PlainText(&text)));
    }

    #[test]
    fn invoice_records_deserialize_with_optional_fields() {
        let json = r#"{
            "provider": { "name": "Example Provider Ltd." },
            "client": { "name": "Client Co.", "email": "billing@client.example" },
            "items": [ { "description": "Implementation", "quantity": 12, "unit_price": 95.0 } ],
            "number": "INV-7"
        }"#;
        let records: InvoiceRecords = serde_json::from_str(json).unwrap();
        assert_eq!(records.provider.address, None);
        assert_eq!(records.items[0].line_total(), 1140.0);
        assert_eq!(records.number.as_deref(), Some("INV-7"));
        assert_eq!(records.date, None);
    }

    #[test]
    fn report_sections_default_to_bullets() {
        let json = r#"{ "heading": "LIVER", "findings": [ { "text": "Normal." } ] }"#;
        let section: FindingSection = serde_json::from_str(json).unwrap();
        assert_eq!(section.findings[0].style, FindingStyle::Bullet);
    }

    fn items() -> impl Strategy<Value = Vec<LineItem>> {
        prop::collection::vec((1i64..10_000, 0.0f64..100_000.0), 0..40).prop_map(|rows| {
            rows.into_iter()
                .map(|(quantity, unit_price)| LineItem::new("item", quantity, unit_price))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn totals_follow_items_in_order(items in items()) {
            let totals = InvoiceTotals::from_items(&items);
            let folded = items
                .iter()
                .fold(0.0, |sum, item| sum + item.quantity as f64 * item.unit_price);
            prop_assert_eq!(totals.subtotal, folded);
            prop_assert_eq!(totals.tax, totals.subtotal * TAX_RATE);
            prop_assert_eq!(totals.total, totals.subtotal + totals.tax);
        }

        #[test]
        fn totals_are_never_negative(items in items()) {
            let totals = InvoiceTotals::from_items(&items);
            prop_assert!(totals.subtotal >= 0.0);
            prop_assert!(totals.total >= totals.subtotal);
        }
    }
}
