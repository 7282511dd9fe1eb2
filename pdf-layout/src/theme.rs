//! Visual constants for each document kind.
//!
//! A [`Theme`] carries every offset, color, font and label the layout
//! engine uses. The renderers differ only in which theme they pass.

use pdf_core::{BuiltinFont, Color, PageSize, TextAlign, TextStyle};

use crate::records::DocumentKind;

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub text: Color,
    pub accent: Color,
    pub muted: Color,
    pub rule: Color,
    pub stripe: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            text: Color::gray(0.1),
            accent: Color::rgb(0.118, 0.227, 0.373),
            muted: Color::gray(0.45),
            rule: Color::rgb(0.75, 0.75, 0.78),
            stripe: Color::rgb(0.95, 0.97, 1.0),
        }
    }
}

/// Filled circle with a short label, standing in for a logo.
#[derive(Debug, Clone, PartialEq)]
pub struct Branding {
    pub label: String,
    pub radius: f64,
}

/// Which value a table column shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnField {
    Quantity,
    Description,
    UnitPrice,
    Amount,
}

/// One table column. `x` is measured from the left margin and is the
/// left edge, center or right edge of the text depending on `align`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    pub field: ColumnField,
    pub label: String,
    pub x: f64,
    pub align: TextAlign,
}

impl TableColumn {
    pub fn new(field: ColumnField, label: &str, x: f64, align: TextAlign) -> Self {
        TableColumn {
            field,
            label: label.to_string(),
            x,
            align,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceTheme {
    /// Distance from the page top to the title baseline.
    pub title_top: f64,
    /// Advance between stacked party and metadata lines.
    pub line_height: f64,
    pub section_gap: f64,
    /// Offsets from the left margin of the Bill To, Ship To and
    /// invoice details columns.
    pub column_offsets: [f64; 3],
    pub ship_to: bool,
    /// Offset of a metadata value from its label.
    pub meta_value_offset: f64,
    pub columns: Vec<TableColumn>,
    pub row_height: f64,
    /// Baseline distance below the top of a row.
    pub row_baseline: f64,
    pub description_budget: usize,
    pub striped_rows: bool,
    pub bill_to_label: String,
    pub ship_to_label: String,
    pub number_label: String,
    pub date_label: String,
    pub subtotal_label: String,
    /// The rate is appended as a percentage, e.g. `Tax (5%)`.
    pub tax_label: String,
    pub total_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceFooter {
    /// Divider height above the page bottom.
    pub rule_y: f64,
    pub terms_y: f64,
    pub terms: Vec<String>,
    /// Caption under a signature line drawn at the right margin.
    pub signature: Option<String>,
    pub signature_y: f64,
}

/// Letterhead and spacing of the clinical report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTheme {
    pub center_name: String,
    pub services: String,
    pub address: String,
    /// Distances from the page top to the center name, services and
    /// address baselines.
    pub letterhead_tops: [f64; 3],
    pub address_size: f64,
    /// Height of the colored band under the letterhead.
    pub band_height: f64,
    pub band_top: f64,
    pub patient_top: f64,
    pub patient_name_size: f64,
    pub id_size: f64,
    /// Offsets from the left margin of the PID / Ref. By labels and values.
    pub id_label_x: f64,
    pub id_value_x: f64,
    pub divider_top: f64,
    pub study_title_top: f64,
    pub study_title_size: f64,
    pub findings_top: f64,
    pub heading_gap: f64,
    pub finding_gap: f64,
    pub section_gap: f64,
    pub bullet_indent: f64,
    pub placeholder_gap: f64,
    pub placeholder_side: f64,
    pub placeholder_caption: String,
    pub footer_rule_y: f64,
    pub closing_y: f64,
    pub closing: [String; 2],
    pub closing_offset: f64,
    pub signature_y: f64,
    pub technologist_label: String,
    /// Offsets from the left margin of the referrer and radiologist names.
    pub signature_offsets: [f64; 2],
}

/// Position of the single text run on a plain text page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextTheme {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub page_size: PageSize,
    pub margin: f64,
    pub title: String,
    pub title_style: TextStyle,
    pub heading_style: TextStyle,
    pub body_style: TextStyle,
    pub small_style: TextStyle,
    pub palette: Palette,
    pub branding: Option<Branding>,
    pub invoice: InvoiceTheme,
    pub footer: Option<InvoiceFooter>,
    pub report: ReportTheme,
    pub text: TextTheme,
}

fn bold(size: f64) -> TextStyle {
    TextStyle::new(BuiltinFont::HelveticaBold, size)
}

fn regular(size: f64) -> TextStyle {
    TextStyle::new(BuiltinFont::Helvetica, size)
}

impl Theme {
    pub fn for_kind(kind: DocumentKind) -> Theme {
        match kind {
            DocumentKind::Invoice => Theme::invoice(),
            DocumentKind::FormalInvoice => Theme::formal_invoice(),
            DocumentKind::ClinicalReport => Theme::clinical_report(),
            DocumentKind::PlainText => Theme::plain_text(),
        }
    }

    /// Plain single-column invoice.
    pub fn invoice() -> Theme {
        Theme {
            title: "INVOICE".to_string(),
            title_style: bold(20.0),
            heading_style: bold(12.0),
            body_style: regular(11.0),
            small_style: regular(9.0),
            footer: Some(InvoiceFooter {
                rule_y: 80.0,
                terms_y: 64.0,
                terms: vec!["Thank you for your business.".to_string()],
                signature: None,
                signature_y: 0.0,
            }),
            ..Theme::base(50.0)
        }
    }

    /// Branded invoice with Bill To / Ship To columns, striped rows and
    /// a signature line.
    pub fn formal_invoice() -> Theme {
        let invoice = InvoiceTheme {
            title_top: 70.0,
            line_height: 14.0,
            section_gap: 22.0,
            column_offsets: [0.0, 170.0, 330.0],
            ship_to: true,
            columns: vec![
                TableColumn::new(ColumnField::Quantity, "QTY", 20.0, TextAlign::Center),
                TableColumn::new(ColumnField::Description, "DESCRIPTION", 50.0, TextAlign::Left),
                TableColumn::new(ColumnField::UnitPrice, "UNIT PRICE", 400.0, TextAlign::Right),
                TableColumn::new(ColumnField::Amount, "AMOUNT", 495.0, TextAlign::Right),
            ],
            description_budget: 42,
            striped_rows: true,
            bill_to_label: "BILL TO".to_string(),
            ship_to_label: "SHIP TO".to_string(),
            number_label: "INVOICE #".to_string(),
            date_label: "DATE".to_string(),
            subtotal_label: "Subtotal".to_string(),
            tax_label: "Sales Tax".to_string(),
            total_label: "TOTAL".to_string(),
            ..InvoiceTheme::default()
        };

        Theme {
            title: "INVOICE".to_string(),
            title_style: bold(28.0),
            heading_style: bold(10.0),
            body_style: regular(10.0),
            small_style: regular(9.0),
            palette: Palette {
                accent: Color::rgb(0.80, 0.16, 0.16),
                stripe: Color::rgb(0.97, 0.95, 0.95),
                ..Palette::default()
            },
            branding: Some(Branding {
                label: "LOGO".to_string(),
                radius: 28.0,
            }),
            invoice,
            footer: Some(InvoiceFooter {
                rule_y: 150.0,
                terms_y: 134.0,
                terms: vec![
                    "Terms & Conditions".to_string(),
                    "Payment is due within 15 days.".to_string(),
                    "Please make checks payable to the provider named above.".to_string(),
                ],
                signature: Some("Authorized signature".to_string()),
                signature_y: 70.0,
            }),
            ..Theme::base(50.0)
        }
    }

    pub fn clinical_report() -> Theme {
        Theme {
            title: "Clinical Report".to_string(),
            title_style: bold(28.0),
            heading_style: bold(13.0),
            body_style: regular(12.0),
            small_style: regular(11.0),
            palette: Palette {
                accent: Color::rgb(0.06, 0.23, 0.56),
                ..Palette::default()
            },
            ..Theme::base(40.0)
        }
    }

    pub fn plain_text() -> Theme {
        Theme {
            title: "Text".to_string(),
            body_style: regular(12.0),
            ..Theme::base(50.0)
        }
    }

    fn base(margin: f64) -> Theme {
        Theme {
            page_size: PageSize::A4,
            margin,
            title: String::new(),
            title_style: bold(20.0),
            heading_style: bold(12.0),
            body_style: regular(11.0),
            small_style: regular(9.0),
            palette: Palette::default(),
            branding: None,
            invoice: InvoiceTheme::default(),
            footer: None,
            report: ReportTheme::default(),
            text: TextTheme { x: 50.0, y: 750.0 },
        }
    }

    pub fn usable_width(&self) -> f64 {
        self.page_size.width - 2.0 * self.margin
    }

    pub fn right_edge(&self) -> f64 {
        self.page_size.width - self.margin
    }
}

impl Default for InvoiceTheme {
    fn default() -> Self {
        InvoiceTheme {
            title_top: 62.0,
            line_height: 18.0,
            section_gap: 12.0,
            column_offsets: [0.0, 180.0, 330.0],
            ship_to: false,
            meta_value_offset: 60.0,
            columns: vec![
                TableColumn::new(ColumnField::Description, "Description", 0.0, TextAlign::Left),
                TableColumn::new(ColumnField::Quantity, "Qty", 250.0, TextAlign::Right),
                TableColumn::new(ColumnField::UnitPrice, "Unit Price", 370.0, TextAlign::Right),
                TableColumn::new(ColumnField::Amount, "Line Total", 495.0, TextAlign::Right),
            ],
            row_height: 28.0,
            row_baseline: 18.0,
            description_budget: 28,
            striped_rows: false,
            bill_to_label: "Bill To".to_string(),
            ship_to_label: "Ship To".to_string(),
            number_label: "Invoice #".to_string(),
            date_label: "Date".to_string(),
            subtotal_label: "Subtotal".to_string(),
            tax_label: "Tax".to_string(),
            total_label: "Total".to_string(),
        }
    }
}

impl Default for ReportTheme {
    fn default() -> Self {
        ReportTheme {
            center_name: "DRLOGY IMAGING CENTER".to_string(),
            services: "X-Ray | CT-Scan | MRI | USG".to_string(),
            address: "Healthcare Road, Mumbai".to_string(),
            letterhead_tops: [58.0, 82.0, 100.0],
            address_size: 10.0,
            band_height: 18.0,
            band_top: 108.0,
            patient_top: 170.0,
            patient_name_size: 16.0,
            id_size: 14.0,
            id_label_x: 290.0,
            id_value_x: 360.0,
            divider_top: 226.0,
            study_title_top: 272.0,
            study_title_size: 36.0,
            findings_top: 305.0,
            heading_gap: 22.0,
            finding_gap: 20.0,
            section_gap: 34.0,
            bullet_indent: 10.0,
            placeholder_gap: 16.0,
            placeholder_side: 170.0,
            placeholder_caption: "Ultrasound image placeholder".to_string(),
            footer_rule_y: 95.0,
            closing_y: 78.0,
            closing: [
                "Thanks for Reference".to_string(),
                "****End of Report****".to_string(),
            ],
            closing_offset: 250.0,
            signature_y: 50.0,
            technologist_label: "Radiologic Technologists".to_string(),
            signature_offsets: [240.0, 450.0],
        }
    }
}
