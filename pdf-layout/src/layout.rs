//! Top-to-bottom page composition.
//!
//! Every document kind is laid out by walking a vertical cursor down
//! the page and recording [`DrawOp`]s. Nothing here touches a canvas,
//! so the same records and theme always yield the same op list.

use std::collections::BTreeSet;

use pdf_core::{BuiltinFont, Color, PageSize, Rect, TextAlign, TextStyle};

use crate::format::{describe, format_money};
use crate::ops::{DrawOp, Paint};
use crate::records::{
    ClinicalReportRecords, DocumentKind, FindingStyle, InvoiceRecords, InvoiceTotals,
    LineItem, PlainTextRecords, RecordSet, TAX_RATE,
};
use crate::theme::{ColumnField, Theme};

const RULE_WIDTH: f64 = 0.8;
const BULLET: &str = "\u{2022}";

/// One laid-out page.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub page_size: PageSize,
    pub ops: Vec<DrawOp>,
    /// Lowest point reached by the flowing content.
    pub cursor: f64,
    /// Present for invoices.
    pub totals: Option<InvoiceTotals>,
    /// Content ran past the footer divider and overlaps the footer.
    pub overflow: bool,
}

impl Layout {
    /// Distinct fonts the text ops use, in a stable order.
    pub fn fonts(&self) -> Vec<BuiltinFont> {
        let fonts: BTreeSet<BuiltinFont> = self
            .ops
            .iter()
            .filter_map(DrawOp::style)
            .map(|style| style.font)
            .collect();
        fonts.into_iter().collect()
    }
}

/// Lay out `records` on one page styled by `theme`.
///
/// Callers validate first; layout itself never fails.
pub fn layout(kind: DocumentKind, records: RecordSet<'_>, theme: &Theme) -> Layout {
    let mut page = PageComposer::new(theme);
    let totals = match records {
        RecordSet::Invoice(invoice) => Some(compose_invoice(&mut page, invoice)),
        RecordSet::ClinicalReport(report) => {
            compose_report(&mut page, report);
            None
        }
        RecordSet::PlainText(text) => {
            compose_text(&mut page, text);
            None
        }
    };
    log::debug!(
        "laid out {} with {} draw ops, cursor at {:.2}",
        kind.name(),
        page.ops.len(),
        page.cursor
    );
    page.finish(totals)
}

/// Records draw ops against a running cursor that only moves down.
pub struct PageComposer<'t> {
    theme: &'t Theme,
    ops: Vec<DrawOp>,
    cursor: f64,
    overflow: bool,
}

impl<'t> PageComposer<'t> {
    /// Starts with the cursor at the top edge of the theme's page.
    pub fn new(theme: &'t Theme) -> Self {
        PageComposer {
            theme,
            ops: Vec::new(),
            cursor: theme.page_size.height,
            overflow: false,
        }
    }

    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    /// Move the cursor `dy` points down the page.
    pub fn advance(&mut self, dy: f64) {
        debug_assert!(dy >= 0.0, "cursor may only move down");
        self.cursor -= dy.max(0.0);
    }

    /// Move the cursor down to `y`. A `y` above the cursor is ignored.
    pub fn descend_to(&mut self, y: f64) {
        self.cursor = self.cursor.min(y);
    }

    /// Mark the layout as overflowing if the cursor is below `limit`.
    /// Returns whether it is.
    pub fn reserve_above(&mut self, limit: f64) -> bool {
        let below = self.cursor < limit;
        self.overflow |= below;
        below
    }

    /// Left-aligned text with its baseline at `y`.
    pub fn text(
        &mut self,
        text: impl Into<String>,
        x: f64,
        y: f64,
        style: TextStyle,
        color: Color,
    ) {
        self.text_aligned(text, x, y, style, color, TextAlign::Left);
    }

    /// Text whose left edge, center or right edge sits at `x`.
    pub fn text_aligned(
        &mut self,
        text: impl Into<String>,
        x: f64,
        y: f64,
        style: TextStyle,
        color: Color,
        align: TextAlign,
    ) {
        self.ops.push(DrawOp::Text {
            text: text.into(),
            x,
            y,
            style,
            color,
            align,
        });
    }

    /// One line of text aligned inside `rect`, baseline one font size
    /// below its top edge.
    pub fn text_in_rect(
        &mut self,
        text: impl Into<String>,
        rect: Rect,
        style: TextStyle,
        color: Color,
        align: TextAlign,
    ) {
        self.ops.push(DrawOp::TextInRect {
            text: text.into(),
            rect,
            style,
            color,
            align,
        });
    }

    /// Straight stroke from `from` to `to`.
    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            width,
            color,
        });
    }

    /// Margin-to-margin rule at height `y`.
    pub fn rule(&mut self, y: f64, color: Color) {
        let (left, right) = (self.theme.margin, self.theme.right_edge());
        self.line((left, y), (right, y), RULE_WIDTH, color);
    }

    /// Rectangle with its top edge at `rect.y`.
    pub fn rect(&mut self, rect: Rect, paint: Paint) {
        self.ops.push(DrawOp::Rect { rect, paint });
    }

    pub fn circle(&mut self, center: (f64, f64), radius: f64, paint: Paint) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            paint,
        });
    }

    pub fn finish(self, totals: Option<InvoiceTotals>) -> Layout {
        Layout {
            page_size: self.theme.page_size,
            ops: self.ops,
            cursor: self.cursor,
            totals,
            overflow: self.overflow,
        }
    }
}

fn compose_invoice(page: &mut PageComposer<'_>, invoice: &InvoiceRecords) -> InvoiceTotals {
    let totals = invoice.totals();
    invoice_header(page, invoice);
    invoice_metadata(page, invoice);
    invoice_table(page, &invoice.items);
    invoice_totals(page, &totals);
    invoice_footer(page);
    totals
}

/// Title, optional logo placeholder and the provider block.
fn invoice_header(page: &mut PageComposer<'_>, invoice: &InvoiceRecords) {
    let theme = page.theme;
    let palette = &theme.palette;
    let left = theme.margin;
    let title_y = theme.page_size.height - theme.invoice.title_top;

    page.descend_to(title_y);
    let title = theme.title.as_str();
    page.text(title, left, title_y, theme.title_style, palette.accent);

    if let Some(branding) = &theme.branding {
        let center = (
            theme.right_edge() - branding.radius,
            title_y + theme.title_style.font_size * 0.35,
        );
        page.circle(center, branding.radius, Paint::Fill(palette.accent));
        let label_style = bold(theme.small_style.font_size);
        page.text_aligned(
            branding.label.as_str(),
            center.0,
            center.1 - label_style.font_size * 0.35,
            label_style,
            Color::WHITE,
            TextAlign::Center,
        );
    }

    page.advance(theme.title_style.font_size);
    for (i, line) in invoice.provider.lines().into_iter().enumerate() {
        let style = if i == 0 {
            theme.heading_style
        } else {
            theme.body_style
        };
        let y = page.cursor();
        page.text(line, left, y, style, palette.text);
        page.advance(theme.invoice.line_height);
    }
    page.advance(theme.invoice.section_gap);
}

struct MetaColumn<'a> {
    x: f64,
    heading: Option<&'a str>,
    rows: Vec<(Option<&'a str>, &'a str)>,
}

/// Bill To, Ship To and invoice details side by side on one row.
fn invoice_metadata(page: &mut PageComposer<'_>, invoice: &InvoiceRecords) {
    let theme = page.theme;
    let style = &theme.invoice;
    let left = theme.margin;

    let client_rows: Vec<(Option<&str>, &str)> = invoice
        .client
        .lines()
        .into_iter()
        .map(|line| (None, line))
        .collect();
    let mut columns = vec![MetaColumn {
        x: left + style.column_offsets[0],
        heading: Some(style.bill_to_label.as_str()),
        rows: client_rows.clone(),
    }];
    if style.ship_to {
        columns.push(MetaColumn {
            x: left + style.column_offsets[1],
            heading: Some(style.ship_to_label.as_str()),
            rows: client_rows,
        });
    }
    let details: Vec<(Option<&str>, &str)> = [
        (style.number_label.as_str(), invoice.number.as_deref()),
        (style.date_label.as_str(), invoice.date.as_deref()),
    ]
    .into_iter()
    .filter_map(|(label, value)| {
        value
            .filter(|v| !v.is_empty())
            .map(|v| (Some(label), v))
    })
    .collect();
    if !details.is_empty() {
        columns.push(MetaColumn {
            x: left + style.column_offsets[2],
            heading: None,
            rows: details,
        });
    }

    let top = page.cursor();
    let mut lowest = top;
    for column in columns {
        let mut y = top;
        if let Some(heading) = column.heading {
            page.text(heading, column.x, y, theme.heading_style, theme.palette.accent);
            y -= style.line_height;
        }
        for (label, value) in column.rows {
            match label {
                Some(label) => {
                    let muted = theme.palette.muted;
                    page.text(label, column.x, y, theme.heading_style, muted);
                    page.text(
                        value,
                        column.x + style.meta_value_offset,
                        y,
                        theme.body_style,
                        theme.palette.text,
                    );
                }
                None => page.text(value, column.x, y, theme.body_style, theme.palette.text),
            }
            y -= style.line_height;
        }
        lowest = lowest.min(y);
    }
    page.descend_to(lowest);
    page.advance(style.section_gap);
}

/// Header row between two rules, then one fixed-height row per item.
fn invoice_table(page: &mut PageComposer<'_>, items: &[LineItem]) {
    let theme = page.theme;
    let style = &theme.invoice;
    let palette = &theme.palette;
    let left = theme.margin;

    let top = page.cursor();
    page.rule(top, palette.rule);
    for column in &style.columns {
        page.text_aligned(
            column.label.as_str(),
            left + column.x,
            top - style.row_baseline,
            theme.heading_style,
            palette.accent,
            column.align,
        );
    }
    page.advance(style.row_height);
    let header_bottom = page.cursor();
    page.rule(header_bottom, palette.rule);

    for (i, item) in items.iter().enumerate() {
        let row_top = page.cursor();
        if style.striped_rows && i % 2 == 0 {
            page.rect(
                Rect {
                    x: left,
                    y: row_top,
                    width: theme.usable_width(),
                    height: style.row_height,
                },
                Paint::Fill(palette.stripe),
            );
        }
        for column in &style.columns {
            let cell = match column.field {
                ColumnField::Quantity => item.quantity.to_string(),
                ColumnField::Description => {
                    describe(&item.description, style.description_budget)
                }
                ColumnField::UnitPrice => format_money(item.unit_price),
                ColumnField::Amount => format_money(item.line_total()),
            };
            page.text_aligned(
                cell,
                left + column.x,
                row_top - style.row_baseline,
                theme.body_style,
                palette.text,
                column.align,
            );
        }
        page.advance(style.row_height);
    }
    let bottom = page.cursor();
    page.rule(bottom, palette.rule);
}

/// x of the column showing `field`, falling back to `default`.
fn column_anchor(theme: &Theme, field: ColumnField, default: f64) -> f64 {
    let offset = theme
        .invoice
        .columns
        .iter()
        .find(|column| column.field == field)
        .map_or(default, |column| column.x);
    theme.margin + offset
}

/// Subtotal, tax and bold total, right-aligned under the price columns.
fn invoice_totals(page: &mut PageComposer<'_>, totals: &InvoiceTotals) {
    let theme = page.theme;
    let style = &theme.invoice;
    let palette = &theme.palette;
    let label_x =
        column_anchor(theme, ColumnField::UnitPrice, theme.usable_width() - 110.0);
    let value_x = column_anchor(theme, ColumnField::Amount, theme.usable_width());

    let tax_label = format!("{} ({:.0}%)", style.tax_label, TAX_RATE * 100.0);
    let rows = [
        (style.subtotal_label.as_str(), totals.subtotal),
        (tax_label.as_str(), totals.tax),
    ];
    for (label, amount) in rows {
        page.advance(style.line_height);
        let y = page.cursor();
        page.text_aligned(
            label,
            label_x,
            y,
            theme.body_style,
            palette.muted,
            TextAlign::Right,
        );
        page.text_aligned(
            format_money(amount),
            value_x,
            y,
            theme.body_style,
            palette.text,
            TextAlign::Right,
        );
    }

    let rule_y = page.cursor() - 5.0;
    page.line((label_x - 90.0, rule_y), (value_x, rule_y), 1.0, palette.accent);
    page.advance(style.line_height);
    let y = page.cursor();
    page.text_aligned(
        style.total_label.as_str(),
        label_x,
        y,
        theme.heading_style,
        palette.text,
        TextAlign::Right,
    );
    page.text_aligned(
        format_money(totals.total),
        value_x,
        y,
        theme.heading_style,
        palette.accent,
        TextAlign::Right,
    );
}

/// Divider, terms and optional signature line at fixed heights.
fn invoice_footer(page: &mut PageComposer<'_>) {
    let theme = page.theme;
    let Some(footer) = &theme.footer else {
        return;
    };
    if page.reserve_above(footer.rule_y) {
        log::warn!(
            "invoice body reaches {:.1}pt, below the footer divider at {:.1}pt",
            page.cursor(),
            footer.rule_y
        );
    }
    let left = theme.margin;
    let right = theme.right_edge();
    let line_height = theme.small_style.font_size + 3.0;

    page.rule(footer.rule_y, theme.palette.accent);
    for (i, term) in footer.terms.iter().enumerate() {
        page.text(
            term.as_str(),
            left,
            footer.terms_y - i as f64 * line_height,
            theme.small_style,
            theme.palette.muted,
        );
    }
    if let Some(caption) = &footer.signature {
        let width = 160.0;
        page.line(
            (right - width, footer.signature_y),
            (right, footer.signature_y),
            0.75,
            theme.palette.text,
        );
        page.text_aligned(
            caption.as_str(),
            right - width / 2.0,
            footer.signature_y - line_height,
            theme.small_style,
            theme.palette.muted,
            TextAlign::Center,
        );
    }
}

fn compose_report(page: &mut PageComposer<'_>, report: &ClinicalReportRecords) {
    report_letterhead(page);
    report_patient_strip(page, report);
    report_findings(page, report);
    report_placeholder(page);
    report_footer(page, report);
}

fn bold(size: f64) -> TextStyle {
    TextStyle::new(BuiltinFont::HelveticaBold, size)
}

fn regular(size: f64) -> TextStyle {
    TextStyle::new(BuiltinFont::Helvetica, size)
}

/// Center name, services, address and the colored band below them.
fn report_letterhead(page: &mut PageComposer<'_>) {
    let theme = page.theme;
    let r = &theme.report;
    let height = theme.page_size.height;
    let left = theme.margin;
    let [name_top, services_top, address_top] = r.letterhead_tops;

    page.text(
        r.center_name.as_str(),
        left,
        height - name_top,
        theme.title_style,
        theme.palette.accent,
    );
    page.text(
        r.services.as_str(),
        left,
        height - services_top,
        theme.heading_style,
        theme.palette.text,
    );
    page.text(
        r.address.as_str(),
        left,
        height - address_top,
        regular(r.address_size),
        theme.palette.text,
    );
    page.rect(
        Rect {
            x: 0.0,
            y: height - r.band_top,
            width: theme.page_size.width,
            height: r.band_height,
        },
        Paint::Fill(theme.palette.accent),
    );
}

fn report_patient_strip(page: &mut PageComposer<'_>, report: &ClinicalReportRecords) {
    let theme = page.theme;
    let r = &theme.report;
    let height = theme.page_size.height;
    let left = theme.margin;
    let ink = theme.palette.text;
    let top = height - r.patient_top;
    let patient = &report.patient;

    let body = theme.body_style;
    page.text(patient.full_name.as_str(), left, top, bold(r.patient_name_size), ink);
    page.text(format!("Age: {} Years", patient.age), left, top - 22.0, body, ink);
    page.text(format!("Sex: {}", patient.sex), left, top - 40.0, body, ink);

    let ids = [
        ("PID", patient.patient_id.as_str(), top),
        ("Ref. By", report.doctor.name.as_str(), top - 24.0),
    ];
    for (label, value, y) in ids {
        page.text(label, left + r.id_label_x, y, bold(r.id_size), ink);
        let value = format!(": {}", value);
        page.text(value, left + r.id_value_x, y, regular(r.id_size), ink);
    }

    page.rule(height - r.divider_top, theme.palette.rule);
    page.text_aligned(
        report.study_title.as_str(),
        theme.page_size.width / 2.0,
        height - r.study_title_top,
        bold(r.study_title_size),
        ink,
        TextAlign::Center,
    );
}

fn report_findings(page: &mut PageComposer<'_>, report: &ClinicalReportRecords) {
    let theme = page.theme;
    let r = &theme.report;
    let left = theme.margin;
    let ink = theme.palette.text;

    page.descend_to(theme.page_size.height - r.findings_top);
    for (i, section) in report.sections.iter().enumerate() {
        if i > 0 {
            page.advance(r.section_gap);
        }
        let y = page.cursor();
        page.text(section.heading.as_str(), left, y, theme.heading_style, ink);
        for (j, finding) in section.findings.iter().enumerate() {
            page.advance(if j == 0 { r.heading_gap } else { r.finding_gap });
            let y = page.cursor();
            match finding.style {
                FindingStyle::Bullet => page.text(
                    format!("{} {}", BULLET, finding.text),
                    left + r.bullet_indent,
                    y,
                    theme.body_style,
                    ink,
                ),
                FindingStyle::Emphasis => {
                    page.text(finding.text.as_str(), left, y, theme.heading_style, ink)
                }
                FindingStyle::Plain => {
                    page.text(finding.text.as_str(), left, y, theme.body_style, ink)
                }
            }
        }
    }
}

/// Empty square centered below the findings, with a caption.
fn report_placeholder(page: &mut PageComposer<'_>) {
    let theme = page.theme;
    let r = &theme.report;
    let side = r.placeholder_side;

    page.advance(r.placeholder_gap);
    let frame = Rect {
        x: (theme.page_size.width - side) / 2.0,
        y: page.cursor(),
        width: side,
        height: side,
    };
    page.rect(
        frame,
        Paint::Stroke {
            color: Color::gray(0.2),
            width: 1.2,
        },
    );
    let caption_size = theme.small_style.font_size;
    page.text_in_rect(
        r.placeholder_caption.as_str(),
        Rect {
            x: frame.x,
            y: frame.y - side / 2.0 + caption_size / 2.0,
            width: side,
            height: caption_size,
        },
        theme.small_style,
        theme.palette.muted,
        TextAlign::Center,
    );
    page.advance(side);
}

/// Closing texts and the three signature names at fixed heights.
fn report_footer(page: &mut PageComposer<'_>, report: &ClinicalReportRecords) {
    let theme = page.theme;
    let r = &theme.report;
    let left = theme.margin;
    let ink = theme.palette.text;
    let signature_style = bold(theme.small_style.font_size);

    if page.reserve_above(r.footer_rule_y) {
        log::warn!(
            "report body reaches {:.1}pt, below the footer divider at {:.1}pt",
            page.cursor(),
            r.footer_rule_y
        );
    }
    page.rule(r.footer_rule_y, theme.palette.rule);
    page.text(r.closing[0].as_str(), left, r.closing_y, theme.small_style, ink);
    page.text(
        r.closing[1].as_str(),
        left + r.closing_offset,
        r.closing_y,
        theme.small_style,
        ink,
    );

    let signatures = [
        (r.technologist_label.as_str(), left),
        (report.doctor.name.as_str(), left + r.signature_offsets[0]),
        (report.radiologist.as_str(), left + r.signature_offsets[1]),
    ];
    for (name, x) in signatures {
        page.text(name, x, r.signature_y, signature_style, ink);
    }
}

fn compose_text(page: &mut PageComposer<'_>, text: &PlainTextRecords) {
    let theme = page.theme;
    page.descend_to(theme.text.y);
    page.text(
        text.text.as_str(),
        theme.text.x,
        theme.text.y,
        theme.body_style,
        Color::BLACK,
    );
}
