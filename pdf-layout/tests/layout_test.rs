use pdf_core::{BuiltinFont, Color, TextAlign, TextStyle};
use pdf_layout::{
    layout, ClinicalReportRecords, DocumentKind, DrawOp, InvoiceRecords, LineItem, Party, Patient,
    PlainTextRecords, RecordSet, ReferringDoctor, Theme,
};
use similar_asserts::assert_eq;

fn report() -> ClinicalReportRecords {
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

fn invoice(items: usize) -> InvoiceRecords {
    InvoiceRecords::new(
        Party::new("Example Provider Ltd."),
        Party::new("Client Co."),
        (0..items)
            .map(|i| LineItem::new(format!("Item {}", i + 1), 1, 10.0))
            .collect(),
    )
}

fn text(text: &str, x: f64, y: f64, style: TextStyle) -> DrawOp {
    DrawOp::Text {
        text: text.to_string(),
        x,
        y,
        style,
        color: Color::gray(0.1),
        align: TextAlign::Left,
    }
}

#[test]
fn plain_text_page() {
    let records = PlainTextRecords {
        text: "Hello (world)".to_string(),
    };
    let laid = layout(
        DocumentKind::PlainText,
        RecordSet::PlainText(&records),
        &Theme::plain_text(),
    );
    assert_eq!(
        laid.ops,
        vec![DrawOp::Text {
            text: "Hello (world)".to_string(),
            x: 50.0,
            y: 750.0,
            style: TextStyle::new(BuiltinFont::Helvetica, 12.0),
            color: Color::BLACK,
            align: TextAlign::Left,
        }]
    );
}

#[test]
fn clinical_report_footer() {
    let theme = Theme::clinical_report();
    let laid = layout(
        DocumentKind::ClinicalReport,
        RecordSet::ClinicalReport(&report()),
        &theme,
    );
    let small = TextStyle::new(BuiltinFont::Helvetica, 11.0);
    let signature = TextStyle::new(BuiltinFont::HelveticaBold, 11.0);
    let footer = &laid.ops[laid.ops.len() - 6..];
    assert_eq!(
        footer,
        &[
            DrawOp::Line {
                from: (40.0, 95.0),
                to: (theme.right_edge(), 95.0),
                width: 0.8,
                color: Color::rgb(0.75, 0.75, 0.78),
            },
            text("Thanks for Reference", 40.0, 78.0, small),
            text("****End of Report****", 290.0, 78.0, small),
            text("Radiologic Technologists", 40.0, 50.0, signature),
            text("Dr. Hiren Shah", 280.0, 50.0, signature),
            text("Dr. Vimal Shah", 490.0, 50.0, signature),
        ][..]
    );
}

#[test]
fn table_rows_only_move_down() {
    let theme = Theme::formal_invoice();
    let records = invoice(8);
    let laid = layout(
        DocumentKind::FormalInvoice,
        RecordSet::Invoice(&records),
        &theme,
    );
    let row_baselines: Vec<f64> = laid
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { text, y, .. } if text.starts_with("Item ") => Some(*y),
            _ => None,
        })
        .collect();
    assert_eq!(row_baselines.len(), 8);
    for pair in row_baselines.windows(2) {
        assert!((pair[0] - pair[1] - 28.0).abs() < 1e-9);
    }
    assert!(laid.cursor > theme.footer.as_ref().unwrap().rule_y);
}

#[test]
fn layout_is_deterministic() {
    let records = invoice(3);
    let theme = Theme::invoice();
    let first = layout(DocumentKind::Invoice, RecordSet::Invoice(&records), &theme);
    let second = layout(DocumentKind::Invoice, RecordSet::Invoice(&records), &theme);
    assert_eq!(first, second);
}

#[test]
fn tweaked_theme_moves_the_text() {
    let mut theme = Theme::plain_text();
    theme.text.y = 700.0;
    let records = PlainTextRecords {
        text: "moved".to_string(),
    };
    let laid = layout(DocumentKind::PlainText, RecordSet::PlainText(&records), &theme);
    match &laid.ops[0] {
        DrawOp::Text { y, .. } => assert_eq!(*y, 700.0),
        other => panic!("unexpected op {:?}", other),
    }
}
