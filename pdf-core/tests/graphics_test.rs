use pdf_core::{BuiltinFont, Color, PageSize, PdfDocument, Rect, TextAlign, TextStyle};

fn render(draw: impl FnOnce(&mut PdfDocument)) -> String {
    let mut doc = PdfDocument::new();
    doc.begin_page(PageSize::A4);
    draw(&mut doc);
    String::from_utf8_lossy(&doc.to_bytes().unwrap()).into_owned()
}

#[test]
fn stroke_line_produces_operators() {
    let output = render(|doc| {
        doc.set_line_width(0.8)
            .set_stroke_color(Color::rgb(0.75, 0.75, 0.78))
            .move_to(40.0, 95.0)
            .line_to(555.276, 95.0)
            .stroke();
    });
    assert!(output.contains("0.8 w\n"));
    assert!(output.contains("0.75 0.75 0.78 RG\n"));
    assert!(output.contains("40 95 m\n"));
    assert!(output.contains("555.276 95 l\n"));
    assert!(output.contains("S\n"));
}

#[test]
fn filled_band_uses_rect_and_fill() {
    let output = render(|doc| {
        doc.set_fill_color(Color::rgb(0.06, 0.23, 0.56))
            .rect(0.0, 715.89, 595.276, 18.0)
            .fill();
    });
    assert!(output.contains("0.06 0.23 0.56 rg\n"));
    assert!(output.contains("0 715.89 595.276 18 re\nf\n"));
}

#[test]
fn circle_is_four_curves() {
    let output = render(|doc| {
        doc.circle(100.0, 100.0, 10.0).fill();
    });
    assert!(output.contains("110 100 m\n"));
    assert_eq!(output.matches(" c\n").count(), 4);
    assert!(output.contains("110 105.5228 105.5228 110 100 110 c\n"));
    assert!(output.contains("h\nf\n"));
}

#[test]
fn save_restore_wraps_state() {
    let output = render(|doc| {
        doc.save_state().set_line_width(5.0).restore_state();
    });
    assert!(output.contains("q\n5 w\nQ\n"));
}

#[test]
fn text_run_selects_font_and_position() {
    let output = render(|doc| {
        doc.place_text_styled(
            "INVOICE",
            50.0,
            780.0,
            &TextStyle::new(BuiltinFont::HelveticaBold, 20.0),
        );
    });
    assert!(output.contains("BT\n/F2 20 Tf\n50 780 Td\n(INVOICE) Tj\nET\n"));
    assert!(output.contains("/BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding"));
}

#[test]
fn text_in_rect_honours_alignment() {
    let style = TextStyle::new(BuiltinFont::Helvetica, 10.0);
    let rect = Rect {
        x: 100.0,
        y: 500.0,
        width: 100.0,
        height: 12.0,
    };
    // "Hello" is 22.78pt wide at 10pt.
    let output = render(|doc| {
        doc.place_text_in_rect("Hello", &rect, &style, TextAlign::Left)
            .place_text_in_rect("Hello", &rect, &style, TextAlign::Center)
            .place_text_in_rect("Hello", &rect, &style, TextAlign::Right);
    });
    assert!(output.contains("100 490 Td"));
    assert!(output.contains("138.61 490 Td"));
    assert!(output.contains("177.22 490 Td"));
}

#[test]
fn bullet_text_is_win_ansi_encoded() {
    let mut doc = PdfDocument::new();
    doc.begin_page(PageSize::A4);
    doc.place_text_styled(
        "\u{2022} No calculus",
        50.0,
        400.0,
        &TextStyle::new(BuiltinFont::Helvetica, 12.0),
    );
    let bytes = doc.to_bytes().unwrap();
    let needle = b"(\x95 No calculus) Tj";
    assert!(bytes.windows(needle.len()).any(|w| w == needle));
}

#[test]
fn parentheses_in_text_are_escaped() {
    let output = render(|doc| {
        doc.place_text_styled(
            "(no description)",
            50.0,
            400.0,
            &TextStyle::new(BuiltinFont::Helvetica, 11.0),
        );
    });
    assert!(output.contains("(\\(no description\\)) Tj"));
}
