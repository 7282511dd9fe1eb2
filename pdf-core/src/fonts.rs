use crate::error::PdfError;

/// The standard Type1 fonts this crate can reference without
/// embedding. Every viewer ships them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    Courier,
    CourierBold,
}

impl BuiltinFont {
    /// Resource name used inside content streams.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "F1",
            BuiltinFont::HelveticaBold => "F2",
            BuiltinFont::HelveticaOblique => "F3",
            BuiltinFont::HelveticaBoldOblique => "F4",
            BuiltinFont::Courier => "F5",
            BuiltinFont::CourierBold => "F6",
        }
    }

    pub fn pdf_base_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
            BuiltinFont::HelveticaOblique => "Helvetica-Oblique",
            BuiltinFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            BuiltinFont::Courier => "Courier",
            BuiltinFont::CourierBold => "Courier-Bold",
        }
    }

    pub fn from_name(name: &str) -> Option<BuiltinFont> {
        match name {
            "Helvetica" => Some(BuiltinFont::Helvetica),
            "Helvetica-Bold" => Some(BuiltinFont::HelveticaBold),
            "Helvetica-Oblique" => Some(BuiltinFont::HelveticaOblique),
            "Helvetica-BoldOblique" => Some(BuiltinFont::HelveticaBoldOblique),
            "Courier" => Some(BuiltinFont::Courier),
            "Courier-Bold" => Some(BuiltinFont::CourierBold),
            _ => None,
        }
    }
}

/// Font plus size, the unit every text operation is styled with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: BuiltinFont,
    pub font_size: f64,
}

impl TextStyle {
    pub fn new(font: BuiltinFont, font_size: f64) -> Self {
        TextStyle { font, font_size }
    }
}

/// The only encoding written into font dictionaries.
pub const WIN_ANSI_ENCODING: &str = "WinAnsiEncoding";

/// Resolve a font by family name and encoding, the way a document
/// selects a font before drawing with it.
pub fn select_font(family: &str, encoding: Option<&str>) -> Result<BuiltinFont, PdfError> {
    if let Some(encoding) = encoding {
        if encoding != WIN_ANSI_ENCODING {
            return Err(PdfError::UnsupportedEncoding(encoding.to_string()));
        }
    }
    BuiltinFont::from_name(family).ok_or_else(|| PdfError::UnknownFont(family.to_string()))
}

// Adobe AFM advance widths for ASCII 32..=126, 1/1000 em.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const COURIER_WIDTH: u16 = 600;
const BULLET_WIDTH: u16 = 350;
const DEFAULT_WIDTH: u16 = 278;

/// Width tables for the builtin fonts.
pub struct FontMetrics;

impl FontMetrics {
    /// Advance width of one character in 1/1000 em.
    pub fn char_width(font: BuiltinFont, ch: char) -> u16 {
        if matches!(font, BuiltinFont::Courier | BuiltinFont::CourierBold) {
            return COURIER_WIDTH;
        }
        if ch == '\u{2022}' {
            return BULLET_WIDTH;
        }
        let code = ch as u32;
        if !(32..=126).contains(&code) {
            return DEFAULT_WIDTH;
        }
        let index = (code - 32) as usize;
        match font {
            BuiltinFont::HelveticaBold | BuiltinFont::HelveticaBoldOblique => {
                HELVETICA_BOLD_WIDTHS[index]
            }
            _ => HELVETICA_WIDTHS[index],
        }
    }

    /// Width of `text` in points.
    pub fn measure_text(text: &str, style: &TextStyle) -> f64 {
        let units: u32 = text
            .chars()
            .map(|ch| Self::char_width(style.font, ch) as u32)
            .sum();
        units as f64 * style.font_size / 1000.0
    }
}

/// Encode text as WinAnsiEncoding bytes. Control characters become
/// spaces; characters outside the code page become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '\u{0}'..='\u{1f}' | '\u{7f}' => b' ',
            ' '..='~' => ch as u8,
            '\u{a0}'..='\u{ff}' => ch as u32 as u8,
            '\u{20ac}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for font in [
            BuiltinFont::Helvetica,
            BuiltinFont::HelveticaBold,
            BuiltinFont::HelveticaOblique,
            BuiltinFont::HelveticaBoldOblique,
            BuiltinFont::Courier,
            BuiltinFont::CourierBold,
        ] {
            assert_eq!(BuiltinFont::from_name(font.pdf_base_name()), Some(font));
        }
    }

    #[test]
    fn select_font_checks_family_and_encoding() {
        assert_eq!(
            select_font("Helvetica-Bold", None).unwrap(),
            BuiltinFont::HelveticaBold
        );
        assert_eq!(
            select_font("Helvetica", Some("WinAnsiEncoding")).unwrap(),
            BuiltinFont::Helvetica
        );
        assert!(matches!(
            select_font("Comic Sans", None),
            Err(PdfError::UnknownFont(_))
        ));
        assert!(matches!(
            select_font("Helvetica", Some("KOI8-R")),
            Err(PdfError::UnsupportedEncoding(_))
        ));
    }

    #[test]
    fn measures_helvetica() {
        let style = TextStyle::new(BuiltinFont::Helvetica, 10.0);
        // H=722 e=556 l=222 l=222 o=556
        assert!((FontMetrics::measure_text("Hello", &style) - 22.78).abs() < 1e-9);
    }

    #[test]
    fn bold_digits_match_regular_digits() {
        let regular = TextStyle::new(BuiltinFont::Helvetica, 12.0);
        let bold = TextStyle::new(BuiltinFont::HelveticaBold, 12.0);
        assert_eq!(
            FontMetrics::measure_text("1930.00", &regular),
            FontMetrics::measure_text("1930.00", &bold)
        );
    }

    #[test]
    fn win_ansi_maps_bullet_and_latin1() {
        assert_eq!(encode_win_ansi("\u{2022} ok"), vec![0x95, b' ', b'o', b'k']);
        assert_eq!(encode_win_ansi("caf\u{e9}"), vec![b'c', b'a', b'f', 0xe9]);
        assert_eq!(encode_win_ansi("a\tb\n"), b"a b ".to_vec());
        assert_eq!(encode_win_ansi("\u{4e2d}"), b"?".to_vec());
    }
}
