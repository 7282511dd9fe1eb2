use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::PdfError;
use crate::fonts::{encode_win_ansi, BuiltinFont, FontMetrics, TextStyle, WIN_ANSI_ENCODING};
use crate::graphics::{Color, PageSize, Rect, TextAlign};
use crate::objects::{ObjId, PdfObject};
use crate::writer::{deflate, escape_pdf_bytes, PdfWriter};

const CATALOG_OBJ: ObjId = ObjId(1, 0);
const PAGES_OBJ: ObjId = ObjId(2, 0);
const FIRST_FREE_OBJ_NUM: u32 = 3;

/// Control-point distance for approximating a quarter circle with one
/// cubic Bézier segment.
const KAPPA: f64 = 0.552_284_749_830_793_4;

/// In-memory PDF document.
///
/// Drawing calls append operators to the page opened last by
/// [`PdfDocument::begin_page`]. Nothing touches the filesystem until
/// [`PdfDocument::save_to_file`], and no timestamps or random IDs are
/// written, so the same calls always produce the same bytes.
#[derive(Debug, Default)]
pub struct PdfDocument {
    info: Vec<(String, String)>,
    pages: Vec<Page>,
    used_fonts: BTreeSet<BuiltinFont>,
    compress: bool,
}

#[derive(Debug)]
struct Page {
    size: PageSize,
    content: Vec<u8>,
}

impl PdfDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document info entry such as "Title" or "Creator".
    pub fn set_info(&mut self, key: &str, value: &str) -> &mut Self {
        self.info.push((key.to_string(), value.to_string()));
        self
    }

    /// Flate-compress page content streams on output.
    pub fn set_compression(&mut self, compress: bool) -> &mut Self {
        self.compress = compress;
        self
    }

    /// Start a new page; following drawing calls target it.
    pub fn begin_page(&mut self, size: PageSize) -> &mut Self {
        self.pages.push(Page {
            size,
            content: Vec::new(),
        });
        self
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Width of the current page, if one is open.
    pub fn page_width(&self) -> Option<f64> {
        self.pages.last().map(|page| page.size.width)
    }

    /// Height of the current page, if one is open.
    pub fn page_height(&self) -> Option<f64> {
        self.pages.last().map(|page| page.size.height)
    }

    fn push_ops(&mut self, ops: &[u8]) -> &mut Self {
        match self.pages.last_mut() {
            Some(page) => page.content.extend_from_slice(ops),
            None => log::warn!("drawing operator issued with no open page, ignored"),
        }
        self
    }

    fn push_str(&mut self, ops: &str) -> &mut Self {
        self.push_ops(ops.as_bytes())
    }

    pub fn save_state(&mut self) -> &mut Self {
        self.push_str("q\n")
    }

    pub fn restore_state(&mut self) -> &mut Self {
        self.push_str("Q\n")
    }

    pub fn set_fill_color(&mut self, color: Color) -> &mut Self {
        let ops = format!(
            "{} {} {} rg\n",
            format_coord(color.r),
            format_coord(color.g),
            format_coord(color.b)
        );
        self.push_str(&ops)
    }

    pub fn set_stroke_color(&mut self, color: Color) -> &mut Self {
        let ops = format!(
            "{} {} {} RG\n",
            format_coord(color.r),
            format_coord(color.g),
            format_coord(color.b)
        );
        self.push_str(&ops)
    }

    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        let ops = format!("{} w\n", format_coord(width));
        self.push_str(&ops)
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        let ops = format!("{} {} m\n", format_coord(x), format_coord(y));
        self.push_str(&ops)
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        let ops = format!("{} {} l\n", format_coord(x), format_coord(y));
        self.push_str(&ops)
    }

    fn curve_to(&mut self, points: [(f64, f64); 3]) -> &mut Self {
        let ops = format!(
            "{} {} {} {} {} {} c\n",
            format_coord(points[0].0),
            format_coord(points[0].1),
            format_coord(points[1].0),
            format_coord(points[1].1),
            format_coord(points[2].0),
            format_coord(points[2].1),
        );
        self.push_str(&ops)
    }

    pub fn close_path(&mut self) -> &mut Self {
        self.push_str("h\n")
    }

    pub fn stroke(&mut self) -> &mut Self {
        self.push_str("S\n")
    }

    pub fn fill(&mut self) -> &mut Self {
        self.push_str("f\n")
    }

    /// Rectangle path with its lower-left corner at (x, y).
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        let ops = format!(
            "{} {} {} {} re\n",
            format_coord(x),
            format_coord(y),
            format_coord(width),
            format_coord(height)
        );
        self.push_str(&ops)
    }

    /// Closed circle path built from four Bézier quarter arcs.
    pub fn circle(&mut self, cx: f64, cy: f64, radius: f64) -> &mut Self {
        let k = radius * KAPPA;
        self.move_to(cx + radius, cy)
            .curve_to([(cx + radius, cy + k), (cx + k, cy + radius), (cx, cy + radius)])
            .curve_to([(cx - k, cy + radius), (cx - radius, cy + k), (cx - radius, cy)])
            .curve_to([(cx - radius, cy - k), (cx - k, cy - radius), (cx, cy - radius)])
            .curve_to([(cx + k, cy - radius), (cx + radius, cy - k), (cx + radius, cy)])
            .close_path()
    }

    /// One text run with its baseline starting at (x, y).
    pub fn place_text_styled(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) -> &mut Self {
        self.used_fonts.insert(style.font);
        let mut ops = format!(
            "BT\n/{} {} Tf\n{} {} Td\n(",
            style.font.pdf_name(),
            format_coord(style.font_size),
            format_coord(x),
            format_coord(y),
        )
        .into_bytes();
        ops.extend_from_slice(&escape_pdf_bytes(&encode_win_ansi(text)));
        ops.extend_from_slice(b") Tj\nET\n");
        self.push_ops(&ops)
    }

    /// Text whose left edge, center or right edge (per `align`) lies on
    /// `x`, with its baseline at `y`.
    pub fn place_text_aligned(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        style: &TextStyle,
        align: TextAlign,
    ) -> &mut Self {
        let width = FontMetrics::measure_text(text, style);
        let start = match align {
            TextAlign::Left => x,
            TextAlign::Center => x - width / 2.0,
            TextAlign::Right => x - width,
        };
        self.place_text_styled(text, start, y, style)
    }

    /// One line of text aligned inside `rect`. The baseline sits one
    /// font size below the top edge.
    pub fn place_text_in_rect(
        &mut self,
        text: &str,
        rect: &Rect,
        style: &TextStyle,
        align: TextAlign,
    ) -> &mut Self {
        let anchor = match align {
            TextAlign::Left => rect.x,
            TextAlign::Center => rect.x + rect.width / 2.0,
            TextAlign::Right => rect.right(),
        };
        self.place_text_aligned(text, anchor, rect.y - style.font_size, style, align)
    }

    /// Serialize the whole document.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PdfError> {
        self.write_to(Vec::new())
    }

    /// Serialize into `path`, creating or truncating the file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PdfError> {
        let file = File::create(path.as_ref())?;
        let mut out = self.write_to(BufWriter::new(file))?;
        out.flush()?;
        log::debug!(
            "wrote {} page(s) to {}",
            self.pages.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Writes objects in the order: fonts, pages, info, page tree,
    /// catalog, then the xref table and trailer.
    pub fn write_to<W: Write>(&self, out: W) -> Result<W, PdfError> {
        if self.pages.is_empty() {
            return Err(PdfError::NoPages);
        }
        let mut writer = PdfWriter::new(out);
        writer.write_header()?;
        let mut next_obj_num = FIRST_FREE_OBJ_NUM;
        let mut alloc = || {
            let id = ObjId(next_obj_num, 0);
            next_obj_num += 1;
            id
        };

        let mut font_ids = BTreeMap::new();
        for font in &self.used_fonts {
            let id = alloc();
            let font_dict = PdfObject::dict(vec![
                ("Type", PdfObject::name("Font")),
                ("Subtype", PdfObject::name("Type1")),
                ("BaseFont", PdfObject::name(font.pdf_base_name())),
                ("Encoding", PdfObject::name(WIN_ANSI_ENCODING)),
            ]);
            writer.write_object(id, &font_dict)?;
            font_ids.insert(font.pdf_name(), id);
        }
        let font_resources: Vec<(&str, PdfObject)> = font_ids
            .iter()
            .map(|(&name, id)| (name, id.reference()))
            .collect();

        let mut page_ids = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let content_id = alloc();
            let content = if self.compress {
                PdfObject::stream(
                    vec![("Filter", PdfObject::name("FlateDecode"))],
                    deflate(&page.content)?,
                )
            } else {
                PdfObject::stream(vec![], page.content.clone())
            };
            writer.write_object(content_id, &content)?;

            let page_id = alloc();
            let page_dict = PdfObject::dict(vec![
                ("Type", PdfObject::name("Page")),
                ("Parent", PAGES_OBJ.reference()),
                (
                    "MediaBox",
                    PdfObject::media_box(page.size.width, page.size.height),
                ),
                ("Contents", content_id.reference()),
                (
                    "Resources",
                    PdfObject::dict(vec![(
                        "Font",
                        PdfObject::dict(font_resources.clone()),
                    )]),
                ),
            ]);
            writer.write_object(page_id, &page_dict)?;
            page_ids.push(page_id);
        }

        let info_id = if self.info.is_empty() {
            None
        } else {
            let id = alloc();
            let entries = self
                .info
                .iter()
                .map(|(k, v)| (k.as_str(), PdfObject::literal_string(v)))
                .collect();
            writer.write_object(id, &PdfObject::dict(entries))?;
            Some(id)
        };

        let pages = PdfObject::dict(vec![
            ("Type", PdfObject::name("Pages")),
            (
                "Kids",
                PdfObject::Array(page_ids.iter().map(|id| id.reference()).collect()),
            ),
            ("Count", PdfObject::Integer(page_ids.len() as i64)),
        ]);
        writer.write_object(PAGES_OBJ, &pages)?;

        let catalog = PdfObject::dict(vec![
            ("Type", PdfObject::name("Catalog")),
            ("Pages", PAGES_OBJ.reference()),
        ]);
        writer.write_object(CATALOG_OBJ, &catalog)?;

        writer.write_xref_and_trailer(CATALOG_OBJ, info_id)?;
        Ok(writer.into_inner())
    }
}

/// Format a number for content streams: integers without a decimal
/// point, everything else to at most four places.
pub(crate) fn format_coord(v: f64) -> String {
    if v == v.floor() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        let s = format!("{:.4}", v);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
