//! Drawing backend seam.
//!
//! The renderers only talk to a [`Canvas`]; [`PdfCanvas`] is the
//! implementation backed by `pdf-core`.

use std::path::Path;

use pdf_core::{select_font, BuiltinFont, PageSize, PdfDocument};

use crate::error::CanvasError;
use crate::ops::{DrawOp, Paint};

/// A single-document drawing surface.
pub trait Canvas {
    /// Append a page; later draws land on it.
    fn add_page(&mut self, size: PageSize) -> Result<(), CanvasError>;

    /// Width of the current page, if there is one.
    fn page_width(&self) -> Option<f64>;

    fn page_height(&self) -> Option<f64>;

    /// Resolve a builtin font by family name and encoding.
    fn select_font(&self, family: &str, encoding: Option<&str>)
        -> Result<BuiltinFont, CanvasError>;

    fn set_title(&mut self, _title: &str) {}

    /// Replay one op. Color and line state do not outlive the op.
    fn draw(&mut self, op: &DrawOp);

    fn save_to_file(&mut self, path: &Path) -> Result<(), CanvasError>;
}

/// Creates one canvas per render.
pub trait CanvasProvider {
    type Canvas: Canvas;

    fn create(&self) -> Result<Self::Canvas, CanvasError>;
}

/// Canvas writing a PDF through [`PdfDocument`].
#[derive(Debug)]
pub struct PdfCanvas {
    doc: PdfDocument,
}

impl PdfCanvas {
    pub fn new(compress: bool) -> Self {
        let mut doc = PdfDocument::new();
        doc.set_compression(compress);
        PdfCanvas { doc }
    }
}

impl Canvas for PdfCanvas {
    fn add_page(&mut self, size: PageSize) -> Result<(), CanvasError> {
        if !(size.width > 0.0 && size.height > 0.0) {
            return Err(CanvasError::Unavailable(format!(
                "invalid page size {}x{}",
                size.width, size.height
            )));
        }
        self.doc.begin_page(size);
        log::debug!("added {}x{} page", size.width, size.height);
        Ok(())
    }

    fn page_width(&self) -> Option<f64> {
        self.doc.page_width()
    }

    fn page_height(&self) -> Option<f64> {
        self.doc.page_height()
    }

    fn select_font(
        &self,
        family: &str,
        encoding: Option<&str>,
    ) -> Result<BuiltinFont, CanvasError> {
        Ok(select_font(family, encoding)?)
    }

    fn set_title(&mut self, title: &str) {
        if !title.is_empty() {
            self.doc.set_info("Title", title);
        }
    }

    fn draw(&mut self, op: &DrawOp) {
        let doc = &mut self.doc;
        doc.save_state();
        match op {
            DrawOp::Text {
                text,
                x,
                y,
                style,
                color,
                align,
            } => {
                doc.set_fill_color(*color)
                    .place_text_aligned(text, *x, *y, style, *align);
            }
            DrawOp::TextInRect {
                text,
                rect,
                style,
                color,
                align,
            } => {
                doc.set_fill_color(*color)
                    .place_text_in_rect(text, rect, style, *align);
            }
            DrawOp::Line {
                from,
                to,
                width,
                color,
            } => {
                doc.set_stroke_color(*color)
                    .set_line_width(*width)
                    .move_to(from.0, from.1)
                    .line_to(to.0, to.1)
                    .stroke();
            }
            DrawOp::Rect { rect, paint } => {
                apply_paint(doc, paint);
                doc.rect(rect.x, rect.bottom(), rect.width, rect.height);
                finish_path(doc, paint);
            }
            DrawOp::Circle {
                center,
                radius,
                paint,
            } => {
                apply_paint(doc, paint);
                doc.circle(center.0, center.1, *radius);
                finish_path(doc, paint);
            }
        }
        doc.restore_state();
    }

    fn save_to_file(&mut self, path: &Path) -> Result<(), CanvasError> {
        self.doc.save_to_file(path)?;
        Ok(())
    }
}

impl Drop for PdfCanvas {
    fn drop(&mut self) {
        log::debug!("released PDF canvas with {} page(s)", self.doc.page_count());
    }
}

fn apply_paint(doc: &mut PdfDocument, paint: &Paint) {
    match paint {
        Paint::Fill(color) => {
            doc.set_fill_color(*color);
        }
        Paint::Stroke { color, width } => {
            doc.set_stroke_color(*color).set_line_width(*width);
        }
    }
}

fn finish_path(doc: &mut PdfDocument, paint: &Paint) {
    match paint {
        Paint::Fill(_) => doc.fill(),
        Paint::Stroke { .. } => doc.stroke(),
    };
}

/// Hands out [`PdfCanvas`]es.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfCanvasProvider {
    /// Flate-compress page content.
    pub compress: bool,
}

impl CanvasProvider for PdfCanvasProvider {
    type Canvas = PdfCanvas;

    fn create(&self) -> Result<PdfCanvas, CanvasError> {
        Ok(PdfCanvas::new(self.compress))
    }
}
