//! Minimal single-purpose PDF writer: pages, builtin Type1 fonts,
//! text, paths, rectangles and circles, written deterministically.

pub mod document;
pub mod error;
pub mod fonts;
pub mod graphics;
pub mod objects;
pub mod writer;

pub use document::PdfDocument;
pub use error::PdfError;
pub use fonts::{select_font, BuiltinFont, FontMetrics, TextStyle};
pub use graphics::{Color, Orientation, PageSize, Rect, TextAlign};
