use pdf_core::{Color, Rect, TextAlign, TextStyle};

/// How a closed shape is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Fill(Color),
    Stroke { color: Color, width: f64 },
}

/// One positioned drawing instruction. Coordinates are page points
/// with the origin at the bottom-left corner.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Single text run. `x` is the left edge, center or right edge of
    /// the run depending on `align`; `y` is the baseline.
    Text {
        text: String,
        x: f64,
        y: f64,
        style: TextStyle,
        color: Color,
        align: TextAlign,
    },
    /// Single line of text aligned inside a box whose top edge is
    /// `rect.y`.
    TextInRect {
        text: String,
        rect: Rect,
        style: TextStyle,
        color: Color,
        align: TextAlign,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Color,
    },
    /// `rect.y` is the top edge.
    Rect { rect: Rect, paint: Paint },
    Circle {
        center: (f64, f64),
        radius: f64,
        paint: Paint,
    },
}

impl DrawOp {
    /// The text this op draws, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } | DrawOp::TextInRect { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn style(&self) -> Option<&TextStyle> {
        match self {
            DrawOp::Text { style, .. } | DrawOp::TextInRect { style, .. } => Some(style),
            _ => None,
        }
    }
}
