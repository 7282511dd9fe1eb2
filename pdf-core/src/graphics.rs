/// RGB color, each component from 0.0 (none) to 1.0 (full).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color { r, g, b }
    }

    pub const fn gray(level: f64) -> Self {
        Color {
            r: level,
            g: level,
            b: level,
        }
    }
}

/// Axis-aligned box. `y` is the TOP edge; the box extends downwards
/// by `height`, matching how layout code walks the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn bottom(&self) -> f64 {
        self.y - self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Horizontal placement of text inside a [`Rect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width: 595.276,
        height: 841.89,
    };
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };

    /// The same sheet turned to `orientation`.
    pub fn oriented(self, orientation: Orientation) -> PageSize {
        let (short, long) = if self.width <= self.height {
            (self.width, self.height)
        } else {
            (self.height, self.width)
        };
        match orientation {
            Orientation::Portrait => PageSize {
                width: short,
                height: long,
            },
            Orientation::Landscape => PageSize {
                width: long,
                height: short,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_sets_all_channels() {
        let c = Color::gray(0.5);
        assert_eq!((c.r, c.g, c.b), (0.5, 0.5, 0.5));
    }

    #[test]
    fn landscape_swaps_dimensions() {
        let size = PageSize::A4.oriented(Orientation::Landscape);
        assert_eq!(size.width, 841.89);
        assert_eq!(size.height, 595.276);
        assert_eq!(size.oriented(Orientation::Portrait), PageSize::A4);
    }

    #[test]
    fn rect_edges() {
        let r = Rect {
            x: 210.0,
            y: 300.0,
            width: 170.0,
            height: 170.0,
        };
        assert_eq!(r.bottom(), 130.0);
        assert_eq!(r.right(), 380.0);
    }
}
