use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }
}

/// The visible window onto the document, in document pixels.
///
/// `y` is the vertical scroll offset: document row `y` is drawn at the top
/// edge of the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            dpr: 1.0,
        }
    }

    pub fn scrolled_to(self, y: f64) -> Self {
        Self { y, ..self }
    }
}

/// Vertical extent of a rendered section within the document.
///
/// The interval is half-open: `top` belongs to the section, `bottom` belongs
/// to whatever follows it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionBounds {
    pub top: f64,
    pub bottom: f64,
}

impl SectionBounds {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Build bounds from an element's offset and height, the way browsers
    /// report `offsetTop` / `offsetHeight`.
    pub fn from_offset(top: f64, height: f64) -> Self {
        Self {
            top,
            bottom: top + height,
        }
    }

    #[inline]
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// What the typed-text decoration shows right now.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedText {
    /// Currently displayed prefix of the active phrase.
    pub text: String,
    pub cursor_visible: bool,
}
