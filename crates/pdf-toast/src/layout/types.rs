//! Layout data types for toasting
//!
//! These types carry the results of the geometry calculations between
//! the geometry engine and PDF rendering.

use crate::types::PageColor;

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rect from lower-left and upper-right corners, the way
    /// PDF rectangle arrays are written
    pub fn from_corners(llx: f32, lly: f32, urx: f32, ury: f32) -> Self {
        Self::new(llx, lly, urx - llx, ury - lly)
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Same rect moved by `(dx, dy)`
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// True when the rect has no visible area
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// True when `other` lies inside this rect (edges may touch)
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.top() <= self.top()
    }

    /// Corners as `[llx, lly, urx, ury]`
    pub fn corners(&self) -> [f32; 4] {
        [self.x, self.y, self.right(), self.top()]
    }
}

/// Which half of a source page an output page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalfKind {
    Top,
    Bottom,
}

/// One page of the final document.
///
/// Output pages never alias each other: each one is rendered into its own
/// page object that shares only the source page's content and resources.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputPage {
    /// Index of the page in the flattened document
    pub source_page: usize,
    /// Which half of the source page is visible
    pub half: HalfKind,
    /// Visible area of the source page
    pub crop_box: Rect,
}

/// An annotation placed on a source page before flattening
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// Boxed page-number label
    FreeTextLabel {
        rect: Rect,
        text: String,
        text_color: PageColor,
        border_color: PageColor,
        background_color: PageColor,
    },
    /// Straight line marking where the two halves overlap
    OverlapLine {
        rect: Rect,
        from: (f32, f32),
        to: (f32, f32),
        color: PageColor,
    },
}

impl Annotation {
    /// Bounding rectangle in page coordinates
    pub fn rect(&self) -> &Rect {
        match self {
            Annotation::FreeTextLabel { rect, .. } | Annotation::OverlapLine { rect, .. } => rect,
        }
    }

    /// Label text, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            Annotation::FreeTextLabel { text, .. } => Some(text),
            Annotation::OverlapLine { .. } => None,
        }
    }
}
