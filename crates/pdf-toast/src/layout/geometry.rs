//! Crop and overlap geometry
//!
//! Everything here is pure arithmetic on the shared page box. The numbers
//! are computed once per run and reused for every page.

use crate::constants::{
    BOTTOM_LABEL_OFFSET, LABEL_BLEED, LABEL_HEIGHT, LABEL_WIDTH, OVERLAP_MARKER_INSET,
    TOP_LABEL_OFFSET, WIDE_LABEL_PAGE_COUNT, WIDE_LABEL_WIDTH,
};
use crate::options::GeometryParams;
use crate::types::PageColor;

use super::{HalfKind, Rect};

/// Geometry shared by every page of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedGeometry {
    /// Bounding box of the source pages
    pub page_box: Rect,
    /// Distance trimmed from the top of the top half and the bottom of the
    /// bottom half. Never negative.
    pub vertical_crop_offset: f32,
    /// Half of the band shared by both halves. At least `min_overlap / 2`.
    pub half_overlap: f32,
    /// Amount trimmed from the left margin of both halves
    pub left_crop: f32,
    /// Width of the page-number label boxes
    pub label_width: f32,
    /// Colour of the page-number labels and the overlap marker
    pub color: PageColor,
}

/// Compute the geometry for pages of the given box.
///
/// If the aspect ratio would need a negative crop, the overlap grows by the
/// missing amount and the crop offset is pinned to zero instead.
pub fn derive_geometry(
    page_box: Rect,
    params: &GeometryParams,
    total_pages: usize,
) -> DerivedGeometry {
    let half_height = page_box.height / 2.0;
    let mut half_overlap = params.min_overlap / 2.0;
    let cropped_width = page_box.width - params.left_crop;

    let mut vertical_crop_offset = half_height + half_overlap - cropped_width / params.aspect_ratio;
    if vertical_crop_offset < 0.0 {
        half_overlap -= vertical_crop_offset;
        vertical_crop_offset = 0.0;
    }

    DerivedGeometry {
        page_box,
        vertical_crop_offset,
        half_overlap,
        left_crop: params.left_crop,
        label_width: label_width(total_pages),
        color: params.page_number_color,
    }
}

/// Label box width for a document of `total_pages` pages
pub fn label_width(total_pages: usize) -> f32 {
    if total_pages >= WIDE_LABEL_PAGE_COUNT {
        WIDE_LABEL_WIDTH
    } else {
        LABEL_WIDTH
    }
}

impl DerivedGeometry {
    /// Vertical middle of the page
    pub fn mid_y(&self) -> f32 {
        self.page_box.y + self.page_box.height / 2.0
    }

    /// The band `(bottom, top)` visible in both halves
    pub fn overlap_band(&self) -> (f32, f32) {
        (self.mid_y() - self.half_overlap, self.mid_y() + self.half_overlap)
    }

    /// Crop box for one half of a page
    pub fn crop_box(&self, half: HalfKind) -> Rect {
        let page = &self.page_box;
        let left = page.x + self.left_crop;
        let (overlap_bottom, overlap_top) = self.overlap_band();

        match half {
            HalfKind::Top => Rect::from_corners(
                left,
                overlap_bottom,
                page.right(),
                page.top() - self.vertical_crop_offset,
            ),
            HalfKind::Bottom => Rect::from_corners(
                left,
                page.y + self.vertical_crop_offset,
                page.right(),
                overlap_top,
            ),
        }
    }

    /// Page-number box near the top-right corner of the top half
    pub fn top_label_rect(&self) -> Rect {
        let top = self.page_box.top() - self.vertical_crop_offset - TOP_LABEL_OFFSET;
        let right = self.page_box.right() + LABEL_BLEED;
        Rect::from_corners(right - self.label_width, top - LABEL_HEIGHT, right, top)
    }

    /// Page-number box near the bottom-right corner of the bottom half
    pub fn bottom_label_rect(&self) -> Rect {
        let bottom = self.page_box.y + self.vertical_crop_offset + BOTTOM_LABEL_OFFSET;
        let right = self.page_box.right() + LABEL_BLEED;
        Rect::from_corners(right - self.label_width, bottom, right, bottom + LABEL_HEIGHT)
    }

    /// End points of the overlap marker line, bottom first
    pub fn overlap_marker(&self) -> ((f32, f32), (f32, f32)) {
        let x = self.page_box.right() - OVERLAP_MARKER_INSET;
        let (bottom, top) = self.overlap_band();
        ((x, bottom), (x, top))
    }

    /// True when either crop box has no visible area.
    ///
    /// This happens only for caller-supplied crops or overlaps that do not
    /// fit the page; it is reported, not corrected.
    pub fn is_degenerate(&self) -> bool {
        self.crop_box(HalfKind::Top).is_empty() || self.crop_box(HalfKind::Bottom).is_empty()
    }
}
