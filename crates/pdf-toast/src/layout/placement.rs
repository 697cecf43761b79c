//! Annotation and output page placement
//!
//! Turns the shared geometry into the per-page annotations added before
//! flattening and the output pages produced after it.

use crate::constants::OVERLAP_MARKER_WIDTH;
use crate::types::PageColor;

use super::{Annotation, DerivedGeometry, HalfKind, OutputPage, Rect};

// =============================================================================
// Annotations
// =============================================================================

/// Text of a page-number label, e.g. `" 7/12"`
pub fn label_text(page_number: usize, total_pages: usize) -> String {
    format!(" {}/{}", page_number, total_pages)
}

/// The three annotations stamped onto a source page.
///
/// `page_number` is the 1-based position in the whole document, not in
/// the selected range.
pub fn page_annotations(
    geometry: &DerivedGeometry,
    page_number: usize,
    total_pages: usize,
) -> [Annotation; 3] {
    let text = label_text(page_number, total_pages);
    let (from, to) = geometry.overlap_marker();
    let pad = OVERLAP_MARKER_WIDTH;

    [
        Annotation::FreeTextLabel {
            rect: geometry.top_label_rect(),
            text: text.clone(),
            text_color: PageColor::BLACK,
            border_color: geometry.color,
            background_color: PageColor::WHITE,
        },
        Annotation::FreeTextLabel {
            rect: geometry.bottom_label_rect(),
            text,
            text_color: PageColor::BLACK,
            border_color: PageColor::WHITE,
            background_color: geometry.color,
        },
        Annotation::OverlapLine {
            rect: Rect::from_corners(from.0 - pad, from.1, to.0 + pad, to.1),
            from,
            to,
            color: geometry.color,
        },
    ]
}

// =============================================================================
// Output Pages
// =============================================================================

/// Top and bottom output pages for one flattened page, in reading order
pub fn split_page(geometry: &DerivedGeometry, source_page: usize) -> [OutputPage; 2] {
    [HalfKind::Top, HalfKind::Bottom].map(|half| OutputPage {
        source_page,
        half,
        crop_box: geometry.crop_box(half),
    })
}

/// Output pages for a flattened document of `page_count` pages
pub fn plan_output_pages(geometry: &DerivedGeometry, page_count: usize) -> Vec<OutputPage> {
    (0..page_count)
        .flat_map(|page| split_page(geometry, page))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::derive_geometry;
    use crate::options::GeometryParams;

    fn letter_geometry(total_pages: usize) -> DerivedGeometry {
        derive_geometry(
            Rect::new(0.0, 0.0, 612.0, 792.0),
            &GeometryParams::default(),
            total_pages,
        )
    }

    #[test]
    fn test_label_text_has_leading_space() {
        assert_eq!(label_text(2, 3), " 2/3");
        assert_eq!(label_text(117, 240), " 117/240");
    }

    #[test]
    fn test_page_annotations_share_text() {
        let geometry = letter_geometry(12);
        let annotations = page_annotations(&geometry, 7, 12);

        assert_eq!(annotations[0].text(), Some(" 7/12"));
        assert_eq!(annotations[1].text(), Some(" 7/12"));
        assert_eq!(annotations[2].text(), None);
    }

    #[test]
    fn test_label_colours_are_swapped_between_halves() {
        let geometry = letter_geometry(3);
        let annotations = page_annotations(&geometry, 1, 3);

        match (&annotations[0], &annotations[1]) {
            (
                Annotation::FreeTextLabel {
                    border_color: top_border,
                    background_color: top_background,
                    ..
                },
                Annotation::FreeTextLabel {
                    border_color: bottom_border,
                    background_color: bottom_background,
                    ..
                },
            ) => {
                assert_eq!(*top_border, geometry.color);
                assert_eq!(*top_background, PageColor::WHITE);
                assert_eq!(*bottom_border, PageColor::WHITE);
                assert_eq!(*bottom_background, geometry.color);
            }
            _ => panic!("Expected two labels"),
        }
    }

    #[test]
    fn test_overlap_line_rect_contains_line() {
        let geometry = letter_geometry(3);
        let annotations = page_annotations(&geometry, 1, 3);

        match &annotations[2] {
            Annotation::OverlapLine { rect, from, to, .. } => {
                assert!(rect.x <= from.0 && from.0 <= rect.right());
                assert_eq!(rect.y, from.1);
                assert!((rect.top() - to.1).abs() < 0.01);
            }
            _ => panic!("Expected overlap line"),
        }
    }

    #[test]
    fn test_plan_output_pages_top_before_bottom() {
        let geometry = letter_geometry(4);
        let pages = plan_output_pages(&geometry, 4);

        assert_eq!(pages.len(), 8);
        for (i, pair) in pages.chunks(2).enumerate() {
            assert_eq!(pair[0].source_page, i);
            assert_eq!(pair[0].half, HalfKind::Top);
            assert_eq!(pair[1].source_page, i);
            assert_eq!(pair[1].half, HalfKind::Bottom);
        }
    }
}
