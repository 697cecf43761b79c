//! Shared constants for page toasting
//!
//! This module centralizes the magic numbers used by the geometry engine
//! and the annotation renderer. All lengths are in PDF points.

// =============================================================================
// Default Geometry Parameters
// =============================================================================

/// Default target aspect ratio (width / height).
/// A landscape e-reader screen of ~209x156mm.
pub const DEFAULT_ASPECT_RATIO: f32 = 1.34;

/// Default amount cropped from the left margin (points)
pub const DEFAULT_LEFT_CROP: f32 = 35.0;

/// Default minimum overlap between top and bottom halves (points)
pub const DEFAULT_MIN_OVERLAP: f32 = 40.0;

/// Page dimensions assumed when a page declares no box (US Letter)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (612.0, 792.0);

// =============================================================================
// Page-Number Labels
// =============================================================================

/// Label box width for documents with fewer than 100 pages
pub const LABEL_WIDTH: f32 = 42.0;

/// Label box width once "nnn/mmm" needs the extra room
pub const WIDE_LABEL_WIDTH: f32 = 56.0;

/// Page count from which the wide label box is used
pub const WIDE_LABEL_PAGE_COUNT: usize = 100;

/// Height of a label band
pub const LABEL_HEIGHT: f32 = 18.0;

/// Distance from the top crop edge down to the top of the upper label
pub const TOP_LABEL_OFFSET: f32 = 25.0;

/// Distance from the bottom crop edge up to the bottom of the lower label
pub const BOTTOM_LABEL_OFFSET: f32 = 3.0;

/// How far labels run past the right page edge
pub const LABEL_BLEED: f32 = 1.0;

/// Font size for label text
pub const LABEL_FONT_SIZE: f32 = 10.0;

/// Horizontal text inset inside a label box
pub const LABEL_TEXT_INSET: f32 = 2.0;

/// Border width of label boxes
pub const LABEL_BORDER_WIDTH: f32 = 1.0;

// =============================================================================
// Overlap Marker
// =============================================================================

/// Distance of the overlap marker line from the right page edge
pub const OVERLAP_MARKER_INSET: f32 = 3.0;

/// Stroke width of the overlap marker line
pub const OVERLAP_MARKER_WIDTH: f32 = 1.0;

// =============================================================================
// Annotations
// =============================================================================

/// Annotation flag bit 3: print the annotation
pub const ANNOTATION_FLAG_PRINT: i64 = 4;

// =============================================================================
// Output
// =============================================================================

/// Suffix appended to the input stem to name the output file
pub const OUTPUT_SUFFIX: &str = "-toasted.pdf";

/// Executable name of the Ghostscript flattener
pub const GHOSTSCRIPT_BINARY: &str = "gs";
