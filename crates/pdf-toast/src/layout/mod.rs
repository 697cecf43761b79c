//! Layout calculation modules for toasting
//!
//! This module handles all the geometric calculations:
//! - Crop offset and overlap derived from the page box and target ratio
//! - Annotation placement on each source page
//! - Top/bottom output pages cut from each flattened page

mod geometry;
mod placement;
mod types;

pub use geometry::*;
pub use placement::*;
pub use types::*;
