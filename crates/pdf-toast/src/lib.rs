pub mod constants;
mod flatten;
pub mod layout;
mod options;
mod pagespec;
pub mod render;
pub mod toast;
mod types;

pub use flatten::{Flattener, Ghostscript};
pub use layout::{DerivedGeometry, HalfKind, OutputPage, Rect, derive_geometry};
pub use options::*;
pub use pagespec::{PageRange, PageSpec};
pub use toast::{load_pdf, output_path, save_pdf, toast};
pub use types::*;
