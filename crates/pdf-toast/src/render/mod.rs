//! PDF rendering modules for toasting
//!
//! This module handles all PDF-specific operations:
//! - Annotation dictionaries with their appearance streams
//! - Standalone page objects, output pages and the page tree
//! - Deduplicating objects before writing

mod annotation;
mod compact;
mod page;

pub use annotation::{add_label_font, attach_annotation, detach_page_annotations};
pub use compact::{compact_document, merge_identical_objects};
pub use page::*;
