//! Stage 3: cut every flattened page into a top and a bottom half

use crate::layout::{DerivedGeometry, plan_output_pages};
use crate::render::{
    compact_document, detach_page_annotations, page_ids, render_output_page, replace_page_tree,
};
use crate::types::*;
use lopdf::Document;

/// Replace each page with its top half followed by its bottom half
pub(crate) fn split_pages(
    mut doc: Document,
    expected_pages: usize,
    geometry: DerivedGeometry,
) -> Result<Document> {
    let source_ids = page_ids(&doc);
    if source_ids.len() != expected_pages {
        return Err(ToastError::PageCountMismatch {
            expected: expected_pages,
            actual: source_ids.len(),
        });
    }

    // Source pages are dropped once both halves exist.
    for &page_id in &source_ids {
        detach_page_annotations(&mut doc, page_id)?;
    }

    let plan = plan_output_pages(&geometry, source_ids.len());
    let mut output_ids = Vec::with_capacity(plan.len());
    for output_page in &plan {
        output_ids.push(render_output_page(&mut doc, &source_ids, output_page)?);
    }

    replace_page_tree(&mut doc, &output_ids)?;
    let removed = compact_document(&mut doc);
    log::debug!("Split into {} pages, removed {} objects", output_ids.len(), removed);

    Ok(doc)
}
