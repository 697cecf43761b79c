//! Stage 1: stamp page numbers and the overlap marker onto each page

use crate::layout::{DerivedGeometry, page_annotations};
use crate::pagespec::PageRange;
use crate::render::{
    add_label_font, attach_annotation, compact_document, page_ids, replace_page_tree,
    standalone_page,
};
use crate::types::*;
use lopdf::Document;

/// Keep only the pages in `range`, each carrying its three annotations.
///
/// Labels number pages by their position in the whole document.
pub(crate) fn annotate_pages(
    mut doc: Document,
    range: PageRange,
    geometry: DerivedGeometry,
) -> Result<Document> {
    let all_pages = page_ids(&doc);
    let total_pages = all_pages.len();
    let selected = all_pages
        .get(range.indices())
        .ok_or(ToastError::PageRangeOutOfBounds {
            first: range.start as u32 + 1,
            last: range.end as u32,
            page_count: total_pages,
        })?
        .to_vec();

    let font_id = add_label_font(&mut doc);

    for (offset, &page_id) in selected.iter().enumerate() {
        // Detach from inherited attributes before the old tree is dropped.
        let standalone = standalone_page(&doc, page_id)?;
        *doc.get_dictionary_mut(page_id)? = standalone;

        let page_number = range.start + offset + 1;
        for annotation in page_annotations(&geometry, page_number, total_pages) {
            attach_annotation(&mut doc, page_id, &annotation, font_id)?;
        }
    }

    replace_page_tree(&mut doc, &selected)?;
    let removed = compact_document(&mut doc);
    log::debug!("Annotated {} pages, removed {} objects", selected.len(), removed);

    Ok(doc)
}
