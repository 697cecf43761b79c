//! Page objects and the page tree
//!
//! Pages in the intermediate and final documents are always made
//! self-contained: attributes a page would inherit from its ancestors are
//! copied onto it, so it can be moved under a fresh page tree.

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::layout::{OutputPage, Rect};
use crate::types::{Result, ToastError};
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::BTreeSet;

use super::annotation::rect_array;

/// Page attributes that may be inherited through the page tree
const INHERITABLE_KEYS: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

/// Catalog entries that can point at pages of the replaced tree
const PAGE_REFERENCING_CATALOG_KEYS: [&[u8]; 6] = [
    b"Outlines",
    b"Dests",
    b"Names",
    b"StructTreeRoot",
    b"PageLabels",
    b"OpenAction",
];

/// Guard against malformed trees whose `/Parent` links loop
const MAX_TREE_DEPTH: usize = 64;

// =============================================================================
// Page Boxes
// =============================================================================

/// Visible box of a page: its CropBox, else its MediaBox.
///
/// Falls back to US Letter when neither is present.
pub fn page_box(doc: &Document, page_id: ObjectId) -> Result<Rect> {
    let page_dict = doc.get_dictionary(page_id)?;

    let boxed = [b"CropBox".as_slice(), b"MediaBox".as_slice()]
        .into_iter()
        .find_map(|key| resolve_attribute(doc, page_dict, key))
        .and_then(|obj| rect_from_object(doc, &obj));

    Ok(boxed.unwrap_or_else(|| {
        Rect::new(0.0, 0.0, DEFAULT_PAGE_DIMENSIONS.0, DEFAULT_PAGE_DIMENSIONS.1)
    }))
}

/// Read a PDF rectangle array, normalising reversed corners
fn rect_from_object(doc: &Document, obj: &Object) -> Option<Rect> {
    let arr = deref(doc, obj).as_array().ok()?;
    if arr.len() != 4 {
        return None;
    }

    let values: Vec<f32> = arr
        .iter()
        .map(|item| extract_number(deref(doc, item)))
        .collect::<Option<_>>()?;

    Some(Rect::from_corners(
        values[0].min(values[2]),
        values[1].min(values[3]),
        values[0].max(values[2]),
        values[1].max(values[3]),
    ))
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

fn deref<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

// =============================================================================
// Inheritance
// =============================================================================

/// Look up `key` on the page or the nearest ancestor defining it
fn resolve_attribute(doc: &Document, page_dict: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut current = page_dict;

    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = current.get(key) {
            return Some(value.clone());
        }
        let parent_id = current.get(b"Parent").and_then(Object::as_reference).ok()?;
        current = doc.get_dictionary(parent_id).ok()?;
    }

    None
}

/// Copy of a page dictionary with inherited attributes made explicit and
/// its `/Parent` link removed
pub fn standalone_page(doc: &Document, page_id: ObjectId) -> Result<Dictionary> {
    let page_dict = doc.get_dictionary(page_id)?;
    let mut standalone = page_dict.clone();

    for key in INHERITABLE_KEYS {
        if standalone.has(key) {
            continue;
        }
        if let Some(value) = resolve_attribute(doc, page_dict, key) {
            standalone.set(key.to_vec(), value);
        }
    }

    standalone.remove(b"Parent");
    Ok(standalone)
}

// =============================================================================
// Output Pages
// =============================================================================

/// Render an output page as a new page object.
///
/// The new page shares content and resources with the source page but has
/// its own dictionary, so the top and bottom halves never alias.
pub fn render_output_page(
    doc: &mut Document,
    source_page_ids: &[ObjectId],
    output_page: &OutputPage,
) -> Result<ObjectId> {
    let source_id = source_page_ids
        .get(output_page.source_page)
        .copied()
        .ok_or(ToastError::PageCountMismatch {
            expected: output_page.source_page + 1,
            actual: source_page_ids.len(),
        })?;

    let mut page_dict = standalone_page(doc, source_id)?;
    page_dict.set("CropBox", rect_array(&output_page.crop_box));

    Ok(doc.add_object(page_dict))
}

// =============================================================================
// Page Tree
// =============================================================================

/// Replace the document's page tree with a flat one holding `page_ids` in
/// order.
///
/// Catalog entries that point into the old tree are dropped, and any other
/// reference to a page or node left out of the new tree becomes null, so
/// pruning removes them.
pub fn replace_page_tree(doc: &mut Document, page_ids: &[ObjectId]) -> Result<ObjectId> {
    let old_nodes = page_tree_nodes(doc);
    let pages_tree_id = doc.new_object_id();

    for &page_id in page_ids {
        let page_dict = doc.get_dictionary_mut(page_id)?;
        page_dict.set("Parent", Object::Reference(pages_tree_id));
    }

    let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(page_ids.len() as i64)),
    ]);
    doc.objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog = doc.catalog_mut()?;
    catalog.set("Pages", Object::Reference(pages_tree_id));
    for key in PAGE_REFERENCING_CATALOG_KEYS {
        catalog.remove(key);
    }

    let kept: BTreeSet<ObjectId> = page_ids.iter().copied().collect();
    let dropped: BTreeSet<ObjectId> = old_nodes.difference(&kept).copied().collect();
    if !dropped.is_empty() {
        doc.traverse_objects(|object| {
            if let Object::Reference(id) = *object {
                if dropped.contains(&id) {
                    *object = Object::Null;
                }
            }
        });
    }

    Ok(pages_tree_id)
}

/// Every Pages and Page object reachable from the catalog's `/Pages`
fn page_tree_nodes(doc: &Document) -> BTreeSet<ObjectId> {
    let mut nodes = BTreeSet::new();
    let Ok(root) = doc
        .catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
    else {
        return nodes;
    };

    let mut pending = vec![root];
    while let Some(id) = pending.pop() {
        if !nodes.insert(id) {
            continue;
        }
        if let Ok(kids) = doc
            .get_dictionary(id)
            .and_then(|node| node.get(b"Kids"))
            .and_then(Object::as_array)
        {
            pending.extend(kids.iter().filter_map(|kid| kid.as_reference().ok()));
        }
    }

    nodes
}

/// Object IDs of every page, in document order
pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::Stream;

    /// A page whose MediaBox and Resources live on the Pages node
    fn inherited_doc() -> (Document, ObjectId) {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Contents", Object::Reference(content_id)),
        ]));

        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(vec![Object::Reference(page_id)])),
            ("Count", Object::Integer(1)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(595.0),
                    Object::Real(842.0),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
        ]);
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        doc.trailer.set("Root", catalog_id);

        (doc, page_id)
    }

    #[test]
    fn test_page_box_follows_inheritance() {
        let (doc, page_id) = inherited_doc();
        let rect = page_box(&doc, page_id).unwrap();
        assert_eq!(rect, Rect::new(0.0, 0.0, 595.0, 842.0));
    }

    #[test]
    fn test_standalone_page_copies_inherited_attributes() {
        let (doc, page_id) = inherited_doc();
        let page = standalone_page(&doc, page_id).unwrap();

        assert!(page.has(b"MediaBox"));
        assert!(page.has(b"Resources"));
        assert!(!page.has(b"Parent"));
        assert!(!page.has(b"CropBox"));
    }

    #[test]
    fn test_replace_page_tree_duplicates_pages() {
        let (mut doc, page_id) = inherited_doc();
        let first = doc.add_object(standalone_page(&doc, page_id).unwrap());
        let second = doc.add_object(standalone_page(&doc, page_id).unwrap());

        replace_page_tree(&mut doc, &[first, second]).unwrap();

        assert_eq!(page_ids(&doc), vec![first, second]);
    }

    #[test]
    fn test_replace_page_tree_releases_dropped_pages() {
        let (mut doc, page_id) = inherited_doc();
        let old_pages_id = doc.catalog().unwrap().get(b"Pages").unwrap().as_reference().unwrap();

        // A bookmark and a link both pointing at the page being replaced
        let outlines_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Outlines".to_vec())),
            (
                "Dest",
                Object::Array(vec![Object::Reference(page_id), Object::Name(b"Fit".to_vec())]),
            ),
        ]));
        doc.catalog_mut().unwrap().set("Outlines", Object::Reference(outlines_id));
        let link_id = doc.add_object(Dictionary::from_iter(vec![
            ("Subtype", Object::Name(b"Link".to_vec())),
            (
                "Dest",
                Object::Array(vec![Object::Reference(page_id), Object::Name(b"Fit".to_vec())]),
            ),
        ]));

        let mut replacement = standalone_page(&doc, page_id).unwrap();
        replacement.set("Annots", Object::Array(vec![Object::Reference(link_id)]));
        let replacement_id = doc.add_object(replacement);

        replace_page_tree(&mut doc, &[replacement_id]).unwrap();
        assert!(!doc.catalog().unwrap().has(b"Outlines"));

        let link = doc.get_dictionary(link_id).unwrap();
        let dest = link.get(b"Dest").unwrap().as_array().unwrap();
        assert!(matches!(dest[0], Object::Null));

        doc.prune_objects();
        assert!(doc.get_object(page_id).is_err());
        assert!(doc.get_object(old_pages_id).is_err());
        assert!(doc.get_object(outlines_id).is_err());
        assert_eq!(page_ids(&doc), vec![replacement_id]);
    }

    #[test]
    fn test_reversed_corners_are_normalised() {
        let doc = Document::with_version("1.7");
        let obj = Object::Array(vec![
            Object::Integer(612),
            Object::Integer(792),
            Object::Integer(0),
            Object::Integer(0),
        ]);
        let rect = rect_from_object(&doc, &obj).unwrap();
        assert_eq!(rect, Rect::new(0.0, 0.0, 612.0, 792.0));
    }
}
