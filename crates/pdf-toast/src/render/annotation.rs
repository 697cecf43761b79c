//! Annotation objects for page-number labels and the overlap marker
//!
//! Every annotation carries its own normal appearance stream so that the
//! flattener draws exactly what we specify instead of synthesising one.

use crate::constants::{
    ANNOTATION_FLAG_PRINT, LABEL_BORDER_WIDTH, LABEL_FONT_SIZE, LABEL_TEXT_INSET,
    OVERLAP_MARKER_WIDTH,
};
use crate::layout::{Annotation, Rect};
use crate::types::{PageColor, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Resource name of the label font inside appearance streams
const FONT_RESOURCE: &str = "Helv";

// =============================================================================
// Public API
// =============================================================================

/// Add the Helvetica font dictionary shared by all label appearances
pub fn add_label_font(doc: &mut Document) -> ObjectId {
    let mut font_dict = Dictionary::new();
    font_dict.set("Type", Object::Name(b"Font".to_vec()));
    font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
    font_dict.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
    font_dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
    doc.add_object(font_dict)
}

/// Create an annotation object and attach it to a page.
///
/// # Arguments
/// * `doc` - The document containing the page
/// * `page_id` - The page receiving the annotation
/// * `annotation` - What to draw and where
/// * `font_id` - Font from [`add_label_font`]
pub fn attach_annotation(
    doc: &mut Document,
    page_id: ObjectId,
    annotation: &Annotation,
    font_id: ObjectId,
) -> Result<ObjectId> {
    let mut annot = match annotation {
        Annotation::FreeTextLabel {
            rect,
            text,
            text_color,
            border_color,
            background_color,
        } => {
            let appearance =
                label_appearance(rect, text, *text_color, *border_color, *background_color);
            let ap_id = doc.add_object(appearance_stream(rect, appearance, Some(font_id)));

            let mut annot = annotation_dict(b"FreeText", rect, ap_id);
            annot.set("Contents", Object::string_literal(text.as_str()));
            annot.set(
                "DA",
                Object::string_literal(format!(
                    "/{} {} Tf {} rg",
                    FONT_RESOURCE,
                    LABEL_FONT_SIZE,
                    rgb_operands(*text_color)
                )),
            );
            annot.set("C", rgb_array(*background_color));
            annot.set("BS", border_style(LABEL_BORDER_WIDTH));
            annot
        }
        Annotation::OverlapLine {
            rect,
            from,
            to,
            color,
        } => {
            let appearance = line_appearance(rect, *from, *to, *color);
            let ap_id = doc.add_object(appearance_stream(rect, appearance, None));

            let mut annot = annotation_dict(b"Line", rect, ap_id);
            annot.set(
                "L",
                Object::Array(vec![
                    Object::Real(from.0),
                    Object::Real(from.1),
                    Object::Real(to.0),
                    Object::Real(to.1),
                ]),
            );
            annot.set("C", rgb_array(*color));
            annot.set("BS", border_style(OVERLAP_MARKER_WIDTH));
            annot
        }
    };

    annot.set("P", Object::Reference(page_id));
    let annot_id = doc.add_object(annot);
    push_page_annotation(doc, page_id, annot_id)?;

    Ok(annot_id)
}

/// Drop the `/P` back-link from every annotation on a page.
///
/// Output pages copy their source page's `/Annots`; without this the
/// annotations would keep the replaced source page alive through pruning.
pub fn detach_page_annotations(doc: &mut Document, page_id: ObjectId) -> Result<usize> {
    let annot_ids: Vec<ObjectId> = match doc.get_dictionary(page_id)?.get(b"Annots") {
        Ok(Object::Array(arr)) => arr.iter().filter_map(|obj| obj.as_reference().ok()).collect(),
        Ok(Object::Reference(id)) => doc
            .get_object(*id)?
            .as_array()?
            .iter()
            .filter_map(|obj| obj.as_reference().ok())
            .collect(),
        _ => return Ok(0),
    };

    let mut detached = 0;
    for annot_id in annot_ids {
        if let Ok(annot) = doc.get_dictionary_mut(annot_id) {
            if annot.remove(b"P").is_some() {
                detached += 1;
            }
        }
    }
    Ok(detached)
}

// =============================================================================
// Annotation Dictionaries
// =============================================================================

fn annotation_dict(subtype: &[u8], rect: &Rect, appearance_id: ObjectId) -> Dictionary {
    let mut annot = Dictionary::new();
    annot.set("Type", Object::Name(b"Annot".to_vec()));
    annot.set("Subtype", Object::Name(subtype.to_vec()));
    annot.set("Rect", rect_array(rect));
    annot.set("F", Object::Integer(ANNOTATION_FLAG_PRINT));

    let mut appearance = Dictionary::new();
    appearance.set("N", Object::Reference(appearance_id));
    annot.set("AP", Object::Dictionary(appearance));

    annot
}

fn border_style(width: f32) -> Object {
    let mut bs = Dictionary::new();
    bs.set("W", Object::Real(width));
    bs.set("S", Object::Name(b"S".to_vec()));
    Object::Dictionary(bs)
}

/// Append to the page's `/Annots`, which may be inline or indirect
fn push_page_annotation(doc: &mut Document, page_id: ObjectId, annot_id: ObjectId) -> Result<()> {
    let existing = doc.get_dictionary(page_id)?.get(b"Annots").ok().cloned();

    let mut annots = match existing {
        Some(Object::Array(arr)) => arr,
        Some(Object::Reference(id)) => doc.get_object(id)?.as_array()?.clone(),
        _ => Vec::new(),
    };
    annots.push(Object::Reference(annot_id));

    doc.get_dictionary_mut(page_id)?
        .set("Annots", Object::Array(annots));
    Ok(())
}

// =============================================================================
// Appearance Streams
// =============================================================================

/// Wrap drawing operators in a form XObject covering `rect`
fn appearance_stream(rect: &Rect, content: String, font_id: Option<ObjectId>) -> Stream {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Form".to_vec()));
    dict.set("FormType", Object::Integer(1));
    dict.set(
        "BBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(rect.width),
            Object::Real(rect.height),
        ]),
    );

    let mut resources = Dictionary::new();
    if let Some(font_id) = font_id {
        let mut fonts = Dictionary::new();
        fonts.set(FONT_RESOURCE, Object::Reference(font_id));
        resources.set("Font", Object::Dictionary(fonts));
    }
    dict.set("Resources", Object::Dictionary(resources));

    Stream::new(dict, content.into_bytes())
}

/// Filled box, inset border, then the label text
fn label_appearance(
    rect: &Rect,
    text: &str,
    text_color: PageColor,
    border_color: PageColor,
    background_color: PageColor,
) -> String {
    let half_border = LABEL_BORDER_WIDTH / 2.0;
    // Roughly centres Helvetica digits vertically.
    let baseline = (rect.height - LABEL_FONT_SIZE * 0.7) / 2.0;

    let mut ops = String::new();
    ops.push_str(&format!(
        "q {} rg 0 0 {} {} re f Q\n",
        rgb_operands(background_color),
        rect.width,
        rect.height
    ));
    ops.push_str(&format!(
        "q {} RG {} w {} {} {} {} re S Q\n",
        rgb_operands(border_color),
        LABEL_BORDER_WIDTH,
        half_border,
        half_border,
        rect.width - LABEL_BORDER_WIDTH,
        rect.height - LABEL_BORDER_WIDTH
    ));
    ops.push_str(&format!(
        "BT /{} {} Tf {} rg {} {} Td ({}) Tj ET\n",
        FONT_RESOURCE,
        LABEL_FONT_SIZE,
        rgb_operands(text_color),
        LABEL_TEXT_INSET,
        baseline,
        escape_text(text)
    ));
    ops
}

/// Single stroked segment, in coordinates relative to `rect`
fn line_appearance(rect: &Rect, from: (f32, f32), to: (f32, f32), color: PageColor) -> String {
    format!(
        "q {} RG {} w {} {} m {} {} l S Q\n",
        rgb_operands(color),
        OVERLAP_MARKER_WIDTH,
        from.0 - rect.x,
        from.1 - rect.y,
        to.0 - rect.x,
        to.1 - rect.y
    )
}

// =============================================================================
// Helper Functions
// =============================================================================

fn rgb_operands(color: PageColor) -> String {
    let [r, g, b] = color.components();
    format!("{} {} {}", r, g, b)
}

fn rgb_array(color: PageColor) -> Object {
    Object::Array(color.components().iter().map(|&c| Object::Real(c)).collect())
}

/// PDF rectangle array `[llx lly urx ury]`
pub(crate) fn rect_array(rect: &Rect) -> Object {
    Object::Array(rect.corners().iter().map(|&v| Object::Real(v)).collect())
}

/// Escape a literal string for use inside `( )` in a content stream
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '(' | ')' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text(" 1/3"), " 1/3");
        assert_eq!(escape_text("a(b)c\\"), "a\\(b\\)c\\\\");
    }

    #[test]
    fn test_line_appearance_is_relative_to_rect() {
        let rect = Rect::from_corners(608.0, 376.0, 610.0, 416.0);
        let ops = line_appearance(&rect, (609.0, 376.0), (609.0, 416.0), PageColor::BLACK);
        assert!(ops.contains("1 0 m 1 40 l S"));
    }

    #[test]
    fn test_label_appearance_draws_text() {
        let rect = Rect::new(570.0, 724.0, 42.0, 18.0);
        let ops = label_appearance(
            &rect,
            " 2/3",
            PageColor::BLACK,
            PageColor::default(),
            PageColor::WHITE,
        );
        assert!(ops.contains("( 2/3) Tj"));
        assert!(ops.contains("0 0 42 18 re f"));
    }

    #[test]
    fn test_attach_annotation_appends_to_existing() {
        let mut doc = Document::with_version("1.7");
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Annots", Object::Array(vec![Object::Null])),
        ]));
        let font_id = add_label_font(&mut doc);

        let annotation = Annotation::OverlapLine {
            rect: Rect::from_corners(608.0, 376.0, 610.0, 416.0),
            from: (609.0, 376.0),
            to: (609.0, 416.0),
            color: PageColor::default(),
        };
        let annot_id = attach_annotation(&mut doc, page_id, &annotation, font_id).unwrap();

        let annots = doc
            .get_dictionary(page_id)
            .unwrap()
            .get(b"Annots")
            .unwrap()
            .as_array()
            .unwrap()
            .clone();
        assert_eq!(annots.len(), 2);
        assert_eq!(annots[1].as_reference().unwrap(), annot_id);

        let annot = doc.get_dictionary(annot_id).unwrap();
        assert_eq!(annot.get(b"F").unwrap().as_i64().unwrap(), ANNOTATION_FLAG_PRINT);
        assert!(annot.get(b"AP").is_ok());
    }

    #[test]
    fn test_detach_removes_back_links() {
        let mut doc = Document::with_version("1.7");
        let page_id = doc.add_object(Dictionary::from_iter(vec![(
            "Type",
            Object::Name(b"Page".to_vec()),
        )]));
        let font_id = add_label_font(&mut doc);

        let annotation = Annotation::FreeTextLabel {
            rect: Rect::new(570.0, 724.0, 42.0, 18.0),
            text: " 1/1".to_string(),
            text_color: PageColor::BLACK,
            border_color: PageColor::default(),
            background_color: PageColor::WHITE,
        };
        let annot_id = attach_annotation(&mut doc, page_id, &annotation, font_id).unwrap();
        assert!(doc.get_dictionary(annot_id).unwrap().has(b"P"));

        assert_eq!(detach_page_annotations(&mut doc, page_id).unwrap(), 1);
        assert!(!doc.get_dictionary(annot_id).unwrap().has(b"P"));
    }
}
