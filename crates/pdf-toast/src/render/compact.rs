//! Object deduplication before writing
//!
//! Orphans are pruned and byte-identical objects are merged so that the
//! two copies of every page share as much as possible.

use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};
use std::collections::{BTreeMap, HashMap};

/// Prune orphans, merge identical objects, renumber and compress.
///
/// Returns the number of objects removed.
pub fn compact_document(doc: &mut Document) -> usize {
    let before = doc.objects.len();

    doc.prune_objects();
    merge_identical_objects(doc);
    doc.prune_objects();
    doc.renumber_objects();
    doc.compress();

    before.saturating_sub(doc.objects.len())
}

/// Merge objects with identical serialised form, rewriting references to
/// point at the lowest-numbered copy. Repeats until nothing changes, since
/// merging children can make their parents identical.
pub fn merge_identical_objects(doc: &mut Document) -> usize {
    let mut merged = 0;

    loop {
        let mut seen: HashMap<Vec<u8>, ObjectId> = HashMap::new();
        let mut replacements: BTreeMap<ObjectId, ObjectId> = BTreeMap::new();

        for (&id, object) in &doc.objects {
            if is_structural(object) {
                continue;
            }
            let mut key = Vec::new();
            fingerprint(object, &mut key);
            match seen.get(&key) {
                Some(&canonical) => {
                    replacements.insert(id, canonical);
                }
                None => {
                    seen.insert(key, id);
                }
            }
        }

        if replacements.is_empty() {
            return merged;
        }

        for id in replacements.keys() {
            doc.objects.remove(id);
        }
        for object in doc.objects.values_mut() {
            rewrite_references(object, &replacements);
        }
        rewrite_dictionary(&mut doc.trailer, &replacements);

        merged += replacements.len();
    }
}

/// Catalog and page tree nodes keep their identity
fn is_structural(object: &Object) -> bool {
    let dict = match object {
        Object::Dictionary(dict) => dict,
        Object::Stream(stream) => &stream.dict,
        _ => return false,
    };

    matches!(
        dict.get(b"Type").and_then(Object::as_name),
        Ok(b"Catalog") | Ok(b"Pages") | Ok(b"Page")
    )
}

/// Unambiguous byte encoding of an object
fn fingerprint(object: &Object, out: &mut Vec<u8>) {
    match object {
        Object::Null => out.push(b'N'),
        Object::Boolean(b) => out.extend_from_slice(if *b { b"T" } else { b"F" }),
        Object::Integer(i) => {
            out.push(b'I');
            out.extend_from_slice(&i.to_le_bytes());
        }
        Object::Real(r) => {
            out.push(b'R');
            out.extend_from_slice(&r.to_le_bytes());
        }
        Object::Name(name) => {
            out.push(b'/');
            push_bytes(name, out);
        }
        Object::String(bytes, format) => {
            out.push(match format {
                StringFormat::Literal => b'(',
                StringFormat::Hexadecimal => b'<',
            });
            push_bytes(bytes, out);
        }
        Object::Array(items) => {
            out.push(b'[');
            out.extend_from_slice(&(items.len() as u64).to_le_bytes());
            for item in items {
                fingerprint(item, out);
            }
        }
        Object::Dictionary(dict) => fingerprint_dictionary(dict, out),
        Object::Stream(stream) => {
            out.push(b'S');
            fingerprint_dictionary(&stream.dict, out);
            push_bytes(&stream.content, out);
        }
        Object::Reference((number, generation)) => {
            out.push(b'@');
            out.extend_from_slice(&number.to_le_bytes());
            out.extend_from_slice(&generation.to_le_bytes());
        }
    }
}

fn fingerprint_dictionary(dict: &Dictionary, out: &mut Vec<u8>) {
    out.push(b'<');
    out.extend_from_slice(&(dict.len() as u64).to_le_bytes());
    for (key, value) in dict.iter() {
        push_bytes(key, out);
        fingerprint(value, out);
    }
}

/// Length-prefixed so that concatenations cannot collide
fn push_bytes(bytes: &[u8], out: &mut Vec<u8>) {
    out.extend_from_slice(&(bytes.len() as u64).to_le_bytes());
    out.extend_from_slice(bytes);
}

fn rewrite_references(object: &mut Object, replacements: &BTreeMap<ObjectId, ObjectId>) {
    match object {
        Object::Reference(id) => {
            if let Some(&canonical) = replacements.get(id) {
                *id = canonical;
            }
        }
        Object::Array(items) => {
            for item in items.iter_mut() {
                rewrite_references(item, replacements);
            }
        }
        Object::Dictionary(dict) => rewrite_dictionary(dict, replacements),
        Object::Stream(stream) => rewrite_dictionary(&mut stream.dict, replacements),
        _ => {}
    }
}

fn rewrite_dictionary(dict: &mut Dictionary, replacements: &BTreeMap<ObjectId, ObjectId>) {
    for (_, value) in dict.iter_mut() {
        rewrite_references(value, replacements);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::Stream;

    #[test]
    fn test_identical_streams_are_merged() {
        let mut doc = Document::with_version("1.7");
        let a = doc.add_object(Stream::new(Dictionary::new(), b"0 0 m 1 1 l S".to_vec()));
        let b = doc.add_object(Stream::new(Dictionary::new(), b"0 0 m 1 1 l S".to_vec()));
        let c = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));
        let holder = doc.add_object(Object::Array(vec![
            Object::Reference(a),
            Object::Reference(b),
            Object::Reference(c),
        ]));

        assert_eq!(merge_identical_objects(&mut doc), 1);

        let refs: Vec<ObjectId> = doc
            .get_object(holder)
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|obj| obj.as_reference().unwrap())
            .collect();
        assert_eq!(refs, vec![a, a, c]);
        assert!(doc.get_object(b).is_err());
    }

    #[test]
    fn test_merging_cascades_to_parents() {
        let mut doc = Document::with_version("1.7");
        let a = doc.add_object(Object::Integer(7));
        let b = doc.add_object(Object::Integer(7));
        let parent_a = doc.add_object(Object::Array(vec![Object::Reference(a)]));
        let parent_b = doc.add_object(Object::Array(vec![Object::Reference(b)]));

        // Children first, then the now-identical parents.
        assert_eq!(merge_identical_objects(&mut doc), 2);
        assert!(doc.get_object(parent_a).is_ok());
        assert!(doc.get_object(parent_b).is_err());
    }

    #[test]
    fn test_pages_are_never_merged() {
        let mut doc = Document::with_version("1.7");
        let page = || {
            Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Page".to_vec())),
                ("Rotate", Object::Integer(0)),
            ])
        };
        doc.add_object(page());
        doc.add_object(page());

        assert_eq!(merge_identical_objects(&mut doc), 0);
        assert_eq!(doc.objects.len(), 2);
    }
}
