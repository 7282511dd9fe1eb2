/// Object identifier: (object_number, generation_number).
/// Generation is always 0 for freshly written documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjId(pub u32, pub u16);

impl ObjId {
    /// The indirect reference to this object.
    pub fn reference(self) -> PdfObject {
        PdfObject::Reference(self)
    }
}

/// The subset of PDF object types a single-page document needs
/// (PDF 32000-1:2008 Section 7.3).
#[derive(Debug, Clone, PartialEq)]
pub enum PdfObject {
    Integer(i64),
    Real(f64),
    /// Name object, stored without the leading `/`.
    Name(String),
    /// Literal string, stored unescaped without the parens.
    LiteralString(String),
    Array(Vec<PdfObject>),
    /// Ordered key-value pairs so output is reproducible byte for byte.
    Dictionary(Vec<(String, PdfObject)>),
    Stream {
        dict: Vec<(String, PdfObject)>,
        data: Vec<u8>,
    },
    Reference(ObjId),
}

impl PdfObject {
    pub fn name(s: &str) -> Self {
        PdfObject::Name(s.to_string())
    }

    pub fn literal_string(s: &str) -> Self {
        PdfObject::LiteralString(s.to_string())
    }

    pub fn dict(entries: Vec<(&str, PdfObject)>) -> Self {
        PdfObject::Dictionary(owned_entries(entries))
    }

    pub fn stream(dict_entries: Vec<(&str, PdfObject)>, data: Vec<u8>) -> Self {
        PdfObject::Stream {
            dict: owned_entries(dict_entries),
            data,
        }
    }

    /// A `[llx lly urx ury]` rectangle anchored at the origin.
    pub fn media_box(width: f64, height: f64) -> Self {
        PdfObject::Array(vec![
            PdfObject::Integer(0),
            PdfObject::Integer(0),
            PdfObject::Real(width),
            PdfObject::Real(height),
        ])
    }
}

fn owned_entries(entries: Vec<(&str, PdfObject)>) -> Vec<(String, PdfObject)> {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obj_ids_order_by_number() {
        assert!(ObjId(3, 0) < ObjId(7, 0));
        assert_eq!(ObjId(2, 0).reference(), PdfObject::Reference(ObjId(2, 0)));
    }

    #[test]
    fn dict_keeps_insertion_order() {
        let obj = PdfObject::dict(vec![
            ("Type", PdfObject::name("Page")),
            ("Parent", ObjId(2, 0).reference()),
            ("MediaBox", PdfObject::media_box(595.276, 841.89)),
        ]);
        match obj {
            PdfObject::Dictionary(entries) => {
                let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(keys, ["Type", "Parent", "MediaBox"]);
            }
            _ => panic!("expected Dictionary"),
        }
    }

    #[test]
    fn media_box_has_four_entries() {
        match PdfObject::media_box(612.0, 792.0) {
            PdfObject::Array(items) => {
                assert_eq!(items.len(), 4);
                assert_eq!(items[2], PdfObject::Real(612.0));
            }
            _ => panic!("expected Array"),
        }
    }

    #[test]
    fn stream_keeps_payload() {
        let obj = PdfObject::stream(
            vec![("Filter", PdfObject::name("FlateDecode"))],
            b"q Q".to_vec(),
        );
        match obj {
            PdfObject::Stream { dict, data } => {
                assert_eq!(dict[0].0, "Filter");
                assert_eq!(data, b"q Q");
            }
            _ => panic!("expected Stream"),
        }
    }
}
