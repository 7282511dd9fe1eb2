use std::collections::BTreeMap;
use std::io::{self, Write};

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::objects::{ObjId, PdfObject};

/// Serializes indirect objects to a `Write` target and remembers
/// where each one starts so the xref table can be emitted last.
pub struct PdfWriter<W: Write> {
    writer: W,
    offset: usize,
    offsets: BTreeMap<u32, usize>,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W) -> Self {
        PdfWriter {
            writer,
            offset: 0,
            offsets: BTreeMap::new(),
        }
    }

    fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        self.writer.write_all(data)?;
        self.offset += data.len();
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// PDF 1.7 header followed by the binary marker comment.
    pub fn write_header(&mut self) -> io::Result<()> {
        self.write_str("%PDF-1.7\n")?;
        self.write_bytes(b"%\xe2\xe3\xcf\xd3\n")
    }

    pub fn write_object(&mut self, id: ObjId, obj: &PdfObject) -> io::Result<()> {
        self.offsets.insert(id.0, self.offset);
        self.write_str(&format!("{} {} obj\n", id.0, id.1))?;
        self.write_value(obj)?;
        self.write_str("\nendobj\n")
    }

    fn write_value(&mut self, obj: &PdfObject) -> io::Result<()> {
        match obj {
            PdfObject::Integer(n) => self.write_str(&n.to_string()),
            PdfObject::Real(f) => self.write_str(&format_real(*f)),
            PdfObject::Name(name) => self.write_str(&format!("/{}", name)),
            PdfObject::LiteralString(s) => {
                self.write_str("(")?;
                self.write_bytes(&escape_pdf_bytes(s.as_bytes()))?;
                self.write_str(")")
            }
            PdfObject::Array(items) => {
                self.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.write_str(" ")?;
                    }
                    self.write_value(item)?;
                }
                self.write_str("]")
            }
            PdfObject::Dictionary(entries) => {
                self.write_str("<<")?;
                self.write_entries(entries)?;
                self.write_str(" >>")
            }
            PdfObject::Stream { dict, data } => {
                self.write_str("<<")?;
                self.write_entries(dict)?;
                self.write_str(&format!(" /Length {} >>\nstream\n", data.len()))?;
                self.write_bytes(data)?;
                self.write_str("\nendstream")
            }
            PdfObject::Reference(id) => self.write_str(&format!("{} {} R", id.0, id.1)),
        }
    }

    fn write_entries(&mut self, entries: &[(String, PdfObject)]) -> io::Result<()> {
        for (key, val) in entries {
            self.write_str(&format!(" /{} ", key))?;
            self.write_value(val)?;
        }
        Ok(())
    }

    /// Xref table, trailer, startxref and `%%EOF`. Object numbers that
    /// were never written are listed as free entries.
    pub fn write_xref_and_trailer(&mut self, root: ObjId, info: Option<ObjId>) -> io::Result<()> {
        let xref_offset = self.offset;
        let size = self.offsets.keys().next_back().map_or(1, |&max| max + 1);

        self.write_str(&format!("xref\n0 {}\n", size))?;
        self.write_bytes(b"0000000000 65535 f\r\n")?;
        for num in 1..size {
            let entry = match self.offsets.get(&num) {
                Some(&off) => format!("{:010} 00000 n\r\n", off),
                None => "0000000000 00000 f\r\n".to_string(),
            };
            self.write_str(&entry)?;
        }

        let mut trailer = format!("trailer\n<< /Size {} /Root {} {} R", size, root.0, root.1);
        if let Some(info) = info {
            trailer.push_str(&format!(" /Info {} {} R", info.0, info.1));
        }
        trailer.push_str(" >>\n");
        self.write_str(&trailer)?;
        self.write_str(&format!("startxref\n{}\n%%EOF\n", xref_offset))
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Escape the delimiter bytes of a PDF literal string.
pub fn escape_pdf_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'\\' | b'(' | b')' => {
                out.push(b'\\');
                out.push(b);
            }
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\n' => out.extend_from_slice(b"\\n"),
            _ => out.push(b),
        }
    }
    out
}

/// Zlib-compress a content stream for `/Filter /FlateDecode`.
pub fn deflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Reals in dictionaries: no exponent, trailing zeros trimmed,
/// whole numbers keep one decimal.
fn format_real(f: f64) -> String {
    if f == f.floor() && f.abs() < 1e15 {
        format!("{:.1}", f)
    } else {
        let s = format!("{:.6}", f);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_has_binary_marker() {
        let mut buf = Vec::new();
        PdfWriter::new(&mut buf).write_header().unwrap();
        assert!(buf.starts_with(b"%PDF-1.7\n%"));
        assert!(buf[10..14].iter().all(|&b| b >= 128));
    }

    #[test]
    fn stream_length_matches_payload() {
        let mut buf = Vec::new();
        let mut w = PdfWriter::new(&mut buf);
        w.write_object(ObjId(6, 0), &PdfObject::stream(vec![], b"0 0 m".to_vec()))
            .unwrap();
        let output = String::from_utf8_lossy(&buf);
        assert!(output.starts_with("6 0 obj\n<< /Length 5 >>\nstream\n0 0 m\nendstream"));
    }

    #[test]
    fn missing_object_numbers_become_free_entries() {
        let mut buf = Vec::new();
        let mut w = PdfWriter::new(&mut buf);
        w.write_header().unwrap();
        w.write_object(ObjId(1, 0), &PdfObject::name("Catalog")).unwrap();
        w.write_object(ObjId(3, 0), &PdfObject::name("Font")).unwrap();
        w.write_xref_and_trailer(ObjId(1, 0), None).unwrap();
        let output = String::from_utf8_lossy(&buf);
        assert!(output.contains("xref\n0 4\n"));
        assert_eq!(output.matches("0000000000 00000 f\r\n").count(), 1);
        assert!(output.contains("<< /Size 4 /Root 1 0 R >>"));
        assert!(output.ends_with("%%EOF\n"));
    }

    #[test]
    fn escapes_delimiters_and_newlines() {
        assert_eq!(escape_pdf_bytes(b"a(b)c\\d"), b"a\\(b\\)c\\\\d".to_vec());
        assert_eq!(escape_pdf_bytes(b"x\ny"), b"x\\ny".to_vec());
    }

    #[test]
    fn reals_are_trimmed() {
        assert_eq!(format_real(595.276), "595.276");
        assert_eq!(format_real(792.0), "792.0");
        assert_eq!(format_real(0.5), "0.5");
    }

    #[test]
    fn deflate_round_trips_through_flate2() {
        use flate2::read::ZlibDecoder;
        use std::io::Read;

        let packed = deflate(b"BT /F1 12 Tf ET").unwrap();
        let mut unpacked = String::new();
        ZlibDecoder::new(&packed[..])
            .read_to_string(&mut unpacked)
            .unwrap();
        assert_eq!(unpacked, "BT /F1 12 Tf ET");
    }
}
