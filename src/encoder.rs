//! Writer for the `MWR` result format
//!
//! Produces buffers in the same layout the engine emits. Fake engines, tests
//! and benchmarks use it to build input for [`crate::decoder`].

use crate::buffer::RawResultBuffer;
use crate::decoder::{FieldTag, MAGIC};
use crate::record::{Location, ResultRecord, ResultSet};

/// Builds the fields of a single record.
#[derive(Debug, Clone, Default)]
pub struct RecordWriter {
    fields: u8,
    body: Vec<u8>,
}

impl RecordWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field with an explicit tag, name and content.
    ///
    /// # Panics
    /// If the record already has 255 fields, or the name or content is too
    /// long for its length prefix.
    pub fn raw_field(mut self, tag: u8, name: &[u8], content: &[u8]) -> Self {
        assert!(self.fields < u8::MAX, "too many fields in one record");
        assert!(name.len() <= usize::from(u8::MAX), "field name too long");
        assert!(content.len() <= usize::from(u16::MAX), "field content too long");
        self.body.push(tag);
        self.body.push(name.len() as u8);
        self.body.extend_from_slice(name);
        self.body.extend_from_slice(&(content.len() as u16).to_le_bytes());
        self.body.extend_from_slice(content);
        self.fields += 1;
        self
    }

    /// Append a field, named the way the engine names it.
    pub fn field(self, tag: FieldTag, content: &[u8]) -> Self {
        self.raw_field(tag.code(), tag.name().as_bytes(), content)
    }

    pub fn text(self, text: &str) -> Self {
        self.field(FieldTag::Text, text.as_bytes())
    }

    pub fn bytes(self, bytes: &[u8]) -> Self {
        self.field(FieldTag::Bytes, bytes)
    }

    /// Integers are written as 4 bytes, widened to 8 when they do not fit.
    pub fn uint(self, tag: FieldTag, value: u64) -> Self {
        match u32::try_from(value) {
            Ok(v) => self.field(tag, &v.to_le_bytes()),
            Err(_) => self.field(tag, &value.to_le_bytes()),
        }
    }

    pub fn flag(self, tag: FieldTag, value: bool) -> Self {
        self.uint(tag, u64::from(value))
    }

    pub fn float(self, tag: FieldTag, value: f32) -> Self {
        self.field(tag, &value.to_le_bytes())
    }

    pub fn location(self, location: &Location) -> Self {
        let content: Vec<u8> = location
            .points()
            .iter()
            .flat_map(|p| [p.x.to_le_bytes(), p.y.to_le_bytes()])
            .flatten()
            .collect();
        self.field(FieldTag::Location, &content)
    }

    pub fn codewords(self, words: &[u32]) -> Self {
        let mut content = Vec::with_capacity(4 + words.len() * 4);
        content.extend_from_slice(&(words.len() as u32).to_le_bytes());
        for word in words {
            content.extend_from_slice(&word.to_le_bytes());
        }
        self.field(FieldTag::PdfCodewords, &content)
    }

    /// Write every field the record carries.
    pub fn from_record(record: &ResultRecord) -> Self {
        let mut w = Self::new();
        if let Some(text) = &record.text {
            w = w.text(text);
        }
        if let Some(encoding) = &record.text_encoding {
            w = w.field(FieldTag::TextEncoding, encoding.as_bytes());
        }
        if let Some(bytes) = &record.bytes {
            w = w.bytes(bytes);
        }
        if let Some(code) = record.type_code {
            w = w.uint(FieldTag::Type, code);
        }
        if let Some(subtype) = record.subtype {
            w = w.uint(FieldTag::Subtype, subtype);
        }
        w = w
            .flag(FieldTag::Success, record.success)
            .flag(FieldTag::IsGs1, record.is_gs1)
            .flag(FieldTag::Kanji, record.kanji);
        if let Some(location) = &record.location {
            w = w.location(location);
        }
        let uints = [
            (FieldTag::ImageWidth, record.image_width),
            (FieldTag::ImageHeight, record.image_height),
            (FieldTag::ModulesCountX, record.modules_count_x),
            (FieldTag::ModulesCountY, record.modules_count_y),
            (FieldTag::PdfRows, record.pdf417.rows),
            (FieldTag::PdfColumns, record.pdf417.columns),
            (FieldTag::PdfEcLevel, record.pdf417.ec_level),
        ];
        for (tag, value) in uints {
            if let Some(value) = value {
                w = w.uint(tag, value);
            }
        }
        let floats = [
            (FieldTag::ModuleSizeX, record.module_size_x),
            (FieldTag::ModuleSizeY, record.module_size_y),
            (FieldTag::Skew, record.skew),
            (FieldTag::BarcodeWidth, record.barcode_width),
            (FieldTag::BarcodeHeight, record.barcode_height),
        ];
        for (tag, value) in floats {
            if let Some(value) = value {
                w = w.float(tag, value);
            }
        }
        if record.pdf417.truncated {
            w = w.flag(FieldTag::PdfTruncated, true);
        }
        if let Some(words) = &record.pdf417.codewords {
            w = w.codewords(words);
        }
        if let Some(input) = &record.parser_input {
            w = w.field(FieldTag::ParserInput, input);
        }
        w
    }
}

/// Builds a whole result buffer.
#[derive(Debug, Clone)]
pub struct ResultBufferWriter {
    version: u8,
    records: Vec<RecordWriter>,
}

impl ResultBufferWriter {
    pub fn new(version: u8) -> Self {
        Self {
            version,
            records: Vec::new(),
        }
    }

    /// # Panics
    /// If more than 255 records are added.
    pub fn record(mut self, record: RecordWriter) -> Self {
        assert!(self.records.len() < usize::from(u8::MAX), "too many records");
        self.records.push(record);
        self
    }

    pub fn finish(self) -> Vec<u8> {
        let body_len: usize = self.records.iter().map(|r| 1 + r.body.len()).sum();
        let mut out = Vec::with_capacity(MAGIC.len() + 2 + body_len);
        out.extend_from_slice(MAGIC);
        out.push(self.version);
        out.push(self.records.len() as u8);
        for record in &self.records {
            out.push(record.fields);
            out.extend_from_slice(&record.body);
        }
        out
    }

    pub fn into_buffer(self) -> RawResultBuffer {
        RawResultBuffer::from(self.finish())
    }
}

/// Encode a whole result set; the header count is the number of records.
pub fn encode(set: &ResultSet) -> Vec<u8> {
    set.records
        .iter()
        .fold(ResultBufferWriter::new(set.version), |w, r| {
            w.record(RecordWriter::from_record(r))
        })
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PointF;

    #[test]
    fn hello_matches_hand_written_layout() {
        let buf = ResultBufferWriter::new(1)
            .record(RecordWriter::new().raw_field(0x02, b"", b"HELLO"))
            .finish();
        assert_eq!(
            buf,
            b"MWR\x01\x01\x01\x02\x00\x05\x00HELLO".to_vec()
        );
    }

    #[test]
    fn full_record_round_trips() {
        let record = ResultRecord {
            text: Some("0123456789".into()),
            text_encoding: Some("UTF-8".into()),
            bytes: Some(b"0123456789".to_vec()),
            type_code: Some(12),
            subtype: Some(1),
            success: true,
            is_gs1: true,
            location: Some(Location::from_points([
                PointF::new(0.5, 1.5),
                PointF::new(100.0, 1.5),
                PointF::new(100.0, 40.25),
                PointF::new(0.5, 40.25),
            ])),
            image_width: Some(1280),
            image_height: Some(720),
            modules_count_x: Some(69),
            modules_count_y: Some(12),
            module_size_x: Some(1.75),
            module_size_y: Some(3.0),
            skew: Some(-0.5),
            kanji: false,
            barcode_width: Some(120.5),
            barcode_height: Some(36.0),
            pdf417: crate::record::Pdf417Info {
                rows: Some(12),
                columns: Some(3),
                truncated: true,
                ec_level: Some(2),
                codewords: Some(vec![900, 1, 2, 3]),
            },
            parser_input: Some(vec![0x1d, b'0', b'1']),
        };
        let set = ResultSet {
            version: 3,
            count: 1,
            records: vec![record],
        };
        assert_eq!(ResultSet::parse(&encode(&set)).unwrap(), set);
    }

    #[test]
    fn wide_integers_use_eight_bytes() {
        let buf = ResultBufferWriter::new(1)
            .record(RecordWriter::new().uint(FieldTag::ImageWidth, u64::from(u32::MAX) + 1))
            .finish();
        let set = ResultSet::parse(&buf).unwrap();
        assert_eq!(set.records[0].image_width, Some(1 << 32));
    }
}
