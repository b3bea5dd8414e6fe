//! Decoding hand-assembled result buffers through the public API

use mwscan::encoder::{RecordWriter, ResultBufferWriter};
use mwscan::{decode, BarcodeType, DecodeError, PointF, RawResultBuffer, ResultSet};

/// One field as the engine lays it out.
fn field(tag: u8, name: &str, content: &[u8]) -> Vec<u8> {
    let mut out = vec![tag, name.len() as u8];
    out.extend_from_slice(name.as_bytes());
    out.extend_from_slice(&(content.len() as u16).to_le_bytes());
    out.extend_from_slice(content);
    out
}

fn record(fields: &[Vec<u8>]) -> Vec<u8> {
    let mut out = vec![fields.len() as u8];
    for f in fields {
        out.extend_from_slice(f);
    }
    out
}

fn buffer(records: &[Vec<u8>]) -> Vec<u8> {
    let mut out = b"MWR".to_vec();
    out.push(2);
    out.push(records.len() as u8);
    for r in records {
        out.extend_from_slice(r);
    }
    out
}

fn corners(values: [f32; 8]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn qr_record() -> Vec<u8> {
    record(&[
        field(0x01, "Bytes", b"https://example.com"),
        field(0x02, "Text", b"https://example.com"),
        field(0x03, "Type", &13u32.to_le_bytes()),
        field(0x05, "Success", &1u32.to_le_bytes()),
        field(0x06, "GS1 compliance", &0u32.to_le_bytes()),
        field(
            0x07,
            "Location",
            &corners([10.0, 20.0, 110.0, 20.0, 110.0, 120.0, 10.0, 120.0]),
        ),
        field(0x08, "Image Width", &640u32.to_le_bytes()),
        field(0x09, "Image Height", &480u32.to_le_bytes()),
        field(0x0B, "Modules Count X", &25u32.to_le_bytes()),
        field(0x0C, "Modules Count Y", &25u32.to_le_bytes()),
        field(0x0D, "Module Size X", &4.0f32.to_le_bytes()),
        field(0x0E, "Module Size Y", &4.0f32.to_le_bytes()),
        field(0x0F, "Skew", &0.5f32.to_le_bytes()),
        field(0x13, "Text Encoding", b"UTF-8"),
        field(0x0A, "Parser Input", b"https://example.com"),
    ])
}

fn pdf_record() -> Vec<u8> {
    let mut words = 3u32.to_le_bytes().to_vec();
    for w in [900u32, 12, 345] {
        words.extend_from_slice(&w.to_le_bytes());
    }
    record(&[
        field(0x02, "Text", b"ANSI 636000090002DL"),
        field(0x03, "Type", &12u32.to_le_bytes()),
        field(0x20, "PDF Rows", &20u32.to_le_bytes()),
        field(0x21, "PDF Columns", &6u32.to_le_bytes()),
        field(0x22, "PDF Truncated", &0u32.to_le_bytes()),
        field(0x23, "PDF ECLevel", &5u32.to_le_bytes()),
        field(0x24, "PDF Codewords", &words),
    ])
}

#[test]
fn test_engine_style_qr_record() {
    let set = ResultSet::parse(&buffer(&[qr_record()])).unwrap();
    assert_eq!(set.version, 2);
    assert_eq!(set.len(), 1);

    let qr = &set.records[0];
    assert_eq!(qr.barcode_type(), Some(BarcodeType::Qr));
    assert_eq!(qr.type_name(), "QR");
    assert_eq!(qr.text.as_deref(), Some("https://example.com"));
    assert_eq!(qr.bytes.as_deref(), Some(&b"https://example.com"[..]));
    assert_eq!(qr.text_encoding.as_deref(), Some("UTF-8"));
    assert!(qr.success);
    assert!(!qr.is_gs1);
    assert_eq!((qr.image_width, qr.image_height), (Some(640), Some(480)));
    assert_eq!((qr.modules_count_x, qr.modules_count_y), (Some(25), Some(25)));
    assert_eq!(qr.module_size_x, Some(4.0));
    assert_eq!(qr.skew, Some(0.5));

    let location = qr.location.unwrap();
    assert_eq!(location.top_left, PointF::new(10.0, 20.0));
    assert_eq!(location.bottom_right, PointF::new(110.0, 120.0));
    assert!(qr.pdf417.is_empty());
}

#[test]
fn test_pdf417_record_with_codewords() {
    let set = ResultSet::parse(&buffer(&[qr_record(), pdf_record()])).unwrap();
    assert_eq!(set.len(), 2);

    let pdf = &set.records[1];
    assert_eq!(pdf.barcode_type(), Some(BarcodeType::Pdf417));
    assert_eq!(pdf.pdf417.rows, Some(20));
    assert_eq!(pdf.pdf417.columns, Some(6));
    assert!(!pdf.pdf417.truncated);
    assert_eq!(pdf.pdf417.ec_level, Some(5));
    assert_eq!(pdf.pdf417.codewords.as_deref(), Some(&[900, 12, 345][..]));
}

#[test]
fn test_owned_buffer_decode() {
    let raw = RawResultBuffer::from(buffer(&[pdf_record()]));
    let set = decode(raw).unwrap();
    assert_eq!(set.records[0].display_text(), "ANSI 636000090002DL");
}

#[test]
fn test_no_partial_set_on_truncation() {
    let mut bytes = buffer(&[qr_record(), pdf_record()]);
    bytes.truncate(bytes.len() - 1);
    assert!(matches!(
        ResultSet::parse(&bytes),
        Err(DecodeError::Truncated { .. })
    ));
}

#[test]
fn test_declared_count_beyond_records() {
    let mut bytes = buffer(&[qr_record()]);
    bytes[4] = 2;
    let err = ResultSet::parse(&bytes).unwrap_err();
    assert_eq!(
        err,
        DecodeError::Truncated {
            offset: bytes.len(),
            needed: 1,
            available: 0
        }
    );
}

#[test]
fn test_future_tags_are_skipped() {
    let rec = record(&[
        field(0x7F, "Future Field", &[1, 2, 3, 4, 5, 6]),
        field(0x02, "Text", b"still here"),
    ]);
    let set = ResultSet::parse(&buffer(&[rec])).unwrap();
    assert_eq!(set.records[0].text.as_deref(), Some("still here"));
}

#[test]
fn test_writer_matches_engine_layout() {
    let written = ResultBufferWriter::new(2)
        .record(
            RecordWriter::new()
                .text("HELLO")
                .uint(mwscan::decoder::FieldTag::Type, 13),
        )
        .finish();
    let expected = buffer(&[record(&[
        field(0x02, "Text", b"HELLO"),
        field(0x03, "Type", &13u32.to_le_bytes()),
    ])]);
    assert_eq!(written, expected);
}

#[test]
fn test_error_messages() {
    assert_eq!(
        ResultSet::parse(b"XYZ\x01\x00").unwrap_err().to_string(),
        "result buffer does not start with \"MWR\""
    );
}
