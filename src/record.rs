//! Decoded result records

use encoding_rs::{Encoding, UTF_8};

use crate::symbology::{type_name, BarcodeType};

/// A point in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Corners of a detected code, clockwise from top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Location {
    pub top_left: PointF,
    pub top_right: PointF,
    pub bottom_right: PointF,
    pub bottom_left: PointF,
}

impl Location {
    /// Corners in wire order: top-left, top-right, bottom-right, bottom-left.
    pub fn points(&self) -> [PointF; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    pub fn from_points(points: [PointF; 4]) -> Self {
        let [top_left, top_right, bottom_right, bottom_left] = points;
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }
}

/// PDF417 specific metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pdf417Info {
    pub rows: Option<u64>,
    pub columns: Option<u64>,
    pub truncated: bool,
    pub ec_level: Option<u64>,
    pub codewords: Option<Vec<u32>>,
}

impl Pdf417Info {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One detection as reported by the engine.
///
/// Every field except the flags is optional: the engine only emits what it
/// knows for the symbology and result type in use.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    pub text: Option<String>,
    pub text_encoding: Option<String>,
    pub bytes: Option<Vec<u8>>,
    pub type_code: Option<u64>,
    pub subtype: Option<u64>,
    pub success: bool,
    pub is_gs1: bool,
    pub location: Option<Location>,
    pub image_width: Option<u64>,
    pub image_height: Option<u64>,
    pub modules_count_x: Option<u64>,
    pub modules_count_y: Option<u64>,
    pub module_size_x: Option<f32>,
    pub module_size_y: Option<f32>,
    pub skew: Option<f32>,
    pub kanji: bool,
    pub barcode_width: Option<f32>,
    pub barcode_height: Option<f32>,
    pub pdf417: Pdf417Info,
    pub parser_input: Option<Vec<u8>>,
}

impl Default for ResultRecord {
    fn default() -> Self {
        Self {
            text: None,
            text_encoding: None,
            bytes: None,
            type_code: None,
            subtype: None,
            // Records without a success field come from engines that only
            // report successful reads.
            success: true,
            is_gs1: false,
            location: None,
            image_width: None,
            image_height: None,
            modules_count_x: None,
            modules_count_y: None,
            module_size_x: None,
            module_size_y: None,
            skew: None,
            kanji: false,
            barcode_width: None,
            barcode_height: None,
            pdf417: Pdf417Info::default(),
            parser_input: None,
        }
    }
}

impl ResultRecord {
    /// Symbology, if the record carries a known type code.
    pub fn barcode_type(&self) -> Option<BarcodeType> {
        self.type_code.and_then(BarcodeType::from_code)
    }

    /// Human readable symbology name; `"Unknown"` for unrecognized codes
    /// and `"None"` when no type field was present.
    pub fn type_name(&self) -> &'static str {
        type_name(self.type_code.unwrap_or(0))
    }

    /// Text if present, otherwise the raw bytes decoded with the record's
    /// text encoding (UTF-8 when absent or unrecognized).
    pub fn display_text(&self) -> String {
        match (&self.text, &self.bytes) {
            (Some(text), _) => text.clone(),
            (None, Some(bytes)) => {
                let encoding = self
                    .text_encoding
                    .as_deref()
                    .and_then(|label| Encoding::for_label(label.trim().as_bytes()))
                    .unwrap_or(UTF_8);
                let (text, _, _) = encoding.decode(bytes);
                text.into_owned()
            }
            (None, None) => String::new(),
        }
    }
}

/// All detections from one engine call, in buffer order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSet {
    /// Format version byte as emitted by the engine.
    pub version: u8,
    /// Record count declared in the header.
    pub count: u8,
    pub records: Vec<ResultRecord>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ResultRecord;
    type IntoIter = std::slice::Iter<'a, ResultRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for ResultSet {
    type Item = ResultRecord;
    type IntoIter = std::vec::IntoIter<ResultRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
