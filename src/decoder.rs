//! Decoder for the engine's `MWR` result format
//!
//! Layout, all multi-byte values little-endian:
//!
//! ```text
//! "MWR" version:u8 count:u8
//! count x { fields:u8, fields x { tag:u8 name_len:u8 name[name_len] len:u16 content[len] } }
//! ```
//!
//! Every length is checked against the bytes that remain before anything is
//! sliced, and decoding stops at the first problem without returning a
//! partial set.

use byteorder::{ByteOrder, LittleEndian};
use tracing::trace;

use crate::buffer::RawResultBuffer;
use crate::error::DecodeError;
use crate::record::{Location, PointF, ResultRecord, ResultSet};

/// Magic bytes at the start of every result buffer.
pub const MAGIC: &[u8; 3] = b"MWR";

/// Size of the buffer header: magic, version, record count.
pub const HEADER_LEN: usize = 5;

/// Fixed part of a field: tag, name length, content length.
pub const FIELD_OVERHEAD: usize = 4;

const LOCATION_LEN: usize = 32;

/// Field tags of the result format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldTag {
    Bytes,
    Text,
    Type,
    Subtype,
    Success,
    IsGs1,
    Location,
    ImageWidth,
    ImageHeight,
    ParserInput,
    ModulesCountX,
    ModulesCountY,
    ModuleSizeX,
    ModuleSizeY,
    Skew,
    Kanji,
    BarcodeWidth,
    BarcodeHeight,
    TextEncoding,
    PdfRows,
    PdfColumns,
    PdfTruncated,
    PdfEcLevel,
    PdfCodewords,
    Unknown(u8),
}

impl FieldTag {
    pub fn code(self) -> u8 {
        match self {
            Self::Bytes => 0x01,
            Self::Text => 0x02,
            Self::Type => 0x03,
            Self::Subtype => 0x04,
            Self::Success => 0x05,
            Self::IsGs1 => 0x06,
            Self::Location => 0x07,
            Self::ImageWidth => 0x08,
            Self::ImageHeight => 0x09,
            Self::ParserInput => 0x0A,
            Self::ModulesCountX => 0x0B,
            Self::ModulesCountY => 0x0C,
            Self::ModuleSizeX => 0x0D,
            Self::ModuleSizeY => 0x0E,
            Self::Skew => 0x0F,
            Self::Kanji => 0x10,
            Self::BarcodeWidth => 0x11,
            Self::BarcodeHeight => 0x12,
            Self::TextEncoding => 0x13,
            Self::PdfRows => 0x20,
            Self::PdfColumns => 0x21,
            Self::PdfTruncated => 0x22,
            Self::PdfEcLevel => 0x23,
            Self::PdfCodewords => 0x24,
            Self::Unknown(code) => code,
        }
    }

    /// Field name the engine writes next to the tag.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bytes => "Bytes",
            Self::Text => "Text",
            Self::Type => "Type",
            Self::Subtype => "Subtype",
            Self::Success => "Success",
            Self::IsGs1 => "GS1 compliance",
            Self::Location => "Location",
            Self::ImageWidth => "Image Width",
            Self::ImageHeight => "Image Height",
            Self::ParserInput => "Parser Input",
            Self::ModulesCountX => "Modules Count X",
            Self::ModulesCountY => "Modules Count Y",
            Self::ModuleSizeX => "Module Size X",
            Self::ModuleSizeY => "Module Size Y",
            Self::Skew => "Skew",
            Self::Kanji => "Kanji",
            Self::BarcodeWidth => "Barcode Width",
            Self::BarcodeHeight => "Barcode Height",
            Self::TextEncoding => "Text Encoding",
            Self::PdfRows => "PDF Rows",
            Self::PdfColumns => "PDF Columns",
            Self::PdfTruncated => "PDF Truncated",
            Self::PdfEcLevel => "PDF ECLevel",
            Self::PdfCodewords => "PDF Codewords",
            Self::Unknown(_) => "",
        }
    }
}

impl From<u8> for FieldTag {
    fn from(code: u8) -> Self {
        match code {
            0x01 => Self::Bytes,
            0x02 => Self::Text,
            0x03 => Self::Type,
            0x04 => Self::Subtype,
            0x05 => Self::Success,
            0x06 => Self::IsGs1,
            0x07 => Self::Location,
            0x08 => Self::ImageWidth,
            0x09 => Self::ImageHeight,
            0x0A => Self::ParserInput,
            0x0B => Self::ModulesCountX,
            0x0C => Self::ModulesCountY,
            0x0D => Self::ModuleSizeX,
            0x0E => Self::ModuleSizeY,
            0x0F => Self::Skew,
            0x10 => Self::Kanji,
            0x11 => Self::BarcodeWidth,
            0x12 => Self::BarcodeHeight,
            0x13 => Self::TextEncoding,
            0x20 => Self::PdfRows,
            0x21 => Self::PdfColumns,
            0x22 => Self::PdfTruncated,
            0x23 => Self::PdfEcLevel,
            0x24 => Self::PdfCodewords,
            other => Self::Unknown(other),
        }
    }
}

/// Decode a buffer produced by the engine.
pub fn decode(buffer: RawResultBuffer) -> Result<ResultSet, DecodeError> {
    ResultSet::parse(buffer.as_bytes())
}

impl ResultSet {
    /// Parse a result buffer from a byte slice.
    pub fn parse(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = Reader::new(bytes);

        if reader.take(MAGIC.len())? != MAGIC {
            return Err(DecodeError::BadMagic);
        }
        let version = reader.u8()?;
        let count = reader.u8()?;
        trace!(version, count, len = bytes.len(), "result header");

        let mut records = Vec::with_capacity(usize::from(count));
        for index in 0..count {
            let record = read_record(&mut reader)?;
            trace!(index, type_code = ?record.type_code, "decoded record");
            records.push(record);
        }

        if reader.remaining() > 0 {
            trace!(
                offset = reader.pos,
                ignored = reader.remaining(),
                "trailing bytes after last record"
            );
        }

        Ok(ResultSet {
            version,
            count,
            records,
        })
    }
}

fn read_record(reader: &mut Reader<'_>) -> Result<ResultRecord, DecodeError> {
    let field_count = reader.u8()?;
    let mut record = ResultRecord::default();

    for _ in 0..field_count {
        let start = reader.pos;
        let tag = FieldTag::from(reader.u8()?);
        let name_len = usize::from(reader.u8()?);
        reader.take(name_len)?;
        let content_len = usize::from(reader.u16()?);
        let content_offset = reader.pos;
        let content = reader.take(content_len)?;

        apply_field(&mut record, tag, content, content_offset)?;

        if reader.pos != start + FIELD_OVERHEAD + name_len + content_len {
            return Err(DecodeError::Corrupt {
                offset: start,
                reason: "field length does not match its header",
            });
        }
        trace!(offset = start, tag = tag.code(), len = content_len, "field");
    }

    Ok(record)
}

fn apply_field(
    record: &mut ResultRecord,
    tag: FieldTag,
    content: &[u8],
    offset: usize,
) -> Result<(), DecodeError> {
    let field = Field { content, offset };
    match tag {
        FieldTag::Bytes => record.bytes = Some(content.to_vec()),
        FieldTag::Text => record.text = Some(field.utf8()?),
        FieldTag::Type => record.type_code = Some(field.uint()?),
        FieldTag::Subtype => record.subtype = Some(field.uint()?),
        FieldTag::Success => record.success = field.uint()? > 0,
        FieldTag::IsGs1 => record.is_gs1 = field.uint()? > 0,
        FieldTag::Location => record.location = Some(field.location()?),
        FieldTag::ImageWidth => record.image_width = Some(field.uint()?),
        FieldTag::ImageHeight => record.image_height = Some(field.uint()?),
        FieldTag::ParserInput => record.parser_input = Some(content.to_vec()),
        FieldTag::ModulesCountX => record.modules_count_x = Some(field.uint()?),
        FieldTag::ModulesCountY => record.modules_count_y = Some(field.uint()?),
        FieldTag::ModuleSizeX => record.module_size_x = Some(field.f32()?),
        FieldTag::ModuleSizeY => record.module_size_y = Some(field.f32()?),
        FieldTag::Skew => record.skew = Some(field.f32()?),
        FieldTag::Kanji => record.kanji = field.uint()? > 0,
        FieldTag::BarcodeWidth => record.barcode_width = Some(field.f32()?),
        FieldTag::BarcodeHeight => record.barcode_height = Some(field.f32()?),
        FieldTag::TextEncoding => record.text_encoding = Some(field.utf8()?),
        FieldTag::PdfRows => record.pdf417.rows = Some(field.uint()?),
        FieldTag::PdfColumns => record.pdf417.columns = Some(field.uint()?),
        FieldTag::PdfTruncated => record.pdf417.truncated = field.uint()? > 0,
        FieldTag::PdfEcLevel => record.pdf417.ec_level = Some(field.uint()?),
        FieldTag::PdfCodewords => record.pdf417.codewords = Some(field.codewords()?),
        FieldTag::Unknown(code) => {
            trace!(offset, tag = code, len = content.len(), "skipping unknown field");
        }
    }
    Ok(())
}

/// Bounds-checked cursor over the whole buffer.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let available = self.remaining();
        if n > available {
            return Err(DecodeError::Truncated {
                offset: self.pos,
                needed: n,
                available,
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, DecodeError> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }
}

/// Content of a single field and where it starts in the buffer.
struct Field<'a> {
    content: &'a [u8],
    offset: usize,
}

impl Field<'_> {
    fn corrupt(&self, reason: &'static str) -> DecodeError {
        DecodeError::Corrupt {
            offset: self.offset,
            reason,
        }
    }

    fn uint(&self) -> Result<u64, DecodeError> {
        match self.content.len() {
            1..=8 => Ok(LittleEndian::read_uint(self.content, self.content.len())),
            _ => Err(self.corrupt("integer field must be 1 to 8 bytes")),
        }
    }

    fn f32(&self) -> Result<f32, DecodeError> {
        if self.content.len() != 4 {
            return Err(self.corrupt("float field must be 4 bytes"));
        }
        Ok(LittleEndian::read_f32(self.content))
    }

    fn utf8(&self) -> Result<String, DecodeError> {
        std::str::from_utf8(self.content)
            .map(str::to_owned)
            .map_err(|_| self.corrupt("text is not valid UTF-8"))
    }

    fn location(&self) -> Result<Location, DecodeError> {
        if self.content.len() != LOCATION_LEN {
            return Err(self.corrupt("location must be 8 floats"));
        }
        let mut coords = [0f32; 8];
        LittleEndian::read_f32_into(self.content, &mut coords);
        Ok(Location::from_points([
            PointF::new(coords[0], coords[1]),
            PointF::new(coords[2], coords[3]),
            PointF::new(coords[4], coords[5]),
            PointF::new(coords[6], coords[7]),
        ]))
    }

    fn codewords(&self) -> Result<Vec<u32>, DecodeError> {
        if self.content.len() < 4 {
            return Err(self.corrupt("codeword list is missing its count"));
        }
        let count = LittleEndian::read_u32(self.content) as usize;
        let body = &self.content[4..];
        let needed = count
            .checked_mul(4)
            .filter(|&n| n <= body.len())
            .ok_or_else(|| self.corrupt("codeword list longer than its field"))?;
        let mut words = vec![0u32; count];
        LittleEndian::read_u32_into(&body[..needed], &mut words);
        Ok(words)
    }
}
