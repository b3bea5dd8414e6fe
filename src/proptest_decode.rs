//! Property-based tests for tiling and result decoding
//!
//! Tiling must always cover the image with in-bounds regions, and the
//! decoder must never panic or read past the buffer, whatever bytes the
//! engine hands back.

use crate::encoder::encode;
use crate::error::DecodeError;
use crate::geometry::tiles_to_regions;
use crate::record::{Location, Pdf417Info, PointF, ResultRecord, ResultSet};
use proptest::prelude::*;

const EPSILON: f32 = 1e-3;

fn finite_f32() -> impl Strategy<Value = f32> {
    -1.0e6f32..1.0e6f32
}

prop_compose! {
    fn arb_location()(c in prop::array::uniform8(finite_f32())) -> Location {
        Location::from_points([
            PointF::new(c[0], c[1]),
            PointF::new(c[2], c[3]),
            PointF::new(c[4], c[5]),
            PointF::new(c[6], c[7]),
        ])
    }
}

prop_compose! {
    fn arb_pdf417()(
        rows in prop::option::of(1u64..90),
        columns in prop::option::of(1u64..30),
        truncated in any::<bool>(),
        ec_level in prop::option::of(0u64..9),
        codewords in prop::option::of(prop::collection::vec(any::<u32>(), 0..40)),
    ) -> Pdf417Info {
        Pdf417Info { rows, columns, truncated, ec_level, codewords }
    }
}

prop_compose! {
    fn arb_record()(
        text in prop::option::of("\\PC{0,40}"),
        text_encoding in prop::option::of("[A-Z0-9-]{1,12}"),
        bytes in prop::option::of(prop::collection::vec(any::<u8>(), 0..64)),
        type_code in prop::option::of(0u64..64),
        subtype in prop::option::of(any::<u64>()),
        flags in any::<(bool, bool, bool)>(),
        location in prop::option::of(arb_location()),
        dims in any::<(Option<u64>, Option<u64>, Option<u64>, Option<u64>)>(),
        sizes in prop::array::uniform5(prop::option::of(finite_f32())),
        pdf417 in arb_pdf417(),
        parser_input in prop::option::of(prop::collection::vec(any::<u8>(), 0..32)),
    ) -> ResultRecord {
        let (success, is_gs1, kanji) = flags;
        let (image_width, image_height, modules_count_x, modules_count_y) = dims;
        let [module_size_x, module_size_y, skew, barcode_width, barcode_height] = sizes;
        ResultRecord {
            text,
            text_encoding,
            bytes,
            type_code,
            subtype,
            success,
            is_gs1,
            location,
            image_width,
            image_height,
            modules_count_x,
            modules_count_y,
            module_size_x,
            module_size_y,
            skew,
            kanji,
            barcode_width,
            barcode_height,
            pdf417,
            parser_input,
        }
    }
}

prop_compose! {
    fn arb_set()(version in any::<u8>(), records in prop::collection::vec(arb_record(), 0..6))
        -> ResultSet
    {
        ResultSet { version, count: records.len() as u8, records }
    }
}

proptest! {
    /// Tiling yields one in-bounds, positive region per tile, row by row
    #[test]
    fn prop_tiles_cover_image(tx in 1i32..=12, ty in 1i32..=12, overlap in 0i32..100) {
        let regions = tiles_to_regions(tx, ty, overlap).unwrap();
        prop_assert_eq!(regions.len(), (tx * ty) as usize);

        for r in &regions {
            prop_assert!(r.width() > 0.0 && r.height() > 0.0);
            prop_assert!(r.left() >= 0.0 && r.top() >= 0.0);
            prop_assert!(r.right() <= 100.0 + EPSILON);
            prop_assert!(r.bottom() <= 100.0 + EPSILON);
        }

        for (i, pair) in regions.windows(2).enumerate() {
            if (i + 1) % tx as usize == 0 {
                prop_assert!(pair[1].top() > pair[0].top() || ty == 1);
                prop_assert_eq!(pair[1].left(), 0.0);
            } else {
                prop_assert!(pair[1].left() > pair[0].left());
                prop_assert_eq!(pair[1].top(), pair[0].top());
            }
        }
    }

    /// Without overlap the tiles touch but do not overlap
    #[test]
    fn prop_zero_overlap_partitions(tx in 1i32..=10, ty in 1i32..=10) {
        let regions = tiles_to_regions(tx, ty, 0).unwrap();
        let area: f32 = regions.iter().map(|r| r.width() * r.height()).sum();
        prop_assert!((area - 10_000.0).abs() < 1.0);
    }

    /// Arbitrary bytes decode or fail, never panic
    #[test]
    fn prop_arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = ResultSet::parse(&bytes);
    }

    /// Same, but past the magic check so the record parser is exercised
    #[test]
    fn prop_arbitrary_body_never_panics(
        header in prop::array::uniform2(any::<u8>()),
        body in prop::collection::vec(any::<u8>(), 0..512),
    ) {
        let mut bytes = b"MWR".to_vec();
        bytes.extend_from_slice(&header);
        bytes.extend_from_slice(&body);
        let _ = ResultSet::parse(&bytes);
    }

    /// Encoded sets decode to the same values
    #[test]
    fn prop_encode_decode_roundtrip(set in arb_set()) {
        let bytes = encode(&set);
        let decoded = ResultSet::parse(&bytes).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(decoded, set);
    }

    /// Every proper prefix of a valid buffer is reported as truncated
    #[test]
    fn prop_truncation_is_detected(set in arb_set(), cut in any::<prop::sample::Index>()) {
        let bytes = encode(&set);
        let cut = cut.index(bytes.len());
        let result = ResultSet::parse(&bytes[..cut]);
        prop_assert!(
            matches!(result, Err(DecodeError::Truncated { .. })),
            "cut at {} of {}: {:?}", cut, bytes.len(), result
        );
    }

    /// Anything that is not `MWR` is rejected up front
    #[test]
    fn prop_bad_magic(magic in prop::array::uniform3(any::<u8>()), rest in prop::collection::vec(any::<u8>(), 0..16)) {
        prop_assume!(&magic != b"MWR");
        let mut bytes = magic.to_vec();
        bytes.extend_from_slice(&rest);
        prop_assert_eq!(ResultSet::parse(&bytes), Err(DecodeError::BadMagic));
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::encoder::{RecordWriter, ResultBufferWriter};

    #[test]
    fn test_spec_hello_buffer() {
        let bytes = b"MWR\x01\x01\x01\x02\x00\x05\x00HELLO";
        let set = ResultSet::parse(bytes).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.records[0].text.as_deref(), Some("HELLO"));
    }

    #[test]
    fn test_two_by_one_tiles() {
        let regions = tiles_to_regions(2, 1, 10).unwrap();
        let rects: Vec<_> = regions
            .iter()
            .map(|r| (r.left(), r.top(), r.width(), r.height()))
            .collect();
        assert_eq!(rects, vec![(0.0, 0.0, 55.0, 100.0), (45.0, 0.0, 55.0, 100.0)]);
    }

    #[test]
    fn test_every_prefix_of_multi_record_buffer() {
        let bytes = ResultBufferWriter::new(2)
            .record(RecordWriter::new().text("first").uint(crate::decoder::FieldTag::Type, 7))
            .record(RecordWriter::new().codewords(&[1, 2, 3]))
            .finish();
        for cut in 0..bytes.len() {
            assert!(matches!(
                ResultSet::parse(&bytes[..cut]),
                Err(DecodeError::Truncated { .. })
            ));
        }
        assert_eq!(ResultSet::parse(&bytes).unwrap().len(), 2);
    }
}
