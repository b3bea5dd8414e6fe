//! Walkthrough of tiling, engine configuration and result decoding
//!
//! Runs without the native engine: the scan step is replaced by a result
//! buffer assembled in place.

use mwscan::config::*;
use mwscan::decoder::FieldTag;
use mwscan::encoder::{RecordWriter, ResultBufferWriter};
use mwscan::{tiles_to_regions, ResultSet};

fn main() {
    println!("=== mwscan walkthrough ===\n");

    // 1. Tiling
    println!("1. 3 x 2 tiles with 10% overlap:");
    let regions = tiles_to_regions(3, 2, 10).unwrap();
    for (i, r) in regions.iter().enumerate() {
        let (x, y, w, h) = r.to_pixels(1920, 1080);
        println!(
            "   tile {}: left {:6.2}% top {:6.2}% size {:6.2}% x {:6.2}%  ({}x{} px at {},{})",
            i,
            r.left(),
            r.top(),
            r.width(),
            r.height(),
            w,
            h,
            x,
            y
        );
    }
    println!();

    // 2. Invalid tiling is rejected before anything reaches the engine
    println!("2. Rejected tilings:");
    for (tx, ty, overlap) in [(0, 2, 10), (2, 2, 100), (2, 2, -1)] {
        match tiles_to_regions(tx, ty, overlap) {
            Ok(_) => println!("   {tx} x {ty} @ {overlap}%: accepted"),
            Err(e) => println!("   {tx} x {ty} @ {overlap}%: {e}"),
        }
    }
    println!();

    // 3. Engine configuration
    println!("3. Configuration for dense shipping labels:");
    let config = EngineConfig::new()
        .disable_all()
        .enable(QrCode)
        .enable(Pdf417)
        .enable(Code128)
        .set_min_length(Code128, 8)
        .enable_subcodes(Pdf417, subcode::PDF_STANDARD | subcode::PDF_MICRO)
        .effort_level(4)
        .multi_code(true);
    println!("   active codes: {:?}", config.active_codes());
    println!("   effort level: {}", config.effort());
    println!("   multi-code:   {}\n", config.is_multi_code());

    // 4. Decoding what the engine hands back
    println!("4. Decoding a result buffer:");
    let bytes = ResultBufferWriter::new(2)
        .record(
            RecordWriter::new()
                .text("1Z999AA10123456784")
                .uint(FieldTag::Type, 11),
        )
        .record(
            RecordWriter::new()
                .text("https://example.com/track")
                .uint(FieldTag::Type, 13),
        )
        .finish();
    let results = ResultSet::parse(&bytes).unwrap();
    println!("   Total barcodes detected: {}", results.len());
    for (i, record) in results.iter().enumerate() {
        println!("   {}: ({}) {}", i + 1, record.type_name(), record.display_text());
    }
    println!();

    // 5. Truncated output is an error, never a partial set
    println!("5. Truncated buffer:");
    match ResultSet::parse(&bytes[..bytes.len() - 3]) {
        Ok(set) => println!("   unexpectedly decoded {} records", set.len()),
        Err(e) => println!("   {e}"),
    }
}
