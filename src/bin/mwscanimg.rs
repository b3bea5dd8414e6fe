//! Command-line barcode scanner
//!
//! Scans image files with the linked native engine and prints what it finds.
//!
//! Build with: `cargo build --features native --bin mwscanimg`

use std::process;
use std::time::Instant;

use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use mwscan::config::{CodeMask, EngineConfig};
use mwscan::{tiles_to_regions, Backend, FormatKind, Image, ParserMask, Scanner};

/// Scan and decode barcodes from one or more image files
#[derive(Parser)]
#[command(name = "mwscanimg")]
#[command(version)]
#[command(about = "Scan and decode barcodes from one or more image files", long_about = None)]
struct Args {
    /// Effort level (1-5)
    #[arg(short, long, default_value_t = 4, value_parser = clap::value_parser!(i32).range(1..=5))]
    effort: i32,

    /// Report every barcode in the image instead of the first one
    #[arg(short, long)]
    multi: bool,

    /// Split the image into overlapping tiles and scan them in parallel
    #[arg(short, long)]
    tiles: bool,

    /// Tile columns
    #[arg(short = 'x', long, default_value_t = 6)]
    tiles_x: i32,

    /// Tile rows
    #[arg(short = 'y', long, default_value_t = 6)]
    tiles_y: i32,

    /// Tile overlap, percent of the tile size
    #[arg(short, long, default_value_t = 6)]
    overlap: i32,

    /// Maximum engine threads when scanning tiles
    #[arg(short = 'r', long, default_value_t = 4)]
    max_threads: u32,

    /// Only print the number of barcodes found
    #[arg(short, long)]
    suppress: bool,

    /// Comma-separated symbologies to enable (e.g. "qr,pdf417,code128")
    #[arg(long, default_value = "all", value_parser = CodeMask::parse_list)]
    codes: CodeMask,

    /// Run a result parser over each barcode (gs1, iuid, isbt, aamva, hibc, scm)
    #[arg(long, default_value = "none")]
    parser: ParserMask,

    /// Print parser output as JSON instead of formatted text
    #[arg(long)]
    json: bool,

    /// License key; results are masked without one
    #[arg(long, env = "MWSCAN_LICENSE_KEY", hide_env_values = true)]
    key: Option<String>,

    /// Log engine calls to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Image files to scan
    #[arg(required = true)]
    files: Vec<String>,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = EngineConfig::new()
        .disable_all()
        .enable_mask(args.codes)
        .effort_level(args.effort)
        .multi_code(args.multi);
    if let Some(key) = &args.key {
        config = config.license_key(key.clone());
    }

    let scanner = match Scanner::with_config(Backend::native(), &config) {
        Ok(scanner) => scanner,
        Err(e) => {
            eprintln!("Failed to configure engine: {}", e);
            process::exit(1);
        }
    };
    match scanner.registration() {
        Some(status) if !status.is_ok() => warn!(%status, "license registration failed"),
        Some(status) => debug!(%status, "license registered"),
        None => warn!("no license key given, results will be masked"),
    }
    info!(version = %scanner.engine_version(), "engine ready");

    let regions = if args.tiles {
        match tiles_to_regions(args.tiles_x, args.tiles_y, args.overlap) {
            Ok(regions) => Some(regions),
            Err(e) => {
                eprintln!("Invalid tiling: {}", e);
                process::exit(1);
            }
        }
    } else {
        None
    };

    let kind = if args.json {
        FormatKind::Json
    } else {
        FormatKind::Text
    };

    let mut total = 0;

    for filename in &args.files {
        let img = match ::image::open(filename) {
            Ok(img) => img,
            Err(e) => {
                eprintln!("Failed to load image '{}': {}", filename, e);
                process::exit(1);
            }
        };

        let gray = img.to_luma8();
        let (width, height) = gray.dimensions();
        let image = match Image::from_gray(gray.as_raw(), width, height) {
            Ok(image) => image,
            Err(e) => {
                eprintln!("Unusable image '{}': {}", filename, e);
                process::exit(1);
            }
        };

        let started = Instant::now();
        let results = match scanner.scan_and_decode(&image, regions.as_deref(), args.max_threads) {
            Ok(results) => results,
            Err(mwscan::Error::Engine(code)) => {
                println!("No barcodes found, decoder returned {}", code);
                continue;
            }
            Err(e) => {
                eprintln!("Scan of '{}' failed: {}", filename, e);
                process::exit(1);
            }
        };
        info!(file = %filename, elapsed_ms = started.elapsed().as_millis() as u64, "decoded");

        if results.is_empty() {
            println!("No barcodes found, decoder returned 0");
            continue;
        }

        total += results.len();
        println!("Total barcodes detected: {}", results.len());
        if args.suppress {
            continue;
        }

        for (i, record) in results.iter().enumerate() {
            println!("{}: ({}) {}", i + 1, record.type_name(), record.display_text());

            if args.parser.is_none() {
                continue;
            }
            let Some(input) = &record.parser_input else {
                continue;
            };
            match scanner.format_parser_input(args.parser.bits(), kind, input) {
                Ok(parsed) if !parsed.is_empty() => {
                    let text = String::from_utf8_lossy(parsed.as_bytes());
                    println!("  Parsed Result: {}", text.trim_end_matches('\0'));
                }
                Ok(_) => debug!(parser = %args.parser, "parser produced no output"),
                Err(e) => warn!(parser = %args.parser, error = %e, "parser failed"),
            }
        }
    }

    if total == 0 {
        process::exit(1);
    }
}
