fn main() {
    println!("cargo:rerun-if-env-changed=MWSCAN_LIB_DIR");
    println!("cargo:rerun-if-env-changed=MWSCAN_LIB_NAME");

    // Nothing to link unless the native engine binding is requested.
    if std::env::var_os("CARGO_FEATURE_NATIVE").is_none() {
        return;
    }

    if let Some(dir) = std::env::var_os("MWSCAN_LIB_DIR") {
        println!(
            "cargo:rustc-link-search=native={}",
            std::path::Path::new(&dir).display()
        );
    }

    // The engine ships as `BarcodeScanner` or, on some 64-bit targets,
    // `BarcodeScanner64`.
    let lib = std::env::var("MWSCAN_LIB_NAME").unwrap_or_else(|_| "BarcodeScanner".to_string());
    println!("cargo:rustc-link-lib=dylib={lib}");
}
