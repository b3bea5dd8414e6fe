//! Symbology marker types and their capabilities
//!
//! One zero-sized type per symbology group the engine can enable. The
//! capability traits restrict which settings the builder accepts for each.

use super::*;

/// QR Code and Micro QR
#[derive(Debug, Clone, Copy)]
pub struct QrCode;

/// Data Matrix
#[derive(Debug, Clone, Copy)]
pub struct DataMatrix;

/// GS1 DataBar (RSS) family
#[derive(Debug, Clone, Copy)]
pub struct Databar;

/// Code 39 (and Code 32 through flags)
#[derive(Debug, Clone, Copy)]
pub struct Code39;

/// EAN-13, EAN-8, UPC-A, UPC-E
#[derive(Debug, Clone, Copy)]
pub struct EanUpc;

/// Code 128 (and GS1-128)
#[derive(Debug, Clone, Copy)]
pub struct Code128;

/// PDF417 and Micro PDF417
#[derive(Debug, Clone, Copy)]
pub struct Pdf417;

/// Aztec
#[derive(Debug, Clone, Copy)]
pub struct Aztec;

/// 2 of 5 family: interleaved, standard, ITF-14, IATA, matrix, COOP, inverted
#[derive(Debug, Clone, Copy)]
pub struct Code25;

/// Code 93
#[derive(Debug, Clone, Copy)]
pub struct Code93;

/// Codabar
#[derive(Debug, Clone, Copy)]
pub struct Codabar;

/// DotCode
#[derive(Debug, Clone, Copy)]
pub struct Dotcode;

/// Code 11
#[derive(Debug, Clone, Copy)]
pub struct Code11;

/// MSI Plessey
#[derive(Debug, Clone, Copy)]
pub struct Msi;

/// MaxiCode
#[derive(Debug, Clone, Copy)]
pub struct Maxicode;

/// Postal codes: Postnet, Planet, Intelligent Mail, Royal Mail, Australian
#[derive(Debug, Clone, Copy)]
pub struct Postal;

/// Telepen
#[derive(Debug, Clone, Copy)]
pub struct Telepen;

macro_rules! symbology {
    ($($ty:ident => $mask:ident, $name:literal;)*) => {
        $(
            impl Symbology for $ty {
                const MASK: CodeMask = CodeMask::$mask;
                const NAME: &'static str = $name;
            }
        )*
    };
}

symbology! {
    QrCode => QR, "QR Code";
    DataMatrix => DM, "Data Matrix";
    Databar => RSS, "GS1 DataBar";
    Code39 => CODE_39, "Code 39";
    EanUpc => EANUPC, "EAN/UPC";
    Code128 => CODE_128, "Code 128";
    Pdf417 => PDF, "PDF417";
    Aztec => AZTEC, "Aztec";
    Code25 => CODE_25, "Code 2 of 5";
    Code93 => CODE_93, "Code 93";
    Codabar => CODABAR, "Codabar";
    Dotcode => DOTCODE, "DotCode";
    Code11 => CODE_11, "Code 11";
    Msi => MSI, "MSI Plessey";
    Maxicode => MAXICODE, "MaxiCode";
    Postal => POSTAL, "Postal";
    Telepen => TELEPEN, "Telepen";
}

// Groups with selectable variants
impl SupportsSubcodes for QrCode {}
impl SupportsSubcodes for Databar {}
impl SupportsSubcodes for EanUpc {}
impl SupportsSubcodes for Pdf417 {}
impl SupportsSubcodes for Code25 {}
impl SupportsSubcodes for Postal {}

// Variable-length linear codes
impl SupportsMinLength for Code39 {}
impl SupportsMinLength for Code128 {}
impl SupportsMinLength for Code25 {}
impl SupportsMinLength for Code93 {}
impl SupportsMinLength for Codabar {}
impl SupportsMinLength for Code11 {}
impl SupportsMinLength for Msi {}
impl SupportsMinLength for Telepen {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_are_distinct_single_bits() {
        let masks = [
            QrCode::MASK,
            DataMatrix::MASK,
            Databar::MASK,
            Code39::MASK,
            EanUpc::MASK,
            Code128::MASK,
            Pdf417::MASK,
            Aztec::MASK,
            Code25::MASK,
            Code93::MASK,
            Codabar::MASK,
            Dotcode::MASK,
            Code11::MASK,
            Msi::MASK,
            Maxicode::MASK,
            Postal::MASK,
            Telepen::MASK,
        ];
        let mut seen = 0u32;
        for mask in masks {
            assert_eq!(mask.bits().count_ones(), 1);
            assert_eq!(seen & mask.bits(), 0);
            seen |= mask.bits();
        }
        assert!(CodeMask::ALL.contains(CodeMask(seen)));
    }
}
