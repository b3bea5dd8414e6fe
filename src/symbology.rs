//! Symbology type codes reported by the engine

use std::fmt::Display;

/// Barcode symbology as reported in the type field of a result record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum BarcodeType {
    #[default]
    None = 0,
    DataMatrix = 1,
    Code39 = 2,
    Databar14 = 3,
    Databar14Stacked = 4,
    DatabarLimited = 5,
    DatabarExpanded = 6,
    Ean13 = 7,
    Ean8 = 8,
    UpcA = 9,
    UpcE = 10,
    Code128 = 11,
    Pdf417 = 12,
    Qr = 13,
    Aztec = 14,
    Code25Interleaved = 15,
    Code25Standard = 16,
    Code93 = 17,
    Codabar = 18,
    Dotcode = 19,
    Code128Gs1 = 20,
    Itf14 = 21,
    Code11 = 22,
    MsiPlessey = 23,
    Code25Iata = 24,
    Code25Matrix = 25,
    Code25Coop = 26,
    Code25Inverted = 27,
    MicroQr = 28,
    Maxicode = 29,
    Postnet = 30,
    Planet = 31,
    IntelligentMail = 32,
    RoyalMail = 33,
    MicroPdf417 = 34,
    Code32 = 35,
    Australian = 36,
    Telepen = 37,
}

impl BarcodeType {
    /// Look up a type code; `None` for codes this table does not know.
    pub fn from_code(code: u64) -> Option<Self> {
        Some(match code {
            0 => Self::None,
            1 => Self::DataMatrix,
            2 => Self::Code39,
            3 => Self::Databar14,
            4 => Self::Databar14Stacked,
            5 => Self::DatabarLimited,
            6 => Self::DatabarExpanded,
            7 => Self::Ean13,
            8 => Self::Ean8,
            9 => Self::UpcA,
            10 => Self::UpcE,
            11 => Self::Code128,
            12 => Self::Pdf417,
            13 => Self::Qr,
            14 => Self::Aztec,
            15 => Self::Code25Interleaved,
            16 => Self::Code25Standard,
            17 => Self::Code93,
            18 => Self::Codabar,
            19 => Self::Dotcode,
            20 => Self::Code128Gs1,
            21 => Self::Itf14,
            22 => Self::Code11,
            23 => Self::MsiPlessey,
            24 => Self::Code25Iata,
            25 => Self::Code25Matrix,
            26 => Self::Code25Coop,
            27 => Self::Code25Inverted,
            28 => Self::MicroQr,
            29 => Self::Maxicode,
            30 => Self::Postnet,
            31 => Self::Planet,
            32 => Self::IntelligentMail,
            33 => Self::RoyalMail,
            34 => Self::MicroPdf417,
            35 => Self::Code32,
            36 => Self::Australian,
            37 => Self::Telepen,
            _ => return None,
        })
    }

    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::DataMatrix => "Datamatrix",
            Self::Code39 => "Code 39",
            Self::Databar14 => "Databar 14",
            Self::Databar14Stacked => "Databar 14 Stacked",
            Self::DatabarLimited => "Databar Limited",
            Self::DatabarExpanded => "Databar Expanded",
            Self::Ean13 => "EAN 13",
            Self::Ean8 => "EAN 8",
            Self::UpcA => "UPC A",
            Self::UpcE => "UPC E",
            Self::Code128 => "Code 128",
            Self::Pdf417 => "PDF417",
            Self::Qr => "QR",
            Self::Aztec => "AZTEC",
            Self::Code25Interleaved => "Code 25 Interleaved",
            Self::Code25Standard => "Code 25 Standard",
            Self::Code93 => "Code 93",
            Self::Codabar => "Codabar",
            Self::Dotcode => "Dotcode",
            Self::Code128Gs1 => "Code 128 GS1",
            Self::Itf14 => "ITF 14",
            Self::Code11 => "Code 11",
            Self::MsiPlessey => "MSI Plessey",
            Self::Code25Iata => "IATA Code 25",
            Self::Code25Matrix => "Code 2/5 Matrix",
            Self::Code25Coop => "Code 2/5 COOP",
            Self::Code25Inverted => "Code 2/5 Inverted",
            Self::MicroQr => "Micro QR",
            Self::Maxicode => "Maxicode",
            Self::Postnet => "Postnet",
            Self::Planet => "Planet",
            Self::IntelligentMail => "Intelligent mail",
            Self::RoyalMail => "Royal mail",
            Self::MicroPdf417 => "Micro PDF417",
            Self::Code32 => "Code 32",
            Self::Australian => "Australian",
            Self::Telepen => "Telepen",
        }
    }
}

/// Name for a raw type code, `"Unknown"` when the code is not in the table.
pub fn type_name(code: u64) -> &'static str {
    BarcodeType::from_code(code).map_or("Unknown", BarcodeType::name)
}

impl Display for BarcodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<BarcodeType> for u32 {
    fn from(value: BarcodeType) -> Self {
        value.code()
    }
}
