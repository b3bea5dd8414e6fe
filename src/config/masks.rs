//! Bit masks and setting values understood by the engine

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Set of symbologies, as passed to `setActiveCodes` and per-code setters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CodeMask(pub u32);

impl CodeMask {
    pub const NONE: CodeMask = CodeMask(0);
    pub const QR: CodeMask = CodeMask(0x0000_0001);
    pub const DM: CodeMask = CodeMask(0x0000_0002);
    pub const RSS: CodeMask = CodeMask(0x0000_0004);
    pub const CODE_39: CodeMask = CodeMask(0x0000_0008);
    pub const EANUPC: CodeMask = CodeMask(0x0000_0010);
    pub const CODE_128: CodeMask = CodeMask(0x0000_0020);
    pub const PDF: CodeMask = CodeMask(0x0000_0040);
    pub const AZTEC: CodeMask = CodeMask(0x0000_0080);
    pub const CODE_25: CodeMask = CodeMask(0x0000_0100);
    pub const CODE_93: CodeMask = CodeMask(0x0000_0200);
    pub const CODABAR: CodeMask = CodeMask(0x0000_0400);
    pub const DOTCODE: CodeMask = CodeMask(0x0000_0800);
    pub const CODE_11: CodeMask = CodeMask(0x0000_1000);
    pub const MSI: CodeMask = CodeMask(0x0000_2000);
    pub const MAXICODE: CodeMask = CodeMask(0x0000_4000);
    pub const POSTAL: CodeMask = CodeMask(0x0000_8000);
    pub const TELEPEN: CodeMask = CodeMask(0x0001_0000);
    pub const ALL: CodeMask = CodeMask(0x00ff_ffff);

    const NAMES: [(&'static str, CodeMask); 19] = [
        ("none", Self::NONE),
        ("qr", Self::QR),
        ("datamatrix", Self::DM),
        ("rss", Self::RSS),
        ("code39", Self::CODE_39),
        ("eanupc", Self::EANUPC),
        ("code128", Self::CODE_128),
        ("pdf417", Self::PDF),
        ("aztec", Self::AZTEC),
        ("code25", Self::CODE_25),
        ("code93", Self::CODE_93),
        ("codabar", Self::CODABAR),
        ("dotcode", Self::DOTCODE),
        ("code11", Self::CODE_11),
        ("msi", Self::MSI),
        ("maxicode", Self::MAXICODE),
        ("postal", Self::POSTAL),
        ("telepen", Self::TELEPEN),
        ("all", Self::ALL),
    ];

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: CodeMask) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn without(self, other: CodeMask) -> CodeMask {
        CodeMask(self.0 & !other.0)
    }

    /// Look up a symbology group by its short name (`qr`, `pdf417`, ...).
    pub fn from_name(name: &str) -> Option<CodeMask> {
        let name = name.trim().to_ascii_lowercase();
        Self::NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, mask)| mask)
    }

    /// Parse a comma separated list of names into one mask.
    pub fn parse_list(list: &str) -> Result<CodeMask, String> {
        list.split(',')
            .filter(|s| !s.trim().is_empty())
            .try_fold(CodeMask::NONE, |acc, name| {
                Self::from_name(name)
                    .map(|mask| acc | mask)
                    .ok_or_else(|| format!("unknown symbology '{}'", name.trim()))
            })
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::NAMES.iter().map(|(n, _)| *n)
    }
}

impl BitOr for CodeMask {
    type Output = CodeMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        CodeMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for CodeMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for CodeMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CodeMask({:#x})", self.0)
    }
}

/// Subcode masks, per symbology group.
pub mod subcode {
    pub const RSS_14: u32 = 0x01;
    pub const RSS_14_STACK: u32 = 0x02;
    pub const RSS_LIMITED: u32 = 0x04;
    pub const RSS_EXPANDED: u32 = 0x08;

    pub const QR_STANDARD: u32 = 0x01;
    pub const QR_MICRO: u32 = 0x02;

    pub const PDF_STANDARD: u32 = 0x01;
    pub const PDF_MICRO: u32 = 0x02;

    pub const C25_INTERLEAVED: u32 = 0x01;
    pub const C25_STANDARD: u32 = 0x02;
    pub const C25_ITF14: u32 = 0x04;
    pub const C25_IATA: u32 = 0x08;
    pub const C25_MATRIX: u32 = 0x10;
    pub const C25_COOP: u32 = 0x20;
    pub const C25_INVERTED: u32 = 0x40;

    pub const POSTAL_POSTNET: u32 = 0x01;
    pub const POSTAL_PLANET: u32 = 0x02;
    pub const POSTAL_IM: u32 = 0x04;
    pub const POSTAL_ROYAL: u32 = 0x08;
    pub const POSTAL_AUSTRALIAN: u32 = 0x10;

    pub const EANUPC_EAN_13: u32 = 0x01;
    pub const EANUPC_EAN_8: u32 = 0x02;
    pub const EANUPC_UPC_A: u32 = 0x04;
    pub const EANUPC_UPC_E: u32 = 0x08;
    pub const EANUPC_UPC_E1: u32 = 0x10;
}

/// Flags set with a code mask of 0, affecting every symbology.
pub mod global {
    pub const HORIZONTAL_SHARPENING: u32 = 0x001;
    pub const VERTICAL_SHARPENING: u32 = 0x002;
    pub const SHARPENING: u32 = 0x003;
    pub const ROTATE90: u32 = 0x004;
    pub const ROTATE180: u32 = 0x008;
    pub const CALCULATE_1D_LOCATION: u32 = 0x010;
    pub const VERIFY_1D_LOCATION: u32 = 0x020;
    pub const USE_CENTRIC_SCANNING: u32 = 0x040;
    pub const DISABLE_PREPROCESSING: u32 = 0x080;
    pub const ENABLE_MULTI: u32 = 0x100;
    pub const SCANLINES_X2: u32 = 0x200;
    pub const SCANLINES_X4: u32 = 0x400;
    pub const SCANLINES_X8: u32 = 0x800;
}

/// Per-symbology flags.
pub mod flag {
    pub const CODE39_REQUIRE_CHECKSUM: u32 = 0x02;
    pub const CODE39_DONT_REQUIRE_STOP: u32 = 0x04;
    pub const CODE39_EXTENDED_MODE: u32 = 0x08;
    pub const CODE39_CODE32_ENABLED: u32 = 0x10;
    pub const CODE39_CODE32_PREFIX: u32 = 0x20;

    pub const CODE93_EXTENDED_MODE: u32 = 0x08;

    pub const EANUPC_DISABLE_ADDON: u32 = 0x01;
    pub const EANUPC_DONT_EXPAND_UPCE: u32 = 0x02;

    pub const CODE25_REQ_CHKSUM: u32 = 0x01;
    pub const CODE25_REQ_CHKSUM_STANDARD: u32 = 0x02;
    pub const CODE25_REQ_CHKSUM_INTERLEAVED: u32 = 0x04;
    pub const CODE25_REQ_CHKSUM_IATA: u32 = 0x08;
    pub const CODE25_REQ_CHKSUM_MATRIX: u32 = 0x10;
    pub const CODE25_REQ_CHKSUM_COOP: u32 = 0x20;
    pub const CODE25_REQ_CHKSUM_INVERTED: u32 = 0x40;

    pub const CODE11_REQ_SINGLE_CHKSUM: u32 = 0x01;
    pub const CODE11_REQ_DOUBLE_CHKSUM: u32 = 0x02;

    pub const MSI_REQ_10_CHKSUM: u32 = 0x01;
    pub const MSI_REQ_1010_CHKSUM: u32 = 0x02;
    pub const MSI_REQ_11_IBM_CHKSUM: u32 = 0x04;
    pub const MSI_REQ_11_NCR_CHKSUM: u32 = 0x08;
    pub const MSI_REQ_1110_IBM_CHKSUM: u32 = 0x10;
    pub const MSI_REQ_1110_NCR_CHKSUM: u32 = 0x20;

    pub const CODABAR_INCLUDE_STARTSTOP: u32 = 0x01;
    pub const DM_DPM_MODE: u32 = 0x02;
    pub const TELEPEN_FORCE_NUMERIC: u32 = 0x01;
}

/// Parameter ids and values for `setParam`.
pub mod param {
    pub const ECI_MODE: u32 = 0x08;
    pub const RESULT_PREFIX: u32 = 0x10;
    pub const VERIFY_LOCATION: u32 = 0x20;
    pub const SCAN_COLOR: u32 = 0x40;
    pub const SAFE_ZONE_SCALE: u32 = 0x80;

    pub const ECI_DISABLED: u32 = 0x00;
    pub const ECI_ENABLED: u32 = 0x01;
    pub const RESULT_PREFIX_NEVER: u32 = 0x00;
    pub const RESULT_PREFIX_ALWAYS: u32 = 0x01;
    pub const RESULT_PREFIX_DEFAULT: u32 = 0x02;
    pub const VERIFY_LOCATION_OFF: u32 = 0x00;
    pub const VERIFY_LOCATION_ON: u32 = 0x01;
    pub const COLOR_NORMAL: u32 = 0x01;
    pub const COLOR_INVERTED: u32 = 0x02;
    pub const COLOR_BOTH: u32 = 0x04;
}

/// Scan directions for `setDirection`.
pub mod direction {
    pub const HORIZONTAL: u32 = 0x01;
    pub const VERTICAL: u32 = 0x02;
    pub const OMNI: u32 = 0x04;
    pub const AUTODETECT: u32 = 0x08;
    pub const CUSTOM: u32 = 0x10;
}

/// Output format selected with `setResultType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultType {
    /// Decoded bytes only.
    Raw = 1,
    /// The tagged `MWR` format with full metadata.
    #[default]
    Mw = 2,
}

impl ResultType {
    pub fn code(self) -> u32 {
        self as u32
    }
}
