//! Result parsers offered by the engine
//!
//! A record's parser input can be run through one of the engine's parsers to
//! get structured output (GS1 application identifiers, AAMVA driver license
//! fields, ...) as JSON or formatted text. See
//! [`crate::Scanner::format_parser_input`].

use std::fmt;
use std::str::FromStr;

/// Parser selection passed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParserMask {
    #[default]
    None,
    Gs1,
    Iuid,
    Isbt,
    Aamva,
    Hibc,
    Scm,
}

impl ParserMask {
    pub const ALL: [ParserMask; 7] = [
        Self::None,
        Self::Gs1,
        Self::Iuid,
        Self::Isbt,
        Self::Aamva,
        Self::Hibc,
        Self::Scm,
    ];

    pub fn bits(self) -> u32 {
        match self {
            Self::None => 0x00,
            Self::Gs1 => 0x01,
            Self::Iuid => 0x02,
            Self::Isbt => 0x04,
            Self::Aamva => 0x08,
            Self::Hibc => 0x10,
            Self::Scm => 0x20,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gs1 => "gs1",
            Self::Iuid => "iuid",
            Self::Isbt => "isbt",
            Self::Aamva => "aamva",
            Self::Hibc => "hibc",
            Self::Scm => "scm",
        }
    }

    pub fn is_none(self) -> bool {
        self == Self::None
    }
}

impl fmt::Display for ParserMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParserMask {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.name() == lower)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|p| p.name()).collect();
                format!("unknown parser '{s}', expected one of: {}", known.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_back() {
        for parser in ParserMask::ALL {
            assert_eq!(parser.name().parse::<ParserMask>(), Ok(parser));
        }
        assert_eq!("GS1".parse::<ParserMask>(), Ok(ParserMask::Gs1));
        assert!("ean".parse::<ParserMask>().is_err());
    }

    #[test]
    fn bits_are_distinct() {
        assert_eq!(ParserMask::None.bits(), 0);
        assert_eq!(ParserMask::Aamva.bits(), 8);
        let combined = ParserMask::ALL.iter().fold(0, |acc, p| acc | p.bits());
        assert_eq!(combined, 0x3f);
    }
}
