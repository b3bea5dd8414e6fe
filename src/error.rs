//! Error types and engine status codes

use std::fmt;

use thiserror::Error;

/// Errors returned by the scanning layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Tile, overlap or region parameters are out of range.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(&'static str),

    /// A caller-side argument was rejected before reaching the engine.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// The engine reported a negative status. The code is passed through untouched.
    #[error("engine returned status {0} ({desc})", desc = describe_status(.0))]
    Engine(i32),

    /// The engine reported more bytes than the scratch buffer holds.
    ///
    /// Memory next to the buffer has already been written by the time this is
    /// detected, so the buffer contents must not be used.
    #[error("engine wrote {len} bytes into a {capacity} byte buffer")]
    BufferOverrunFatal { len: usize, capacity: usize },

    /// The result buffer could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Errors produced while decoding an `MWR` result buffer.
///
/// Decoding stops at the first error; no partial result set is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("result buffer does not start with \"MWR\"")]
    BadMagic,

    #[error("result buffer truncated at offset {offset}: need {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("corrupt result buffer at offset {offset}: {reason}")]
    Corrupt { offset: usize, reason: &'static str },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

fn describe_status(code: &i32) -> &'static str {
    EngineStatus::describe(*code)
}

/// Generic return values of the engine's functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    Ok,
    Fail,
    NotSupported,
    BadParam,
    Other(i32),
}

impl EngineStatus {
    pub const OK: i32 = 0;
    pub const FAIL: i32 = -1;
    pub const NOT_SUPPORTED: i32 = -2;
    pub const BAD_PARAM: i32 = -3;

    pub fn from_code(code: i32) -> Self {
        match code {
            Self::OK => Self::Ok,
            Self::FAIL => Self::Fail,
            Self::NOT_SUPPORTED => Self::NotSupported,
            Self::BAD_PARAM => Self::BadParam,
            other => Self::Other(other),
        }
    }

    /// Human readable description of a status code.
    pub fn describe(code: i32) -> &'static str {
        match Self::from_code(code) {
            Self::Ok => "ok",
            Self::Fail => "failed",
            Self::NotSupported => "not supported",
            Self::BadParam => "bad parameter",
            Self::Other(c) if c >= 0 => "ok",
            Self::Other(_) => "unknown failure",
        }
    }
}

/// Outcome of registering the license key with the engine.
///
/// A non-OK registration is not fatal: the engine keeps working but masks
/// decoded text and may refuse licensed features such as multi-code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStatus {
    Ok,
    InvalidKey,
    InvalidChecksum,
    InvalidApplication,
    InvalidSdkVersion,
    InvalidKeyVersion,
    InvalidPlatform,
    KeyExpired,
    AimerRequired,
    AimerNotDetected,
    CustomSizeExceeded,
    Unknown(i32),
}

impl RegistrationStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Ok,
            -1 => Self::InvalidKey,
            -2 => Self::InvalidChecksum,
            -3 => Self::InvalidApplication,
            -4 => Self::InvalidSdkVersion,
            -5 => Self::InvalidKeyVersion,
            -6 => Self::InvalidPlatform,
            -7 => Self::KeyExpired,
            -8 => Self::AimerRequired,
            -9 => Self::AimerNotDetected,
            -100 => Self::CustomSizeExceeded,
            other => Self::Unknown(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::InvalidKey => -1,
            Self::InvalidChecksum => -2,
            Self::InvalidApplication => -3,
            Self::InvalidSdkVersion => -4,
            Self::InvalidKeyVersion => -5,
            Self::InvalidPlatform => -6,
            Self::KeyExpired => -7,
            Self::AimerRequired => -8,
            Self::AimerNotDetected => -9,
            Self::CustomSizeExceeded => -100,
            Self::Unknown(code) => code,
        }
    }

    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "registered"),
            Self::InvalidKey => write!(f, "invalid license key"),
            Self::InvalidChecksum => write!(f, "invalid key checksum"),
            Self::InvalidApplication => write!(f, "key not valid for this application"),
            Self::InvalidSdkVersion => write!(f, "key not valid for this SDK version"),
            Self::InvalidKeyVersion => write!(f, "unsupported key version"),
            Self::InvalidPlatform => write!(f, "key not valid for this platform"),
            Self::KeyExpired => write!(f, "license key expired"),
            Self::AimerRequired => write!(f, "aimer required"),
            Self::AimerNotDetected => write!(f, "aimer not detected"),
            Self::CustomSizeExceeded => write!(f, "custom data size exceeded"),
            Self::Unknown(code) => write!(f, "unknown registration status {code}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_error_keeps_status_verbatim() {
        let err = Error::Engine(-3);
        assert_eq!(err, Error::Engine(EngineStatus::BAD_PARAM));
        assert_eq!(err.to_string(), "engine returned status -3 (bad parameter)");

        let odd = Error::Engine(-42);
        assert_eq!(odd.to_string(), "engine returned status -42 (unknown failure)");
    }

    #[test]
    fn registration_codes_round_trip() {
        for code in [0, -1, -2, -3, -4, -5, -6, -7, -8, -9, -100, -55] {
            assert_eq!(RegistrationStatus::from_code(code).code(), code);
        }
        assert!(RegistrationStatus::from_code(0).is_ok());
        assert_eq!(
            RegistrationStatus::from_code(-7),
            RegistrationStatus::KeyExpired
        );
    }

    #[test]
    fn decode_error_converts_into_error() {
        let err: Error = DecodeError::BadMagic.into();
        assert!(matches!(err, Error::Decode(DecodeError::BadMagic)));
    }
}
