//! Engine configuration
//!
//! The engine keeps its settings in process-wide state. [`EngineConfig`]
//! collects them as a plain value so they can be built, inspected and applied
//! in one step, and so fake engines in tests each see their own settings.
//!
//! # Example
//!
//! ```
//! use mwscan::config::*;
//! use mwscan::EngineConfig;
//!
//! let config = EngineConfig::new()
//!     .enable(QrCode)
//!     .enable(Pdf417)
//!     .enable_subcodes(Pdf417, subcode::PDF_STANDARD | subcode::PDF_MICRO)
//!     .set_min_length(Code39, 4)
//!     .effort_level(3)
//!     .multi_code(true);
//! assert!(config.is_enabled(CodeMask::PDF));
//! ```
//!
//! Settings are checked against the symbology at compile time:
//!
//! ```compile_fail
//! # use mwscan::config::*;
//! # use mwscan::EngineConfig;
//! // Aztec has no subcodes
//! EngineConfig::new().enable_subcodes(Aztec, 1);
//! ```
//!
//! ```compile_fail
//! # use mwscan::config::*;
//! # use mwscan::EngineConfig;
//! // QR codes have no length limit
//! EngineConfig::new().set_min_length(QrCode, 4);
//! ```

use std::collections::BTreeMap;

use tracing::debug;

use crate::engine::EngineControl;
use crate::error::RegistrationStatus;
use crate::geometry::ScanRegion;
use crate::{Error, Result};

pub mod masks;
pub mod symbologies;

pub use masks::{direction, flag, global, param, subcode, CodeMask, ResultType};
pub use symbologies::*;

/// Lowest and highest effort level the engine accepts.
pub const EFFORT_LEVELS: std::ops::RangeInclusive<i32> = 1..=5;

/// Base trait for symbology marker types.
pub trait Symbology: Sized {
    const MASK: CodeMask;
    const NAME: &'static str;
}

/// Marker for groups whose variants can be selected individually.
pub trait SupportsSubcodes: Symbology {}

/// Marker for variable-length codes that accept a minimum length.
pub trait SupportsMinLength: Symbology {}

/// Settings to push to an engine.
///
/// # Example
/// ```
/// use mwscan::config::*;
///
/// let config = EngineConfig::new()
///     .disable_all()
///     .enable_mask(CodeMask::QR | CodeMask::DM)
///     .scan_direction(direction::OMNI)
///     .set_param(EanUpc, param::VERIFY_LOCATION, param::VERIFY_LOCATION_ON);
/// assert_eq!(config.direction(), direction::OMNI);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub(crate) license_key: Option<String>,
    pub(crate) active_codes: CodeMask,
    pub(crate) subcodes: BTreeMap<CodeMask, u32>,
    /// Flags keyed by code mask; `CodeMask::NONE` holds the global flags.
    pub(crate) flags: BTreeMap<CodeMask, u32>,
    pub(crate) min_lengths: BTreeMap<CodeMask, u32>,
    pub(crate) params: BTreeMap<(CodeMask, u32), u32>,
    pub(crate) scanning_rects: BTreeMap<CodeMask, ScanRegion>,
    pub(crate) effort_level: i32,
    pub(crate) direction: u32,
    pub(crate) result_type: ResultType,
    pub(crate) duplicates_timeout: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// A configuration with no symbologies enabled.
    ///
    /// By default:
    /// - effort level 2
    /// - horizontal and vertical scanning
    /// - full metadata results (`ResultType::Mw`)
    /// - no license key, so results come back masked
    pub fn new() -> Self {
        Self {
            license_key: None,
            active_codes: CodeMask::NONE,
            subcodes: BTreeMap::new(),
            flags: BTreeMap::new(),
            min_lengths: BTreeMap::new(),
            params: BTreeMap::new(),
            scanning_rects: BTreeMap::new(),
            effort_level: 2,
            direction: direction::HORIZONTAL | direction::VERTICAL,
            result_type: ResultType::Mw,
            duplicates_timeout: None,
        }
    }

    // ========================================================================
    // Symbologies
    // ========================================================================

    pub fn enable<S: Symbology>(mut self, _: S) -> Self {
        self.active_codes |= S::MASK;
        self
    }

    pub fn disable<S: Symbology>(mut self, _: S) -> Self {
        self.active_codes = self.active_codes.without(S::MASK);
        self
    }

    /// Enable every symbology in `mask`, e.g. from [`CodeMask::parse_list`].
    pub fn enable_mask(mut self, mask: CodeMask) -> Self {
        self.active_codes |= mask;
        self
    }

    pub fn disable_all(mut self) -> Self {
        self.active_codes = CodeMask::NONE;
        self
    }

    /// True when every symbology in `mask` is enabled.
    pub fn is_enabled(&self, mask: CodeMask) -> bool {
        self.active_codes.contains(mask)
    }

    pub fn active_codes(&self) -> CodeMask {
        self.active_codes
    }

    /// Restrict a group to the variants in `subcodes` (see [`subcode`]).
    pub fn enable_subcodes<S: SupportsSubcodes>(mut self, _: S, subcodes: u32) -> Self {
        self.subcodes.insert(S::MASK, subcodes);
        self
    }

    /// Replace the flags of one symbology (see [`flag`]).
    pub fn set_flags<S: Symbology>(mut self, _: S, flags: u32) -> Self {
        self.flags.insert(S::MASK, flags);
        self
    }

    /// Replace the global flags (see [`global`]).
    pub fn global_flags(mut self, flags: u32) -> Self {
        self.flags.insert(CodeMask::NONE, flags);
        self
    }

    pub fn set_min_length<S: SupportsMinLength>(mut self, _: S, min_length: u32) -> Self {
        assert!(min_length > 0, "min length must be > 0");
        self.min_lengths.insert(S::MASK, min_length);
        self
    }

    /// Set an engine parameter for one symbology (see [`param`]).
    pub fn set_param<S: Symbology>(mut self, _: S, param_id: u32, value: u32) -> Self {
        self.params.insert((S::MASK, param_id), value);
        self
    }

    /// Only look for this symbology inside `rect`.
    pub fn scanning_rect<S: Symbology>(mut self, _: S, rect: ScanRegion) -> Self {
        self.scanning_rects.insert(S::MASK, rect);
        self
    }

    // ========================================================================
    // Global settings
    // ========================================================================

    /// Effort level, 1 (fastest) to 5 (most thorough).
    pub fn effort_level(mut self, level: i32) -> Self {
        assert!(
            EFFORT_LEVELS.contains(&level),
            "effort level must be in 1..=5"
        );
        self.effort_level = level;
        self
    }

    pub fn scan_direction(mut self, direction: u32) -> Self {
        assert!(direction != 0, "at least one scan direction is required");
        self.direction = direction;
        self
    }

    pub fn result_type(mut self, result_type: ResultType) -> Self {
        self.result_type = result_type;
        self
    }

    /// Report every code in the image instead of stopping at the first.
    pub fn multi_code(mut self, enabled: bool) -> Self {
        let flags = self.flags.entry(CodeMask::NONE).or_insert(0);
        if enabled {
            *flags |= global::ENABLE_MULTI;
        } else {
            *flags &= !global::ENABLE_MULTI;
        }
        self
    }

    /// Suppress repeated reads of the same code within `timeout_ms`.
    pub fn duplicates_timeout(mut self, timeout_ms: u32) -> Self {
        self.duplicates_timeout = Some(timeout_ms);
        self
    }

    pub fn license_key(mut self, key: impl Into<String>) -> Self {
        self.license_key = Some(key.into());
        self
    }

    pub fn is_multi_code(&self) -> bool {
        self.flags
            .get(&CodeMask::NONE)
            .is_some_and(|f| f & global::ENABLE_MULTI != 0)
    }

    pub fn effort(&self) -> i32 {
        self.effort_level
    }

    pub fn direction(&self) -> u32 {
        self.direction
    }

    // ========================================================================
    // Applying
    // ========================================================================

    /// Push every setting to `engine`.
    ///
    /// Stops at the first setter that returns a negative status. A rejected
    /// license key is not an error: it is returned so the caller can warn,
    /// and the engine keeps scanning with masked results. `None` means no
    /// key was configured.
    pub fn apply<E>(&self, engine: &mut E) -> Result<Option<RegistrationStatus>>
    where
        E: EngineControl + ?Sized,
    {
        let registration = self.license_key.as_deref().map(|key| {
            let status = RegistrationStatus::from_code(engine.register_sdk(key));
            debug!(%status, "license registration");
            status
        });

        check("setActiveCodes", engine.set_active_codes(self.active_codes.bits()))?;
        for (mask, subcodes) in &self.subcodes {
            check(
                "setActiveSubcodes",
                engine.set_active_subcodes(mask.bits(), *subcodes),
            )?;
        }
        for (mask, flags) in &self.flags {
            check("setFlags", engine.set_flags(mask.bits(), *flags))?;
        }
        for (mask, len) in &self.min_lengths {
            check("setMinLength", engine.set_min_length(mask.bits(), *len))?;
        }
        for ((mask, id), value) in &self.params {
            check("setParam", engine.set_param(mask.bits(), *id, *value))?;
        }
        for (mask, rect) in &self.scanning_rects {
            check("setScanningRect", engine.set_scanning_rect(mask.bits(), *rect))?;
        }
        check("setLevel", engine.set_level(self.effort_level))?;
        check("setDirection", engine.set_direction(self.direction))?;
        check("setResultType", engine.set_result_type(self.result_type.code()))?;
        if let Some(timeout) = self.duplicates_timeout {
            check("setDuplicatesTimeout", engine.set_duplicates_timeout(timeout))?;
        }

        Ok(registration)
    }
}

fn check(call: &'static str, status: i32) -> Result<()> {
    if status < 0 {
        debug!(call, status, "engine rejected setting");
        return Err(Error::Engine(status));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every call as a string.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        fail_on: Option<&'static str>,
        registration: i32,
    }

    impl Recorder {
        fn status(&mut self, call: String) -> i32 {
            let failed = self.fail_on.is_some_and(|name| call.starts_with(name));
            self.calls.push(call);
            if failed {
                -3
            } else {
                0
            }
        }
    }

    impl EngineControl for Recorder {
        fn register_sdk(&mut self, key: &str) -> i32 {
            self.calls.push(format!("register {key}"));
            self.registration
        }
        fn set_active_codes(&mut self, mask: u32) -> i32 {
            self.status(format!("codes {mask:#x}"))
        }
        fn set_active_subcodes(&mut self, mask: u32, sub: u32) -> i32 {
            self.status(format!("subcodes {mask:#x} {sub:#x}"))
        }
        fn set_flags(&mut self, mask: u32, flags: u32) -> i32 {
            self.status(format!("flags {mask:#x} {flags:#x}"))
        }
        fn set_min_length(&mut self, mask: u32, len: u32) -> i32 {
            self.status(format!("minlen {mask:#x} {len}"))
        }
        fn set_param(&mut self, mask: u32, id: u32, value: u32) -> i32 {
            self.status(format!("param {mask:#x} {id:#x} {value}"))
        }
        fn set_level(&mut self, level: i32) -> i32 {
            self.status(format!("level {level}"))
        }
        fn set_direction(&mut self, dir: u32) -> i32 {
            self.status(format!("direction {dir:#x}"))
        }
        fn set_scanning_rect(&mut self, mask: u32, r: ScanRegion) -> i32 {
            self.status(format!("rect {mask:#x} {} {}", r.left(), r.width()))
        }
        fn set_result_type(&mut self, kind: u32) -> i32 {
            self.status(format!("result {kind}"))
        }
        fn set_duplicates_timeout(&mut self, ms: u32) -> i32 {
            self.status(format!("dup {ms}"))
        }
        fn lib_version_text(&self) -> String {
            "test".into()
        }
        fn create_regions_from_tiles(&self, _: i32, _: i32, _: i32, _: &mut [f32]) -> i32 {
            -2
        }
    }

    #[test]
    fn test_default_config() {
        let config = EngineConfig::new();
        assert_eq!(config.active_codes(), CodeMask::NONE);
        assert_eq!(config.effort(), 2);
        assert_eq!(config.direction(), 0x3);
        assert_eq!(config.result_type, ResultType::Mw);
        assert!(!config.is_multi_code());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::new()
            .enable(QrCode)
            .enable(Code39)
            .disable(QrCode)
            .multi_code(true)
            .effort_level(5);
        assert!(config.is_enabled(CodeMask::CODE_39));
        assert!(!config.is_enabled(CodeMask::QR));
        assert!(config.is_multi_code());
        assert_eq!(config.effort(), 5);

        let config = config.multi_code(false);
        assert!(!config.is_multi_code());
    }

    #[test]
    fn test_multi_code_keeps_other_global_flags() {
        let config = EngineConfig::new()
            .global_flags(global::SHARPENING)
            .multi_code(true);
        assert_eq!(
            config.flags[&CodeMask::NONE],
            global::SHARPENING | global::ENABLE_MULTI
        );
    }

    #[test]
    #[should_panic(expected = "effort level")]
    fn test_effort_level_out_of_range() {
        let _ = EngineConfig::new().effort_level(6);
    }

    #[test]
    fn test_apply_order() {
        let config = EngineConfig::new()
            .license_key("KEY")
            .enable(Pdf417)
            .enable_subcodes(Pdf417, subcode::PDF_MICRO)
            .multi_code(true)
            .set_flags(Code39, flag::CODE39_EXTENDED_MODE)
            .set_min_length(Code39, 6)
            .set_param(Code128, param::SAFE_ZONE_SCALE, 100)
            .scanning_rect(Pdf417, ScanRegion::new(0.0, 25.0, 100.0, 50.0).unwrap())
            .duplicates_timeout(500);

        let mut engine = Recorder::default();
        let registration = config.apply(&mut engine).unwrap();
        assert_eq!(registration, Some(RegistrationStatus::Ok));
        assert_eq!(
            engine.calls,
            vec![
                "register KEY",
                "codes 0x40",
                "subcodes 0x40 0x2",
                "flags 0x0 0x100",
                "flags 0x8 0x8",
                "minlen 0x8 6",
                "param 0x20 0x80 100",
                "rect 0x40 0 100",
                "level 2",
                "direction 0x3",
                "result 2",
                "dup 500",
            ]
        );
    }

    #[test]
    fn test_apply_stops_at_first_failure() {
        let mut engine = Recorder {
            fail_on: Some("level"),
            ..Default::default()
        };
        let err = EngineConfig::new().enable(QrCode).apply(&mut engine);
        assert_eq!(err, Err(Error::Engine(-3)));
        assert_eq!(engine.calls.last().map(String::as_str), Some("level 2"));
        assert!(!engine.calls.iter().any(|c| c.starts_with("direction")));
    }

    #[test]
    fn test_bad_license_is_reported_not_fatal() {
        let mut engine = Recorder {
            registration: -7,
            ..Default::default()
        };
        let registration = EngineConfig::new()
            .license_key("old")
            .apply(&mut engine)
            .unwrap();
        assert_eq!(registration, Some(RegistrationStatus::KeyExpired));

        let mut engine = Recorder::default();
        assert_eq!(EngineConfig::new().apply(&mut engine), Ok(None));
        assert!(!engine.calls.iter().any(|c| c.starts_with("register")));
    }
}
