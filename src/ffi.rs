//! Raw bindings to the native scan engine
//!
//! The Windows build of the engine exports `MWB...` names and writes results
//! into a caller-provided buffer. Other platforms export `MWB_...` names and
//! return a `malloc`ed buffer through an out pointer.

use libc::{c_char, c_double, c_float, c_int, c_uint};

extern "C" {
    #[cfg_attr(windows, link_name = "MWBregisterSDK_pchar")]
    #[cfg_attr(not(windows), link_name = "MWB_registerSDK")]
    pub fn mwb_register_sdk(key: *const c_char) -> c_int;

    #[cfg_attr(windows, link_name = "MWBgetLibVersionText")]
    #[cfg_attr(not(windows), link_name = "MWB_getLibVersionText")]
    pub fn mwb_get_lib_version_text() -> *const c_char;

    #[cfg_attr(windows, link_name = "MWBsetActiveCodes")]
    #[cfg_attr(not(windows), link_name = "MWB_setActiveCodes")]
    pub fn mwb_set_active_codes(code_mask: c_uint) -> c_int;

    #[cfg_attr(windows, link_name = "MWBsetActiveSubcodes")]
    #[cfg_attr(not(windows), link_name = "MWB_setActiveSubcodes")]
    pub fn mwb_set_active_subcodes(code_mask: c_uint, subcode_mask: c_uint) -> c_int;

    #[cfg_attr(windows, link_name = "MWBsetFlags")]
    #[cfg_attr(not(windows), link_name = "MWB_setFlags")]
    pub fn mwb_set_flags(code_mask: c_uint, flags: c_uint) -> c_int;

    #[cfg_attr(windows, link_name = "MWBsetMinLength")]
    #[cfg_attr(not(windows), link_name = "MWB_setMinLength")]
    pub fn mwb_set_min_length(code_mask: c_uint, min_length: c_uint) -> c_int;

    #[cfg_attr(windows, link_name = "MWBsetParam")]
    #[cfg_attr(not(windows), link_name = "MWB_setParam")]
    pub fn mwb_set_param(code_mask: c_uint, param_id: c_uint, value: c_uint) -> c_int;

    #[cfg_attr(windows, link_name = "MWBsetLevel")]
    #[cfg_attr(not(windows), link_name = "MWB_setLevel")]
    pub fn mwb_set_level(level: c_int) -> c_int;

    #[cfg_attr(windows, link_name = "MWBsetDirection")]
    #[cfg_attr(not(windows), link_name = "MWB_setDirection")]
    pub fn mwb_set_direction(direction: c_uint) -> c_int;

    #[cfg_attr(windows, link_name = "MWBsetScanningRect")]
    #[cfg_attr(not(windows), link_name = "MWB_setScanningRect")]
    pub fn mwb_set_scanning_rect(
        code_mask: c_uint,
        left: c_float,
        top: c_float,
        width: c_float,
        height: c_float,
    ) -> c_int;

    #[cfg_attr(windows, link_name = "MWBsetResultType")]
    #[cfg_attr(not(windows), link_name = "MWB_setResultType")]
    pub fn mwb_set_result_type(result_type: c_uint) -> c_int;

    #[cfg_attr(windows, link_name = "MWBsetDuplicatesTimeout")]
    #[cfg_attr(not(windows), link_name = "MWB_setDuplicatesTimeout")]
    pub fn mwb_set_duplicates_timeout(timeout: c_uint) -> c_int;

    #[cfg_attr(windows, link_name = "MWBcreateRegionsFromTiles")]
    #[cfg_attr(not(windows), link_name = "MWB_createRegionsFromTiles")]
    pub fn mwb_create_regions_from_tiles(
        tiles_x: c_int,
        tiles_y: c_int,
        overlap: c_int,
        regions: *mut c_float,
    ) -> c_int;
}

#[cfg(windows)]
extern "C" {
    #[link_name = "MWBscanGrayscaleImage"]
    pub fn mwb_scan_grayscale_image(
        image: *const u8,
        width: c_int,
        height: c_int,
        out: *mut u8,
    ) -> c_int;

    #[link_name = "MWBscanGrayscaleRegions"]
    pub fn mwb_scan_grayscale_regions(
        image: *const u8,
        width: c_int,
        height: c_int,
        regions: *const c_float,
        count: c_int,
        max_threads: c_int,
        out: *mut u8,
    ) -> c_int;

    #[link_name = "MWPgetJSON"]
    pub fn mwp_get_json(parser: c_int, input: *const u8, len: c_int, out: *mut u8) -> c_double;

    #[link_name = "MWPgetFormattedText"]
    pub fn mwp_get_formatted_text(
        parser: c_int,
        input: *const u8,
        len: c_int,
        out: *mut u8,
    ) -> c_double;
}

#[cfg(not(windows))]
extern "C" {
    #[link_name = "MWB_scanGrayscaleImage"]
    pub fn mwb_scan_grayscale_image(
        image: *const u8,
        width: c_int,
        height: c_int,
        out: *mut *mut u8,
    ) -> c_int;

    #[link_name = "MWB_scanGrayscaleRegions"]
    pub fn mwb_scan_grayscale_regions(
        image: *const u8,
        width: c_int,
        height: c_int,
        regions: *const c_float,
        count: c_int,
        max_threads: c_int,
        out: *mut *mut u8,
    ) -> c_int;

    #[link_name = "MWP_getJSON"]
    pub fn mwp_get_json(
        parser: c_int,
        input: *const u8,
        len: c_int,
        out: *mut *mut u8,
    ) -> c_double;

    #[link_name = "MWP_getFormattedText"]
    pub fn mwp_get_formatted_text(
        parser: c_int,
        input: *const u8,
        len: c_int,
        out: *mut *mut u8,
    ) -> c_double;
}
