//! Raw declarations of the `libenkf` analysis iteration config functions.

#![allow(non_camel_case_types)]

use libc::{c_char, c_double, c_int};
use std::marker::{PhantomData, PhantomPinned};

/// Opaque `analysis_iter_config_type` owned by the library.
#[repr(C)]
pub struct analysis_iter_config_type {
    _data: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

#[link(name = "enkf")]
unsafe extern "C" {
    pub fn analysis_iter_config_alloc() -> *mut analysis_iter_config_type;
    pub fn analysis_iter_config_free(config: *mut analysis_iter_config_type);

    pub fn analysis_iter_config_get_rerun(config: *const analysis_iter_config_type) -> bool;
    pub fn analysis_iter_config_set_rerun(config: *mut analysis_iter_config_type, rerun: bool);

    pub fn analysis_iter_config_get_rerun_start(
        config: *const analysis_iter_config_type,
    ) -> c_int;
    pub fn analysis_iter_config_set_rerun_start(
        config: *mut analysis_iter_config_type,
        rerun_start: c_int,
    );

    pub fn analysis_iter_config_get_log_path(
        config: *const analysis_iter_config_type,
    ) -> *const c_char;
    pub fn analysis_iter_config_set_log_path(
        config: *mut analysis_iter_config_type,
        log_path: *const c_char,
    );

    pub fn analysis_iter_config_get_alpha(config: *const analysis_iter_config_type) -> c_double;
    pub fn analysis_iter_config_set_alpha(config: *mut analysis_iter_config_type, alpha: c_double);

    pub fn analysis_iter_config_get_merge_observations(
        config: *const analysis_iter_config_type,
    ) -> bool;
    pub fn analysis_iter_config_set_merge_observations(
        config: *mut analysis_iter_config_type,
        merge_observations: bool,
    );

    pub fn analysis_iter_config_get_num_iterations(
        config: *const analysis_iter_config_type,
    ) -> c_int;
    pub fn analysis_iter_config_set_num_iterations(
        config: *mut analysis_iter_config_type,
        num_iterations: c_int,
    );

    pub fn analysis_iter_config_get_case_fmt(
        config: *const analysis_iter_config_type,
    ) -> *const c_char;
    pub fn analysis_iter_config_set_case_fmt(
        config: *mut analysis_iter_config_type,
        case_fmt: *const c_char,
    );

    pub fn analysis_iter_config_get_runpath_fmt(
        config: *const analysis_iter_config_type,
    ) -> *const c_char;
    pub fn analysis_iter_config_set_runpath_fmt(
        config: *mut analysis_iter_config_type,
        runpath_fmt: *const c_char,
    );
}
