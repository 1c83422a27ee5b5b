// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// C ABI exports. Symbol names are fixed — host applications resolve them
// by name at load time.

use std::ffi::{CStr, c_char};
use std::sync::Once;
use std::time::Instant;

use richtwerk_core::error::{Result, RichtwerkError};
use richtwerk_vision::{ContourRenderer, Rectifier};
use tracing::{error, info};

/// Identity string handed back over the FFI boundary. NUL-terminated so it
/// can be returned as a C string without allocation.
static VERSION: &str = concat!("richtwerk ", env!("CARGO_PKG_VERSION"), "\0");

static LOGGING: Once = Once::new();

/// Install the process-wide tracing subscriber on first use. Honours
/// `RUST_LOG`, defaults to `info`. Safe to race — losing the installation
/// race is fine, some subscriber is active either way.
fn ensure_logging() {
    LOGGING.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    });
}

/// Borrow a filesystem path from a C string pointer.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
unsafe fn path_from_ptr(ptr: *const c_char, what: &str) -> Result<String> {
    if ptr.is_null() {
        return Err(RichtwerkError::Bridge(format!("{what} path pointer is null")));
    }
    let cstr = unsafe { CStr::from_ptr(ptr) };
    cstr.to_str()
        .map(str::to_owned)
        .map_err(|err| RichtwerkError::Bridge(format!("{what} path is not valid UTF-8: {err}")))
}

/// Library identity string. No side effects.
#[unsafe(no_mangle)]
pub extern "C" fn version() -> *const c_char {
    VERSION.as_ptr() as *const c_char
}

/// Load a grayscale image from `input_path`, run the contour renderer, and
/// write the overlay to `output_path`. Failures are logged and leave no
/// output artifact; the call itself never reports status.
///
/// # Safety
/// Both pointers must be null or valid NUL-terminated strings for the
/// duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn process_image(input_path: *const c_char, output_path: *const c_char) {
    ensure_logging();
    let start = Instant::now();
    match unsafe { run_process_image(input_path, output_path) } {
        Ok(()) => {
            info!(elapsed_ms = start.elapsed().as_millis() as u64, "Processing done");
        }
        Err(err) => error!(error = %err, "Processing failed"),
    }
}

unsafe fn run_process_image(input: *const c_char, output: *const c_char) -> Result<()> {
    let input = unsafe { path_from_ptr(input, "input") }?;
    let output = unsafe { path_from_ptr(output, "output") }?;
    ContourRenderer::new().render_file(input, output)
}

/// Load a grayscale image from `input_path`, rectify it from its four
/// corner markers, and write the result to `output_path`.
///
/// Returns the library identity string on success (the completion signal
/// hosts already expect) and null on failure; failures are also logged and
/// leave no output artifact.
///
/// # Safety
/// Both pointers must be null or valid NUL-terminated strings for the
/// duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn create_rectified_image(
    input_path: *const c_char,
    output_path: *const c_char,
) -> *const c_char {
    ensure_logging();
    let start = Instant::now();
    match unsafe { run_create_rectified_image(input_path, output_path) } {
        Ok(()) => {
            info!(elapsed_ms = start.elapsed().as_millis() as u64, "Rectifying done");
            version()
        }
        Err(err) => {
            error!(error = %err, "Rectifying failed");
            std::ptr::null()
        }
    }
}

unsafe fn run_create_rectified_image(input: *const c_char, output: *const c_char) -> Result<()> {
    let input = unsafe { path_from_ptr(input, "input") }?;
    let output = unsafe { path_from_ptr(output, "output") }?;
    Rectifier::new().rectify_file(input, output)
}

// -- Tests --------------------------------------------------------------------
