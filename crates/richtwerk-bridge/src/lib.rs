// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// richtwerk-bridge — Native C ABI surface for host applications.
//
// Exposes the contour renderer and the marker rectifier over a plain
// foreign-function interface (`version`, `process_image`,
// `create_rectified_image`) so mobile and desktop hosts can drive the
// pipelines through dlopen/FFI without linking Rust directly.

pub mod ffi;

pub use ffi::{create_rectified_image, process_image, version};
