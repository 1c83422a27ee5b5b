// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Richtwerk — Core types and error definitions shared across all crates.

pub mod error;
pub mod types;

pub use error::{RichtwerkError, Result};
pub use types::*;
