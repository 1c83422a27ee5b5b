// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Richtwerk.

use thiserror::Error;

use crate::types::CornerRole;

/// Top-level error type for all Richtwerk operations.
///
/// Every failure is terminal for the call that raised it — there are no
/// retries anywhere in the pipeline.
#[derive(Debug, Error)]
pub enum RichtwerkError {
    // -- Input --
    #[error("failed to decode input image: {0}")]
    Decode(String),

    // -- Rectification --
    #[error("incomplete corner marker set: missing {0:?}")]
    IncompleteCorners(Vec<CornerRole>),

    #[error("degenerate corner geometry: {0}")]
    DegenerateGeometry(String),

    // -- Output --
    #[error("failed to write output image: {0}")]
    Write(String),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, RichtwerkError>;
