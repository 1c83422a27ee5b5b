// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// richtwerk-vision — Image processing for the Richtwerk scan bridge.
//
// Provides the contour renderer (adaptive binarization + contour hierarchy
// overlay), corner-tag fiducial marker support (codec, detector, renderer),
// and the perspective rectifier that straightens a photographed document
// from its four corner markers.

pub mod contours;
pub mod io;
pub mod marker;
pub mod rectify;
pub mod threshold;

// Re-export the primary types so callers can use `richtwerk_vision::Rectifier` etc.
pub use contours::{ContourRenderer, ContourStyle};
pub use marker::detector::{CornerTagDetector, DetectorConfig, MarkerDetector};
pub use marker::renderer::{draw_detected_markers, draw_marker};
pub use rectify::{Rectifier, rectifying_projection};
pub use threshold::{BinarizeOptions, adaptive_threshold_inv};
