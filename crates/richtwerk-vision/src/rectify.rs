// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Perspective rectification — classifies detected corner markers into the
// four document corner roles and warps the quadrilateral they span onto the
// full image rectangle.

use image::{GrayImage, Luma};
use imageproc::geometric_transformations::{Interpolation, Projection, warp};
use richtwerk_core::error::{Result, RichtwerkError};
use richtwerk_core::types::{CornerAssignment, Point};
use tracing::{debug, info, instrument, warn};

use crate::io;
use crate::marker::detector::{CornerTagDetector, DetectorConfig, MarkerDetector};

/// Perspective transform mapping a source quadrilateral (ordered top-left,
/// top-right, bottom-right, bottom-left) onto the bounds of a `width` x
/// `height` image, in the same cyclic order.
///
/// Point correspondence is positional, so the winding of both sequences must
/// match exactly. Fails with `DegenerateGeometry` when the source points are
/// collinear or coincident and no transform exists.
pub fn rectifying_projection(source: [Point; 4], width: u32, height: u32) -> Result<Projection> {
    let destination: [Point; 4] = [
        (0.0, 0.0),
        ((width - 1) as f32, 0.0),
        ((width - 1) as f32, (height - 1) as f32),
        (0.0, (height - 1) as f32),
    ];
    Projection::from_control_points(source, destination).ok_or_else(|| {
        RichtwerkError::DegenerateGeometry(format!(
            "no perspective transform exists for corners {source:?}"
        ))
    })
}

/// Straightens a photographed document from its four corner markers.
///
/// Detection is delegated to the injected [`MarkerDetector`]; the rectifier
/// itself owns only the corner-role classification, the completeness guard,
/// and the warp. Output dimensions always equal input dimensions.
pub struct Rectifier<D = CornerTagDetector> {
    detector: D,
}

impl Rectifier<CornerTagDetector> {
    /// Rectifier backed by the built-in corner-tag detector.
    pub fn new() -> Self {
        Self {
            detector: CornerTagDetector::new(),
        }
    }

    /// Built-in detector with custom tuning.
    pub fn with_config(config: DetectorConfig) -> Self {
        Self {
            detector: CornerTagDetector::with_config(config),
        }
    }
}

impl Default for Rectifier<CornerTagDetector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: MarkerDetector> Rectifier<D> {
    /// Rectifier backed by an arbitrary marker detector.
    pub fn with_detector(detector: D) -> Self {
        Self { detector }
    }

    /// Detect corner markers in `input` and warp the document they frame
    /// onto the full image rectangle.
    ///
    /// Refuses with `IncompleteCorners` if any of the four reserved roles
    /// is missing — a partial corner set would only produce a meaningless
    /// transform.
    #[instrument(skip_all, fields(width = input.width(), height = input.height()))]
    pub fn rectify(&self, input: &GrayImage) -> Result<GrayImage> {
        let (width, height) = input.dimensions();
        if width < 2 || height < 2 {
            return Err(RichtwerkError::Decode(format!(
                "image is {width}x{height}, need at least 2x2"
            )));
        }

        let observations = self.detector.detect(input)?;
        info!(width, height, marker_count = observations.len(), "Markers detected");

        let mut assignment = CornerAssignment::new();
        for obs in &observations {
            debug!(
                id = obs.id,
                corners = ?obs.corners,
                centroid = ?obs.centroid(),
                "Marker observation"
            );
            assignment.observe(obs);
        }

        if !assignment.is_complete() {
            let missing = assignment.missing();
            warn!(
                found = assignment.found_count(),
                missing = ?missing,
                "Refusing to rectify an incomplete corner set"
            );
            return Err(RichtwerkError::IncompleteCorners(missing));
        }

        let source = assignment.source_quad()?;
        let projection = rectifying_projection(source, width, height)?;
        let output = warp(input, &projection, Interpolation::Bilinear, Luma([0u8]));
        info!("Rectification complete");
        Ok(output)
    }

    /// Load `input` as grayscale, rectify, and write the result to
    /// `output`. On failure no output artifact is produced.
    #[instrument(skip_all)]
    pub fn rectify_file(
        &self,
        input: impl AsRef<std::path::Path>,
        output: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let gray = io::load_grayscale(input)?;
        let rectified = self.rectify(&gray)?;
        io::save_gray(&rectified, output)
    }
}

// -- Tests --------------------------------------------------------------------
