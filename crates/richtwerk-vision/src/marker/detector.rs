// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Marker detection — the trait seam that keeps detection an external
// capability, plus the built-in corner-tag detector.
//
// Detection pipeline: adaptive binarization (inverted, dark print becomes
// foreground) -> contour tracing -> convex-hull reduction of outer contours
// to candidate quadrilaterals -> perspective sampling of the 8x8 cell grid
// from the raw grayscale -> border and orientation-anchor checks ->
// majority-vote ID decode.

use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use imageproc::geometric_transformations::Projection;
use richtwerk_core::error::Result;
use richtwerk_core::types::{MarkerObservation, Point};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::marker::quad::{convex_hull, reduce_to_quad, signed_area};
use crate::marker::{GRID, PAYLOAD, PayloadCells, decode_any_rotation};
use crate::threshold::{BinarizeOptions, adaptive_threshold_inv};

/// Anything that can produce marker observations from a grayscale image.
///
/// The rectification pipeline only depends on this trait, so hosts can plug
/// in a different fiducial system (or a test stub) without touching the
/// corner-assignment logic.
pub trait MarkerDetector {
    fn detect(&self, image: &GrayImage) -> Result<Vec<MarkerObservation>>;
}

/// Tuning knobs for the built-in corner-tag detector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Binarization driving contour extraction (not bit sampling).
    pub binarize: BinarizeOptions,
    /// Candidate quadrilaterals below this area in px^2 are discarded.
    pub min_quad_area: f32,
    /// How many of the 28 border cells may fail the all-black check.
    pub max_border_defects: usize,
    /// Minimum spread between the darkest and brightest sampled cell; a
    /// lower spread means the candidate has no readable print.
    pub min_contrast: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            binarize: BinarizeOptions {
                block_size: 33,
                offset: 7,
            },
            min_quad_area: 400.0,
            max_border_defects: 2,
            min_contrast: 40.0,
        }
    }
}

/// Built-in detector for the project's corner-tag format.
#[derive(Debug, Clone, Default)]
pub struct CornerTagDetector {
    config: DetectorConfig,
}

impl CornerTagDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }
}

impl MarkerDetector for CornerTagDetector {
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    fn detect(&self, image: &GrayImage) -> Result<Vec<MarkerObservation>> {
        if image.width() < GRID as u32 || image.height() < GRID as u32 {
            return Ok(Vec::new());
        }

        let threshed = adaptive_threshold_inv(image, self.config.binarize);
        let contours = find_contours::<i32>(&threshed);

        let mut candidates = 0usize;
        let mut observations = Vec::new();
        for contour in &contours {
            if contour.border_type != BorderType::Outer || contour.points.len() < 20 {
                continue;
            }

            let points: Vec<Point> = contour
                .points
                .iter()
                .map(|p| (p.x as f32, p.y as f32))
                .collect();
            let Some(corners) = reduce_to_quad(&convex_hull(&points)) else {
                continue;
            };
            if signed_area(&corners) < self.config.min_quad_area {
                continue;
            }
            candidates += 1;

            if let Some(observation) = self.decode_candidate(image, &corners) {
                trace!(id = observation.id, corners = ?observation.corners, "Tag decoded");
                observations.push(observation);
            }
        }

        debug!(
            contour_count = contours.len(),
            candidates,
            decoded = observations.len(),
            "Marker detection complete"
        );
        Ok(observations)
    }
}

impl CornerTagDetector {
    /// Sample and decode one candidate quadrilateral. `None` means the
    /// candidate is not a readable corner tag.
    fn decode_candidate(&self, image: &GrayImage, corners: &[Point; 4]) -> Option<MarkerObservation> {
        let cells = sample_cells(image, corners)?;

        // Per-tag threshold: midpoint of the sampled intensity range. A tag
        // always contains both black border and white cells, so the spread
        // must be real.
        let mut lo = f32::MAX;
        let mut hi = f32::MIN;
        for row in &cells {
            for &v in row {
                lo = lo.min(v);
                hi = hi.max(v);
            }
        }
        if hi - lo < self.config.min_contrast {
            return None;
        }
        let mid = (lo + hi) / 2.0;

        // All border cells must read black, within the defect budget.
        let mut defects = 0usize;
        for r in 0..GRID {
            for c in 0..GRID {
                let on_border = r == 0 || c == 0 || r == GRID - 1 || c == GRID - 1;
                if on_border && cells[r][c] > mid {
                    defects += 1;
                }
            }
        }
        if defects > self.config.max_border_defects {
            return None;
        }

        let mut payload: PayloadCells = [[false; PAYLOAD]; PAYLOAD];
        for (r, row) in payload.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = cells[r + 1][c + 1] > mid;
            }
        }

        let (id, turns) = decode_any_rotation(&payload)?;

        // Rotate the corner list so corner 0 is the tag's own top-left.
        let mut oriented = [(0.0f32, 0.0f32); 4];
        for (i, slot) in oriented.iter_mut().enumerate() {
            *slot = corners[(i + 4 - turns) % 4];
        }

        Some(MarkerObservation::new(u32::from(id), oriented))
    }
}

/// Mean raw intensity of every grid cell, sampled through the perspective
/// mapping from canonical tag coordinates onto the candidate quadrilateral.
/// `None` if the quadrilateral is too degenerate for a projection.
fn sample_cells(image: &GrayImage, corners: &[Point; 4]) -> Option<[[f32; GRID]; GRID]> {
    let g = GRID as f32;
    let projection =
        Projection::from_control_points([(0.0, 0.0), (g, 0.0), (g, g), (0.0, g)], *corners)?;

    // Five probes per cell: centre plus four axis offsets.
    const PROBES: [(f32, f32); 5] = [(0.0, 0.0), (0.3, 0.0), (-0.3, 0.0), (0.0, 0.3), (0.0, -0.3)];

    let (width, height) = image.dimensions();
    let mut cells = [[0.0f32; GRID]; GRID];
    for (r, row) in cells.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            let mut sum = 0.0f32;
            for (dx, dy) in PROBES {
                let (x, y) = projection * (c as f32 + 0.5 + dx, r as f32 + 0.5 + dy);
                let xi = (x.round().max(0.0) as u32).min(width - 1);
                let yi = (y.round().max(0.0) as u32).min(height - 1);
                sum += image.get_pixel(xi, yi).0[0] as f32;
            }
            *cell = sum / PROBES.len() as f32;
        }
    }
    Some(cells)
}

// -- Tests --------------------------------------------------------------------
