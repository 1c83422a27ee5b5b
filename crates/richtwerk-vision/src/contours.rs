// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contour renderer — adaptive binarization followed by full contour-hierarchy
// tracing, with the traced boundaries overlaid on a colour copy of the
// thresholded image for visual debugging of document edges.

use image::{GrayImage, Rgb, RgbImage};
use imageproc::contours::{BorderType, find_contours};
use imageproc::drawing::draw_filled_circle_mut;
use richtwerk_core::error::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::io;
use crate::threshold::{BinarizeOptions, adaptive_threshold_inv};

/// Overlay styling for traced contours.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ContourStyle {
    /// Overlay colour as RGB.
    pub color: [u8; 3],
    /// Stroke thickness in pixels.
    pub thickness: u32,
}

impl Default for ContourStyle {
    fn default() -> Self {
        Self {
            color: [0, 255, 0],
            thickness: 4,
        }
    }
}

/// Renders the contour hierarchy of a grayscale scan.
///
/// The input is binarized against a Gaussian-weighted local mean (inverted,
/// so dark print becomes foreground), every outer and nested boundary is
/// traced, and the boundaries are stamped in the configured colour onto a
/// colour copy of the thresholded image.
pub struct ContourRenderer {
    binarize: BinarizeOptions,
    style: ContourStyle,
}

impl Default for ContourRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ContourRenderer {
    pub fn new() -> Self {
        Self {
            binarize: BinarizeOptions::default(),
            style: ContourStyle::default(),
        }
    }

    pub fn with_options(binarize: BinarizeOptions, style: ContourStyle) -> Self {
        Self { binarize, style }
    }

    /// Trace and overlay the contour hierarchy of `input`.
    #[instrument(skip_all, fields(width = input.width(), height = input.height()))]
    pub fn render(&self, input: &GrayImage) -> RgbImage {
        let threshed = adaptive_threshold_inv(input, self.binarize);
        let contours = find_contours::<i32>(&threshed);

        let outer = contours
            .iter()
            .filter(|c| c.border_type == BorderType::Outer)
            .count();
        info!(
            contour_count = contours.len(),
            outer,
            holes = contours.len() - outer,
            "Contours traced"
        );

        // Colour copy of the thresholded image, then stamp each boundary
        // point as a filled disc to get the configured stroke thickness.
        let mut overlay = RgbImage::from_fn(threshed.width(), threshed.height(), |x, y| {
            let v = threshed.get_pixel(x, y).0[0];
            Rgb([v, v, v])
        });

        let color = Rgb(self.style.color);
        let radius = (self.style.thickness / 2).max(1) as i32;
        for contour in &contours {
            for point in &contour.points {
                draw_filled_circle_mut(&mut overlay, (point.x, point.y), radius, color);
            }
        }
        debug!("Contour overlay complete");
        overlay
    }

    /// Load `input` as grayscale, render, and write the overlay to `output`.
    #[instrument(skip_all)]
    pub fn render_file(
        &self,
        input: impl AsRef<std::path::Path>,
        output: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let gray = io::load_grayscale(input)?;
        let overlay = self.render(&gray);
        io::save_rgb(&overlay, output)
    }
}

// -- Tests --------------------------------------------------------------------
