// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Adaptive binarization with a Gaussian-weighted local mean.

use image::{GrayImage, Luma};
use imageproc::filter::gaussian_blur_f32;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parameters for Gaussian adaptive thresholding.
///
/// `block_size` is the diameter of the weighting neighbourhood in pixels
/// (odd, as in the classic formulation); `offset` is subtracted from the
/// local mean before comparison. The defaults are the constants the contour
/// pipeline has always used for scanned documents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BinarizeOptions {
    pub block_size: u32,
    pub offset: i32,
}

impl Default for BinarizeOptions {
    fn default() -> Self {
        Self {
            block_size: 77,
            offset: 6,
        }
    }
}

impl BinarizeOptions {
    /// Gaussian sigma equivalent to the configured block size, using the
    /// conventional 0.3*((k-1)/2 - 1) + 0.8 mapping.
    fn sigma(&self) -> f32 {
        let k = self.block_size.max(3) as f32;
        0.3 * ((k - 1.0) * 0.5 - 1.0) + 0.8
    }
}

/// Binarize a grayscale image against a Gaussian-weighted local mean, with
/// inverted output: pixels at or below `local_mean - offset` become white
/// (255, foreground), all others black (0).
///
/// Dark print on a light page therefore comes out as foreground, which is
/// what both the contour tracer and the marker detector consume.
pub fn adaptive_threshold_inv(gray: &GrayImage, options: BinarizeOptions) -> GrayImage {
    let sigma = options.sigma();
    let local_mean = gaussian_blur_f32(gray, sigma);
    debug!(
        block_size = options.block_size,
        offset = options.offset,
        sigma,
        "Adaptive threshold"
    );

    let mut output = GrayImage::new(gray.width(), gray.height());
    for (x, y, pixel) in gray.enumerate_pixels() {
        let mean = local_mean.get_pixel(x, y).0[0] as i32;
        let value = pixel.0[0] as i32;
        let binary = if value <= mean - options.offset { 255u8 } else { 0u8 };
        output.put_pixel(x, y, Luma([binary]));
    }
    output
}

// -- Tests --------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_image_has_no_foreground() {
        let gray = GrayImage::from_pixel(128, 128, Luma([180u8]));
        let binary = adaptive_threshold_inv(&gray, BinarizeOptions::default());
        assert!(binary.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn dark_square_on_light_background_becomes_foreground() {
        let mut gray = GrayImage::from_pixel(100, 100, Luma([255u8]));
        for y in 30..70 {
            for x in 30..70 {
                gray.put_pixel(x, y, Luma([0u8]));
            }
        }

        let binary = adaptive_threshold_inv(
            &gray,
            BinarizeOptions {
                block_size: 33,
                offset: 6,
            },
        );

        // Square edges are foreground, far-away background is not.
        assert_eq!(binary.get_pixel(30, 50).0[0], 255);
        assert_eq!(binary.get_pixel(50, 30).0[0], 255);
        assert_eq!(binary.get_pixel(5, 5).0[0], 0);
        assert_eq!(binary.get_pixel(95, 95).0[0], 0);
    }

    #[test]
    fn output_dimensions_match_input() {
        let gray = GrayImage::from_pixel(31, 17, Luma([90u8]));
        let binary = adaptive_threshold_inv(
            &gray,
            BinarizeOptions {
                block_size: 9,
                offset: 6,
            },
        );
        assert_eq!(binary.dimensions(), (31, 17));
    }
}
