// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner-tag rendering — draws printable tags and debug overlays of
// detected markers.

use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::{draw_cross_mut, draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use richtwerk_core::types::MarkerObservation;

use crate::marker::{GRID, encode_payload};

/// Draw the corner tag for `id` onto `canvas` with its outer top-left cell
/// at `top_left`. Each cell is `cell_px` square, so the tag spans
/// `8 * cell_px` pixels per side. Cells are painted explicitly (white as
/// well as black), so the tag is readable on any background.
pub fn draw_marker(canvas: &mut GrayImage, id: u8, top_left: (i32, i32), cell_px: u32) {
    let payload = encode_payload(id);
    let cell = cell_px as i32;

    for row in 0..GRID {
        for col in 0..GRID {
            let on_border = row == 0 || col == 0 || row == GRID - 1 || col == GRID - 1;
            let white = !on_border && payload[row - 1][col - 1];
            let shade = if white { Luma([255u8]) } else { Luma([0u8]) };
            let x = top_left.0 + col as i32 * cell;
            let y = top_left.1 + row as i32 * cell;
            draw_filled_rect_mut(canvas, Rect::at(x, y).of_size(cell_px, cell_px), shade);
        }
    }
}

/// Overlay detected marker outlines and centroid crosses in green on a
/// colour copy of the input — the visual-debugging companion to detection.
pub fn draw_detected_markers(image: &GrayImage, observations: &[MarkerObservation]) -> RgbImage {
    let mut overlay = RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let v = image.get_pixel(x, y).0[0];
        Rgb([v, v, v])
    });

    let green = Rgb([0u8, 255, 0]);
    for obs in observations {
        for i in 0..4 {
            let a = obs.corners[i];
            let b = obs.corners[(i + 1) % 4];
            draw_line_segment_mut(&mut overlay, a, b, green);
        }
        let (cx, cy) = obs.centroid();
        draw_cross_mut(&mut overlay, green, cx.round() as i32, cy.round() as i32);
    }
    overlay
}

// -- Tests --------------------------------------------------------------------
