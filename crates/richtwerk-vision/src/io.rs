// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Grayscale image file I/O with Richtwerk error mapping.

use image::{GrayImage, RgbImage};
use richtwerk_core::error::{Result, RichtwerkError};
use tracing::info;

/// Load an image from a file path and convert it to single-channel grayscale.
///
/// Fails with `Decode` if the path is unreadable, the bytes are not a valid
/// image, or the decoded image is smaller than the 2x2 minimum the pipelines
/// require.
pub fn load_grayscale(path: impl AsRef<std::path::Path>) -> Result<GrayImage> {
    let path = path.as_ref();
    let img = image::open(path)
        .map_err(|err| RichtwerkError::Decode(format!("{}: {}", path.display(), err)))?;
    let gray = img.to_luma8();
    if gray.width() < 2 || gray.height() < 2 {
        return Err(RichtwerkError::Decode(format!(
            "{}: image is {}x{}, need at least 2x2",
            path.display(),
            gray.width(),
            gray.height()
        )));
    }
    info!(
        path = %path.display(),
        width = gray.width(),
        height = gray.height(),
        "Image loaded"
    );
    Ok(gray)
}

/// Write a grayscale image to a file. The format is inferred from the file
/// extension.
pub fn save_gray(image: &GrayImage, path: impl AsRef<std::path::Path>) -> Result<()> {
    let path = path.as_ref();
    image
        .save(path)
        .map_err(|err| RichtwerkError::Write(format!("{}: {}", path.display(), err)))
}

/// Write an RGB image to a file. The format is inferred from the file
/// extension.
pub fn save_rgb(image: &RgbImage, path: impl AsRef<std::path::Path>) -> Result<()> {
    let path = path.as_ref();
    image
        .save(path)
        .map_err(|err| RichtwerkError::Write(format!("{}: {}", path.display(), err)))
}

// -- Tests --------------------------------------------------------------------
