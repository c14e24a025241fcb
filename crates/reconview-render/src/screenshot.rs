//! Exporting rendered frames as image files.

use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};

/// Saves a rendered frame to an image file.
///
/// The format follows the file extension: `.png`, `.jpg` or `.jpeg`.
///
/// # Errors
/// Returns an error if the file cannot be written or format is unsupported.
pub fn save_image(path: impl AsRef<Path>, image: &RgbaImage) -> Result<(), ExportError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "png" => {
            image.save_with_format(path, ImageFormat::Png)?;
        }
        "jpg" | "jpeg" => {
            // JPEG has no alpha channel
            let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            rgb.save_with_format(path, ImageFormat::Jpeg)?;
        }
        _ => {
            return Err(ExportError::UnsupportedFormat(extension));
        }
    }

    log::info!("saved frame to {}", path.display());
    Ok(())
}

/// Error type for frame export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to save image: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),
}
