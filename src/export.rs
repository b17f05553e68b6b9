//! PNG snapshots of a finished framebuffer

use std::path::Path;

use crate::rasterizer::Framebuffer;

/// Errors that can occur while exporting a frame
#[derive(Debug)]
pub enum ExportError {
    /// Surface has no pixels
    EmptySurface,
    /// Dimensions don't fit the image crate's u32 size
    TooLarge { width: usize, height: usize },
    /// Encoding or file write failed
    Image(image::ImageError),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::EmptySurface => write!(f, "Surface is empty"),
            ExportError::TooLarge { width, height } => {
                write!(f, "Surface {}x{} is too large to export", width, height)
            }
            ExportError::Image(e) => write!(f, "Image error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        ExportError::Image(e)
    }
}

/// Copy the framebuffer into an owned RGBA image
pub fn to_rgba_image(fb: &Framebuffer) -> Result<image::RgbaImage, ExportError> {
    if fb.width == 0 || fb.height == 0 {
        return Err(ExportError::EmptySurface);
    }
    let too_large = || ExportError::TooLarge { width: fb.width, height: fb.height };
    let width = u32::try_from(fb.width).map_err(|_| too_large())?;
    let height = u32::try_from(fb.height).map_err(|_| too_large())?;

    image::RgbaImage::from_raw(width, height, fb.pixels.clone()).ok_or_else(too_large)
}

/// Write the framebuffer to `path` as PNG
pub fn save_png<P: AsRef<Path>>(fb: &Framebuffer, path: P) -> Result<(), ExportError> {
    let path = path.as_ref();
    let img = to_rgba_image(fb)?;
    img.save_with_format(path, image::ImageFormat::Png)?;
    log::info!("Saved {}x{} snapshot to {}", fb.width, fb.height, path.display());
    Ok(())
}
