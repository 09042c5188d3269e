use super::PhotoError;
use serde::{Deserialize, Serialize};

/// Size at which the image is shown while the user picks a crop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: f64,
    pub height: f64,
}

/// A crop in percent of the displayed image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentCrop {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PercentCrop {
    /// The crop offered when the cropper opens: anchored top-left, full
    /// width, and as tall as `aspect_ratio` (width / height) allows.
    pub fn initial(aspect_ratio: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0 / aspect_ratio,
        }
    }

    pub fn to_pixels(&self, display: DisplaySize) -> PixelCrop {
        PixelCrop {
            x: self.x * display.width / 100.0,
            y: self.y * display.height / 100.0,
            width: self.width * display.width / 100.0,
            height: self.height * display.height / 100.0,
        }
    }
}

/// A crop in pixels of the displayed image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelCrop {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelCrop {
    /// Crop size in whole displayed pixels. Errors if a side rounds to zero.
    pub fn output_size(&self) -> Result<(u32, u32), PhotoError> {
        let width = self.width.round();
        let height = self.height.round();
        if !(width >= 1.0 && height >= 1.0) {
            return Err(PhotoError::EmptyCrop);
        }
        Ok((width as u32, height as u32))
    }
}

/// Rectangle to cut from the full-resolution image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SourceRect {
    /// Size at which this region appears in the displayed image, shrunk if
    /// needed so the longer side is at most `max_side`. Aspect ratio is kept.
    pub fn output_size(
        &self,
        display: DisplaySize,
        natural_width: u32,
        natural_height: u32,
        max_side: u32,
    ) -> (u32, u32) {
        let width = f64::from(self.width) * display.width / f64::from(natural_width);
        let height = f64::from(self.height) * display.height / f64::from(natural_height);
        let shrink = (f64::from(max_side) / width.max(height)).min(1.0);
        (
            (width * shrink).round().max(1.0) as u32,
            (height * shrink).round().max(1.0) as u32,
        )
    }
}

/// Map a displayed-pixel crop onto the natural image.
///
/// Each axis is scaled by `natural / displayed`. The result is clipped to
/// the image; a crop lying entirely outside it is an error.
pub fn source_rect(
    crop: &PixelCrop,
    display: DisplaySize,
    natural_width: u32,
    natural_height: u32,
) -> Result<SourceRect, PhotoError> {
    if !(display.width > 0.0 && display.height > 0.0) {
        return Err(PhotoError::InvalidDisplaySize);
    }
    crop.output_size()?;

    let scale_x = f64::from(natural_width) / display.width;
    let scale_y = f64::from(natural_height) / display.height;

    let left = (crop.x * scale_x).round().max(0.0);
    let top = (crop.y * scale_y).round().max(0.0);
    let right = ((crop.x + crop.width) * scale_x)
        .round()
        .min(f64::from(natural_width));
    let bottom = ((crop.y + crop.height) * scale_y)
        .round()
        .min(f64::from(natural_height));

    if right - left < 1.0 || bottom - top < 1.0 {
        return Err(PhotoError::CropOutOfBounds);
    }

    Ok(SourceRect {
        x: left as u32,
        y: top as u32,
        width: (right - left) as u32,
        height: (bottom - top) as u32,
    })
}
