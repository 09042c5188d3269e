//! Recipe photo handling.
//!
//! A user-picked file is read into a data URL, the user chooses a crop over
//! the displayed image, and the chosen region is cut from the full-resolution
//! image and re-encoded as a JPEG data URL. That string is what ends up in
//! [`Recipe::image`](crate::Recipe::image).

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;
use thiserror::Error;
use tracing::debug;

mod crop;
mod data_url;

pub use crop::{source_rect, DisplaySize, PercentCrop, PixelCrop, SourceRect};
pub use data_url::{encode_data_url, is_data_url, DataUrl};

/// Formats accepted for upload.
pub const ALLOWED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// Longest side of a cropped photo, in pixels.
pub const MAX_CROP_SIDE: u32 = 4096;

#[derive(Error, Debug)]
pub enum PhotoError {
    #[error("Not a base64 data URL")]
    InvalidDataUrl,

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Failed to read image: {0}")]
    Read(#[from] std::io::Error),

    #[error("Could not detect image format")]
    UnknownFormat,

    #[error("Unsupported image format: {0}. Allowed: JPEG, PNG, GIF, WebP")]
    UnsupportedFormat(String),

    #[error("Failed to process image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Crop selection is empty")]
    EmptyCrop,

    #[error("Crop selection lies outside the image")]
    CropOutOfBounds,

    #[error("Displayed image size must be positive")]
    InvalidDisplaySize,
}

/// Read raw file bytes into a data URL, checking the format from magic bytes.
pub fn file_to_data_url(bytes: &[u8]) -> Result<String, PhotoError> {
    let format = detect_format(bytes)?;
    Ok(encode_data_url(format.to_mime_type(), bytes))
}

/// Cut `crop` out of an image and return it as a JPEG data URL.
///
/// `crop` is measured against the image as displayed at `display`. The part
/// of it that covers the image is cut from the full-resolution image and
/// resized to the size it was displayed at, at most [`MAX_CROP_SIDE`] on the
/// longer side.
pub fn crop_to_data_url(
    bytes: &[u8],
    crop: &PixelCrop,
    display: DisplaySize,
) -> Result<String, PhotoError> {
    let image = decode(bytes)?;
    let cropped = crop_image(&image, crop, display)?;
    let jpeg = encode_jpeg(&cropped)?;
    Ok(encode_data_url(ImageFormat::Jpeg.to_mime_type(), &jpeg))
}

/// [`crop_to_data_url`] for an image that is itself held as a data URL.
pub fn crop_data_url(
    data_url: &str,
    crop: &PixelCrop,
    display: DisplaySize,
) -> Result<String, PhotoError> {
    let source = DataUrl::parse(data_url)?;
    crop_to_data_url(&source.bytes, crop, display)
}

fn detect_format(bytes: &[u8]) -> Result<ImageFormat, PhotoError> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let format = reader.format().ok_or(PhotoError::UnknownFormat)?;
    if !ALLOWED_FORMATS.contains(&format) {
        return Err(PhotoError::UnsupportedFormat(format!("{format:?}")));
    }
    Ok(format)
}

fn decode(bytes: &[u8]) -> Result<DynamicImage, PhotoError> {
    detect_format(bytes)?;
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    Ok(reader.decode()?)
}

fn crop_image(
    image: &DynamicImage,
    crop: &PixelCrop,
    display: DisplaySize,
) -> Result<DynamicImage, PhotoError> {
    let rect = source_rect(crop, display, image.width(), image.height())?;
    let (out_width, out_height) =
        rect.output_size(display, image.width(), image.height(), MAX_CROP_SIDE);
    debug!(
        x = rect.x,
        y = rect.y,
        width = rect.width,
        height = rect.height,
        out_width,
        out_height,
        "cropping photo"
    );

    let region = image.crop_imm(rect.x, rect.y, rect.width, rect.height);
    if region.width() == out_width && region.height() == out_height {
        return Ok(region);
    }
    Ok(region.resize_exact(out_width, out_height, FilterType::Triangle))
}

fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>, PhotoError> {
    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    let mut buf = Cursor::new(Vec::new());
    rgb.write_to(&mut buf, ImageFormat::Jpeg)?;
    Ok(buf.into_inner())
}
