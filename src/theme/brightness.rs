//! Image Brightness Sampler
//!
//! Letterboxes an image into a fixed 200x200 canvas, samples every 8th pixel,
//! averages BT.601 luma and classifies the background as light or dark.
//!
//! Every failure (empty source, fetch error, decode error) degrades to the
//! dark classification. Nothing here returns an error to callers of the
//! `classify_*` functions.

use crate::error::ClassificationError;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use std::path::Path;

/// Side length of the square sampling canvas
pub const SAMPLE_SIZE: u32 = 200;

/// Byte stride between samples (32 bytes = every 8th RGBA pixel)
pub const PIXEL_SAMPLE_INTERVAL: usize = 32;

/// Average luma above this (0-255 scale) classifies as light
pub const BRIGHTNESS_THRESHOLD: f64 = 100.0;

/// Light/dark determination and whether it has completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub is_light: bool,
    pub is_analyzed: bool,
}

impl Classification {
    /// Not yet analyzed; consumers render dark meanwhile
    pub const fn pending() -> Self {
        Classification { is_light: false, is_analyzed: false }
    }

    /// Confirmed dark, also the fallback for every failure
    pub const fn dark() -> Self {
        Classification { is_light: false, is_analyzed: true }
    }

    pub const fn light() -> Self {
        Classification { is_light: true, is_analyzed: true }
    }

    fn from_average(average: f64) -> Self {
        if average > BRIGHTNESS_THRESHOLD {
            Self::light()
        } else {
            Self::dark()
        }
    }
}

impl Default for Classification {
    fn default() -> Self {
        Self::pending()
    }
}

/// ITU-R BT.601 perceptual luma, 0-255
pub fn luma(r: u8, g: u8, b: u8) -> f64 {
    (r as f64 * 299.0 + g as f64 * 587.0 + b as f64 * 114.0) / 1000.0
}

/// Average luma over an RGBA buffer, sampling at a fixed byte stride
///
/// Returns `None` when the buffer holds no complete sample.
pub fn average_luma(rgba: &[u8]) -> Option<f64> {
    let mut total = 0.0;
    let mut count = 0usize;

    for i in (0..rgba.len()).step_by(PIXEL_SAMPLE_INTERVAL) {
        if i + 2 >= rgba.len() {
            break;
        }
        total += luma(rgba[i], rgba[i + 1], rgba[i + 2]);
        count += 1;
    }

    if count == 0 {
        None
    } else {
        Some(total / count as f64)
    }
}

/// Scale an image to fit a `side`x`side` transparent canvas, centered
///
/// Uncovered canvas area stays transparent black and counts toward the average.
pub fn letterbox(img: &DynamicImage, side: u32) -> Result<RgbaImage, ClassificationError> {
    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return Err(ClassificationError::Decode("image has zero size".to_string()));
    }

    let scale = f64::min(side as f64 / width as f64, side as f64 / height as f64);
    let scaled_width = ((width as f64 * scale).round() as u32).clamp(1, side);
    let scaled_height = ((height as f64 * scale).round() as u32).clamp(1, side);

    let scaled = imageops::resize(&img.to_rgba8(), scaled_width, scaled_height, FilterType::Triangle);

    let mut canvas = RgbaImage::new(side, side);
    let x = (side - scaled_width) / 2;
    let y = (side - scaled_height) / 2;
    imageops::overlay(&mut canvas, &scaled, x as i64, y as i64);

    Ok(canvas)
}

/// Classify an already-decoded image
pub fn classify_image(img: &DynamicImage) -> Result<Classification, ClassificationError> {
    let canvas = letterbox(img, SAMPLE_SIZE)?;
    let average = average_luma(canvas.as_raw())
        .ok_or_else(|| ClassificationError::Decode("empty pixel buffer".to_string()))?;
    log::debug!("[Theme] Average luma {:.1} over {}x{} canvas", average, SAMPLE_SIZE, SAMPLE_SIZE);
    Ok(Classification::from_average(average))
}

/// Decode and classify encoded image bytes, propagating the failure cause
pub fn try_classify_bytes(bytes: &[u8]) -> Result<Classification, ClassificationError> {
    if bytes.is_empty() {
        return Err(ClassificationError::EmptySource);
    }
    let img = image::load_from_memory(bytes)
        .map_err(|e| ClassificationError::Decode(e.to_string()))?;
    classify_image(&img)
}

/// Decode and classify encoded image bytes; failures resolve to dark
pub fn classify_bytes(bytes: &[u8]) -> Classification {
    try_classify_bytes(bytes).unwrap_or_else(|e| {
        log::debug!("[Theme] Classification failed, using dark: {}", e);
        Classification::dark()
    })
}

/// Fetch the raw bytes behind an image source
///
/// `http(s)` sources go through the given client; anything else is read from
/// the local filesystem.
pub async fn fetch_image_bytes(
    client: &reqwest::Client,
    source: &str,
) -> Result<Vec<u8>, ClassificationError> {
    let source = source.trim();
    if source.is_empty() {
        return Err(ClassificationError::EmptySource);
    }

    if source.starts_with("http://") || source.starts_with("https://") {
        let response = client
            .get(source)
            .send()
            .await
            .map_err(|e| ClassificationError::Fetch(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ClassificationError::Fetch(format!(
                "HTTP {} for {}",
                response.status().as_u16(),
                source
            )));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClassificationError::Fetch(e.to_string()))?;
        Ok(bytes.to_vec())
    } else {
        tokio::fs::read(Path::new(source))
            .await
            .map_err(|e| ClassificationError::Fetch(format!("{}: {}", source, e)))
    }
}

/// Classify whatever `source` points at; never fails
pub async fn classify_source(client: &reqwest::Client, source: &str) -> Classification {
    match fetch_image_bytes(client, source).await {
        Ok(bytes) => classify_bytes(&bytes),
        Err(e) => {
            log::debug!("[Theme] Image source unavailable, using dark: {}", e);
            Classification::dark()
        }
    }
}
