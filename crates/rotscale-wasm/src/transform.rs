//! WASM bindings for rotation and scaling.
//!
//! Errors are returned as JavaScript strings carrying the core error
//! message.

use crate::types::{quality_from_u8, to_js_error, JsImage};
use rotscale_core::{Image, Orientation, RenderConfig, Renderer, TransformError};
use wasm_bindgen::prelude::*;

fn rotate_image(image: &JsImage, orientation: u8) -> Result<Image, TransformError> {
    let src = image.to_image()?;
    let orientation = Orientation::try_from(orientation)?;
    Renderer::new(RenderConfig::default()).rotate(&src, orientation)
}

fn camera_image(image: &JsImage, max_size: f64) -> Result<Image, TransformError> {
    let src = image.to_image()?;
    Renderer::new(RenderConfig::default()).rotate_and_scale_from_camera(&src, max_size)
}

fn scale_image(image: &JsImage, max_size: f64, quality: Option<u8>) -> Result<Image, TransformError> {
    let src = image.to_image()?;
    let renderer = Renderer::new(RenderConfig::default());
    match quality_from_u8(quality)? {
        Some(quality) => renderer.scale_with_quality(&src, max_size, quality),
        None => renderer.scale(&src, max_size),
    }
}

/// Reinterpret the raw pixels under an EXIF orientation code and return an
/// upright image.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const upright = rotate(image, 6);
/// ```
#[wasm_bindgen]
pub fn rotate(image: &JsImage, orientation: u8) -> Result<JsImage, JsValue> {
    rotate_image(image, orientation)
        .map(JsImage::from_image)
        .map_err(to_js_error)
}

/// Upright a camera image using its own orientation, then fit it within
/// `max_size`.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const preview = rotate_and_scale_from_camera(photo, 600);
/// ```
#[wasm_bindgen]
pub fn rotate_and_scale_from_camera(image: &JsImage, max_size: f64) -> Result<JsImage, JsValue> {
    camera_image(image, max_size)
        .map(JsImage::from_image)
        .map_err(to_js_error)
}

/// Fit an image within `max_size` without upscaling.
///
/// `quality`: 0 = none, 1 = low, 2 = medium, 3 = high; omit for the default.
#[wasm_bindgen]
pub fn scale(image: &JsImage, max_size: f64, quality: Option<u8>) -> Result<JsImage, JsValue> {
    scale_image(image, max_size, quality)
        .map(JsImage::from_image)
        .map_err(to_js_error)
}
