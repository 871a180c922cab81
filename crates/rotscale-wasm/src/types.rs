//! WASM-compatible wrapper types for image data.

use rotscale_core::{Image, InterpolationQuality, Orientation, TransformError};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// An RGBA image with its EXIF orientation code, for JavaScript.
///
/// The pixel data lives in WASM memory; `pixels()` copies it out as a
/// `Uint8Array`.
#[wasm_bindgen]
pub struct JsImage {
    width: u32,
    height: u32,
    orientation: u8,
    pixels: Vec<u8>,
}

/// Plain-object summary returned by [`JsImage::info`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// EXIF orientation code, as taken by every JavaScript entry point.
    pub orientation: u8,
    pub display_width: u32,
    pub display_height: u32,
}

#[wasm_bindgen]
impl JsImage {
    /// Create a new JsImage.
    ///
    /// # Arguments
    /// * `width` - Raw width in pixels
    /// * `height` - Raw height in pixels
    /// * `orientation` - EXIF orientation code (1-8)
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, orientation: u8, pixels: Vec<u8>) -> JsImage {
        JsImage {
            width,
            height,
            orientation,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// EXIF orientation code.
    #[wasm_bindgen(getter)]
    pub fn orientation(&self) -> u8 {
        self.orientation
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Dimensions and orientation as a plain JavaScript object.
    pub fn info(&self) -> Result<JsValue, JsValue> {
        let info = self.image_info().map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&info).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsImage {
    pub(crate) fn from_image(image: Image) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            orientation: image.orientation().to_exif(),
            pixels: image.into_pixels(),
        }
    }

    /// Validate and convert to a core Image. Clones the pixel data.
    pub(crate) fn to_image(&self) -> Result<Image, TransformError> {
        let orientation = Orientation::try_from(self.orientation)?;
        Image::new(self.width, self.height, self.pixels.clone(), orientation)
    }

    pub(crate) fn image_info(&self) -> Result<ImageInfo, TransformError> {
        let orientation = Orientation::try_from(self.orientation)?;
        let (display_width, display_height) = if orientation.swaps_dimensions() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        };
        Ok(ImageInfo {
            width: self.width,
            height: self.height,
            orientation: orientation.to_exif(),
            display_width,
            display_height,
        })
    }
}

/// Convert an optional u8 quality code to the core enum.
///
/// Values: 0 = none, 1 = low, 2 = medium, 3 = high. `None` means the
/// renderer default.
pub(crate) fn quality_from_u8(
    value: Option<u8>,
) -> Result<Option<InterpolationQuality>, TransformError> {
    value.map(InterpolationQuality::try_from).transpose()
}

pub(crate) fn to_js_error(err: TransformError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_image_creation() {
        let img = JsImage::new(100, 50, 6, vec![0u8; 100 * 50 * 4]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.orientation(), 6);
        assert_eq!(img.byte_length(), 20000);
    }

    #[test]
    fn test_to_image() {
        let img = JsImage::new(4, 2, 8, vec![7u8; 4 * 2 * 4]);
        let core = img.to_image().unwrap();
        assert_eq!(core.orientation(), Orientation::Left);
        assert_eq!((core.width(), core.height()), (4, 2));
    }

    #[test]
    fn test_to_image_rejects_bad_input() {
        let bad_orientation = JsImage::new(1, 1, 0, vec![0u8; 4]);
        assert!(matches!(
            bad_orientation.to_image(),
            Err(TransformError::InvalidArgument(_))
        ));

        let bad_buffer = JsImage::new(2, 2, 1, vec![0u8; 3]);
        assert!(matches!(
            bad_buffer.to_image(),
            Err(TransformError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_from_image() {
        let core = Image::new(3, 1, vec![9u8; 12], Orientation::DownMirrored).unwrap();
        let img = JsImage::from_image(core);
        assert_eq!(img.orientation(), 4);
        assert_eq!(img.pixels(), vec![9u8; 12]);
    }

    #[test]
    fn test_image_info() {
        let img = JsImage::new(200, 100, 6, vec![0u8; 200 * 100 * 4]);
        let info = img.image_info().unwrap();
        assert_eq!(info.orientation, 6);
        assert_eq!((info.display_width, info.display_height), (100, 200));
    }

    #[test]
    fn test_image_info_serializes_exif_code() {
        let img = JsImage::new(4, 2, 8, vec![0u8; 32]);
        let json = serde_json::to_value(img.image_info().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "width": 4,
                "height": 2,
                "orientation": 8,
                "displayWidth": 2,
                "displayHeight": 4,
            })
        );
    }

    #[test]
    fn test_image_info_rejects_bad_orientation() {
        let img = JsImage::new(2, 2, 9, vec![0u8; 16]);
        assert!(matches!(
            img.image_info(),
            Err(TransformError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_quality_from_u8() {
        assert_eq!(quality_from_u8(None).unwrap(), None);
        assert_eq!(
            quality_from_u8(Some(0)).unwrap(),
            Some(InterpolationQuality::None)
        );
        assert_eq!(
            quality_from_u8(Some(3)).unwrap(),
            Some(InterpolationQuality::High)
        );
        assert!(quality_from_u8(Some(9)).is_err());
    }
}
