//! Rotscale Core - orientation correction and scaling for camera images
//!
//! Photos from device cameras are stored in sensor order with an orientation
//! tag describing how to display them. This crate renders such images
//! upright and scales them to fit a maximum edge length, drawing each result
//! into a fresh off-screen context.
//!
//! ```ignore
//! use rotscale_core::{Image, Orientation, RotScale};
//!
//! let photo = Image::new(2000, 3000, pixels, Orientation::Right)?;
//! let preview = photo.rotate_and_scale_from_camera(600.0)?;
//! assert_eq!((preview.width(), preview.height()), (600, 400));
//! ```

pub mod config;
pub mod context;
pub mod transform;
pub mod types;

pub use config::RenderConfig;
pub use context::{AffineTransform, ContextProvider, DrawingContext, SoftwareContextProvider};
pub use transform::Renderer;
pub use types::{Image, InterpolationQuality, Orientation, OrientationTransform, TransformError};

/// Rotation and scaling as methods on [`Image`], using the default
/// [`Renderer`].
pub trait RotScale: Sized {
    /// See [`Renderer::rotate`].
    fn rotate(&self, orientation: Orientation) -> Result<Self, TransformError>;

    /// See [`Renderer::rotate_and_scale_from_camera`].
    fn rotate_and_scale_from_camera(&self, max_size: f64) -> Result<Self, TransformError>;

    /// See [`Renderer::scale`].
    fn scale(&self, max_size: f64) -> Result<Self, TransformError>;

    /// See [`Renderer::scale_with_quality`].
    fn scale_with_quality(
        &self,
        max_size: f64,
        quality: InterpolationQuality,
    ) -> Result<Self, TransformError>;
}

impl RotScale for Image {
    fn rotate(&self, orientation: Orientation) -> Result<Self, TransformError> {
        transform::rotate(self, orientation)
    }

    fn rotate_and_scale_from_camera(&self, max_size: f64) -> Result<Self, TransformError> {
        transform::rotate_and_scale_from_camera(self, max_size)
    }

    fn scale(&self, max_size: f64) -> Result<Self, TransformError> {
        transform::scale(self, max_size)
    }

    fn scale_with_quality(
        &self,
        max_size: f64,
        quality: InterpolationQuality,
    ) -> Result<Self, TransformError> {
        transform::scale_with_quality(self, max_size, quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(width: u32, height: u32, orientation: Orientation) -> Image {
        Image::new(
            width,
            height,
            vec![128u8; (width * height * 4) as usize],
            orientation,
        )
        .unwrap()
    }

    #[test]
    fn test_extension_methods() {
        let img = photo(300, 200, Orientation::Right);

        let rotated = img.rotate(Orientation::Right).unwrap();
        assert_eq!((rotated.width(), rotated.height()), (200, 300));

        let scaled = img.scale(50.0).unwrap();
        assert_eq!((scaled.width(), scaled.height()), (50, 33));
        assert_eq!(scaled.orientation(), Orientation::Right);

        let camera = img.rotate_and_scale_from_camera(50.0).unwrap();
        assert_eq!((camera.width(), camera.height()), (33, 50));
        assert_eq!(camera.orientation(), Orientation::Up);

        let nearest = img
            .scale_with_quality(30.0, InterpolationQuality::None)
            .unwrap();
        assert_eq!((nearest.width(), nearest.height()), (30, 20));
    }

    #[test]
    fn test_extension_errors() {
        let img = photo(10, 10, Orientation::Up);
        assert!(matches!(
            img.scale(0.0),
            Err(TransformError::InvalidArgument(_))
        ));
        assert!(matches!(
            img.rotate_and_scale_from_camera(-5.0),
            Err(TransformError::InvalidArgument(_))
        ));
    }
}
