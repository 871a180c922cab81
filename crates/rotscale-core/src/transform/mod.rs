//! Rotation and scaling operations.
//!
//! Every operation borrows its input and returns a new [`Image`]:
//!
//! - [`rotate`] presents raw pixels under a given orientation and returns an
//!   upright image
//! - [`rotate_and_scale_from_camera`] rotates by the image's own orientation
//!   tag, then scales to fit
//! - [`scale`] / [`scale_with_quality`] shrink an image to fit within a
//!   maximum edge length, never upscaling
//!
//! The free functions use a default [`Renderer`]. Build a renderer directly
//! to change the default interpolation quality, the context size limit, or
//! the [`ContextProvider`].
//!
//! Arguments are validated before any context is created.

mod orient;
mod scale;

pub use orient::{orientation_layout, OrientedLayout};
pub use scale::fit_dimensions;

use crate::config::RenderConfig;
use crate::context::{ContextProvider, SoftwareContextProvider};
use crate::types::{Image, InterpolationQuality, Orientation, TransformError};

use scale::validate_max_size;

/// Runs rotation and scaling operations against a context provider.
#[derive(Debug, Clone)]
pub struct Renderer<P = SoftwareContextProvider> {
    provider: P,
    config: RenderConfig,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl Renderer {
    /// Renderer backed by the software provider, limited to
    /// `config.max_context_pixels`.
    pub fn new(config: RenderConfig) -> Self {
        Self {
            provider: SoftwareContextProvider::new(config.max_context_pixels),
            config,
        }
    }
}

impl<P: ContextProvider> Renderer<P> {
    pub fn with_provider(provider: P, config: RenderConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Reinterpret the raw pixels of `image` under `orientation` and return
    /// the upright result, tagged `Orientation::Up`.
    ///
    /// The input's own orientation tag is ignored. `rotate(Up)` returns the
    /// pixels unchanged, but still renders through a context, so the
    /// provider's limits apply to every orientation alike.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::ResourceAllocation` if the output context
    /// cannot be created.
    pub fn rotate(&self, image: &Image, orientation: Orientation) -> Result<Image, TransformError> {
        let layout = orientation_layout(orientation, image.width(), image.height());
        tracing::debug!(
            %orientation,
            src_width = image.width(),
            src_height = image.height(),
            width = layout.width,
            height = layout.height,
            "rotating image"
        );

        let mut ctx = self.provider.create(layout.width, layout.height)?;
        ctx.draw_oriented(image, orientation)?;
        Ok(ctx.into_image(Orientation::Up))
    }

    /// Normalize a camera image to `Orientation::Up` using its own tag, then
    /// scale it to fit within `max_size`.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidArgument` if `max_size` is not a
    /// positive finite number, and `TransformError::ResourceAllocation` if a
    /// context cannot be created.
    pub fn rotate_and_scale_from_camera(
        &self,
        image: &Image,
        max_size: f64,
    ) -> Result<Image, TransformError> {
        validate_max_size(max_size)?;
        let upright = self.rotate(image, image.orientation())?;
        self.scale(&upright, max_size)
    }

    /// Scale `image` to fit within `max_size` using the configured default
    /// quality.
    ///
    /// # Errors
    ///
    /// See [`Renderer::scale_with_quality`].
    pub fn scale(&self, image: &Image, max_size: f64) -> Result<Image, TransformError> {
        self.scale_with_quality(image, max_size, self.config.default_quality)
    }

    /// Scale `image` so its longer edge fits within `max_size`, preserving
    /// aspect ratio and the orientation tag.
    ///
    /// Images that already fit are returned unchanged; nothing is upscaled.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidArgument` if `max_size` is not a
    /// positive finite number, and `TransformError::ResourceAllocation` if
    /// the output context cannot be created.
    pub fn scale_with_quality(
        &self,
        image: &Image,
        max_size: f64,
        quality: InterpolationQuality,
    ) -> Result<Image, TransformError> {
        validate_max_size(max_size)?;

        let Some((width, height)) = fit_dimensions(image.width(), image.height(), max_size) else {
            return Ok(image.clone());
        };
        tracing::debug!(
            src_width = image.width(),
            src_height = image.height(),
            width,
            height,
            ?quality,
            "scaling image"
        );

        let mut ctx = self.provider.create(width, height)?;
        ctx.draw_scaled(image, quality)?;
        Ok(ctx.into_image(image.orientation()))
    }
}

/// Rotate with the default renderer. See [`Renderer::rotate`].
pub fn rotate(image: &Image, orientation: Orientation) -> Result<Image, TransformError> {
    Renderer::new(RenderConfig::default()).rotate(image, orientation)
}

/// Rotate and scale with the default renderer. See
/// [`Renderer::rotate_and_scale_from_camera`].
pub fn rotate_and_scale_from_camera(image: &Image, max_size: f64) -> Result<Image, TransformError> {
    Renderer::new(RenderConfig::default()).rotate_and_scale_from_camera(image, max_size)
}

/// Scale with the default renderer. See [`Renderer::scale`].
pub fn scale(image: &Image, max_size: f64) -> Result<Image, TransformError> {
    Renderer::new(RenderConfig::default()).scale(image, max_size)
}

/// Scale with the default renderer and an explicit quality. See
/// [`Renderer::scale_with_quality`].
pub fn scale_with_quality(
    image: &Image,
    max_size: f64,
    quality: InterpolationQuality,
) -> Result<Image, TransformError> {
    Renderer::new(RenderConfig::default()).scale_with_quality(image, max_size, quality)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
