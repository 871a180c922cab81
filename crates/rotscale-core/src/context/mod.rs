//! Off-screen drawing contexts.
//!
//! Every operation renders into a freshly created [`DrawingContext`] and
//! extracts the result as a new [`Image`]. Contexts come from a
//! [`ContextProvider`]; the default is [`SoftwareContextProvider`], which
//! allocates plain RGBA buffers and refuses anything above a configured
//! pixel limit.
//!
//! A context owns its buffer, so it is released when dropped. That covers
//! early returns and error paths without any explicit cleanup.

mod affine;

pub use affine::AffineTransform;

use fast_image_resize::images::{Image as ResizeTarget, ImageRef};
use fast_image_resize::{PixelType, ResizeOptions, Resizer};
use image::error::{ImageError, ParameterError, ParameterErrorKind};
use image::{imageops, GenericImage, ImageBuffer, ImageResult, Rgba, RgbaImage};

use crate::config::DEFAULT_MAX_CONTEXT_PIXELS;
use crate::types::{Image, InterpolationQuality, Orientation, TransformError, BYTES_PER_PIXEL};

/// Source of drawing contexts.
pub trait ContextProvider {
    /// Create a transparent `width` x `height` context.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::ResourceAllocation` if the context cannot be
    /// created.
    fn create(&self, width: u32, height: u32) -> Result<DrawingContext, TransformError>;
}

/// Allocates contexts in process memory, up to `max_pixels` each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftwareContextProvider {
    max_pixels: u64,
}

impl Default for SoftwareContextProvider {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONTEXT_PIXELS)
    }
}

impl SoftwareContextProvider {
    pub fn new(max_pixels: u64) -> Self {
        Self { max_pixels }
    }

    pub fn max_pixels(&self) -> u64 {
        self.max_pixels
    }
}

impl ContextProvider for SoftwareContextProvider {
    fn create(&self, width: u32, height: u32) -> Result<DrawingContext, TransformError> {
        let pixels = width as u64 * height as u64;
        if pixels > self.max_pixels {
            tracing::warn!(
                width,
                height,
                max_pixels = self.max_pixels,
                "drawing context exceeds pixel limit"
            );
            return Err(TransformError::ResourceAllocation { width, height });
        }
        DrawingContext::try_new(width, height)
    }
}

/// An RGBA canvas that images are drawn into.
#[derive(Debug)]
pub struct DrawingContext {
    canvas: RgbaImage,
}

impl DrawingContext {
    /// Allocate a transparent canvas, failing instead of aborting when the
    /// buffer cannot be reserved.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::ResourceAllocation` for zero dimensions, a
    /// byte size that overflows `usize`, or a failed reservation.
    pub fn try_new(width: u32, height: u32) -> Result<Self, TransformError> {
        let alloc_err = TransformError::ResourceAllocation { width, height };
        if width == 0 || height == 0 {
            return Err(alloc_err);
        }

        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or_else(|| alloc_err.clone())?;

        let mut buffer = Vec::new();
        if let Err(e) = buffer.try_reserve_exact(len) {
            tracing::warn!(width, height, error = %e, "drawing context allocation failed");
            return Err(alloc_err);
        }
        buffer.resize(len, 0);

        let canvas = RgbaImage::from_raw(width, height, buffer).ok_or(alloc_err)?;
        tracing::debug!(width, height, "allocated drawing context");
        Ok(Self { canvas })
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    #[cfg(test)]
    pub(crate) fn buffer_ptr(&self) -> *const u8 {
        self.canvas.as_ptr()
    }

    /// Draw the raw pixels of `image` as they display under `orientation`.
    ///
    /// The context must already have the upright size, see
    /// [`crate::transform::orientation_layout`]. Pixels are copied exactly.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidArgument` if the source buffer does not
    /// match its dimensions or the context has the wrong size.
    pub fn draw_oriented(
        &mut self,
        image: &Image,
        orientation: Orientation,
    ) -> Result<(), TransformError> {
        let source = source_view(image)?;
        orient_into(&source, orientation, &mut self.canvas).map_err(|e| {
            TransformError::invalid(format!("context does not fit the {orientation} image: {e}"))
        })
    }

    /// Resample the raw pixels of `image` to fill the whole context.
    ///
    /// The resizer writes straight into the context's buffer.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidArgument` if the source buffer does not
    /// match its dimensions.
    pub fn draw_scaled(
        &mut self,
        image: &Image,
        quality: InterpolationQuality,
    ) -> Result<(), TransformError> {
        let source = ImageRef::new(image.width(), image.height(), image.pixels(), PixelType::U8x4)
            .map_err(|e| TransformError::invalid(format!("invalid source buffer: {e}")))?;
        let (width, height) = self.canvas.dimensions();
        let mut target = ResizeTarget::from_slice_u8(width, height, &mut self.canvas, PixelType::U8x4)
            .map_err(|e| TransformError::invalid(format!("invalid context buffer: {e}")))?;

        let options = ResizeOptions::new().resize_alg(quality.to_resize_alg());
        Resizer::new()
            .resize(&source, &mut target, &options)
            .map_err(|e| TransformError::invalid(format!("resize failed: {e}")))
    }

    /// Extract the rendered pixels as an image tagged `orientation`,
    /// consuming the context.
    pub fn into_image(self, orientation: Orientation) -> Image {
        let (width, height) = self.canvas.dimensions();
        Image::from_parts_unchecked(width, height, self.canvas.into_raw(), orientation)
    }
}

fn source_view(image: &Image) -> Result<ImageBuffer<Rgba<u8>, &[u8]>, TransformError> {
    ImageBuffer::from_raw(image.width(), image.height(), image.pixels())
        .ok_or_else(|| TransformError::invalid("source buffer does not match its dimensions"))
}

/// Write `source` into `canvas` as it displays under `orientation`.
///
/// Mirrored orientations flip horizontally after the rotation, which is the
/// same as flipping before rotating the other way.
fn orient_into(
    source: &ImageBuffer<Rgba<u8>, &[u8]>,
    orientation: Orientation,
    canvas: &mut RgbaImage,
) -> ImageResult<()> {
    match orientation {
        Orientation::Up if canvas.dimensions() != source.dimensions() => Err(
            ImageError::Parameter(ParameterError::from_kind(ParameterErrorKind::DimensionMismatch)),
        ),
        Orientation::Up => canvas.copy_from(source, 0, 0),
        Orientation::UpMirrored => imageops::flip_horizontal_in(source, canvas),
        Orientation::Down => imageops::rotate180_in(source, canvas),
        Orientation::DownMirrored => imageops::flip_vertical_in(source, canvas),
        Orientation::LeftMirrored => {
            imageops::rotate90_in(source, canvas)?;
            imageops::flip_horizontal_in_place(canvas);
            Ok(())
        }
        Orientation::Right => imageops::rotate90_in(source, canvas),
        Orientation::RightMirrored => {
            imageops::rotate270_in(source, canvas)?;
            imageops::flip_horizontal_in_place(canvas);
            Ok(())
        }
        Orientation::Left => imageops::rotate270_in(source, canvas),
    }
}
