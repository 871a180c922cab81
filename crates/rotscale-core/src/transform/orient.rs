//! Orientation correction layout.
//!
//! Turns an [`Orientation`] into the affine transform that presents raw
//! pixels upright, together with the size of the upright image.

use crate::context::AffineTransform;
use crate::types::Orientation;

/// Where raw pixels land once an orientation is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedLayout {
    /// Maps raw pixel coordinates to upright coordinates.
    pub transform: AffineTransform,
    pub width: u32,
    pub height: u32,
}

/// Compute the transform and bounding size that display a `width` x `height`
/// raw buffer tagged `orientation` upright.
///
/// The transform mirrors (when the orientation is mirrored), rotates
/// clockwise by the orientation's angle, then translates the rotated bounds
/// back to the origin.
pub fn orientation_layout(orientation: Orientation, width: u32, height: u32) -> OrientedLayout {
    let (w, h) = (width as f64, height as f64);
    let ot = orientation.transform();

    let mirror = if ot.mirrored {
        AffineTransform::scale(-1.0, 1.0).then(AffineTransform::translation(w, 0.0))
    } else {
        AffineTransform::IDENTITY
    };
    let rotated = mirror.then(AffineTransform::rotation(ot.angle));

    let (min_x, min_y, max_x, max_y) = rotated.bounds(w, h);
    let transform = rotated.then(AffineTransform::translation(-min_x, -min_y));

    OrientedLayout {
        transform,
        width: ((max_x - min_x).round() as u32).max(1),
        height: ((max_y - min_y).round() as u32).max(1),
    }
}
