//! Core types: the image handle, orientation and interpolation enums, errors.

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

use fast_image_resize::{FilterType, ResizeAlg};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Error types for rotation and scaling operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// A parameter was out of range or could not be interpreted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The drawing context for the output could not be created.
    #[error("Could not allocate a {width}x{height} drawing context")]
    ResourceAllocation { width: u32, height: u32 },
}

impl TransformError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        TransformError::InvalidArgument(msg.into())
    }
}

/// How raw pixel data should be interpreted for display.
///
/// The discriminants are the EXIF orientation codes.
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum Orientation {
    /// Raw pixels are already upright.
    #[default]
    Up = 1,
    /// Mirrored horizontally.
    UpMirrored = 2,
    /// Upside down.
    Down = 3,
    /// Upside down and mirrored (a vertical flip).
    DownMirrored = 4,
    /// Mirrored, then turned 90 degrees counter-clockwise.
    LeftMirrored = 5,
    /// Needs a 90 degree clockwise turn. Typical for portrait phone shots.
    Right = 6,
    /// Mirrored, then turned 90 degrees clockwise.
    RightMirrored = 7,
    /// Needs a 90 degree counter-clockwise turn.
    Left = 8,
}

/// Display transform for one orientation: mirror horizontally (if set),
/// then rotate clockwise by `angle` radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationTransform {
    pub angle: f64,
    pub mirrored: bool,
}

/// Lookup table indexed by EXIF code - 1.
const ORIENTATION_TABLE: [OrientationTransform; 8] = [
    OrientationTransform { angle: 0.0, mirrored: false },
    OrientationTransform { angle: 0.0, mirrored: true },
    OrientationTransform { angle: PI, mirrored: false },
    OrientationTransform { angle: PI, mirrored: true },
    OrientationTransform { angle: 3.0 * FRAC_PI_2, mirrored: true },
    OrientationTransform { angle: FRAC_PI_2, mirrored: false },
    OrientationTransform { angle: FRAC_PI_2, mirrored: true },
    OrientationTransform { angle: 3.0 * FRAC_PI_2, mirrored: false },
];

impl Orientation {
    /// All eight variants in EXIF order.
    pub const ALL: [Orientation; 8] = [
        Orientation::Up,
        Orientation::UpMirrored,
        Orientation::Down,
        Orientation::DownMirrored,
        Orientation::LeftMirrored,
        Orientation::Right,
        Orientation::RightMirrored,
        Orientation::Left,
    ];

    /// EXIF orientation code (1-8).
    #[inline]
    pub fn to_exif(self) -> u8 {
        self as u8
    }

    /// Rotation angle and mirroring needed to display raw pixels upright.
    #[inline]
    pub fn transform(self) -> OrientationTransform {
        ORIENTATION_TABLE[(self.to_exif() - 1) as usize]
    }

    /// Returns true for the left/right families, whose display size is the
    /// raw size with width and height exchanged.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Left
                | Orientation::Right
                | Orientation::LeftMirrored
                | Orientation::RightMirrored
        )
    }

    #[inline]
    pub fn is_mirrored(self) -> bool {
        self.transform().mirrored
    }

    fn name(self) -> &'static str {
        match self {
            Orientation::Up => "up",
            Orientation::UpMirrored => "upMirrored",
            Orientation::Down => "down",
            Orientation::DownMirrored => "downMirrored",
            Orientation::LeftMirrored => "leftMirrored",
            Orientation::Right => "right",
            Orientation::RightMirrored => "rightMirrored",
            Orientation::Left => "left",
        }
    }
}

impl TryFrom<u8> for Orientation {
    type Error = TransformError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1..=8 => Ok(Orientation::ALL[(value - 1) as usize]),
            _ => Err(TransformError::invalid(format!(
                "unknown orientation code {value}"
            ))),
        }
    }
}

impl FromStr for Orientation {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Orientation::ALL
            .into_iter()
            .find(|o| o.name() == s)
            .ok_or_else(|| TransformError::invalid(format!("unknown orientation '{s}'")))
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resampling tier used when an image is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InterpolationQuality {
    /// Nearest neighbour, no smoothing.
    None,
    /// Bilinear.
    Low,
    /// Catmull-Rom bicubic.
    Medium,
    /// Lanczos3.
    #[default]
    High,
}

impl InterpolationQuality {
    /// Resampling algorithm used by the resizer for this tier.
    pub fn to_resize_alg(self) -> ResizeAlg {
        match self {
            InterpolationQuality::None => ResizeAlg::Nearest,
            InterpolationQuality::Low => ResizeAlg::Convolution(FilterType::Bilinear),
            InterpolationQuality::Medium => ResizeAlg::Convolution(FilterType::CatmullRom),
            InterpolationQuality::High => ResizeAlg::Convolution(FilterType::Lanczos3),
        }
    }
}

impl TryFrom<u8> for InterpolationQuality {
    type Error = TransformError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(InterpolationQuality::None),
            1 => Ok(InterpolationQuality::Low),
            2 => Ok(InterpolationQuality::Medium),
            3 => Ok(InterpolationQuality::High),
            _ => Err(TransformError::invalid(format!(
                "unknown interpolation quality {value}"
            ))),
        }
    }
}

impl FromStr for InterpolationQuality {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(InterpolationQuality::None),
            "low" => Ok(InterpolationQuality::Low),
            "medium" => Ok(InterpolationQuality::Medium),
            "high" => Ok(InterpolationQuality::High),
            _ => Err(TransformError::invalid(format!(
                "unknown interpolation quality '{s}'"
            ))),
        }
    }
}

/// An RGBA8 image with an orientation tag.
///
/// `width` and `height` describe the raw pixel buffer, not the display
/// size; see [`Image::display_size`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    orientation: Orientation,
    pixels: Vec<u8>,
}

impl Image {
    /// Create an image from row-major RGBA pixel data.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidArgument` if either dimension is zero
    /// or the buffer length is not `width * height * 4`.
    pub fn new(
        width: u32,
        height: u32,
        pixels: Vec<u8>,
        orientation: Orientation,
    ) -> Result<Self, TransformError> {
        if width == 0 || height == 0 {
            return Err(TransformError::invalid(format!(
                "image dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(TransformError::invalid(format!(
                "pixel buffer has {} bytes, expected {expected} for {width}x{height}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            orientation,
            pixels,
        })
    }

    /// Wrap an `image::RgbaImage`.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidArgument` for an empty buffer.
    pub fn from_rgba_image(
        img: image::RgbaImage,
        orientation: Orientation,
    ) -> Result<Self, TransformError> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw(), orientation)
    }

    /// Copy into an `image::RgbaImage` (orientation tag is not carried).
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    pub(crate) fn from_parts_unchecked(
        width: u32,
        height: u32,
        pixels: Vec<u8>,
        orientation: Orientation,
    ) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * BYTES_PER_PIXEL,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            orientation,
            pixels,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Raw RGBA bytes, row-major.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Size of the image once its orientation tag is applied.
    pub fn display_size(&self) -> (u32, u32) {
        if self.orientation.swaps_dimensions() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    /// RGBA value at raw pixel coordinates. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Same pixels under a different orientation tag.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_exif_round_trip() {
        for (i, o) in Orientation::ALL.into_iter().enumerate() {
            assert_eq!(o.to_exif() as usize, i + 1);
            assert_eq!(Orientation::try_from(o.to_exif()).unwrap(), o);
        }
    }

    #[test]
    fn test_orientation_invalid_code() {
        assert!(matches!(
            Orientation::try_from(0u8),
            Err(TransformError::InvalidArgument(_))
        ));
        assert!(matches!(
            Orientation::try_from(9u8),
            Err(TransformError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_orientation_from_str() {
        assert_eq!("up".parse::<Orientation>().unwrap(), Orientation::Up);
        assert_eq!(
            "rightMirrored".parse::<Orientation>().unwrap(),
            Orientation::RightMirrored
        );
        assert!("sideways".parse::<Orientation>().is_err());
        assert_eq!(Orientation::LeftMirrored.to_string(), "leftMirrored");
    }

    #[test]
    fn test_orientation_table() {
        assert_eq!(
            Orientation::Up.transform(),
            OrientationTransform { angle: 0.0, mirrored: false }
        );
        assert_eq!(Orientation::Right.transform().angle, FRAC_PI_2);
        assert_eq!(Orientation::Left.transform().angle, 3.0 * FRAC_PI_2);
        assert_eq!(Orientation::Down.transform().angle, PI);

        // Mirrored variants share the angle of their base orientation
        assert_eq!(
            Orientation::RightMirrored.transform().angle,
            Orientation::Right.transform().angle
        );
        assert_eq!(
            Orientation::LeftMirrored.transform().angle,
            Orientation::Left.transform().angle
        );
        assert!(Orientation::DownMirrored.is_mirrored());
        assert!(!Orientation::Down.is_mirrored());
    }

    #[test]
    fn test_orientation_swaps_dimensions() {
        assert!(!Orientation::Up.swaps_dimensions());
        assert!(!Orientation::UpMirrored.swaps_dimensions());
        assert!(!Orientation::Down.swaps_dimensions());
        assert!(!Orientation::DownMirrored.swaps_dimensions());

        assert!(Orientation::Left.swaps_dimensions());
        assert!(Orientation::Right.swaps_dimensions());
        assert!(Orientation::LeftMirrored.swaps_dimensions());
        assert!(Orientation::RightMirrored.swaps_dimensions());
    }

    #[test]
    fn test_quality_conversion() {
        assert!(matches!(
            InterpolationQuality::None.to_resize_alg(),
            ResizeAlg::Nearest
        ));
        assert!(matches!(
            InterpolationQuality::Low.to_resize_alg(),
            ResizeAlg::Convolution(FilterType::Bilinear)
        ));
        assert!(matches!(
            InterpolationQuality::Medium.to_resize_alg(),
            ResizeAlg::Convolution(FilterType::CatmullRom)
        ));
        assert!(matches!(
            InterpolationQuality::High.to_resize_alg(),
            ResizeAlg::Convolution(FilterType::Lanczos3)
        ));
    }

    #[test]
    fn test_enum_serde_names() {
        assert_eq!(
            serde_json::to_string(&Orientation::RightMirrored).unwrap(),
            "\"rightMirrored\""
        );
        let quality: InterpolationQuality = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(quality, InterpolationQuality::Medium);
        assert!(serde_json::from_str::<Orientation>("\"sideways\"").is_err());
    }

    #[test]
    fn test_quality_codes() {
        assert_eq!(InterpolationQuality::try_from(0u8).unwrap(), InterpolationQuality::None);
        assert_eq!(InterpolationQuality::try_from(3u8).unwrap(), InterpolationQuality::High);
        assert!(InterpolationQuality::try_from(4u8).is_err());
        assert_eq!(
            "medium".parse::<InterpolationQuality>().unwrap(),
            InterpolationQuality::Medium
        );
        assert!("ultra".parse::<InterpolationQuality>().is_err());
    }

    #[test]
    fn test_image_creation() {
        let img = Image::new(100, 50, vec![0u8; 100 * 50 * 4], Orientation::Right).unwrap();
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.pixel_count(), 5000);
        assert_eq!(img.byte_size(), 20000);
        assert_eq!(img.display_size(), (50, 100));
    }

    #[test]
    fn test_image_rejects_bad_buffer() {
        let err = Image::new(10, 10, vec![0u8; 10], Orientation::Up).unwrap_err();
        assert!(matches!(err, TransformError::InvalidArgument(_)));

        let err = Image::new(0, 10, vec![], Orientation::Up).unwrap_err();
        assert!(matches!(err, TransformError::InvalidArgument(_)));
    }

    #[test]
    fn test_image_pixel_access() {
        let pixels = vec![
            255, 0, 0, 255, // Red
            0, 255, 0, 128, // Green, half alpha
        ];
        let img = Image::new(2, 1, pixels, Orientation::Up).unwrap();
        assert_eq!(img.pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(img.pixel(1, 0), [0, 255, 0, 128]);
    }

    #[test]
    fn test_rgba_image_round_trip() {
        let rgba = image::RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 4]));
        let img = Image::from_rgba_image(rgba.clone(), Orientation::Down).unwrap();
        assert_eq!(img.orientation(), Orientation::Down);
        assert_eq!(img.to_rgba_image().unwrap(), rgba);
    }

    #[test]
    fn test_error_display() {
        let err = TransformError::ResourceAllocation {
            width: 640,
            height: 480,
        };
        assert_eq!(err.to_string(), "Could not allocate a 640x480 drawing context");

        let err = TransformError::InvalidArgument("max size must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid argument: max size must be positive");
    }
}
