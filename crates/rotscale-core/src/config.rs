//! Renderer configuration.

use serde::{Deserialize, Serialize};

use crate::types::InterpolationQuality;

/// Largest context the software provider will allocate by default (128 MP).
pub const DEFAULT_MAX_CONTEXT_PIXELS: u64 = 128 * 1024 * 1024;

/// Settings shared by every operation a [`crate::Renderer`] performs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    /// Quality used by `scale` when the caller does not pass one.
    pub default_quality: InterpolationQuality,
    /// Contexts with more pixels than this are refused with
    /// `TransformError::ResourceAllocation`.
    pub max_context_pixels: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            default_quality: InterpolationQuality::High,
            max_context_pixels: DEFAULT_MAX_CONTEXT_PIXELS,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_quality(mut self, quality: InterpolationQuality) -> Self {
        self.default_quality = quality;
        self
    }

    pub fn with_max_context_pixels(mut self, max_pixels: u64) -> Self {
        self.max_context_pixels = max_pixels;
        self
    }
}
