//! Fit-to-size calculations.

use crate::types::TransformError;

/// Reject sizes that are not strictly positive finite numbers.
pub(crate) fn validate_max_size(max_size: f64) -> Result<(), TransformError> {
    if max_size.is_finite() && max_size > 0.0 {
        Ok(())
    } else {
        Err(TransformError::invalid(format!(
            "max size must be a positive number, got {max_size}"
        )))
    }
}

/// Calculate dimensions to fit within `max_size` while preserving aspect
/// ratio.
///
/// Returns `None` when the image already fits (scale factor >= 1), because
/// images are never upscaled. Otherwise the longer edge becomes
/// `floor(max_size)` and the shorter edge is scaled proportionally and
/// rounded. Both edges are at least one pixel.
pub fn fit_dimensions(width: u32, height: u32, max_size: f64) -> Option<(u32, u32)> {
    let long = width.max(height);
    if long == 0 || max_size / long as f64 >= 1.0 {
        return None;
    }

    let new_long = (max_size.floor() as u32).clamp(1, long);
    let short = width.min(height);
    let new_short = ((short as f64 * new_long as f64 / long as f64).round() as u32)
        .clamp(1, new_long);

    if width >= height {
        Some((new_long, new_short))
    } else {
        Some((new_short, new_long))
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
