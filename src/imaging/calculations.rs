//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::ResizeMode;

/// Output size of a proportional resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetDimensions {
    pub width: u32,
    pub height: u32,
}

impl TargetDimensions {
    /// True if either side collapsed to zero pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Size of the output as an 8-bit RGBA buffer, saturating at `u64::MAX`.
    pub fn rgba8_bytes(&self) -> u64 {
        u64::from(self.width)
            .saturating_mul(u64::from(self.height))
            .saturating_mul(4)
    }
}

/// Calculate the output size that fixes one edge and keeps the aspect ratio.
///
/// The fixed edge is exactly `pixels`. The derived edge is
/// `floor(pixels * H / W)` in width mode and `floor(pixels * W / H)` in
/// height mode: truncated, never rounded. The product is taken in `u64`
/// integer arithmetic so the floor is exact for every input size.
///
/// A source with a zero-length side yields a zero derived edge instead of
/// dividing by zero; callers reject that through [`TargetDimensions::is_empty`].
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `mode` - Which edge `pixels` applies to
/// * `pixels` - Size of the fixed edge
///
/// # Examples
/// ```
/// # use ratio_resize::imaging::{ResizeMode, calculate_target_dimensions};
/// // 1000x500 fixed to 200px wide → 200x100
/// let t = calculate_target_dimensions((1000, 500), ResizeMode::ByWidth, 200);
/// assert_eq!((t.width, t.height), (200, 100));
///
/// // Same source fixed to 100px high → 200x100
/// let t = calculate_target_dimensions((1000, 500), ResizeMode::ByHeight, 100);
/// assert_eq!((t.width, t.height), (200, 100));
/// ```
pub fn calculate_target_dimensions(
    source: (u32, u32),
    mode: ResizeMode,
    pixels: u32,
) -> TargetDimensions {
    let (src_w, src_h) = source;

    match mode {
        ResizeMode::ByWidth => TargetDimensions {
            width: pixels,
            height: scale_edge(pixels, src_h, src_w),
        },
        ResizeMode::ByHeight => TargetDimensions {
            width: scale_edge(pixels, src_w, src_h),
            height: pixels,
        },
    }
}

/// `floor(pixels * numerator / denominator)`, saturating at `u32::MAX`.
fn scale_edge(pixels: u32, numerator: u32, denominator: u32) -> u32 {
    if denominator == 0 {
        return 0;
    }
    let scaled = u64::from(pixels) * u64::from(numerator) / u64::from(denominator);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}
