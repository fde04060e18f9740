//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::calculations::calculate_target_dimensions;
use super::params::{
    EnergyOperator, Quality, ResampleFilter, ResizeMethod, ResizeMode, ResizeParams,
};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// Configuration for a proportional resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleConfig {
    pub mode: ResizeMode,
    /// Size of the fixed edge.
    pub pixels: u32,
    pub method: ResizeMethod,
    /// Used by [`ResizeMethod::Resample`].
    pub filter: ResampleFilter,
    /// Used by [`ResizeMethod::Seam`] and for energy maps.
    pub energy: EnergyOperator,
    pub quality: Quality,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            mode: ResizeMode::ByWidth,
            pixels: 500,
            method: ResizeMethod::default(),
            filter: ResampleFilter::default(),
            energy: EnergyOperator::default(),
            quality: Quality::default(),
        }
    }
}

/// Plan a proportional resize without executing it.
///
/// The returned params may carry a zero-length edge when the source aspect
/// ratio is extreme; the caller decides whether that is acceptable. No
/// energy map is requested.
pub fn plan_resize(
    source: &Path,
    output: &Path,
    original_dims: (u32, u32),
    config: &ScaleConfig,
) -> ResizeParams {
    let target = calculate_target_dimensions(original_dims, config.mode, config.pixels);

    ResizeParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        width: target.width,
        height: target.height,
        method: config.method,
        filter: config.filter,
        energy: config.energy,
        quality: config.quality,
        energy_map: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::Dimensions;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};

    #[test]
    fn get_dimensions_returns_width_height() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 1920,
            height: 1080,
        }]);

        let dims = get_dimensions(&backend, Path::new("/test.jpg")).unwrap();
        assert_eq!(dims, (1920, 1080));
        assert_eq!(
            backend.get_operations(),
            vec![RecordedOp::Identify("/test.jpg".to_string())]
        );
    }

    #[test]
    fn default_config_is_500_wide() {
        let config = ScaleConfig::default();
        assert_eq!(config.mode, ResizeMode::ByWidth);
        assert_eq!(config.pixels, 500);
        assert_eq!(config.method, ResizeMethod::Resample);
        assert_eq!(config.filter, ResampleFilter::Lanczos3);
        assert_eq!(config.energy, EnergyOperator::Sobel);
        assert_eq!(config.quality.value(), 90);
    }

    #[test]
    fn plan_resize_by_width() {
        let config = ScaleConfig {
            pixels: 200,
            ..ScaleConfig::default()
        };
        let params = plan_resize(
            Path::new("/in.jpg"),
            Path::new("/out.png"),
            (1000, 500),
            &config,
        );

        assert_eq!(params.source, Path::new("/in.jpg"));
        assert_eq!(params.output, Path::new("/out.png"));
        assert_eq!((params.width, params.height), (200, 100));
        assert_eq!(params.filter, ResampleFilter::Lanczos3);
        assert_eq!(params.energy_map, None);
    }

    #[test]
    fn plan_resize_by_height() {
        let config = ScaleConfig {
            mode: ResizeMode::ByHeight,
            pixels: 100,
            filter: ResampleFilter::Nearest,
            quality: Quality::new(70),
            ..ScaleConfig::default()
        };
        let params = plan_resize(Path::new("a.png"), Path::new("b.jpg"), (1000, 500), &config);

        assert_eq!((params.width, params.height), (200, 100));
        assert_eq!(params.filter, ResampleFilter::Nearest);
        assert_eq!(params.quality.value(), 70);
    }

    #[test]
    fn plan_resize_carries_seam_settings() {
        let config = ScaleConfig {
            pixels: 50,
            method: ResizeMethod::Seam,
            energy: EnergyOperator::Scharr,
            ..ScaleConfig::default()
        };
        let params = plan_resize(Path::new("a.png"), Path::new("b.png"), (100, 80), &config);
        assert_eq!(params.method, ResizeMethod::Seam);
        assert_eq!(params.energy, EnergyOperator::Scharr);
        assert_eq!(params.target(), crate::imaging::TargetDimensions { width: 50, height: 40 });
    }

    #[test]
    fn plan_resize_passes_through_degenerate_size() {
        let config = ScaleConfig {
            pixels: 10,
            ..ScaleConfig::default()
        };
        let params = plan_resize(Path::new("a.png"), Path::new("b.png"), (5000, 100), &config);
        assert_eq!((params.width, params.height), (10, 0));
        assert!(params.target().is_empty());
    }
}
