//! Image processing on top of the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Resize** | `resize_exact` with a selectable filter (Lanczos3 by default) |
//! | **Carve** | [`seam::carve`]: seam removal ranked by a gradient or forward energy |
//! | **Encode** | format chosen from the output extension |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend
//! - **Seam**: Energy maps and content-aware shrinking

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;
pub mod seam;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{TargetDimensions, calculate_target_dimensions};
pub use operations::{ScaleConfig, get_dimensions, plan_resize};
pub use params::{
    EnergyOperator, InvalidMode, Quality, ResampleFilter, ResizeMethod, ResizeMode, ResizeParams,
};
pub use rust_backend::{RustBackend, supported_output_extensions};
