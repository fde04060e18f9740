//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations every backend must
//! support: identify and resize.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate and statically linked into the binary.

use super::params::ResizeParams;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure at the codec boundary.
///
/// Variants are split by side: [`Read`](Self::Read) and [`Decode`](Self::Decode)
/// concern the source image, the rest concern the destination.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("{}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },
    #[error("{}: unsupported output format (expected one of: {})", .path.display(), .supported.join(", "))]
    UnsupportedFormat {
        path: PathBuf,
        supported: Vec<&'static str>,
    },
    #[error("{}: {message}", .path.display())]
    Encode { path: PathBuf, message: String },
    #[error("{}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BackendError {
    /// True if the failure came from opening or decoding the source image.
    pub fn is_input_error(&self) -> bool {
        matches!(self, BackendError::Read { .. } | BackendError::Decode { .. })
    }
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// Keeps the resize pipeline independent of the codec library so it can be
/// exercised with a mock.
pub trait ImageBackend {
    /// Get image dimensions without decoding pixel data where possible.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode `params.source`, bring it to exactly `params.width` x
    /// `params.height` with `params.method`, and encode to `params.output`
    /// in the format implied by its extension. When `params.energy_map` is
    /// set, also write the result's energy map there.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;
}
