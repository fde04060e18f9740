//! The resize pipeline.
//!
//! One linear pass, no retries:
//!
//! ```text
//! identify input  →  compute target size  →  decode + resample/carve + encode  →  summary
//! ```
//!
//! Input validation (mode, pixel count) happens earlier, when the
//! [`ResizeRequest`] is built, so by the time [`run`] is called the only
//! remaining failures are on the filesystem or in the codec.
//!
//! ## Error sides
//!
//! | Variant | Meaning | Output file |
//! |---|---|---|
//! | [`ResizeError::Request`] | bad mode or pixel count | untouched |
//! | [`ResizeError::DegenerateDimensions`] | derived edge truncated to 0 | untouched |
//! | [`ResizeError::TargetTooLarge`] | output buffer over [`MAX_TARGET_BYTES`] | untouched |
//! | [`ResizeError::CarveWouldEnlarge`] | seam carving asked to grow an edge | untouched |
//! | [`ResizeError::Input`] | source missing, unreadable, or undecodable | untouched |
//! | [`ResizeError::Output`] | unsupported extension, encode or write failure | untouched unless the final write itself fails |

use crate::config::ConfigError;
use crate::imaging::{
    BackendError, EnergyOperator, ImageBackend, ResampleFilter, ResizeMethod, ResizeMode,
    ResizeParams, get_dimensions, plan_resize,
};
use crate::request::{RequestError, ResizeRequest};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Largest output accepted, measured as an 8-bit RGBA buffer. Matches the
/// `image` crate's default allocation limit for decoding.
pub const MAX_TARGET_BYTES: u64 = 512 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum ResizeError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(
        "target size {width}x{height} has an empty edge; the source aspect ratio is too extreme for {pixels}px"
    )]
    DegenerateDimensions { width: u32, height: u32, pixels: u32 },
    #[error(
        "target size {width}x{height} is too large; the output would need more than {} MiB",
        MAX_TARGET_BYTES / (1024 * 1024)
    )]
    TargetTooLarge { width: u32, height: u32 },
    #[error(
        "seam carving only shrinks: {original_width}x{original_height} cannot become {width}x{height}; use --method resample"
    )]
    CarveWouldEnlarge {
        original_width: u32,
        original_height: u32,
        width: u32,
        height: u32,
    },
    #[error("cannot load input image {0}")]
    Input(#[source] BackendError),
    #[error("cannot write output image {0}")]
    Output(#[source] BackendError),
}

impl ResizeError {
    /// Sort a backend failure onto the input or output side.
    fn from_backend(err: BackendError) -> Self {
        if err.is_input_error() {
            ResizeError::Input(err)
        } else {
            ResizeError::Output(err)
        }
    }
}

/// What a successful run did, for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub original: (u32, u32),
    pub resized: (u32, u32),
    pub mode: ResizeMode,
    pub pixels: u32,
    pub method: ResizeMethod,
    pub filter: ResampleFilter,
    pub energy: EnergyOperator,
    pub energy_map: Option<PathBuf>,
}

/// Resize `request.input()` into `request.output()` keeping the aspect ratio.
pub fn run(
    backend: &impl ImageBackend,
    request: &ResizeRequest,
) -> Result<ResizeSummary, ResizeError> {
    let original = get_dimensions(backend, request.input()).map_err(ResizeError::Input)?;

    let params = ResizeParams {
        energy_map: request.energy_map().map(Path::to_path_buf),
        ..plan_resize(request.input(), request.output(), original, request.scale())
    };
    check_target(&params, original, request.pixels())?;

    backend.resize(&params).map_err(ResizeError::from_backend)?;

    Ok(ResizeSummary {
        input: params.source,
        output: params.output,
        original,
        resized: (params.width, params.height),
        mode: request.mode(),
        pixels: request.pixels(),
        method: params.method,
        filter: params.filter,
        energy: params.energy,
        energy_map: params.energy_map,
    })
}

/// Reject target sizes the backend cannot or should not produce.
fn check_target(
    params: &ResizeParams,
    (original_width, original_height): (u32, u32),
    pixels: u32,
) -> Result<(), ResizeError> {
    let target = params.target();
    if target.is_empty() {
        return Err(ResizeError::DegenerateDimensions {
            width: target.width,
            height: target.height,
            pixels,
        });
    }
    if target.rgba8_bytes() > MAX_TARGET_BYTES {
        return Err(ResizeError::TargetTooLarge {
            width: target.width,
            height: target.height,
        });
    }
    if params.method == ResizeMethod::Seam
        && (target.width > original_width || target.height > original_height)
    {
        return Err(ResizeError::CarveWouldEnlarge {
            original_width,
            original_height,
            width: target.width,
            height: target.height,
        });
    }
    Ok(())
}
