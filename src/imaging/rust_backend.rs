//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` (header only) |
//! | Decode (JPEG, PNG, TIFF, WebP, GIF, BMP) | `image::ImageReader` |
//! | Resize | `image::DynamicImage::resize_exact` |
//! | Carve | [`seam::carve`](super::seam::carve) |
//! | Energy map | [`seam::energy_map`](super::seam::energy_map), written as 8-bit gray |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` with quality |
//! | Encode → AVIF | `image::codecs::avif::AvifEncoder` (rav1e, speed 6) |
//! | Encode → others | `image::DynamicImage::write_to` (lossless) |
//!
//! Encoding happens in memory; the output file is only created once the
//! encoder has succeeded. Both output extensions are checked before the
//! source is decoded.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{ResampleFilter, ResizeMethod, ResizeParams};
use super::seam;
use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageFormat, ImageReader};
use std::borrow::Cow;
use std::io::Cursor;
use std::path::Path;
use std::sync::LazyLock;

/// Extensions the encoder side may be able to write, mapped to their format.
///
/// Filtered at runtime by [`ImageFormat::writing_enabled`] so the list
/// always matches the compiled-in codec features.
const OUTPUT_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
    ("gif", ImageFormat::Gif),
    ("bmp", ImageFormat::Bmp),
    ("avif", ImageFormat::Avif),
];

static SUPPORTED_OUTPUT: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    OUTPUT_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.writing_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the output file extensions that have a working encoder compiled in.
pub fn supported_output_extensions() -> &'static [&'static str] {
    &SUPPORTED_OUTPUT
}

/// AVIF encoder speed (1 = slowest/best, 10 = fastest).
const AVIF_SPEED: u8 = 6;

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Split an `ImageError` on the read side into I/O and decode failures.
fn read_error(path: &Path, err: ImageError) -> BackendError {
    match err {
        ImageError::IoError(source) => BackendError::Read {
            path: path.to_path_buf(),
            source,
        },
        other => BackendError::Decode {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    }
}

/// Resolve the encoder for `path` from its extension.
fn output_format(path: &Path) -> Result<ImageFormat, BackendError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    OUTPUT_CANDIDATES
        .iter()
        .find(|(candidate, fmt)| *candidate == ext && fmt.writing_enabled())
        .map(|(_, fmt)| *fmt)
        .ok_or_else(|| BackendError::UnsupportedFormat {
            path: path.to_path_buf(),
            supported: supported_output_extensions().to_vec(),
        })
}

/// Load and decode an image from disk.
///
/// The container is sniffed from the file content, so a mislabelled
/// extension on the input still decodes.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    let reader = ImageReader::open(path)
        .map_err(|source| BackendError::Read {
            path: path.to_path_buf(),
            source,
        })?
        .with_guessed_format()
        .map_err(|source| BackendError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    reader.decode().map_err(|e| read_error(path, e))
}

/// Encode `img` as `format` into a byte buffer.
fn encode_image(
    img: &DynamicImage,
    format: ImageFormat,
    quality: u8,
) -> Result<Vec<u8>, ImageError> {
    let mut buf = Vec::new();
    match format {
        ImageFormat::Jpeg => {
            // JPEG has no alpha channel and no 16-bit mode
            let img = match img {
                DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => Cow::Borrowed(img),
                other => Cow::Owned(DynamicImage::ImageRgb8(other.to_rgb8())),
            };
            let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality);
            img.write_with_encoder(encoder)?;
        }
        ImageFormat::Avif => {
            let encoder = image::codecs::avif::AvifEncoder::new_with_speed_quality(
                &mut buf, AVIF_SPEED, quality,
            );
            img.write_with_encoder(encoder)?;
        }
        other => img.write_to(&mut Cursor::new(&mut buf), other)?,
    }
    Ok(buf)
}

/// Encode and save, inferring the format from the output extension.
fn save_image(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let format = output_format(path)?;
    let quality = u8::try_from(quality.clamp(1, 100)).unwrap_or(100);
    let bytes = encode_image(img, format, quality).map_err(|e| BackendError::Encode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    std::fs::write(path, bytes).map_err(|source| BackendError::Write {
        path: path.to_path_buf(),
        source,
    })
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| read_error(path, e))?;
        Ok(Dimensions { width, height })
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        // Fail on a bad extension before paying for the decode
        output_format(&params.output)?;
        if let Some(map) = &params.energy_map {
            output_format(map)?;
        }

        let img = load_image(&params.source)?;
        let resized = match params.method {
            ResizeMethod::Resample => {
                img.resize_exact(params.width, params.height, params.filter.into())
            }
            ResizeMethod::Seam => seam::carve(&img, params.width, params.height, params.energy),
        };
        save_image(&resized, &params.output, params.quality.value())?;

        if let Some(map) = &params.energy_map {
            let energy = DynamicImage::ImageLuma8(seam::energy_map(&resized, params.energy));
            save_image(&energy, map, params.quality.value())?;
        }
        Ok(())
    }
}
