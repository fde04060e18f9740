//! Parameter types for image operations.
//!
//! These types describe *what* to do, not *how* to do it. They sit between
//! the [`operations`](super::operations) module (which works out the target
//! size) and the [`backend`](super::backend) (which does the pixel work), so
//! a mock backend can stand in for the real one in tests.
//!
//! ## Types
//!
//! - [`ResizeMode`] — Which edge is fixed: width (`"w"`) or height (`"h"`).
//! - [`Quality`] — Lossy encoding quality (1–100, default 90). Clamped on construction.
//! - [`ResampleFilter`] — Interpolation filter used when changing size.
//! - [`ResizeMethod`] — Resample every pixel, or carve out low-energy seams.
//! - [`EnergyOperator`] — How pixel energy is measured for seam carving.
//! - [`ResizeParams`] — Everything a resize needs: source, output, exact target size.

use super::calculations::TargetDimensions;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// A mode string that is neither `"w"` nor `"h"`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid mode {0:?}; please choose \"w\" (fix width) or \"h\" (fix height)")]
pub struct InvalidMode(pub String);

/// Which dimension the requested pixel count applies to.
///
/// The other dimension is derived from the source aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeMode {
    /// Fix the width, derive the height.
    #[default]
    ByWidth,
    /// Fix the height, derive the width.
    ByHeight,
}

impl ResizeMode {
    /// The literal accepted on the command line and in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            ResizeMode::ByWidth => "w",
            ResizeMode::ByHeight => "h",
        }
    }
}

impl FromStr for ResizeMode {
    type Err = InvalidMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "w" => Ok(ResizeMode::ByWidth),
            "h" => Ok(ResizeMode::ByHeight),
            other => Err(InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Resampling filter, named the way it is spelled on the command line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    #[value(name = "catmull-rom")]
    CatmullRom,
    Gaussian,
    #[default]
    #[value(name = "lanczos3")]
    Lanczos3,
}

impl ResampleFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            ResampleFilter::Nearest => "nearest",
            ResampleFilter::Triangle => "triangle",
            ResampleFilter::CatmullRom => "catmull-rom",
            ResampleFilter::Gaussian => "gaussian",
            ResampleFilter::Lanczos3 => "lanczos3",
        }
    }
}

impl fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the image is brought to the target size.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeMethod {
    /// Interpolate every output pixel with a [`ResampleFilter`].
    #[default]
    Resample,
    /// Remove the lowest-energy seams until the target size is reached.
    /// Shrinks only.
    Seam,
}

impl ResizeMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            ResizeMethod::Resample => "resample",
            ResizeMethod::Seam => "seam",
        }
    }
}

impl fmt::Display for ResizeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Energy function used to rank pixels for seam removal.
///
/// The first four are 3x3 gradient kernels, scored as `(|gx| + |gy|) / 2` on
/// the luma channel. `Forward` scores a pixel by the new edge its removal
/// would create between its neighbours.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum EnergyOperator {
    #[default]
    Sobel,
    Prewitt,
    Scharr,
    Roberts,
    Forward,
}

impl EnergyOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            EnergyOperator::Sobel => "sobel",
            EnergyOperator::Prewitt => "prewitt",
            EnergyOperator::Scharr => "scharr",
            EnergyOperator::Roberts => "roberts",
            EnergyOperator::Forward => "forward",
        }
    }
}

impl fmt::Display for EnergyOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for an exact-size resize operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub method: ResizeMethod,
    pub filter: ResampleFilter,
    pub energy: EnergyOperator,
    pub quality: Quality,
    /// Also write a grayscale energy map of the result here.
    pub energy_map: Option<PathBuf>,
}

impl ResizeParams {
    pub fn target(&self) -> TargetDimensions {
        TargetDimensions {
            width: self.width,
            height: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_literals() {
        assert_eq!("w".parse::<ResizeMode>(), Ok(ResizeMode::ByWidth));
        assert_eq!("h".parse::<ResizeMode>(), Ok(ResizeMode::ByHeight));
    }

    #[test]
    fn mode_rejects_anything_else() {
        for bad in ["", "W", "width", "x", " w"] {
            let err = bad.parse::<ResizeMode>().unwrap_err();
            assert_eq!(err, InvalidMode(bad.to_string()));
        }
    }

    #[test]
    fn invalid_mode_message_names_valid_modes() {
        let msg = InvalidMode("x".into()).to_string();
        assert!(msg.contains("\"w\""), "{msg}");
        assert!(msg.contains("\"h\""), "{msg}");
    }

    #[test]
    fn mode_default_is_width() {
        assert_eq!(ResizeMode::default(), ResizeMode::ByWidth);
        assert_eq!(ResizeMode::default().to_string(), "w");
    }

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_90() {
        assert_eq!(Quality::default().value(), 90);
    }

    #[test]
    fn filter_names_match_cli_spelling() {
        use clap::ValueEnum;
        for filter in ResampleFilter::value_variants() {
            let pv = filter.to_possible_value().unwrap();
            assert_eq!(pv.get_name(), filter.as_str());
        }
    }

    #[test]
    fn filter_default_is_lanczos3() {
        assert_eq!(ResampleFilter::default(), ResampleFilter::Lanczos3);
    }

    #[test]
    fn method_and_energy_names_match_cli_spelling() {
        use clap::ValueEnum;
        for method in ResizeMethod::value_variants() {
            let pv = method.to_possible_value().unwrap();
            assert_eq!(pv.get_name(), method.as_str());
        }
        for energy in EnergyOperator::value_variants() {
            let pv = energy.to_possible_value().unwrap();
            assert_eq!(pv.get_name(), energy.as_str());
        }
    }

    #[test]
    fn method_defaults_to_resample_with_sobel_energy() {
        assert_eq!(ResizeMethod::default(), ResizeMethod::Resample);
        assert_eq!(EnergyOperator::default(), EnergyOperator::Sobel);
    }
}
