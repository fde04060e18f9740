//! Configuration file support.
//!
//! A config file supplies defaults for the command-line options. It is only
//! read when passed explicitly with `--config`; nothing is looked up
//! implicitly and no environment variables are consulted.
//!
//! ## Precedence
//!
//! ```text
//! command-line flag  >  config file  >  stock default
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [resize]
//! mode = "w"           # "w" = fix width, "h" = fix height
//! pixels = 500         # Size of the fixed edge
//! filter = "lanczos3"  # nearest | triangle | catmull-rom | gaussian | lanczos3
//! method = "resample"  # resample | seam
//! energy = "sobel"     # sobel | prewitt | scharr | roberts | forward
//!
//! [output]
//! quality = 90         # JPEG/AVIF quality (1-100)
//! ```
//!
//! Files are sparse: stock defaults are merged underneath whatever the file
//! sets. Unknown keys are rejected to catch typos early.

use crate::imaging::{EnergyOperator, Quality, ResampleFilter, ResizeMethod, ResizeMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Defaults for how the image is resized.
    pub resize: ResizeDefaults,
    /// Encoder settings.
    pub output: OutputConfig,
}

impl ToolConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(e) = self.resize.mode.parse::<ResizeMode>() {
            return Err(ConfigError::Validation(format!("resize.mode: {e}")));
        }
        if self.resize.pixels == 0 {
            return Err(ConfigError::Validation(
                "resize.pixels must be greater than 0".into(),
            ));
        }
        if !(1..=100).contains(&self.output.quality) {
            return Err(ConfigError::Validation(
                "output.quality must be 1-100".into(),
            ));
        }
        Ok(())
    }
}

/// `[resize]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeDefaults {
    /// `"w"` or `"h"`. Kept as a string so a bad value reports the same
    /// message as a bad `--mode`.
    pub mode: String,
    pub pixels: u32,
    pub filter: ResampleFilter,
    pub method: ResizeMethod,
    /// Energy function for seam carving and energy maps.
    pub energy: EnergyOperator,
}

impl Default for ResizeDefaults {
    fn default() -> Self {
        Self {
            mode: ResizeMode::default().as_str().to_string(),
            pixels: 500,
            filter: ResampleFilter::default(),
            method: ResizeMethod::default(),
            energy: EnergyOperator::default(),
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// JPEG/AVIF encoding quality. Lossless encoders ignore it.
    pub quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default().value(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ToolConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// The path was given explicitly, so a missing file is an error.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(value)
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ToolConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ToolConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the effective config.
///
/// `None` yields the stock defaults; `Some(path)` merges that file on top.
pub fn load_config(path: Option<&Path>) -> Result<ToolConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = path.map(load_raw_config).transpose()?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock config with all keys and explanations.
///
/// Printed by `--gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# ratio-resize configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Use with: ratio-resize --config resize.toml -i in.jpg -o out.png
# Command-line flags override anything set here.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Resizing
# ---------------------------------------------------------------------------
[resize]
# Which edge is fixed: "w" fixes the width and derives the height,
# "h" fixes the height and derives the width.
mode = "w"

# Size in pixels of the fixed edge.
pixels = 500

# Resampling filter: nearest, triangle, catmull-rom, gaussian, lanczos3.
filter = "lanczos3"

# How the target size is reached:
#   "resample" interpolates every pixel with the filter above.
#   "seam"     removes low-energy seams; content-aware, shrink only.
method = "resample"

# Energy function for seam carving and --energy-map:
# sobel, prewitt, scharr, roberts, or forward.
energy = "sobel"

# ---------------------------------------------------------------------------
# Output encoding
# ---------------------------------------------------------------------------
[output]
# JPEG/AVIF quality (1 = worst, 100 = best). PNG, TIFF, WebP, GIF and BMP
# are written losslessly and ignore this.
quality = 90
"##
}
