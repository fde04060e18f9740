//! The validated description of one resize invocation.

use crate::imaging::{
    EnergyOperator, InvalidMode, Quality, ResampleFilter, ResizeMethod, ResizeMode, ScaleConfig,
};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error(transparent)]
    InvalidMode(#[from] InvalidMode),
    #[error("pixels must be a positive integer, got 0")]
    ZeroPixels,
}

/// Everything needed to run one resize, checked once at construction.
///
/// Fields are private: a request is built from user input, optionally
/// extended with the `with_*` builders, and never changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeRequest {
    input: PathBuf,
    output: PathBuf,
    energy_map: Option<PathBuf>,
    scale: ScaleConfig,
}

impl ResizeRequest {
    /// Validate raw user input.
    ///
    /// `mode` must be the literal `"w"` or `"h"` and `pixels` must be
    /// non-zero. No file is touched here.
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        mode: &str,
        pixels: u32,
        filter: ResampleFilter,
        quality: Quality,
    ) -> Result<Self, RequestError> {
        let mode: ResizeMode = mode.parse()?;
        if pixels == 0 {
            return Err(RequestError::ZeroPixels);
        }
        Ok(Self {
            input: input.into(),
            output: output.into(),
            energy_map: None,
            scale: ScaleConfig {
                mode,
                pixels,
                filter,
                quality,
                ..ScaleConfig::default()
            },
        })
    }

    pub fn with_method(mut self, method: ResizeMethod) -> Self {
        self.scale.method = method;
        self
    }

    pub fn with_energy(mut self, energy: EnergyOperator) -> Self {
        self.scale.energy = energy;
        self
    }

    /// Also write the result's energy map to `path`.
    pub fn with_energy_map(mut self, path: impl Into<PathBuf>) -> Self {
        self.energy_map = Some(path.into());
        self
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn mode(&self) -> ResizeMode {
        self.scale.mode
    }

    pub fn pixels(&self) -> u32 {
        self.scale.pixels
    }

    pub fn method(&self) -> ResizeMethod {
        self.scale.method
    }

    pub fn energy_map(&self) -> Option<&Path> {
        self.energy_map.as_deref()
    }

    pub fn scale(&self) -> &ScaleConfig {
        &self.scale
    }
}
