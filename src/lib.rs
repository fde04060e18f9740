//! # ratio-resize
//!
//! Resize an image to a target width or height while keeping its aspect
//! ratio, and write the result to a new file.
//!
//! ```text
//! ratio-resize -i photo.jpg -o thumb.png -m w -p 200
//! ```
//!
//! # Pipeline
//!
//! ```text
//! 1. Request   CLI flags + config file  →  ResizeRequest    (validated, immutable)
//! 2. Identify  input file               →  (width, height)
//! 3. Plan      size + mode + pixels     →  exact target size (derived edge truncated)
//! 4. Resize    decode → resample or seam-carve → encode by output extension
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`request`] | [`ResizeRequest`](request::ResizeRequest): mode/pixel validation at the boundary |
//! | [`resize`] | The [`run`](resize::run) pipeline and the [`ResizeError`](resize::ResizeError) taxonomy |
//! | [`imaging`] | Dimension math, seam carving, the backend trait, and the `image`-crate backend |
//! | [`config`] | Optional TOML file with defaults for the CLI flags |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Truncate, Don't Round
//!
//! The derived edge is `floor(pixels * H / W)` (or `W / H` in height mode),
//! computed in integer arithmetic. A 1000x999 image fixed at 500px wide comes
//! out 500x499, not 500x500. Where the float formula `pixels / (H / W)` lands
//! a hair under a whole number, the derived edge here is one pixel larger
//! (3x25 at 500px high gives 60 wide, not 59).
//!
//! ## Validate Before Touching Files
//!
//! A bad `--mode` or a zero `--pixels` is rejected while the request is built.
//! Once the source size is known, a target that would need more than
//! [`resize::MAX_TARGET_BYTES`] of pixels, or a seam carve that would have to
//! grow an edge, is rejected before decoding. So is an unknown output extension.
//! Encoding happens in memory, so the output path is only written once the
//! encoder has produced every byte.
//!
//! ## Seam Carving
//!
//! `--method seam` shrinks by repeatedly removing the connected path of
//! pixels with the least energy: all vertical seams first, then horizontal
//! ones on the transposed image. The energy function is one of four 3x3
//! gradient kernels or forward energy, and `--energy-map` writes it out as a
//! grayscale image. See [`imaging::seam`].
//!
//! ## Backend Trait
//!
//! Codec work sits behind [`imaging::ImageBackend`]. The production
//! [`imaging::RustBackend`] uses the `image` crate; tests swap in a recording
//! mock so the pipeline logic runs without real images.

pub mod config;
pub mod imaging;
pub mod output;
pub mod request;
pub mod resize;

#[cfg(test)]
pub(crate) mod test_helpers;
