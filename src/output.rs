//! CLI output formatting.
//!
//! # Output Format
//!
//! ```text
//! photo.jpg (1000x500) → thumb.png (200x100)
//!     Source: shots/photo.jpg
//!     Output: web/thumb.png
//!     Fixed: width 200px
//!     Filter: lanczos3
//! ```
//!
//! A seam-carved run replaces the filter line and may name an energy map:
//!
//! ```text
//!     Carved: sobel energy
//!     Energy map: web/energy.png
//! ```
//!
//! The header names files by their file name; the indented context lines
//! show the paths exactly as they were given.
//!
//! # Architecture
//!
//! [`format_resize_output`] returns `Vec<String>` for testability and
//! [`print_resize_output`] writes it to stdout. The format function is pure:
//! no I/O, no side effects. Errors are not formatted here; `main` sends them
//! to stderr.

use crate::imaging::{ResizeMethod, ResizeMode};
use crate::resize::ResizeSummary;
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// File name for display, falling back to the whole path.
fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn size_label((width, height): (u32, u32)) -> String {
    format!("{}x{}", width, height)
}

fn edge_name(mode: ResizeMode) -> &'static str {
    match mode {
        ResizeMode::ByWidth => "width",
        ResizeMode::ByHeight => "height",
    }
}

/// Format the summary of a completed resize.
pub fn format_resize_output(summary: &ResizeSummary) -> Vec<String> {
    let ctx = indent(1);
    let mut lines = vec![
        format!(
            "{} ({}) \u{2192} {} ({})",
            file_label(&summary.input),
            size_label(summary.original),
            file_label(&summary.output),
            size_label(summary.resized),
        ),
        format!("{ctx}Source: {}", summary.input.display()),
        format!("{ctx}Output: {}", summary.output.display()),
        format!("{ctx}Fixed: {} {}px", edge_name(summary.mode), summary.pixels),
    ];
    lines.push(match summary.method {
        ResizeMethod::Resample => format!("{ctx}Filter: {}", summary.filter),
        ResizeMethod::Seam => format!("{ctx}Carved: {} energy", summary.energy),
    });
    if let Some(map) = &summary.energy_map {
        lines.push(format!("{ctx}Energy map: {}", map.display()));
    }
    lines
}

/// Print resize output to stdout.
pub fn print_resize_output(summary: &ResizeSummary) {
    for line in format_resize_output(summary) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::{EnergyOperator, ResampleFilter};
    use std::path::PathBuf;

    fn summary() -> ResizeSummary {
        ResizeSummary {
            input: PathBuf::from("shots/photo.jpg"),
            output: PathBuf::from("web/thumb.png"),
            original: (1000, 500),
            resized: (200, 100),
            mode: ResizeMode::ByWidth,
            pixels: 200,
            method: ResizeMethod::Resample,
            filter: ResampleFilter::Lanczos3,
            energy: EnergyOperator::Sobel,
            energy_map: None,
        }
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn file_label_uses_file_name() {
        assert_eq!(file_label(Path::new("a/b/c.png")), "c.png");
    }

    #[test]
    fn file_label_falls_back_to_path() {
        assert_eq!(file_label(Path::new("..")), "..");
    }

    #[test]
    fn format_width_mode_summary() {
        assert_eq!(
            format_resize_output(&summary()),
            vec![
                "photo.jpg (1000x500) \u{2192} thumb.png (200x100)",
                "    Source: shots/photo.jpg",
                "    Output: web/thumb.png",
                "    Fixed: width 200px",
                "    Filter: lanczos3",
            ]
        );
    }

    #[test]
    fn format_height_mode_summary() {
        let s = ResizeSummary {
            mode: ResizeMode::ByHeight,
            pixels: 100,
            filter: ResampleFilter::CatmullRom,
            ..summary()
        };
        let lines = format_resize_output(&s);
        assert_eq!(lines[3], "    Fixed: height 100px");
        assert_eq!(lines[4], "    Filter: catmull-rom");
    }

    #[test]
    fn format_seam_summary_with_energy_map() {
        let s = ResizeSummary {
            method: ResizeMethod::Seam,
            energy: EnergyOperator::Forward,
            energy_map: Some(PathBuf::from("web/energy.png")),
            ..summary()
        };
        let lines = format_resize_output(&s);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[4], "    Carved: forward energy");
        assert_eq!(lines[5], "    Energy map: web/energy.png");
    }
}
