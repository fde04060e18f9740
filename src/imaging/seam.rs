//! Content-aware resizing by seam carving.
//!
//! A vertical seam is a path of one pixel per row, each step moving at most
//! one column left or right. Removing the seam with the least total energy
//! narrows the image by one column while keeping high-contrast detail.
//! Horizontal seams are found the same way on the transposed image.
//!
//! ```text
//! luma → energy → cumulative cost, top to bottom → cheapest bottom pixel
//!      → walk back up → drop one pixel per row
//! ```
//!
//! Energy is recomputed after every seam, so a carve costs roughly
//! (seams removed) x (pixels).

use super::params::EnergyOperator;
use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Pixel, RgbaImage};

/// 3x3 convolution kernel. Rows are `dy = -1, 0, 1`, columns `dx = -1, 0, 1`.
type Kernel = [[i32; 3]; 3];

const SOBEL: (Kernel, Kernel) = (
    [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]],
    [[-1, -2, -1], [0, 0, 0], [1, 2, 1]],
);
const PREWITT: (Kernel, Kernel) = (
    [[-1, 0, 1], [-1, 0, 1], [-1, 0, 1]],
    [[-1, -1, -1], [0, 0, 0], [1, 1, 1]],
);
const SCHARR: (Kernel, Kernel) = (
    [[-3, 0, 3], [-10, 0, 10], [-3, 0, 3]],
    [[-3, -10, -3], [0, 0, 0], [3, 10, 3]],
);
const ROBERTS: (Kernel, Kernel) = (
    [[0, 0, 0], [0, 1, 0], [0, 0, -1]],
    [[0, 0, 0], [0, 0, 1], [0, -1, 0]],
);

fn kernels(op: EnergyOperator) -> Option<&'static (Kernel, Kernel)> {
    match op {
        EnergyOperator::Sobel => Some(&SOBEL),
        EnergyOperator::Prewitt => Some(&PREWITT),
        EnergyOperator::Scharr => Some(&SCHARR),
        EnergyOperator::Roberts => Some(&ROBERTS),
        EnergyOperator::Forward => None,
    }
}

/// Luma at `(x, y)` with coordinates clamped to the image border.
fn luma_at(gray: &GrayImage, x: i64, y: i64) -> i32 {
    let x = x.clamp(0, i64::from(gray.width()) - 1) as u32;
    let y = y.clamp(0, i64::from(gray.height()) - 1) as u32;
    i32::from(gray.get_pixel(x, y)[0])
}

fn index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

/// Per-pixel `(|gx| + |gy|) / 2`, row-major.
fn gradient_energy(gray: &GrayImage, (kx, ky): &(Kernel, Kernel)) -> Vec<u32> {
    let (width, height) = gray.dimensions();
    let mut energy = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            let (mut gx, mut gy) = (0i32, 0i32);
            for (dy, (row_x, row_y)) in (-1i64..).zip(kx.iter().zip(ky)) {
                for (dx, (&cx, &cy)) in (-1i64..).zip(row_x.iter().zip(row_y)) {
                    let v = luma_at(gray, i64::from(x) + dx, i64::from(y) + dy);
                    gx += v * cx;
                    gy += v * cy;
                }
            }
            energy.push((gx.unsigned_abs() + gy.unsigned_abs()) / 2);
        }
    }
    energy
}

/// Cost of the edges created by removing `(x, y)`, for a seam arriving from
/// up-left, straight up, and up-right.
fn forward_costs(gray: &GrayImage, x: u32, y: u32) -> [u32; 3] {
    let (x, y) = (i64::from(x), i64::from(y));
    let left = luma_at(gray, x - 1, y);
    let right = luma_at(gray, x + 1, y);
    let above = luma_at(gray, x, y - 1);

    let up = (right - left).unsigned_abs();
    [
        up + (above - left).unsigned_abs(),
        up,
        up + (above - right).unsigned_abs(),
    ]
}

/// Energy of every pixel, row-major. For `Forward` this is the straight-up
/// cost, the part of the forward energy that does not depend on the seam.
fn pixel_energy(gray: &GrayImage, op: EnergyOperator) -> Vec<u32> {
    match kernels(op) {
        Some(k) => gradient_energy(gray, k),
        None => {
            let (width, height) = gray.dimensions();
            (0..height)
                .flat_map(|y| (0..width).map(move |x| forward_costs(gray, x, y)[1]))
                .collect()
        }
    }
}

/// Scale energies linearly onto 0..=255.
fn normalize(energy: &[u32], width: u32, height: u32) -> GrayImage {
    let min = energy.iter().copied().min().unwrap_or(0);
    let max = energy.iter().copied().max().unwrap_or(0);
    let range = u64::from((max - min).max(1));
    GrayImage::from_fn(width, height, |x, y| {
        let level = u64::from(energy[index(width, x, y)] - min) * 255 / range;
        Luma([u8::try_from(level).unwrap_or(u8::MAX)])
    })
}

/// Grayscale visualisation of `img`'s energy under `op`: black is the
/// cheapest pixel to remove, white the most expensive.
pub fn energy_map(img: &DynamicImage, op: EnergyOperator) -> GrayImage {
    let gray = img.to_luma8();
    normalize(&pixel_energy(&gray, op), gray.width(), gray.height())
}

/// Column of the cheapest vertical seam in each row, top to bottom.
///
/// Ties prefer the path straight up, then up-left, then up-right; among
/// equally cheap seams the leftmost wins.
fn find_vertical_seam(gray: &GrayImage, op: EnergyOperator) -> Vec<u32> {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let energy = kernels(op).map(|k| gradient_energy(gray, k));
    // [up-left, up, up-right] cost of entering (x, y)
    let step = |x: u32, y: u32| -> [u64; 3] {
        match &energy {
            Some(e) => [u64::from(e[index(width, x, y)]); 3],
            None => forward_costs(gray, x, y).map(u64::from),
        }
    };

    let mut cost = vec![0u64; width as usize * height as usize];
    let mut from = vec![0u32; cost.len()];
    for x in 0..width {
        cost[index(width, x, 0)] = step(x, 0)[1];
        from[index(width, x, 0)] = x;
    }
    for y in 1..height {
        for x in 0..width {
            let [left, up, right] = step(x, y);
            let mut best = (cost[index(width, x, y - 1)] + up, x);
            if x > 0 {
                let c = cost[index(width, x - 1, y - 1)] + left;
                if c < best.0 {
                    best = (c, x - 1);
                }
            }
            if x + 1 < width {
                let c = cost[index(width, x + 1, y - 1)] + right;
                if c < best.0 {
                    best = (c, x + 1);
                }
            }
            cost[index(width, x, y)] = best.0;
            from[index(width, x, y)] = best.1;
        }
    }

    let bottom = height - 1;
    let mut x = (0..width)
        .min_by_key(|&x| cost[index(width, x, bottom)])
        .unwrap_or(0);
    let mut seam = vec![0u32; height as usize];
    for y in (0..height).rev() {
        seam[y as usize] = x;
        x = from[index(width, x, y)];
    }
    seam
}

/// Copy of `img` without the pixel `seam[y]` in each row `y`.
fn remove_vertical_seam<P: Pixel>(
    img: &ImageBuffer<P, Vec<P::Subpixel>>,
    seam: &[u32],
) -> ImageBuffer<P, Vec<P::Subpixel>> {
    let (width, height) = img.dimensions();
    ImageBuffer::from_fn(width.saturating_sub(1), height, |x, y| {
        let skip = u32::from(x >= seam[y as usize]);
        *img.get_pixel(x + skip, y)
    })
}

/// Mirror `img` across its main diagonal.
fn transpose<P: Pixel>(
    img: &ImageBuffer<P, Vec<P::Subpixel>>,
) -> ImageBuffer<P, Vec<P::Subpixel>> {
    let (width, height) = img.dimensions();
    ImageBuffer::from_fn(height, width, |x, y| *img.get_pixel(y, x))
}

/// Remove vertical seams until `pixels` is `width` wide, keeping the luma
/// plane in step.
fn carve_columns(
    mut pixels: RgbaImage,
    mut gray: GrayImage,
    width: u32,
    op: EnergyOperator,
) -> (RgbaImage, GrayImage) {
    while pixels.width() > width.max(1) {
        let seam = find_vertical_seam(&gray, op);
        pixels = remove_vertical_seam(&pixels, &seam);
        gray = remove_vertical_seam(&gray, &seam);
    }
    (pixels, gray)
}

/// Shrink `img` to `width` x `height` by removing seams.
///
/// Vertical seams go first, then horizontal ones. An edge already at or
/// below its target is left as it is: carving never enlarges. Images with an
/// alpha channel come back as RGBA8, everything else as RGB8.
pub fn carve(img: &DynamicImage, width: u32, height: u32, op: EnergyOperator) -> DynamicImage {
    let (pixels, gray) = carve_columns(img.to_rgba8(), img.to_luma8(), width, op);

    let pixels = if pixels.height() > height.max(1) {
        let (rotated, _) = carve_columns(transpose(&pixels), transpose(&gray), height, op);
        transpose(&rotated)
    } else {
        pixels
    };

    let carved = DynamicImage::ImageRgba8(pixels);
    if img.color().has_alpha() {
        carved
    } else {
        DynamicImage::ImageRgb8(carved.into_rgb8())
    }
}
