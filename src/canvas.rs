// src/canvas.rs
//! Software-rasterized drawing surface the pieces render onto.
//!
//! The canvas is a plain RGB framebuffer with a small vector vocabulary
//! (lines, circles, polygons, text). Everything is rasterized by coverage
//! tests over integer pixel centers, so output is bit-for-bit deterministic
//! across runs and platforms.

use std::io::{self, Write};

/// RGB pixel: bytes are [R, G, B, 0] in memory order.
/// As a u32 on little-endian: 0x00BBGGRR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(transparent)]
pub struct Rgb(pub u32);

impl Rgb {
    /// Creates a pixel from component values.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(r as u32 | (g as u32) << 8 | (b as u32) << 16)
    }

    /// Grey pixel with all three channels equal.
    #[inline]
    pub const fn grey(v: u8) -> Self {
        Self::new(v, v, v)
    }

    #[inline]
    pub fn r(self) -> u8 {
        self.0.to_le_bytes()[0]
    }
    #[inline]
    pub fn g(self) -> u8 {
        self.0.to_le_bytes()[1]
    }
    #[inline]
    pub fn b(self) -> u8 {
        self.0.to_le_bytes()[2]
    }

    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
}

/// The reference dimension the original artwork was tuned at.
const REF_DIMENSION: f64 = 1320.0;

/// Map a measurement that "looks good" at 1320px to the actual dimension.
pub fn scale(measurement: f64, dimension: u32) -> f64 {
    (measurement * dimension as f64 / REF_DIMENSION).round()
}

/// Linear remap of `v` from `[lo, hi]` to `[new_lo, new_hi]`.
pub fn project(v: f64, lo: f64, hi: f64, new_lo: f64, new_hi: f64) -> f64 {
    new_lo + (v - lo) / (hi - lo) * (new_hi - new_lo)
}

/// A framebuffer plus the drawing vocabulary the pieces need.
#[derive(Debug)]
pub struct Canvas {
    /// Pixel data, row-major.
    pub data: Box<[Rgb]>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a new canvas filled with white (pieces draw on white).
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize);
        let data = vec![Rgb::WHITE; size].into_boxed_slice();
        Self { data, width, height }
    }

    /// Fill the whole surface with one color.
    pub fn clear(&mut self, color: Rgb) {
        self.data.fill(color);
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Rgb) {
        if x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64 {
            self.data[y as usize * self.width as usize + x as usize] = color;
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Rgb {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Fill an axis-aligned rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb) {
        let x0 = x.round().max(0.0) as i64;
        let y0 = y.round().max(0.0) as i64;
        let x1 = ((x + w).round() as i64).min(self.width as i64);
        let y1 = ((y + h).round() as i64).min(self.height as i64);
        for py in y0..y1 {
            for px in x0..x1 {
                self.set_pixel(px, py, color);
            }
        }
    }

    /// Stroke a line segment with the given stroke width.
    ///
    /// Covers every pixel whose center lies within half the stroke width of
    /// the segment.
    pub fn stroke_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, width: f64, color: Rgb) {
        let half = (width / 2.0).max(0.5);
        let min_x = (x0.min(x1) - half).floor() as i64;
        let max_x = (x0.max(x1) + half).ceil() as i64;
        let min_y = (y0.min(y1) - half).floor() as i64;
        let max_y = (y0.max(y1) + half).ceil() as i64;

        let dx = x1 - x0;
        let dy = y1 - y0;
        let len_sq = dx * dx + dy * dy;

        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let cx = px as f64 + 0.5;
                let cy = py as f64 + 0.5;
                // Distance from pixel center to the segment.
                let t = if len_sq == 0.0 {
                    0.0
                } else {
                    ((cx - x0) * dx + (cy - y0) * dy) / len_sq
                };
                let t = t.clamp(0.0, 1.0);
                let ex = x0 + t * dx - cx;
                let ey = y0 + t * dy - cy;
                if ex * ex + ey * ey <= half * half {
                    self.set_pixel(px, py, color);
                }
            }
        }
    }

    /// Stroke the outline of a circle.
    pub fn stroke_circle(&mut self, cx: f64, cy: f64, r: f64, width: f64, color: Rgb) {
        let r = r.abs();
        let half = (width / 2.0).max(0.5);
        self.ring_band(cx, cy, (r - half).max(0.0), r + half, color);
    }

    /// Fill a solid disk.
    pub fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Rgb) {
        self.ring_band(cx, cy, 0.0, r.abs(), color);
    }

    /// Fill the annulus between two radii.
    pub fn fill_annulus(&mut self, cx: f64, cy: f64, r_inner: f64, r_outer: f64, color: Rgb) {
        let (lo, hi) = if r_inner <= r_outer {
            (r_inner, r_outer)
        } else {
            (r_outer, r_inner)
        };
        self.ring_band(cx, cy, lo.max(0.0), hi, color);
    }

    fn ring_band(&mut self, cx: f64, cy: f64, r_lo: f64, r_hi: f64, color: Rgb) {
        let min_x = (cx - r_hi).floor() as i64;
        let max_x = (cx + r_hi).ceil() as i64;
        let min_y = (cy - r_hi).floor() as i64;
        let max_y = (cy + r_hi).ceil() as i64;
        let lo_sq = r_lo * r_lo;
        let hi_sq = r_hi * r_hi;

        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let ex = px as f64 + 0.5 - cx;
                let ey = py as f64 + 0.5 - cy;
                let d_sq = ex * ex + ey * ey;
                if d_sq >= lo_sq && d_sq <= hi_sq {
                    self.set_pixel(px, py, color);
                }
            }
        }
    }

    /// Fill a closed polygon (even-odd rule, scanline).
    pub fn fill_polygon(&mut self, points: &[(f64, f64)], color: Rgb) {
        if points.len() < 3 {
            return;
        }
        let min_y = points
            .iter()
            .map(|p| p.1)
            .fold(f64::INFINITY, f64::min)
            .floor()
            .max(0.0) as i64;
        let max_y = points
            .iter()
            .map(|p| p.1)
            .fold(f64::NEG_INFINITY, f64::max)
            .ceil()
            .min(self.height as f64) as i64;

        for py in min_y..max_y {
            let cy = py as f64 + 0.5;
            // Gather crossings of the scanline with every edge.
            let mut xs: Vec<f64> = Vec::new();
            for i in 0..points.len() {
                let (x0, y0) = points[i];
                let (x1, y1) = points[(i + 1) % points.len()];
                if (y0 <= cy && y1 > cy) || (y1 <= cy && y0 > cy) {
                    xs.push(x0 + (cy - y0) / (y1 - y0) * (x1 - x0));
                }
            }
            xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            for pair in xs.chunks_exact(2) {
                let x0 = pair[0].round().max(0.0) as i64;
                let x1 = (pair[1].round() as i64).min(self.width as i64);
                for px in x0..x1 {
                    self.set_pixel(px, py, color);
                }
            }
        }
    }

    /// Stroke the outline of a closed polygon.
    pub fn stroke_polygon(&mut self, points: &[(f64, f64)], width: f64, color: Rgb) {
        for i in 0..points.len() {
            let (x0, y0) = points[i];
            let (x1, y1) = points[(i + 1) % points.len()];
            self.stroke_line(x0, y0, x1, y1, width, color);
        }
    }

    /// Draw monospace text with the built-in 5x7 font.
    ///
    /// `size` is the glyph height in pixels. `y` is the top of the glyph box.
    /// Characters outside the font render as blanks.
    pub fn draw_text(&mut self, text: &str, x: f64, y: f64, size: f64, color: Rgb) {
        let px = glyph_pixel(size);
        let mut origin_x = x.round() as i64;
        let origin_y = y.round() as i64;
        for ch in text.chars() {
            let rows = glyph(ch);
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1u8 << (GLYPH_WIDTH - 1 - col)) != 0 {
                        self.fill_rect(
                            (origin_x + (col as i64) * px) as f64,
                            (origin_y + (row as i64) * px) as f64,
                            px as f64,
                            px as f64,
                            color,
                        );
                    }
                }
            }
            origin_x += (GLYPH_WIDTH as i64 + 1) * px;
        }
    }

    /// Write the canvas as a binary PPM (P6) image.
    pub fn to_ppm<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "P6")?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "255")?;
        for pixel in self.data.iter() {
            out.write_all(&[pixel.r(), pixel.g(), pixel.b()])?;
        }
        Ok(())
    }
}

const GLYPH_WIDTH: usize = 5;
const GLYPH_ADVANCE: usize = GLYPH_WIDTH + 1;

/// Width in pixels `text` would occupy at the given size.
pub fn measure_text(text: &str, size: f64) -> f64 {
    let px = glyph_pixel(size);
    (text.chars().count() as i64 * (GLYPH_ADVANCE as i64) * px) as f64
}

/// Pixel size of one glyph cell for a requested glyph height.
fn glyph_pixel(size: f64) -> i64 {
    ((size / 7.0).round() as i64).max(1)
}

/// 5x7 bitmap rows (high bit = leftmost column) for the characters the
/// text-drawing pieces emit.
fn glyph(ch: char) -> [u8; 7] {
    match ch {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '=' => [0b00000, 0b00000, 0b11111, 0b00000, 0b11111, 0b00000, 0b00000],
        '+' => [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00110, 0b00110],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '/' => [0b00001, 0b00010, 0b00100, 0b00100, 0b01000, 0b10000, 0b00000],
        ':' => [0b00000, 0b00110, 0b00110, 0b00000, 0b00110, 0b00110, 0b00000],
        '$' => [0b00100, 0b01111, 0b10100, 0b01110, 0b00101, 0b11110, 0b00100],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        'a' => [0b00000, 0b00000, 0b01110, 0b00001, 0b01111, 0b10001, 0b01111],
        'b' => [0b10000, 0b10000, 0b10110, 0b11001, 0b10001, 0b10001, 0b11110],
        'c' => [0b00000, 0b00000, 0b01110, 0b10000, 0b10000, 0b10001, 0b01110],
        'd' => [0b00001, 0b00001, 0b01101, 0b10011, 0b10001, 0b10001, 0b01111],
        'e' => [0b00000, 0b00000, 0b01110, 0b10001, 0b11111, 0b10000, 0b01110],
        'f' => [0b00110, 0b01001, 0b01000, 0b11100, 0b01000, 0b01000, 0b01000],
        'g' => [0b00000, 0b01111, 0b10001, 0b10001, 0b01111, 0b00001, 0b01110],
        'h' => [0b10000, 0b10000, 0b10110, 0b11001, 0b10001, 0b10001, 0b10001],
        'i' => [0b00100, 0b00000, 0b01100, 0b00100, 0b00100, 0b00100, 0b01110],
        'j' => [0b00010, 0b00000, 0b00110, 0b00010, 0b00010, 0b10010, 0b01100],
        'k' => [0b10000, 0b10000, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010],
        'l' => [0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'm' => [0b00000, 0b00000, 0b11010, 0b10101, 0b10101, 0b10101, 0b10101],
        'n' => [0b00000, 0b00000, 0b10110, 0b11001, 0b10001, 0b10001, 0b10001],
        'o' => [0b00000, 0b00000, 0b01110, 0b10001, 0b10001, 0b10001, 0b01110],
        'p' => [0b00000, 0b00000, 0b11110, 0b10001, 0b11110, 0b10000, 0b10000],
        'q' => [0b00000, 0b00000, 0b01101, 0b10011, 0b01111, 0b00001, 0b00001],
        'r' => [0b00000, 0b00000, 0b10110, 0b11001, 0b10000, 0b10000, 0b10000],
        's' => [0b00000, 0b00000, 0b01110, 0b10000, 0b01110, 0b00001, 0b11110],
        't' => [0b01000, 0b01000, 0b11100, 0b01000, 0b01000, 0b01001, 0b00110],
        'u' => [0b00000, 0b00000, 0b10001, 0b10001, 0b10001, 0b10011, 0b01101],
        'v' => [0b00000, 0b00000, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'w' => [0b00000, 0b00000, 0b10001, 0b10001, 0b10101, 0b10101, 0b01010],
        'x' => [0b00000, 0b00000, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001],
        'y' => [0b00000, 0b00000, 0b10001, 0b10001, 0b01111, 0b00001, 0b01110],
        'z' => [0b00000, 0b00000, 0b11111, 0b00010, 0b00100, 0b01000, 0b11111],
        _ => [0; 7],
    }
}
