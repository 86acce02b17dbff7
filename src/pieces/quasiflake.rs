// src/pieces/quasiflake.rs
//! A partially-fractured Koch snowflake: each byte picks one segment of the
//! triangle's boundary and splits it into a mountain.

use std::f64::consts::PI;

use crate::art::{AuxProps, Fields, Piece, PieceMeta};
use crate::canvas::{scale, Canvas, Rgb};
use crate::error::ArtError;
use crate::template::ByteTemplate;

pub struct QuasiFlake {
    template: ByteTemplate,
}

impl QuasiFlake {
    pub fn new() -> Self {
        let template = ByteTemplate::new(&[("fractures", 32)]).expect("static template");
        Self { template }
    }
}

impl Default for QuasiFlake {
    fn default() -> Self {
        Self::new()
    }
}

impl Piece for QuasiFlake {
    fn template(&self) -> &ByteTemplate {
        &self.template
    }

    fn describe(&self, _fields: &Fields) -> Option<String> {
        Some(
            "Begin with three line segments forming an equilateral triangle. \
             For each of the 32 bytes in `fractures`, grab the `(byte % \
             segments.length)`th segment and split it into three sections of \
             equal length. Remove the middle segment, replacing it with two \
             segments of the same length arranged to form a mountain. If we \
             repeated this process indefinitely on every segment (and not \
             just those selected with `fractures`), we would form a Koch \
             snowflake."
                .to_string(),
        )
    }

    fn draw(&self, canvas: &mut Canvas, fields: &Fields, _aux: &AuxProps) -> Result<(), ArtError> {
        // Each segment is a polar step: walk `r` units at angle `theta`.
        let mut segments: Vec<(f64, f64)> = vec![(-PI / 3.0, 1.0), (PI, 1.0), (PI / 3.0, 1.0)];

        for &byte in fields.bytes("fractures")? {
            let idx = byte as usize % segments.len();
            let (theta, r) = segments[idx];

            // ___ -> _/\_
            segments.splice(
                idx..idx + 1,
                [
                    (theta, r / 3.0),
                    (theta + PI / 3.0, r / 3.0),
                    (theta - PI / 3.0, r / 3.0),
                    (theta, r / 3.0),
                ],
            );
        }

        let w = canvas.width as f64;
        let h = canvas.height as f64;

        let line_width = scale(5.0, canvas.width);
        let span = 0.75 * w.min(h);

        let mut x = w / 2.0;
        let mut y = h / 2.0 - span * 3.0_f64.sqrt() / 3.0;

        for (theta, r) in segments {
            let nx = x + r * span * theta.cos();
            let ny = y - r * span * theta.sin();
            canvas.stroke_line(x, y, nx, ny, line_width, Rgb::BLACK);
            x = nx;
            y = ny;
        }

        Ok(())
    }

    fn meta(&self) -> PieceMeta {
        PieceMeta {
            created: "05 Jun 2021",
            source: "quasiflake.rs",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_fracture_adds_three_segments() {
        // Exercise the splice bookkeeping without drawing.
        let mut segments: Vec<(f64, f64)> = vec![(-PI / 3.0, 1.0), (PI, 1.0), (PI / 3.0, 1.0)];
        for byte in [0u8, 7, 255, 13] {
            let idx = byte as usize % segments.len();
            let (theta, r) = segments[idx];
            segments.splice(
                idx..idx + 1,
                [
                    (theta, r / 3.0),
                    (theta + PI / 3.0, r / 3.0),
                    (theta - PI / 3.0, r / 3.0),
                    (theta, r / 3.0),
                ],
            );
        }
        assert_eq!(segments.len(), 3 + 3 * 4);
    }

    #[test]
    fn fractured_boundary_draws_something() {
        let piece = QuasiFlake::new();
        let mut digest = [0u8; 32];
        for (i, byte) in digest.iter_mut().enumerate() {
            *byte = (i * 37) as u8;
        }
        let fields = Fields::extract(piece.template(), &digest);
        let mut canvas = Canvas::new(66, 66);
        piece.draw(&mut canvas, &fields, &Default::default()).unwrap();
        // Something got drawn.
        assert!(canvas.data.iter().any(|&p| p == Rgb::BLACK));
    }
}
