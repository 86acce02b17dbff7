// src/pieces/boxes.rs
//! Three isometric boxes in a row, sized by single hash bytes.

use crate::art::{AuxProps, Fields, Piece, PieceMeta};
use crate::canvas::{Canvas, Rgb};
use crate::error::ArtError;
use crate::template::ByteTemplate;

pub struct Boxes {
    template: ByteTemplate,
}

struct BoxDims {
    x: f64,
    y: f64,
    d: f64,
    w: f64,
    h: f64,
}

/// Project (x, y, z) onto the isometric plane.
fn iso(x: f64, y: f64, z: f64) -> (f64, f64) {
    (x + 0.3 * z, y - 0.6 * z)
}

impl Boxes {
    pub fn new() -> Self {
        let template = ByteTemplate::new(&[
            ("w1", 1),
            ("d1", 1),
            ("h1", 1),
            ("w2", 1),
            ("d2", 1),
            ("h2", 1),
            ("w3", 1),
            ("d3", 1),
            ("h3", 1),
        ])
        .expect("static template");
        Self { template }
    }

    fn draw_box(canvas: &mut Canvas, b: &BoxDims) {
        let front = Rgb::grey(240);
        let top = Rgb::grey(180);
        let side = Rgb::grey(120);

        let faces: [(&Rgb, [(f64, f64, f64); 4]); 3] = [
            (
                &front,
                [
                    (b.x, b.y, -b.d),
                    (b.x, b.y - b.h, -b.d),
                    (b.x + b.w, b.y - b.h, -b.d),
                    (b.x + b.w, b.y, -b.d),
                ],
            ),
            (
                &top,
                [
                    (b.x, b.y - b.h, -b.d),
                    (b.x, b.y - b.h, 0.0),
                    (b.x + b.w, b.y - b.h, 0.0),
                    (b.x + b.w, b.y - b.h, -b.d),
                ],
            ),
            (
                &side,
                [
                    (b.x + b.w, b.y, -b.d),
                    (b.x + b.w, b.y - b.h, -b.d),
                    (b.x + b.w, b.y - b.h, 0.0),
                    (b.x + b.w, b.y, 0.0),
                ],
            ),
        ];

        for (color, corners) in faces {
            let polygon: Vec<(f64, f64)> =
                corners.iter().map(|&(x, y, z)| iso(x, y, z)).collect();
            canvas.fill_polygon(&polygon, *color);
            canvas.stroke_polygon(&polygon, 1.0, Rgb::BLACK);
        }
    }
}

impl Default for Boxes {
    fn default() -> Self {
        Self::new()
    }
}

impl Piece for Boxes {
    fn template(&self) -> &ByteTemplate {
        &self.template
    }

    fn describe(&self, _fields: &Fields) -> Option<String> {
        Some(
            "Three boxes drawn in an isometric projection, standing side by \
             side. Each box reads three bytes for its width, depth, and \
             height."
                .to_string(),
        )
    }

    fn draw(&self, canvas: &mut Canvas, fields: &Fields, _aux: &AuxProps) -> Result<(), ArtError> {
        let x = 0.25 * canvas.width as f64;
        let y = 0.7 * canvas.height as f64;

        const W_MIN: f64 = 20.0;
        const D_SCALE: f64 = 400.0;
        const W_SCALE: f64 = 300.0;
        const H_SCALE: f64 = 600.0;

        let w1 = fields.fraction("w1")? * W_SCALE + W_MIN;
        let w2 = fields.fraction("w2")? * W_SCALE + W_MIN;
        let w3 = fields.fraction("w3")? * W_SCALE + W_MIN;

        Self::draw_box(
            canvas,
            &BoxDims {
                x,
                y,
                d: fields.fraction("d1")? * D_SCALE,
                w: w1,
                h: fields.fraction("h1")? * H_SCALE,
            },
        );
        Self::draw_box(
            canvas,
            &BoxDims {
                x: x + w1,
                y,
                d: fields.fraction("d2")? * D_SCALE,
                w: w2,
                h: fields.fraction("h2")? * H_SCALE,
            },
        );
        Self::draw_box(
            canvas,
            &BoxDims {
                x: x + w1 + w2,
                y,
                d: fields.fraction("d3")? * D_SCALE,
                w: w3,
                h: fields.fraction("h3")? * H_SCALE,
            },
        );

        Ok(())
    }

    fn meta(&self) -> PieceMeta {
        PieceMeta {
            created: "12 Apr 2021",
            source: "boxes.rs",
        }
    }
}
