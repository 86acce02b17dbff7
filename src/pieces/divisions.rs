// src/pieces/divisions.rs
//! Repeatedly cut the canvas from a rotating edge, golden-spiral style.

use crate::art::{AuxProps, Fields, Piece, PieceMeta};
use crate::canvas::{scale, Canvas, Rgb};
use crate::error::ArtError;
use crate::template::ByteTemplate;

pub struct Divisions {
    template: ByteTemplate,
}

impl Divisions {
    pub fn new() -> Self {
        let template = ByteTemplate::new(&[("divisions", 16)]).expect("static template");
        Self { template }
    }
}

impl Default for Divisions {
    fn default() -> Self {
        Self::new()
    }
}

impl Piece for Divisions {
    fn template(&self) -> &ByteTemplate {
        &self.template
    }

    fn describe(&self, fields: &Fields) -> Option<String> {
        let n = fields.bytes("divisions").ok()?.len();
        Some(format!(
            "For each of the {n} bytes in `divisions`, we cut the canvas \
             into two pieces. The distance from the edge is determined by \
             the square of the current byte. We then rotate and repeat this \
             process on the remaining canvas. If each of these distances \
             were 1/φ, we would end up with the golden spiral."
        ))
    }

    fn draw(&self, canvas: &mut Canvas, fields: &Fields, _aux: &AuxProps) -> Result<(), ArtError> {
        let line = scale(3.0, canvas.width).max(1.0);

        let mut min_x = 0.0f64;
        let mut min_y = 0.0f64;
        let mut max_x = canvas.width as f64;
        let mut max_y = canvas.height as f64;

        let divisions = fields.bytes("divisions")?.to_vec();
        for (idx, byte) in divisions.iter().enumerate() {
            let cut = (*byte as f64 / 256.0).powi(2);

            match idx % 4 {
                0 => {
                    min_x += (max_x - min_x) * cut;
                    canvas.stroke_line(min_x, min_y, min_x, max_y, line, Rgb::BLACK);
                }
                1 => {
                    min_y += (max_y - min_y) * cut;
                    canvas.stroke_line(min_x, min_y, max_x, min_y, line, Rgb::BLACK);
                }
                2 => {
                    max_x -= (max_x - min_x) * cut;
                    canvas.stroke_line(max_x, min_y, max_x, max_y, line, Rgb::BLACK);
                }
                _ => {
                    max_y -= (max_y - min_y) * cut;
                    canvas.stroke_line(min_x, max_y, max_x, max_y, line, Rgb::BLACK);
                }
            }
        }

        Ok(())
    }

    fn meta(&self) -> PieceMeta {
        PieceMeta {
            created: "01 Jun 2021",
            source: "divisions.rs",
        }
    }
}
