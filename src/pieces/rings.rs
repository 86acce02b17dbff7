// src/pieces/rings.rs
//! A chain of annuli whose radius drifts byte by byte.

use crate::art::{AuxProps, Fields, Piece, PieceMeta};
use crate::canvas::{project, scale, Canvas, Rgb};
use crate::error::ArtError;
use crate::template::ByteTemplate;

pub struct Rings {
    template: ByteTemplate,
}

impl Rings {
    pub fn new() -> Self {
        let template = ByteTemplate::new(&[("init", 2), ("thickness", 5), ("changes", 20)])
            .expect("static template");
        Self { template }
    }
}

impl Default for Rings {
    fn default() -> Self {
        Self::new()
    }
}

impl Piece for Rings {
    fn template(&self) -> &ByteTemplate {
        &self.template
    }

    fn describe(&self, _fields: &Fields) -> Option<String> {
        Some(
            "Start with a ring of radius `init` and width of `thickness`. \
             For each subsequent byte in `changes`, adjust the radius where \
             a byte less than 128 decreases it and a byte above 128 \
             increases it."
                .to_string(),
        )
    }

    fn draw(&self, canvas: &mut Canvas, fields: &Fields, _aux: &AuxProps) -> Result<(), ArtError> {
        let w = canvas.width as f64;
        let h = canvas.height as f64;

        let e = scale(fields.fraction("thickness")? * 40.0 + 10.0, canvas.width);
        let step = scale(30.0, canvas.width);
        let mut radius = scale(fields.fraction("init")? * 40.0, canvas.width);

        let changes = fields.bytes("changes")?.to_vec();
        let last = (changes.len() - 1) as f64;
        for (idx, byte) in changes.iter().enumerate() {
            let x = project(idx as f64, last, 0.0, 0.2 * w, 0.8 * w);
            let y = project(idx as f64, last, 0.0, 0.6 * h, 0.4 * h);
            let r = radius.abs();

            canvas.fill_annulus(x, y, r, r + e, Rgb::WHITE);
            canvas.stroke_circle(x, y, r, 3.0, Rgb::BLACK);
            canvas.stroke_circle(x, y, r + e, 3.0, Rgb::BLACK);

            radius += step * (*byte as f64 - 128.0) / 128.0;
        }

        Ok(())
    }

    fn meta(&self) -> PieceMeta {
        PieceMeta {
            created: "30 Jan 2022",
            source: "rings.rs",
        }
    }
}
