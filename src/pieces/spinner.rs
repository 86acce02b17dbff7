// src/pieces/spinner.rs
//! Two rotating arms tracing dots, like a decoupled double pendulum.

use crate::art::{AuxProps, Fields, Piece, PieceMeta};
use crate::canvas::{project, scale, Canvas, Rgb};
use crate::error::ArtError;
use crate::template::ByteTemplate;

const FRAMES: usize = 2000;

pub struct Spinner {
    template: ByteTemplate,
}

impl Spinner {
    pub fn new() -> Self {
        let template = ByteTemplate::new(&[("l1", 4), ("v1", 4), ("l2", 4), ("v2", 4)])
            .expect("static template");
        Self { template }
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl Piece for Spinner {
    fn template(&self) -> &ByteTemplate {
        &self.template
    }

    fn describe(&self, _fields: &Fields) -> Option<String> {
        Some(format!(
            "Two arms with hash-derived lengths rotate at hash-derived \
             speeds, the second fixed to the end of the first. A dot is \
             drawn at the tip of the second arm for each of {FRAMES} units \
             of time."
        ))
    }

    fn draw(&self, canvas: &mut Canvas, fields: &Fields, _aux: &AuxProps) -> Result<(), ArtError> {
        let w = canvas.width as f64;
        let h = canvas.height as f64;
        let s = w.min(h);

        let l1 = fields.fraction("l1")?;
        let l2 = fields.fraction("l2")?;
        let v1 = fields.fraction("v1")?;
        let v2 = fields.fraction("v2")?;

        let dot = scale(4.0, canvas.width.min(canvas.height));
        const RADIAL_UNIT: f64 = 1.0 / 5.0;

        for i in 0..FRAMES {
            let t = i as f64 * RADIAL_UNIT;
            let x = (l1 / 2.0) * ((v1 - 0.5) * t).cos() + (l2 / 2.0) * ((v2 - 0.5) * t).cos();
            let y = (l1 / 2.0) * ((v1 - 0.5) * t).sin() + (l2 / 2.0) * ((v2 - 0.5) * t).sin();

            canvas.fill_circle(
                project(x, -1.0, 1.0, w / 2.0 - s / 2.0, w / 2.0 + s / 2.0),
                project(y, -1.0, 1.0, h / 2.0 - s / 2.0, h / 2.0 + s / 2.0),
                dot,
                Rgb::BLACK,
            );
        }

        Ok(())
    }

    fn meta(&self) -> PieceMeta {
        PieceMeta {
            created: "12 Mar 2022",
            source: "spinner.rs",
        }
    }
}
