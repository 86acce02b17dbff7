// src/pieces/circles.rs
//! Two overlapping circles shaded with parallel chords.

use crate::art::{AuxProps, Fields, Piece, PieceMeta};
use crate::canvas::{Canvas, Rgb};
use crate::error::ArtError;
use crate::template::ByteTemplate;

pub struct Circles {
    template: ByteTemplate,
}

struct Shaded {
    color: Rgb,
    x: f64,
    y: f64,
    r: f64,
    theta: f64,
    d: f64,
}

impl Circles {
    pub fn new() -> Self {
        let template = ByteTemplate::new(&[
            ("x1", 2),
            ("y1", 2),
            ("r1", 2),
            ("θ1", 1),
            ("d1", 1),
            ("x2", 2),
            ("y2", 2),
            ("r2", 2),
            ("θ2", 1),
            ("d2", 1),
        ])
        .expect("static template");
        Self { template }
    }

    fn shaded_circle(canvas: &mut Canvas, c: &Shaded) {
        canvas.stroke_circle(c.x, c.y, c.r, 1.0, c.color);

        // Only shade for small enough chord spacings.
        if c.d > 0.0 && c.d < 20.0 {
            let mut myd = c.r - c.d;
            while myd > -c.r {
                let mytheta = (myd / c.r).acos();
                canvas.stroke_line(
                    c.x + c.r * (mytheta + c.theta).cos(),
                    c.y + c.r * (mytheta + c.theta).sin(),
                    c.x + c.r * (-mytheta + c.theta).cos(),
                    c.y + c.r * (-mytheta + c.theta).sin(),
                    1.0,
                    c.color,
                );
                myd -= c.d;
            }
        }
    }
}

impl Default for Circles {
    fn default() -> Self {
        Self::new()
    }
}

impl Piece for Circles {
    fn template(&self) -> &ByteTemplate {
        &self.template
    }

    fn describe(&self, _fields: &Fields) -> Option<String> {
        Some(
            "Two circles, each placed and sized by hash-derived coordinates, \
             shaded by a family of parallel chords whose angle and spacing \
             come from the remaining bytes."
                .to_string(),
        )
    }

    fn draw(&self, canvas: &mut Canvas, fields: &Fields, _aux: &AuxProps) -> Result<(), ArtError> {
        let w = canvas.width as f64;
        let h = canvas.height as f64;

        let first = Shaded {
            color: Rgb::grey(100),
            x: fields.fraction("x1")? * w,
            y: fields.fraction("y1")? * h,
            r: fields.fraction("r1")? * w,
            theta: fields.fraction("θ1")? * std::f64::consts::PI,
            d: fields.fraction("d1")? * 100.0,
        };
        Self::shaded_circle(canvas, &first);

        let second = Shaded {
            color: Rgb::grey(51),
            x: fields.fraction("x2")? * w,
            y: fields.fraction("y2")? * h,
            r: fields.fraction("r2")? * w,
            theta: fields.fraction("θ2")? * std::f64::consts::PI,
            d: fields.fraction("d2")? * 200.0,
        };
        Self::shaded_circle(canvas, &second);

        Ok(())
    }

    fn meta(&self) -> PieceMeta {
        PieceMeta {
            created: "11 Apr 2021",
            source: "circles.rs",
        }
    }
}
