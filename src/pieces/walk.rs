// src/pieces/walk.rs
//! A self-avoiding-ish grid walk: forward, then turn left or right per the
//! parity of each digest byte, scaled to fit the canvas.

use crate::art::{AuxProps, Fields, Piece, PieceMeta};
use crate::canvas::{scale, Canvas, Rgb};
use crate::error::ArtError;
use crate::template::ByteTemplate;

pub struct Walk {
    template: ByteTemplate,
}

impl Walk {
    pub fn new() -> Self {
        let template = ByteTemplate::new(&[("turns", 32)]).expect("static template");
        Self { template }
    }
}

impl Default for Walk {
    fn default() -> Self {
        Self::new()
    }
}

impl Piece for Walk {
    fn template(&self) -> &ByteTemplate {
        &self.template
    }

    fn describe(&self, _fields: &Fields) -> Option<String> {
        Some(
            "We illustrate a random walk, starting at (0, 0) with a \
             direction of east. For each byte in `turns`, we walk forward, \
             then turn left if the byte is odd or right if it is even."
                .to_string(),
        )
    }

    fn draw(&self, canvas: &mut Canvas, fields: &Fields, _aux: &AuxProps) -> Result<(), ArtError> {
        let s = canvas.width.min(canvas.height);
        let step = scale(10.0, s);

        let mut dir = (1i64, 0i64);
        let mut pos = (0.0f64, 0.0f64);
        let mut path = vec![pos];

        for &byte in fields.bytes("turns")? {
            pos = (pos.0 + step * dir.0 as f64, pos.1 + step * dir.1 as f64);
            path.push(pos);

            // Turn: odd bytes go one way round the compass, even the other.
            let even = byte % 2 == 0;
            dir = match dir {
                (1, 0) => (0, if even { -1 } else { 1 }),
                (0, 1) => (if even { 1 } else { -1 }, 0),
                (-1, 0) => (0, if even { 1 } else { -1 }),
                _ => (if even { -1 } else { 1 }, 0),
            };
        }

        let min_x = path.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
        let max_x = path.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
        let min_y = path.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max_y = path.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        let max_side = (max_x - min_x).max(max_y - min_y);
        if max_side == 0.0 {
            return Err(ArtError::DegenerateGeometry("walk never moved".into()));
        }

        let padding = scale(120.0, s);
        let fit = |v: f64, min: f64| {
            (v - min) / max_side * (s as f64 - 2.0 * padding) + padding
        };

        for pair in path.windows(2) {
            canvas.stroke_line(
                fit(pair[0].0, min_x),
                fit(pair[0].1, min_y),
                fit(pair[1].0, min_x),
                fit(pair[1].1, min_y),
                6.0,
                Rgb::BLACK,
            );
        }

        Ok(())
    }

    fn meta(&self) -> PieceMeta {
        PieceMeta {
            created: "26 Apr 2021",
            source: "walk.rs",
        }
    }
}
