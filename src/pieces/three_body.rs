// src/pieces/three_body.rs
//! Three gravitating bodies released from rest, their paths traced dot by
//! dot over a thousand integration steps.

use crate::art::{AuxProps, Fields, Piece, PieceMeta};
use crate::canvas::{project, Canvas, Rgb};
use crate::error::ArtError;
use crate::template::ByteTemplate;

const G: f64 = 0.0000001;
const FRAMES: usize = 1000;

#[derive(Debug, Clone, Copy)]
struct Body {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
}

impl Body {
    fn at_rest(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
        }
    }
}

/// Map unit-square coordinates into the largest centered square on the
/// canvas. Non-finite positions (a collision blew the forces up) draw
/// nothing, matching how a browser canvas ignores them.
fn dot(canvas: &mut Canvas, x: f64, y: f64, r: f64, filled: bool) {
    let w = canvas.width as f64;
    let h = canvas.height as f64;
    let s = w.min(h);

    let px = project(x, 0.0, 1.0, w / 2.0 - s / 2.0, w / 2.0 + s / 2.0);
    let py = project(y, 0.0, 1.0, h / 2.0 - s / 2.0, h / 2.0 + s / 2.0);
    if !px.is_finite() || !py.is_finite() {
        return;
    }

    if filled {
        canvas.fill_circle(px, py, r, Rgb::BLACK);
    } else {
        canvas.stroke_circle(px, py, r, 1.0, Rgb::BLACK);
    }
}

pub struct ThreeBody {
    template: ByteTemplate,
}

impl ThreeBody {
    pub fn new() -> Self {
        let template = ByteTemplate::new(&[
            ("m1", 4),
            ("x1", 3),
            ("y1", 3),
            ("m2", 4),
            ("x2", 3),
            ("y2", 3),
            ("m3", 4),
            ("x3", 3),
            ("y3", 3),
        ])
        .expect("static template");
        Self { template }
    }
}

impl Default for ThreeBody {
    fn default() -> Self {
        Self::new()
    }
}

impl Piece for ThreeBody {
    fn template(&self) -> &ByteTemplate {
        &self.template
    }

    fn describe(&self, _fields: &Fields) -> Option<String> {
        Some(format!(
            "Place three bodies in space. Each body is defined by 10 bytes. \
             The first 4 control its mass. The next 3 control its starting x \
             position (0, 1). The next 3 control its starting y position \
             (0, 1). All bodies start at rest. Then, simulate the \
             gravitational forces between the bodies. We run the simulation \
             for {FRAMES} steps and use a value of {G} for the gravitational \
             constant."
        ))
    }

    fn draw(&self, canvas: &mut Canvas, fields: &Fields, _aux: &AuxProps) -> Result<(), ArtError> {
        let m1 = fields.fraction("m1")?;
        let m2 = fields.fraction("m2")?;
        let m3 = fields.fraction("m3")?;

        let mut body1 = Body::at_rest(fields.fraction("x1")?, fields.fraction("y1")?);
        let mut body2 = Body::at_rest(fields.fraction("x2")?, fields.fraction("y2")?);
        let mut body3 = Body::at_rest(fields.fraction("x3")?, fields.fraction("y3")?);

        for _ in 0..FRAMES {
            let d12 = ((body1.x - body2.x).powi(2) + (body1.y - body2.y).powi(2)).sqrt();
            let f12 = G * m1 * m2 / (d12 * d12);
            let theta12 = (body2.y - body1.y).atan2(body2.x - body1.x);

            let d13 = ((body1.x - body3.x).powi(2) + (body1.y - body3.y).powi(2)).sqrt();
            let f13 = G * m1 * m3 / (d13 * d13);
            let theta13 = (body3.y - body1.y).atan2(body3.x - body1.x);

            let d23 = ((body2.x - body3.x).powi(2) + (body2.y - body3.y).powi(2)).sqrt();
            let f23 = G * m2 * m3 / (d23 * d23);
            let theta23 = (body3.y - body2.y).atan2(body3.x - body2.x);

            let ax1 = (f12 * theta12.cos() + f13 * theta13.cos()) / m1;
            let ay1 = (f12 * theta12.sin() + f13 * theta13.sin()) / m1;
            body1.vx += ax1;
            body1.vy += ay1;
            body1.x += body1.vx;
            body1.y += body1.vy;

            let ax2 = (-f12 * theta12.cos() + f23 * theta23.cos()) / m2;
            let ay2 = (-f12 * theta12.sin() + f23 * theta23.sin()) / m2;
            body2.vx += ax2;
            body2.vy += ay2;
            body2.x += body2.vx;
            body2.y += body2.vy;

            let ax3 = (-f13 * theta13.cos() - f23 * theta23.cos()) / m3;
            let ay3 = (-f13 * theta13.sin() - f23 * theta23.sin()) / m3;
            body3.vx += ax3;
            body3.vy += ay3;
            body3.x += body3.vx;
            body3.y += body3.vy;

            dot(canvas, body1.x, body1.y, 1.0, true);
            dot(canvas, body2.x, body2.y, 1.0, true);
            dot(canvas, body3.x, body3.y, 1.0, true);
        }

        dot(canvas, body1.x, body1.y, 10.0, false);
        dot(canvas, body2.x, body2.y, 10.0, false);
        dot(canvas, body3.x, body3.y, 10.0, false);

        Ok(())
    }

    fn meta(&self) -> PieceMeta {
        PieceMeta {
            created: "03 Feb 2024",
            source: "three_body.rs",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_pair_stays_symmetric() {
        // Two equal masses mirrored about x = 0.5 with a third far away and
        // massless-ish: each integration step pulls them toward each other
        // by the same amount.
        let mut a = Body::at_rest(0.25, 0.5);
        let mut b = Body::at_rest(0.75, 0.5);
        let m = 0.5;
        for _ in 0..10 {
            let d = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
            let f = G * m * m / (d * d);
            let theta = (b.y - a.y).atan2(b.x - a.x);
            a.vx += f * theta.cos() / m;
            a.x += a.vx;
            b.vx += -f * theta.cos() / m;
            b.x += b.vx;
        }
        assert!((a.x + b.x - 1.0).abs() < 1e-12);
        assert!(a.x > 0.25);
    }

    #[test]
    fn coincident_bodies_do_not_panic() {
        // A zero separation produces infinite force and NaN positions; the
        // draw must swallow that rather than crash.
        let piece = ThreeBody::new();
        let digest = [0u8; 32];
        let fields = Fields::extract(piece.template(), &digest);
        let mut canvas = Canvas::new(66, 66);
        piece.draw(&mut canvas, &fields, &Default::default()).unwrap();
    }
}
