// src/pieces/fraction.rs
//! Greedy Egyptian-fraction expansion of a hash-derived proper fraction,
//! typeset as a sum of unit fractions. Denominators grow explosively, so
//! the expansion is capped and truncation is rendered as a trailing "...".

use num_bigint::BigUint;
use num_traits::Zero;

use crate::art::{AuxProps, Fields, Piece, PieceMeta};
use crate::canvas::{measure_text, scale, Canvas, Rgb};
use crate::error::ArtError;
use crate::template::{big_integer, ByteTemplate};

/// Unit-fraction denominators aren't allowed to grow without bound; past
/// this many terms the expansion is reported as truncated.
pub const MAX_TERMS: usize = 15;

/// Result of a greedy expansion: `1/terms[0] + 1/terms[1] + ...`, possibly
/// cut off early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub terms: Vec<BigUint>,
    pub truncated: bool,
}

/// Greedy Egyptian-fraction expansion of `numer / denom`.
///
/// Requires `numer <= denom`. Each step takes `ceil(denom / numer)` as the
/// next unit denominator; exact divisions short-circuit. A zero numerator
/// yields an empty, complete expansion.
pub fn egyptian(numer: &BigUint, denom: &BigUint) -> Expansion {
    let mut numer = numer.clone();
    let mut denom = denom.clone();
    let mut terms = Vec::new();

    if numer.is_zero() {
        return Expansion {
            terms,
            truncated: false,
        };
    }

    for _ in 0..MAX_TERMS {
        if (&denom % &numer).is_zero() {
            terms.push(&denom / &numer);
            return Expansion {
                terms,
                truncated: false,
            };
        }

        // ceil(denom / numer) for a non-exact division.
        let greedy = &denom / &numer + 1u32;

        // numer/denom - 1/greedy = (numer*greedy - denom) / (denom*greedy)
        numer = &numer * &greedy - &denom;
        denom *= &greedy;
        terms.push(greedy);
    }

    Expansion {
        terms,
        truncated: true,
    }
}

pub struct Fraction {
    template: ByteTemplate,
}

impl Fraction {
    pub fn new() -> Self {
        let template = ByteTemplate::new(&[("a", 6), ("b", 6)]).expect("static template");
        Self { template }
    }

    /// Typeset `numer` over `denom` at (x, y), wrapping long denominators.
    /// Returns the (width, height) consumed.
    fn draw_fraction(
        canvas: &mut Canvas,
        numer: &str,
        denom: &str,
        x: f64,
        y: f64,
        max_width: f64,
        font_size: f64,
        line_height: f64,
    ) -> (f64, f64) {
        let one_char = measure_text("0", font_size);
        let chars_per_line = ((max_width / one_char).floor() as usize).max(1);

        let numer_width = measure_text(numer, font_size);
        let denom_width =
            measure_text(denom, font_size).min(chars_per_line as f64 * one_char);

        canvas.draw_text(
            numer,
            x + (denom_width - numer_width) / 2.0,
            y,
            font_size,
            Rgb::BLACK,
        );
        canvas.stroke_line(
            x,
            y + line_height,
            x + denom_width,
            y + line_height,
            2.0,
            Rgb::BLACK,
        );

        let mut lines = 0;
        let denom_chars: Vec<char> = denom.chars().collect();
        for (line, chunk) in denom_chars.chunks(chars_per_line).enumerate() {
            let text: String = chunk.iter().collect();
            canvas.draw_text(
                &text,
                x,
                y + line_height + (line as f64 + 0.5) * line_height,
                font_size,
                Rgb::BLACK,
            );
            lines = line + 1;
        }

        (denom_width, line_height + lines as f64 * line_height)
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::new()
    }
}

impl Piece for Fraction {
    fn template(&self) -> &ByteTemplate {
        &self.template
    }

    fn describe(&self, _fields: &Fields) -> Option<String> {
        Some(
            "Convert `a` and `b` into integers and form them into a proper \
             fraction. We then show the process of turning this fraction \
             into a sum of unit fractions, commonly referred to as an \
             Egyptian fraction. Our algorithm is the greedy one; the \
             numbers grow fast very quickly."
                .to_string(),
        )
    }

    fn draw(&self, canvas: &mut Canvas, fields: &Fields, _aux: &AuxProps) -> Result<(), ArtError> {
        let a = big_integer(fields.bytes("a")?, 0);
        let b = big_integer(fields.bytes("b")?, 0);
        let (numer, denom) = if a < b { (a, b) } else { (b, a) };

        if numer.is_zero() {
            return Err(ArtError::DegenerateGeometry(
                "fraction numerator is zero".into(),
            ));
        }

        let w = canvas.width as f64;
        let left = scale(30.0, canvas.width);
        let top = scale(30.0, canvas.height);
        let font_size = scale(20.0, canvas.width).max(7.0);
        let line_height = font_size * 1.2;
        let eq_pad = scale(30.0, canvas.width);

        // The input fraction on the left.
        let (frac_width, _) = Self::draw_fraction(
            canvas,
            &numer.to_string(),
            &denom.to_string(),
            left,
            top,
            f64::INFINITY,
            font_size,
            line_height,
        );

        let eq_width = measure_text("=", font_size);
        let room = w - 2.0 * left - frac_width - eq_width - 2.0 * eq_pad;
        let term_x = left + frac_width + eq_width + 2.0 * eq_pad;

        let expansion = egyptian(&numer, &denom);
        let mut y = top;
        let mut sign = "=";
        for term in &expansion.terms {
            canvas.draw_text(
                sign,
                left + frac_width + eq_pad,
                y + 0.25 * line_height,
                font_size,
                Rgb::BLACK,
            );
            let (_, height) = Self::draw_fraction(
                canvas,
                "1",
                &term.to_string(),
                term_x,
                y,
                room,
                font_size,
                line_height,
            );
            y += height;
            sign = "+";
        }

        if expansion.truncated {
            canvas.draw_text(
                sign,
                left + frac_width + eq_pad,
                y + 0.25 * line_height,
                font_size,
                Rgb::BLACK,
            );
            canvas.draw_text("...", term_x, y + line_height, font_size, Rgb::BLACK);
        }

        Ok(())
    }

    fn meta(&self) -> PieceMeta {
        PieceMeta {
            created: "29 Apr 2021",
            source: "fraction.rs",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(n: u32, d: u32) -> (Vec<BigUint>, bool) {
        let e = egyptian(&BigUint::from(n), &BigUint::from(d));
        (e.terms, e.truncated)
    }

    #[test]
    fn one_half_is_a_single_term() {
        let (t, truncated) = terms(1, 2);
        assert_eq!(t, vec![BigUint::from(2u32)]);
        assert!(!truncated);
    }

    #[test]
    fn two_thirds_expands_to_half_plus_sixth() {
        let (t, truncated) = terms(2, 3);
        assert_eq!(t, vec![BigUint::from(2u32), BigUint::from(6u32)]);
        assert!(!truncated);
    }

    #[test]
    fn equal_terms_make_one() {
        let (t, truncated) = terms(7, 7);
        assert_eq!(t, vec![BigUint::from(1u32)]);
        assert!(!truncated);
    }

    #[test]
    fn zero_numerator_is_empty() {
        let (t, truncated) = terms(0, 5);
        assert!(t.is_empty());
        assert!(!truncated);
    }

    #[test]
    fn expansion_sums_back_to_the_input() {
        // 5/121 is a classic slow case for the greedy algorithm.
        let e = egyptian(&BigUint::from(5u32), &BigUint::from(121u32));
        assert!(!e.truncated);
        // Check sum of 1/t == 5/121 over a common denominator.
        let mut num = BigUint::zero();
        let mut den = BigUint::from(1u32);
        for t in &e.terms {
            num = num * t + &den;
            den *= t;
        }
        // num/den == 5/121  <=>  121 * num == 5 * den
        assert_eq!(num * 121u32, den * 5u32);
    }

    #[test]
    fn cap_marks_truncation() {
        // 16/3169 is still going strong after fifteen greedy steps.
        let e = egyptian(&BigUint::from(16u32), &BigUint::from(3169u32));
        assert!(e.truncated);
        assert_eq!(e.terms.len(), MAX_TERMS);
        assert_eq!(e.terms[0], BigUint::from(199u32));
    }
}
