// src/pieces/automata.rs
//! Elementary cellular automaton: one rule byte, a hash-derived seed row,
//! rendered one generation per row.

use crate::art::{AuxProps, Fields, Piece, PieceMeta};
use crate::canvas::{scale, Canvas, Rgb};
use crate::error::ArtError;
use crate::template::{big_integer, ByteTemplate};

/// Expand a rule byte into its 8-entry lookup table.
///
/// Index is the 3-bit neighborhood value (left, self, right), so
/// neighborhood 7 ("111") maps to the rule's most significant bit.
pub fn rule_lookup(rule: u8) -> [u8; 8] {
    let mut table = [0u8; 8];
    for (n, entry) in table.iter_mut().enumerate() {
        *entry = (rule >> n) & 1;
    }
    table
}

/// One generation step. Out-of-range neighbors read as 0.
pub fn next_row(row: &[u8], lookup: &[u8; 8]) -> Vec<u8> {
    (0..row.len())
        .map(|i| {
            let left = if i == 0 { 0 } else { row[i - 1] };
            let center = row[i];
            let right = if i + 1 == row.len() { 0 } else { row[i + 1] };
            lookup[((left << 2) | (center << 1) | right) as usize]
        })
        .collect()
}

pub struct Automata {
    template: ByteTemplate,
}

impl Automata {
    pub fn new() -> Self {
        let template =
            ByteTemplate::new(&[("rule", 1), ("seed", 4)]).expect("static template");
        Self { template }
    }
}

impl Default for Automata {
    fn default() -> Self {
        Self::new()
    }
}

impl Piece for Automata {
    fn template(&self) -> &ByteTemplate {
        &self.template
    }

    fn describe(&self, fields: &Fields) -> Option<String> {
        let rule = fields.bytes("rule").ok()?[0];
        Some(format!(
            "An elementary cellular automaton running rule {rule}. The seed \
             bytes are read as a binary number and placed at the center of \
             the first row; each later row is computed from the 3-cell \
             neighborhoods of the row above."
        ))
    }

    fn draw(&self, canvas: &mut Canvas, fields: &Fields, _aux: &AuxProps) -> Result<(), ArtError> {
        let w = canvas.width;
        let h = canvas.height;
        let bit = scale(12.0, w).max(1.0);

        // Wide enough that growth from the seed never reaches the edges
        // within the rendered generations.
        let len = ((w + h + h) as f64 / bit).floor() as usize;
        let mut row = vec![0u8; len];

        // The seed accumulator starts at 1 so the pattern always has a
        // leading 1 bit.
        let seed = big_integer(fields.bytes("seed")?, 1);
        let input = seed.to_radix_be(2);
        let base = (len / 2).saturating_sub(input.len() / 2);
        for (i, &b) in input.iter().enumerate() {
            if base + i < len {
                row[base + i] = b;
            }
        }

        let lookup = rule_lookup(fields.bytes("rule")?[0]);
        let width_in_bits = (w as f64 / bit).floor() as usize;
        let start = len / 2 - width_in_bits / 2;
        let end = len / 2 + width_in_bits / 2;

        let generations = (h as f64 / bit).floor() as usize + 1;
        for g in 0..generations {
            row = next_row(&row, &lookup);
            for i in start..end.min(row.len()) {
                if row[i] == 1 {
                    canvas.fill_rect(
                        (i - start) as f64 * bit,
                        g as f64 * bit,
                        bit,
                        bit,
                        Rgb::BLACK,
                    );
                }
            }
        }

        Ok(())
    }

    fn meta(&self) -> PieceMeta {
        PieceMeta {
            created: "26 Feb 2022",
            source: "automata.rs",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_30_lookup_matches_wolfram() {
        // Rule 30 = 0b00011110: neighborhoods 1..4 fire.
        let lookup = rule_lookup(30);
        assert_eq!(lookup, [0, 1, 1, 1, 1, 0, 0, 0]);
    }

    #[test]
    fn rule_90_single_cell_makes_a_sierpinski_row() {
        let lookup = rule_lookup(90);
        let row = vec![0, 0, 0, 1, 0, 0, 0];
        let next = next_row(&row, &lookup);
        assert_eq!(next, vec![0, 0, 1, 0, 1, 0, 0]);
    }

    #[test]
    fn rule_0_clears_everything() {
        let lookup = rule_lookup(0);
        let row = vec![1, 1, 0, 1];
        assert_eq!(next_row(&row, &lookup), vec![0, 0, 0, 0]);
    }

    #[test]
    fn edges_read_zero_neighbors() {
        // Rule 254 fires for every non-empty neighborhood.
        let lookup = rule_lookup(254);
        let row = vec![1, 0, 0];
        // Cell 0 has neighborhood (0, 1, 0), cell 1 has (1, 0, 0).
        assert_eq!(next_row(&row, &lookup), vec![1, 1, 0]);
    }
}
