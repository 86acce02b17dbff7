// src/pieces/collatz.rs
//! A Collatz trajectory drawn as rows of bits, computed with bit-string
//! arithmetic rather than machine integers so the values can outgrow u64.
//!
//! Bit order quirk, preserved from the original artwork: the input bytes
//! are concatenated MSB-first, but the arithmetic treats index 0 as the
//! least significant bit. The sequence is therefore a Collatz run on the
//! bit-reversed input, which is exactly what the original rendered.

use crate::art::{AuxProps, Fields, Piece, PieceMeta};
use crate::canvas::{scale, Canvas, Rgb};
use crate::error::ArtError;
use crate::template::ByteTemplate;

/// A number as bits with index 0 least significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitString(pub Vec<u8>);

impl BitString {
    /// Concatenate each byte's bits MSB-first (the original's layout).
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut bits = Vec::with_capacity(bytes.len() * 8);
        for &b in bytes {
            for shift in (0..8).rev() {
                bits.push((b >> shift) & 1);
            }
        }
        Self(bits)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_odd(&self) -> bool {
        self.0.first() == Some(&1)
    }

    /// n / 2: drop the least significant bit.
    pub fn halve(&self) -> Self {
        Self(self.0[1..].to_vec())
    }

    /// Ripple-carry addition from the least significant end.
    pub fn add(&self, other: &BitString) -> Self {
        let len = self.len().max(other.len());
        let mut result = Vec::with_capacity(len + 1);
        let mut carry = 0;
        for i in 0..len {
            let a = self.0.get(i).copied().unwrap_or(0);
            let b = other.0.get(i).copied().unwrap_or(0);
            let sum = a + b + carry;
            result.push(sum % 2);
            carry = if sum > 1 { 1 } else { 0 };
        }
        if carry != 0 {
            result.push(carry);
        }
        Self(result)
    }

    /// 3n + 1, as (n + 2n) + 1.
    pub fn triple_plus_one(&self) -> Self {
        let mut doubled = vec![0];
        doubled.extend_from_slice(&self.0);
        self.add(&Self(doubled)).add(&Self(vec![1]))
    }

    /// The value as a u64, for small fixtures. Saturates past 64 bits.
    #[cfg(test)]
    pub fn to_u64(&self) -> u64 {
        self.0
            .iter()
            .enumerate()
            .take(64)
            .map(|(i, &b)| (b as u64) << i)
            .sum()
    }
}

pub struct Collatz {
    template: ByteTemplate,
}

impl Collatz {
    pub fn new() -> Self {
        let template = ByteTemplate::new(&[("input", 8)]).expect("static template");
        Self { template }
    }
}

impl Default for Collatz {
    fn default() -> Self {
        Self::new()
    }
}

impl Piece for Collatz {
    fn template(&self) -> &ByteTemplate {
        &self.template
    }

    fn describe(&self, _fields: &Fields) -> Option<String> {
        Some(
            "We convert `input` to a number and use it as the first number \
             in a Collatz sequence (even n => n/2, odd n => 3n+1) until the \
             number reaches 1. Each iteration is drawn as a bit string where \
             1s are filled and 0s are empty, continuing to the next line and \
             wrapping back to the top when necessary."
                .to_string(),
        )
    }

    fn draw(&self, canvas: &mut Canvas, fields: &Fields, _aux: &AuxProps) -> Result<(), ArtError> {
        let bs = scale(8.0, canvas.height).max(1.0);
        let mut current = BitString::from_bytes(fields.bytes("input")?);

        let mut x: f64 = 0.0;
        let mut y: f64 = 0.0;
        let mut max_width_of_column = 0usize;

        while !current.is_empty() && x * bs <= canvas.width as f64 {
            max_width_of_column = max_width_of_column.max(current.len());
            for (i, &bit) in current.0.iter().enumerate() {
                if bit != 0 {
                    canvas.fill_rect((x + i as f64) * bs, y * bs, bs, bs, Rgb::BLACK);
                }
            }

            // The final `1` still gets its row.
            if current.len() == 1 {
                break;
            }

            current = if current.is_odd() {
                current.triple_plus_one()
            } else {
                current.halve()
            };
            y += 1.0;

            const GAP: f64 = 2.0;
            if y * bs >= canvas.height as f64 {
                y = 0.0;
                x += max_width_of_column as f64 + GAP;
                max_width_of_column = 0;
            }
        }

        Ok(())
    }

    fn meta(&self) -> PieceMeta {
        PieceMeta {
            created: "14 Apr 2021",
            source: "collatz.rs",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_u64(mut v: u64) -> BitString {
        let mut bits = Vec::new();
        while v > 0 {
            bits.push((v & 1) as u8);
            v >>= 1;
        }
        BitString(bits)
    }

    #[test]
    fn halve_agrees_with_integer_division() {
        for v in [2u64, 6, 100, 4096, 12345678] {
            assert_eq!(from_u64(v).halve().to_u64(), v / 2);
        }
    }

    #[test]
    fn triple_plus_one_agrees_with_integers() {
        for v in [1u64, 3, 7, 27, 9999, 87178291199] {
            assert_eq!(from_u64(v).triple_plus_one().to_u64(), 3 * v + 1);
        }
    }

    #[test]
    fn add_carries_ripple() {
        // 0b111 + 0b1 = 0b1000
        let a = BitString(vec![1, 1, 1]);
        let b = BitString(vec![1]);
        assert_eq!(a.add(&b).to_u64(), 8);
    }

    #[test]
    fn parity_reads_the_low_bit() {
        assert!(from_u64(27).is_odd());
        assert!(!from_u64(28).is_odd());
    }

    #[test]
    fn from_bytes_is_msb_first_per_byte() {
        // 0b1000_0000 puts its high bit at index 0.
        let bits = BitString::from_bytes(&[0b1000_0000]);
        assert_eq!(bits.0[0], 1);
        assert!(bits.0[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn collatz_from_one_stops_immediately() {
        let one = from_u64(1);
        assert_eq!(one.len(), 1);
        assert!(one.is_odd());
    }
}
