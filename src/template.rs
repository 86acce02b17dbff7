// src/template.rs
//! Byte templates: how a piece carves named fields out of a 32-byte digest.
//!
//! A template is an ordered list of `(name, width)` pairs. Offsets are the
//! prefix sums of the widths in declaration order; whatever remains of the
//! digest is reported as a trailing `"unused"` segment.

use num_bigint::BigUint;
use serde::Serialize;

use crate::error::ArtError;

/// Size of the digest every template slices from.
pub const DIGEST_LEN: usize = 32;

/// One named field: `width` bytes starting at `offset`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Field {
    name: String,
    offset: usize,
    width: usize,
}

/// Ordered field-name to byte-width declaration.
///
/// Immutable once constructed; each piece owns exactly one.
#[derive(Debug, Clone)]
pub struct ByteTemplate {
    fields: Vec<Field>,
    total: usize,
}

/// One entry of a template explanation: the field name, its bytes in hex,
/// and its normalized value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub name: String,
    pub bytes: String,
    pub normalized: f64,
}

impl ByteTemplate {
    /// Build a template from `(name, width)` pairs in declaration order.
    pub fn new(fields: &[(&str, usize)]) -> Result<Self, ArtError> {
        if fields.is_empty() {
            return Err(ArtError::EmptyTemplate);
        }
        let total: usize = fields.iter().map(|(_, w)| w).sum();
        if total > DIGEST_LEN {
            return Err(ArtError::TemplateTooWide { total });
        }

        let mut offset = 0;
        let fields = fields
            .iter()
            .map(|&(name, width)| {
                let f = Field {
                    name: name.to_string(),
                    offset,
                    width,
                };
                offset += width;
                f
            })
            .collect();

        Ok(Self { fields, total })
    }

    /// Total bytes claimed by declared fields.
    pub fn declared_len(&self) -> usize {
        self.total
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// The byte range of `name` within a digest, or `None` for undeclared
    /// names.
    pub fn slice<'a>(&self, digest: &'a [u8; DIGEST_LEN], name: &str) -> Option<&'a [u8]> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &digest[f.offset..f.offset + f.width])
    }

    /// Explain every declared field plus the trailing unused remainder.
    ///
    /// Segments appear in declaration order with `"unused"` always last;
    /// together they always cover all 32 digest bytes.
    pub fn segments(&self, digest: &[u8; DIGEST_LEN]) -> Vec<Segment> {
        let mut segments: Vec<Segment> = self
            .fields
            .iter()
            .map(|f| {
                let slice = &digest[f.offset..f.offset + f.width];
                Segment {
                    name: f.name.clone(),
                    bytes: hex(slice),
                    normalized: fraction(slice),
                }
            })
            .collect();

        if self.total < DIGEST_LEN {
            let slice = &digest[self.total..];
            segments.push(Segment {
                name: "unused".to_string(),
                bytes: hex(slice),
                normalized: fraction(slice),
            });
        }

        segments
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Normalize a byte slice to a fraction in `[0, 1)`.
///
/// The slice is read as a base-256 fraction with the first byte most
/// significant: `bytes[0]/256 + bytes[1]/256^2 + ...`. Accumulated from the
/// least significant end so the floating-point rounding order is fixed.
/// Bytes past the double-precision tail contribute nothing; that is
/// accepted behavior.
pub fn fraction(bytes: &[u8]) -> f64 {
    let mut acc = 0.0;
    for &b in bytes.iter().rev() {
        acc = (acc + b as f64) / 256.0;
    }
    acc
}

/// Read a byte slice as a big-endian base-256 integer.
///
/// `seed` starts the accumulator: 0 for a plain value, 1 for pieces that
/// must never start from zero (the seed occupies the high bits).
pub fn big_integer(bytes: &[u8], seed: u8) -> BigUint {
    let mut acc = BigUint::from(seed);
    for &b in bytes {
        acc = acc * 256u32 + b;
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_template() {
        assert!(matches!(
            ByteTemplate::new(&[]),
            Err(ArtError::EmptyTemplate)
        ));
    }

    #[test]
    fn rejects_overwide_template() {
        assert!(matches!(
            ByteTemplate::new(&[("a", 20), ("b", 20)]),
            Err(ArtError::TemplateTooWide { total: 40 })
        ));
    }

    #[test]
    fn slices_follow_declaration_order() {
        let t = ByteTemplate::new(&[("x", 2), ("y", 3)]).unwrap();
        let mut digest = [0u8; DIGEST_LEN];
        for (i, b) in digest.iter_mut().enumerate() {
            *b = i as u8;
        }
        assert_eq!(t.slice(&digest, "x").unwrap(), &[0, 1]);
        assert_eq!(t.slice(&digest, "y").unwrap(), &[2, 3, 4]);
        assert_eq!(t.slice(&digest, "z"), None);
    }

    #[test]
    fn fraction_known_values() {
        assert_eq!(fraction(&[]), 0.0);
        assert_eq!(fraction(&[0, 0, 0, 0]), 0.0);
        assert_eq!(fraction(&[255]), 255.0 / 256.0);
        assert_eq!(fraction(&[128]), 0.5);
        assert_eq!(fraction(&[1, 0]), 1.0 / 256.0);
    }

    #[test]
    fn big_integer_round_trips() {
        assert_eq!(big_integer(&[1, 0], 0), BigUint::from(256u32));
        assert_eq!(big_integer(&[1, 0], 1), BigUint::from(65536u32 + 256));
        // Leading zero bytes are a no-op when seeded at zero.
        assert_eq!(big_integer(&[0, 0, 1, 0], 0), big_integer(&[1, 0], 0));
    }
}
