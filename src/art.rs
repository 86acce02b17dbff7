// src/art.rs
//! The piece contract: what every generative algorithm implements, and the
//! driver that feeds it a digest.

use std::collections::HashMap;

use log::debug;

use crate::canvas::{Canvas, Rgb};
use crate::error::ArtError;
use crate::template::{fraction, ByteTemplate, Segment, DIGEST_LEN};

/// A SHA-256 digest. Produced externally; the library only consumes it.
pub type Digest = [u8; DIGEST_LEN];

/// Opaque auxiliary properties passed through to a piece uninterpreted.
///
/// Pieces that need injected external resources read from this bag; the
/// driver never looks inside.
pub type AuxProps = HashMap<String, serde_json::Value>;

/// Cosmetic metadata about a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceMeta {
    /// Date the piece was first published.
    pub created: &'static str,
    /// Source file the piece originated in.
    pub source: &'static str,
}

/// Field values extracted from a digest per a piece's template.
///
/// Each declared field is available both as its raw byte slice and as its
/// normalized `[0, 1)` fraction, in declaration order.
#[derive(Debug, Clone)]
pub struct Fields {
    values: Vec<(String, Vec<u8>, f64)>,
}

impl Fields {
    /// Extract every field of `template` from `digest`.
    pub fn extract(template: &ByteTemplate, digest: &Digest) -> Self {
        let values = template
            .names()
            .map(|name| {
                // Names come from the template itself, so the slice exists.
                let slice = template.slice(digest, name).unwrap_or(&[]);
                (name.to_string(), slice.to_vec(), fraction(slice))
            })
            .collect();
        Self { values }
    }

    /// The normalized fraction of a declared field.
    pub fn fraction(&self, name: &str) -> Result<f64, ArtError> {
        self.values
            .iter()
            .find(|(n, _, _)| n == name)
            .map(|(_, _, v)| *v)
            .ok_or_else(|| ArtError::UnknownField(name.to_string()))
    }

    /// The raw bytes of a declared field.
    pub fn bytes(&self, name: &str) -> Result<&[u8], ArtError> {
        self.values
            .iter()
            .find(|(n, _, _)| n == name)
            .map(|(_, b, _)| b.as_slice())
            .ok_or_else(|| ArtError::UnknownField(name.to_string()))
    }
}

/// One self-contained generative algorithm bound to a byte template.
///
/// Implementations must be pure functions of the extracted fields (plus any
/// injected aux props): the same digest always draws the same image.
pub trait Piece {
    /// The template this piece slices digests with.
    fn template(&self) -> &ByteTemplate;

    /// Draw onto `canvas` from the extracted fields.
    fn draw(&self, canvas: &mut Canvas, fields: &Fields, aux: &AuxProps) -> Result<(), ArtError>;

    /// Optional textual explanation parameterized by the extracted fields.
    fn describe(&self, _fields: &Fields) -> Option<String> {
        None
    }

    fn meta(&self) -> PieceMeta;
}

/// Render `piece` from `digest` onto `canvas`.
///
/// Clears the canvas to white, extracts the fields, and delegates to the
/// piece's draw procedure. On error the canvas contents are unspecified.
pub fn render(
    piece: &dyn Piece,
    canvas: &mut Canvas,
    digest: &Digest,
    aux: &AuxProps,
) -> Result<(), ArtError> {
    debug!(
        "rendering {} at {}x{}",
        piece.meta().source,
        canvas.width,
        canvas.height
    );
    canvas.clear(Rgb::WHITE);
    let fields = Fields::extract(piece.template(), digest);
    piece.draw(canvas, &fields, aux)
}

/// Produce a piece's textual description for `digest` without drawing.
pub fn describe(piece: &dyn Piece, digest: &Digest) -> Option<String> {
    let fields = Fields::extract(piece.template(), digest);
    piece.describe(&fields)
}

/// The segment-by-segment explanation of how `piece` reads `digest`.
pub fn explain(piece: &dyn Piece, digest: &Digest) -> Vec<Segment> {
    piece.template().segments(digest)
}
