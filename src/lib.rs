// src/lib.rs

//! hashart: deterministic procedural 2D artwork from a cryptographic hash.
//!
//! A seed string is hashed (externally) to a 32-byte SHA-256 digest. Each
//! "piece" declares a [`template::ByteTemplate`] describing how it slices
//! that digest into named fields, and a draw procedure that turns the
//! normalized fields into drawing commands on a [`canvas::Canvas`]. The
//! same digest always renders the same image, byte for byte.

pub mod art;
pub mod canvas;
pub mod config;
pub mod error;
pub mod pieces;
pub mod registry;
pub mod template;

pub use art::{describe, explain, render, AuxProps, Digest, Fields, Piece, PieceMeta};
pub use canvas::{Canvas, Rgb};
pub use error::ArtError;
pub use registry::EnabledPieces;
pub use template::{ByteTemplate, Segment};
