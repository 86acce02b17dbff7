// src/pieces/mod.rs
//! The piece catalog: every generative algorithm, keyed by name.

pub mod automata;
pub mod boxes;
pub mod circles;
pub mod collatz;
pub mod divisions;
pub mod element;
pub mod fraction;
pub mod network;
pub mod quasiflake;
pub mod rings;
pub mod sandpiles;
pub mod spinner;
pub mod stocks;
pub mod three_body;
pub mod turing;
pub mod walk;

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::art::Piece;

type Constructor = fn() -> Box<dyn Piece>;

/// Static name-to-constructor table. BTreeMap so listings sort by name.
static CATALOG: Lazy<BTreeMap<&'static str, Constructor>> = Lazy::new(|| {
    let mut map: BTreeMap<&'static str, Constructor> = BTreeMap::new();
    map.insert("automata", || Box::new(automata::Automata::new()));
    map.insert("boxes", || Box::new(boxes::Boxes::new()));
    map.insert("circles", || Box::new(circles::Circles::new()));
    map.insert("collatz", || Box::new(collatz::Collatz::new()));
    map.insert("divisions", || Box::new(divisions::Divisions::new()));
    map.insert("element", || Box::new(element::Element::new()));
    map.insert("fraction", || Box::new(fraction::Fraction::new()));
    map.insert("network", || Box::new(network::Network::new()));
    map.insert("quasiflake", || Box::new(quasiflake::QuasiFlake::new()));
    map.insert("rings", || Box::new(rings::Rings::new()));
    map.insert("sandpiles", || Box::new(sandpiles::Sandpiles::new()));
    map.insert("spinner", || Box::new(spinner::Spinner::new()));
    map.insert("stocks", || Box::new(stocks::Stocks::new()));
    map.insert("three-body", || Box::new(three_body::ThreeBody::new()));
    map.insert("turing", || Box::new(turing::Turing::new()));
    map.insert("walk", || Box::new(walk::Walk::new()));
    map
});

/// All piece names, sorted.
pub fn names() -> Vec<&'static str> {
    CATALOG.keys().copied().collect()
}

/// Instantiate a piece by name.
pub fn lookup(name: &str) -> Option<Box<dyn Piece>> {
    CATALOG.get(name).map(|ctor| ctor())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::DIGEST_LEN;

    #[test]
    fn every_catalog_entry_constructs() {
        for name in names() {
            let piece = lookup(name).unwrap();
            assert!(
                piece.template().declared_len() <= DIGEST_LEN,
                "{name} template too wide"
            );
        }
    }

    #[test]
    fn catalog_spans_every_shipped_piece() {
        assert_eq!(
            names(),
            vec![
                "automata",
                "boxes",
                "circles",
                "collatz",
                "divisions",
                "element",
                "fraction",
                "network",
                "quasiflake",
                "rings",
                "sandpiles",
                "spinner",
                "stocks",
                "three-body",
                "turing",
                "walk",
            ]
        );
    }

    #[test]
    fn unknown_name_is_none() {
        assert!(lookup("mario").is_none());
    }

    #[test]
    fn catalog_is_sorted() {
        let names = names();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
