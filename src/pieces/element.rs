// src/pieces/element.rs
//! Invent a chemical element: a Markov chain over the bigrams of the real
//! element names spells a new one, and its atomic number gets a Bohr-model
//! electron-shell diagram.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::art::{AuxProps, Fields, Piece, PieceMeta};
use crate::canvas::{scale, Canvas, Rgb};
use crate::error::ArtError;
use crate::template::ByteTemplate;

/// The 118 element names (hydrogen through oganesson), IUPAC spellings.
const ELEMENTS: [&str; 118] = [
    "hydrogen",
    "helium",
    "lithium",
    "beryllium",
    "boron",
    "carbon",
    "nitrogen",
    "oxygen",
    "fluorine",
    "neon",
    "sodium",
    "magnesium",
    "aluminium",
    "silicon",
    "phosphorus",
    "sulfur",
    "chlorine",
    "argon",
    "potassium",
    "calcium",
    "scandium",
    "titanium",
    "vanadium",
    "chromium",
    "manganese",
    "iron",
    "cobalt",
    "nickel",
    "copper",
    "zinc",
    "gallium",
    "germanium",
    "arsenic",
    "selenium",
    "bromine",
    "krypton",
    "rubidium",
    "strontium",
    "yttrium",
    "zirconium",
    "niobium",
    "molybdenum",
    "technetium",
    "ruthenium",
    "rhodium",
    "palladium",
    "silver",
    "cadmium",
    "indium",
    "tin",
    "antimony",
    "tellurium",
    "iodine",
    "xenon",
    "caesium",
    "barium",
    "lanthanum",
    "cerium",
    "praseodymium",
    "neodymium",
    "promethium",
    "samarium",
    "europium",
    "gadolinium",
    "terbium",
    "dysprosium",
    "holmium",
    "erbium",
    "thulium",
    "ytterbium",
    "lutetium",
    "hafnium",
    "tantalum",
    "tungsten",
    "rhenium",
    "osmium",
    "iridium",
    "platinum",
    "gold",
    "mercury",
    "thallium",
    "lead",
    "bismuth",
    "polonium",
    "astatine",
    "radon",
    "francium",
    "radium",
    "actinium",
    "thorium",
    "protactinium",
    "uranium",
    "neptunium",
    "plutonium",
    "americium",
    "curium",
    "berkelium",
    "californium",
    "einsteinium",
    "fermium",
    "mendelevium",
    "nobelium",
    "lawrencium",
    "rutherfordium",
    "dubnium",
    "seaborgium",
    "bohrium",
    "hassium",
    "meitnerium",
    "darmstadtium",
    "roentgenium",
    "copernicium",
    "nihonium",
    "flerovium",
    "moscovium",
    "livermorium",
    "tennessine",
    "oganesson",
];

const START: &str = "start";
const END: &str = "end";

/// Bigram chain: "oxygen" contributes start -> ox -> xy -> yg -> ge -> en
/// -> end. Repeated transitions are kept, so common bigrams are picked
/// proportionally more often.
static CHAIN: Lazy<BTreeMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    let mut chain: BTreeMap<&'static str, Vec<&'static str>> = BTreeMap::new();
    for name in ELEMENTS {
        let mut node = START;
        for i in 0..name.len() - 1 {
            let bigram = &name[i..i + 2];
            chain.entry(node).or_default().push(bigram);
            node = bigram;
        }
        chain.entry(node).or_default().push(END);
    }
    chain
});

/// Walk the bigram chain, one byte per step, until it terminates or the
/// buffer runs out. Exposed drawing-free so seed-search tools can call it.
pub fn element_name(buffer: &[u8]) -> String {
    let mut node = START;
    let mut result = String::new();

    for &byte in buffer {
        let options = &CHAIN[node];
        let next = options[byte as usize * options.len() / 256];
        if next == END {
            break;
        }

        node = next;
        if result.is_empty() {
            result.push_str(node);
        } else {
            result.push_str(&node[1..]);
        }
    }

    let mut chars = result.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => result,
    }
}

fn atomic_number(protons: f64) -> i64 {
    (protons * 300.0).floor() as i64
}

pub struct Element {
    template: ByteTemplate,
}

impl Element {
    pub fn new() -> Self {
        let template = ByteTemplate::new(&[
            ("traverse", 16),
            ("protons", 2),
            ("weight", 2),
            ("rotations", 8),
        ])
        .expect("static template");
        Self { template }
    }
}

impl Default for Element {
    fn default() -> Self {
        Self::new()
    }
}

impl Piece for Element {
    fn template(&self) -> &ByteTemplate {
        &self.template
    }

    fn describe(&self, _fields: &Fields) -> Option<String> {
        Some(
            "Begin with a Markov chain built using the bigrams of the \
             chemical elements (up to Oganesson, 118). For example, the \
             element oxygen forms the chain START -> ox -> xy -> yg -> ge \
             -> en -> END. Combine these chains (things get interesting \
             when one bigram can go in many directions such as \"li\") and \
             traverse the graph by picking the next node using the \
             `traverse` buffer. Continue until END to get the name of your \
             element, which may be the name of an existing element. The \
             atomic number of our new element is computed by multiplying \
             the `protons` vector by 300. The atomic weight is computed \
             using `atomicNumber * (1.5 + weight)`. From the atomic number, \
             draw electrons according to the Bohr model, where each ring \
             can hold 2n^2 electrons. Rotate each ring according to the nth \
             byte in the `rotations` buffer."
                .to_string(),
        )
    }

    fn draw(&self, canvas: &mut Canvas, fields: &Fields, _aux: &AuxProps) -> Result<(), ArtError> {
        let w = canvas.width;
        let h = canvas.height as f64;

        let name = element_name(fields.bytes("traverse")?);
        let left = 100.0;

        let number = atomic_number(fields.fraction("protons")?);
        let big = scale(100.0, w);
        canvas.draw_text(
            &number.to_string(),
            scale(left, w),
            scale(180.0, w) - big,
            big,
            Rgb::BLACK,
        );

        let symbol: String = name.chars().take(2).collect();
        let huge = scale(180.0, w);
        canvas.draw_text(
            &symbol,
            scale(left - 8.0, w),
            scale(h - 280.0, w) - huge,
            huge,
            Rgb::BLACK,
        );

        let small = scale(60.0, w);
        canvas.draw_text(&name, scale(left, w), scale(h - 190.0, w) - small, small, Rgb::BLACK);

        let weight = number as f64 * (1.5 + fields.fraction("weight")?);
        canvas.draw_text(
            &format!("{weight:.2}"),
            scale(left, w),
            scale(h - 105.0, w) - small,
            small,
            Rgb::BLACK,
        );

        let center_x = scale(830.0, w);
        let center_y = h / 2.0;
        let inner_radius = scale(45.0, w);
        let ring_width = scale(2.0, w);

        canvas.stroke_circle(center_x, center_y, inner_radius, ring_width, Rgb::BLACK);

        // Bohr shells: ring n holds up to 2n^2 electrons.
        let mut shells = Vec::new();
        let mut remaining = number;
        let mut n = 1;
        while remaining > 0 {
            let electrons = (2 * n * n).min(remaining);
            remaining -= electrons;
            shells.push(electrons);
            n += 1;
        }

        let rotations = fields.bytes("rotations")?.to_vec();
        let electron_width = scale(5.0, w);
        let electron_radius = scale(6.0, w);
        for (i, &electrons) in shells.iter().enumerate() {
            let radius = inner_radius * (i as f64 + 2.0);
            canvas.stroke_circle(center_x, center_y, radius, ring_width, Rgb::BLACK);

            let rotation = rotations[i] as f64 / 256.0;
            for e in 0..electrons {
                let theta = 2.0 * std::f64::consts::PI * (e as f64 / electrons as f64 + rotation);
                let ex = center_x + radius * theta.cos();
                let ey = center_y + radius * theta.sin();
                canvas.stroke_circle(ex, ey, electron_radius, electron_width, Rgb::BLACK);
                canvas.fill_circle(ex, ey, electron_radius, Rgb::WHITE);
            }
        }

        Ok(())
    }

    fn meta(&self) -> PieceMeta {
        PieceMeta {
            created: "01 Aug 2021",
            source: "element.rs",
        }
    }
}
