// src/pieces/turing.rs
//! A 4-state, 2-symbol Turing machine whose transition table comes from the
//! digest. Each simulated step renders one row, producing a space-time
//! diagram of the tape.

use std::fmt;

use crate::art::{AuxProps, Fields, Piece, PieceMeta};
use crate::canvas::{scale, Canvas, Rgb};
use crate::error::ArtError;
use crate::template::ByteTemplate;

/// Machine states, named after the original's Greek letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Alpha,
    Beta,
    Gamma,
    Delta,
}

pub const STATES: [State; 4] = [State::Alpha, State::Beta, State::Gamma, State::Delta];

impl State {
    fn index(self) -> usize {
        match self {
            State::Alpha => 0,
            State::Beta => 1,
            State::Gamma => 2,
            State::Delta => 3,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            State::Alpha => 'α',
            State::Beta => 'β',
            State::Gamma => 'γ',
            State::Delta => 'δ',
        };
        write!(f, "{c}")
    }
}

/// One table entry: what to write, where to move, which state comes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub write: u8,
    pub move_right: bool,
    pub next: State,
}

/// Full transition table, indexed by `(symbol, state)`.
///
/// Every pair has an entry, so the machine never halts; it always runs for
/// the requested number of steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTable {
    entries: [[Transition; 4]; 2],
}

/// Derive one transition from a 3-byte field.
///
/// The write symbol is the high bit of byte 0 and the next state is the top
/// two bits of byte 0; the move direction is the high bit of byte 1. Byte 2
/// is never consulted, matching the original artwork.
fn triplet(bytes: &[u8]) -> Transition {
    Transition {
        write: bytes[0] >> 7,
        move_right: bytes[1] >> 7 == 1,
        next: STATES[(bytes[0] >> 6) as usize],
    }
}

impl TransitionTable {
    /// Build the table from the piece's eight 3-byte fields.
    pub fn from_fields(fields: &Fields) -> Result<Self, ArtError> {
        let mut entries = [[Transition {
            write: 0,
            move_right: false,
            next: State::Alpha,
        }; 4]; 2];

        for (symbol, suffix) in ["₀", "₁"].iter().enumerate() {
            for (s, name) in ["α", "β", "γ", "δ"].iter().enumerate() {
                entries[symbol][s] = triplet(fields.bytes(&format!("{name}{suffix}"))?);
            }
        }
        Ok(Self { entries })
    }

    pub fn lookup(&self, symbol: u8, state: State) -> Transition {
        self.entries[symbol as usize][state.index()]
    }
}

/// Tape, head, and current state. The tape is preallocated; callers size it
/// so the head cannot run off for the number of steps they simulate.
#[derive(Debug)]
pub struct Machine {
    pub tape: Vec<u8>,
    pub head: usize,
    pub state: State,
}

impl Machine {
    /// A machine with an all-zero tape, head at the center, state α.
    pub fn centered(tape_len: usize) -> Self {
        Self {
            tape: vec![0; tape_len],
            head: tape_len / 2,
            state: State::Alpha,
        }
    }

    /// Run one Mealy transition: read, write, move, switch.
    pub fn step(&mut self, table: &TransitionTable) -> Result<(), ArtError> {
        let symbol = self.tape[self.head];
        let t = table.lookup(symbol, self.state);
        self.tape[self.head] = t.write;
        self.head = if t.move_right {
            self.head + 1
        } else {
            self.head.checked_sub(1).ok_or_else(|| {
                ArtError::DegenerateGeometry("turing head ran off the tape".into())
            })?
        };
        if self.head >= self.tape.len() {
            return Err(ArtError::DegenerateGeometry(
                "turing head ran off the tape".into(),
            ));
        }
        self.state = t.next;
        Ok(())
    }
}

pub struct Turing {
    template: ByteTemplate,
}

impl Turing {
    pub fn new() -> Self {
        let template = ByteTemplate::new(&[
            ("α₀", 3),
            ("β₀", 3),
            ("γ₀", 3),
            ("δ₀", 3),
            ("α₁", 3),
            ("β₁", 3),
            ("γ₁", 3),
            ("δ₁", 3),
        ])
        .expect("static template");
        Self { template }
    }
}

impl Default for Turing {
    fn default() -> Self {
        Self::new()
    }
}

impl Piece for Turing {
    fn template(&self) -> &ByteTemplate {
        &self.template
    }

    fn describe(&self, fields: &Fields) -> Option<String> {
        let table = TransitionTable::from_fields(fields).ok()?;
        let mut out = String::from(
            "A 4-state Turing machine with the following transition table \
             (write, move, next state):\n",
        );
        for symbol in 0..2u8 {
            out.push_str(&format!("reading {symbol}:"));
            for state in STATES {
                let t = table.lookup(symbol, state);
                out.push_str(&format!(
                    "  {state}: ({}, {}, {})",
                    t.write,
                    if t.move_right { "R" } else { "L" },
                    t.next
                ));
            }
            out.push('\n');
        }
        Some(out)
    }

    fn draw(&self, canvas: &mut Canvas, fields: &Fields, _aux: &AuxProps) -> Result<(), ArtError> {
        let w = canvas.width;
        let h = canvas.height;
        let bit = scale(8.0, w).max(1.0);

        let rows = (h as f64 / bit).floor() as usize + 1;
        // One step moves the head one cell, so 2*rows + 2 cells around a
        // centered start bound every possible trajectory.
        let tape_len = (2 * rows + 2).max(2 * (w.max(h) as f64 / bit).floor() as usize + 2);
        let mut machine = Machine::centered(tape_len);
        let table = TransitionTable::from_fields(fields)?;

        for row in 0..rows {
            machine.step(&table)?;

            // Render the middle half of the tape as one row of squares.
            let start = tape_len / 4;
            let end = tape_len * 3 / 4;
            for i in start..end {
                if machine.tape[i] != 0 {
                    canvas.fill_rect(
                        (i - start) as f64 * bit,
                        row as f64 * bit,
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
            created: "28 May 2021",
            source: "turing.rs",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always_right() -> TransitionTable {
        let t = Transition {
            write: 0,
            move_right: true,
            next: State::Alpha,
        };
        TransitionTable {
            entries: [[t; 4]; 2],
        }
    }

    #[test]
    fn right_mover_advances_one_cell_per_step() {
        let table = always_right();
        let mut machine = Machine::centered(100);
        let start = machine.head;
        for _ in 0..20 {
            machine.step(&table).unwrap();
        }
        assert_eq!(machine.head, start + 20);
        assert_eq!(machine.state, State::Alpha);
    }

    #[test]
    fn head_off_the_end_is_an_error() {
        let table = always_right();
        let mut machine = Machine::centered(4);
        // head starts at 2; two steps reach the end.
        machine.step(&table).unwrap();
        assert!(machine.step(&table).is_err());
    }

    #[test]
    fn triplet_unpacks_high_bits() {
        // byte0 = 0b11......: write 1, next state δ; byte1 high bit: right.
        let t = triplet(&[0b1100_0000, 0b1000_0000, 0xFF]);
        assert_eq!(t.write, 1);
        assert!(t.move_right);
        assert_eq!(t.next, State::Delta);
    }

    #[test]
    fn triplet_low_bytes_map_to_alpha_left() {
        let t = triplet(&[0, 0, 0]);
        assert_eq!(t.write, 0);
        assert!(!t.move_right);
        assert_eq!(t.next, State::Alpha);
    }
}
