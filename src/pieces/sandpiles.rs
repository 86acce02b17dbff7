// src/pieces/sandpiles.rs
//! The Abelian sandpile model: place piles of grains, let every cell with
//! four or more grains spill to its cardinal neighbors, repeat until quiet.

use std::collections::BTreeMap;

use log::debug;

use crate::art::{AuxProps, Fields, Piece, PieceMeta};
use crate::canvas::{scale, Canvas, Rgb};
use crate::error::ArtError;
use crate::template::ByteTemplate;

const NUM_PILES: usize = 8;
const BYTES_PER_PILE: usize = 3;

/// Grain counts keyed by cell coordinate. Sparse; absent means zero.
pub type Grid = BTreeMap<(i64, i64), u64>;

/// Relax `grid` until no in-bounds cell holds four or more grains.
///
/// A toppling cell keeps `count % 4` and sends `count / 4` to each of its
/// four cardinal neighbors. Cells outside `0..=w, 0..=h` receive spill but
/// are never processed themselves: they act as sinks, which is what
/// guarantees termination. Returns the number of full passes taken.
pub fn relax(grid: &mut Grid, w: i64, h: i64) -> usize {
    let mut passes = 0;
    loop {
        let mut changed = false;
        // Snapshot the occupied cells; spill may add new ones mid-pass.
        let cells: Vec<(i64, i64)> = grid.keys().copied().collect();

        for (x, y) in cells {
            if x < 0 || y < 0 || x > w || y > h {
                continue;
            }
            let count = grid.get(&(x, y)).copied().unwrap_or(0);
            if count >= 4 {
                let spill = count / 4;
                *grid.entry((x + 1, y)).or_insert(0) += spill;
                *grid.entry((x - 1, y)).or_insert(0) += spill;
                *grid.entry((x, y + 1)).or_insert(0) += spill;
                *grid.entry((x, y - 1)).or_insert(0) += spill;
                grid.insert((x, y), count % 4);
                changed = true;
            }
        }

        passes += 1;
        if !changed {
            return passes;
        }
    }
}

pub struct Sandpiles {
    template: ByteTemplate,
}

impl Sandpiles {
    pub fn new() -> Self {
        let template = ByteTemplate::new(&[
            ("pile1", BYTES_PER_PILE),
            ("pile2", BYTES_PER_PILE),
            ("pile3", BYTES_PER_PILE),
            ("pile4", BYTES_PER_PILE),
            ("pile5", BYTES_PER_PILE),
            ("pile6", BYTES_PER_PILE),
            ("pile7", BYTES_PER_PILE),
            ("pile8", BYTES_PER_PILE),
        ])
        .expect("static template");
        Self { template }
    }
}

impl Default for Sandpiles {
    fn default() -> Self {
        Self::new()
    }
}

impl Piece for Sandpiles {
    fn template(&self) -> &ByteTemplate {
        &self.template
    }

    fn describe(&self, _fields: &Fields) -> Option<String> {
        Some(format!(
            "For each of the {NUM_PILES} piles, read {BYTES_PER_PILE} bytes \
             as a triple (x, y, amount). At position (x, y), place `amount` \
             grains. Then, for all cells in the grid, if there are 4 or more \
             grains, spill one grain in each of the four cardinal directions. \
             Repeat this process until no grains fall. This is a cellular \
             automaton known as the Abelian sandpile model."
        ))
    }

    fn draw(&self, canvas: &mut Canvas, fields: &Fields, _aux: &AuxProps) -> Result<(), ArtError> {
        let s = scale(30.0, canvas.width);
        let w = (canvas.width as f64 / s).ceil() as i64;
        let h = (canvas.height as f64 / s).ceil() as i64;

        let mut grid = Grid::new();
        for i in 0..NUM_PILES {
            let buf = fields.bytes(&format!("pile{}", i + 1))?;
            let x = (buf[0] as f64 / 256.0 * w as f64).floor() as i64;
            let y = (buf[1] as f64 / 256.0 * h as f64).floor() as i64;
            // Colliding piles overwrite, they do not add.
            grid.insert((x, y), buf[2] as u64);
        }

        let passes = relax(&mut grid, w, h);
        debug!("sandpile stabilized after {passes} passes");

        // Quantized shades for 1..=3 grains; empty cells stay white.
        const SHADES: [u8; 4] = [255, 160, 90, 40];
        for x in 0..w {
            for y in 0..h {
                let value = grid.get(&(x, y)).copied().unwrap_or(0).min(3);
                if value == 0 {
                    continue;
                }
                let g = SHADES[value as usize];
                canvas.fill_rect(x as f64 * s, y as f64 * s, s, s, Rgb::grey(g));
            }
        }

        Ok(())
    }

    fn meta(&self) -> PieceMeta {
        PieceMeta {
            created: "17 Jun 2021",
            source: "sandpiles.rs",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_grains(grid: &Grid) -> u64 {
        grid.values().sum()
    }

    #[test]
    fn lone_small_pile_is_already_stable() {
        let mut grid = Grid::new();
        grid.insert((5, 5), 3);
        let passes = relax(&mut grid, 10, 10);
        assert_eq!(passes, 1);
        assert_eq!(grid.get(&(5, 5)), Some(&3));
    }

    #[test]
    fn four_grains_topple_once() {
        let mut grid = Grid::new();
        grid.insert((5, 5), 4);
        relax(&mut grid, 10, 10);
        assert_eq!(grid.get(&(5, 5)), Some(&0));
        for neighbor in [(6, 5), (4, 5), (5, 6), (5, 4)] {
            assert_eq!(grid.get(&neighbor), Some(&1));
        }
    }

    #[test]
    fn relaxation_leaves_no_in_bounds_cell_at_four() {
        let mut grid = Grid::new();
        grid.insert((8, 8), 255);
        grid.insert((3, 12), 200);
        relax(&mut grid, 16, 16);
        for (&(x, y), &count) in grid.iter() {
            if x >= 0 && y >= 0 && x <= 16 && y <= 16 {
                assert!(count < 4, "cell ({x}, {y}) still holds {count}");
            }
        }
    }

    #[test]
    fn grains_are_conserved() {
        let mut grid = Grid::new();
        grid.insert((4, 4), 100);
        let before = total_grains(&grid);
        relax(&mut grid, 8, 8);
        assert_eq!(total_grains(&grid), before);
    }

    #[test]
    fn edge_pile_spills_out_of_bounds_and_still_terminates() {
        let mut grid = Grid::new();
        grid.insert((0, 0), 255);
        let passes = relax(&mut grid, 4, 4);
        // Out-of-bounds cells absorb grains without toppling back.
        assert!(passes < 1000);
        assert!(grid.keys().any(|&(x, y)| x < 0 || y < 0));
    }
}
