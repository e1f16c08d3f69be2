//! Block spawner - color selection biased against instant matches
//!
//! Initial fill walks the grid bottom-up, left to right, so the cells to
//! the left and below are already placed; both pairs are excluded. Refill
//! and timed drops stack onto a column and only exclude on the vertical
//! axis. The asymmetry is deliberate and matches the original game. If
//! exclusion would leave no candidate the full palette is used instead of
//! deadlocking.

use arrayvec::ArrayVec;

use crate::core::grid::Grid;
use crate::core::rng::SimpleRng;
use crate::types::{BlockColor, GRID_WIDTH, SPECIAL_CHANCE_PERCENT};

#[derive(Debug, Clone)]
pub struct Spawner {
    rng: SimpleRng,
}

impl Spawner {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Roll the special flag, independent of color choice
    pub fn roll_special(&mut self) -> bool {
        self.rng.chance(SPECIAL_CHANCE_PERCENT)
    }

    /// Pick a random in-bounds column
    pub fn random_column(&mut self) -> i8 {
        self.rng.next_range(GRID_WIDTH as u32) as i8
    }

    /// Color for the initial fill at (x, y): avoids completing a 3-run
    /// with the two placed neighbors to the left or the two below
    pub fn initial_color(&mut self, grid: &Grid, x: i8, y: i8) -> BlockColor {
        let mut excluded: ArrayVec<BlockColor, 2> = ArrayVec::new();
        if let Some(color) = pair_color(grid, x - 1, y, x - 2, y) {
            excluded.push(color);
        }
        if let Some(color) = pair_color(grid, x, y - 1, x, y - 2) {
            if !excluded.contains(&color) {
                excluded.push(color);
            }
        }
        self.pick(&excluded)
    }

    /// Color for a block entering a column from above: avoids completing a
    /// vertical 3-run with the two blocks it stacks onto. Horizontal runs
    /// are not checked here (existing behavior, kept).
    pub fn refill_color(&mut self, grid: &Grid, x: i8, y: i8) -> BlockColor {
        let mut excluded: ArrayVec<BlockColor, 2> = ArrayVec::new();
        if let Some(color) = pair_color(grid, x, y - 1, x, y - 2) {
            excluded.push(color);
        }
        self.pick(&excluded)
    }

    /// Uniform choice from the palette minus `excluded`; falls back to the
    /// full palette when exclusion would leave nothing
    fn pick(&mut self, excluded: &[BlockColor]) -> BlockColor {
        let candidates: ArrayVec<BlockColor, 6> = BlockColor::ALL
            .iter()
            .copied()
            .filter(|color| !excluded.contains(color))
            .collect();

        if candidates.is_empty() {
            *self.rng.choose(&BlockColor::ALL)
        } else {
            *self.rng.choose(&candidates)
        }
    }

    /// Access the RNG for effect jitter (particle velocities, stagger)
    pub fn rng_mut(&mut self) -> &mut SimpleRng {
        &mut self.rng
    }
}

/// Color shared by two cells, if both hold blocks of the same color
fn pair_color(grid: &Grid, x1: i8, y1: i8, x2: i8, y2: i8) -> Option<BlockColor> {
    let first = grid.color_at(x1, y1)?;
    let second = grid.color_at(x2, y2)?;
    (first == second).then_some(first)
}
