//! Match detector - pure scan for runs of 3+ same-colored blocks
//!
//! Scans every row left to right and every column bottom to top,
//! accumulating the current run and flushing it on a color break, an empty
//! cell, or the end of the line. A block belonging to both a row run and a
//! column run is reported once. The grid is never mutated; the same grid
//! always yields the same set.

use arrayvec::ArrayVec;

use crate::core::grid::{BlockId, Grid};
use crate::types::{BlockColor, CELL_COUNT, GRID_HEIGHT, GRID_WIDTH, MIN_RUN};

/// Deduplicated set of matched blocks, in scan order
#[derive(Debug, Clone)]
pub struct MatchSet {
    ids: ArrayVec<BlockId, CELL_COUNT>,
    mask: [bool; CELL_COUNT],
}

impl Default for MatchSet {
    fn default() -> Self {
        Self {
            ids: ArrayVec::new(),
            mask: [false; CELL_COUNT],
        }
    }
}

impl MatchSet {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> &[BlockId] {
        &self.ids
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of special blocks in the set
    pub fn special_count(&self, grid: &Grid) -> usize {
        self.ids
            .iter()
            .filter(|&&id| grid.block(id).is_some_and(|b| b.special))
            .count()
    }

    fn add(&mut self, x: i8, y: i8, id: BlockId) {
        let idx = (y as usize) * (GRID_WIDTH as usize) + (x as usize);
        if !self.mask[idx] {
            self.mask[idx] = true;
            self.ids.push(id);
        }
    }
}

/// One accumulating run along a row or column
#[derive(Default)]
struct RunState {
    color: Option<BlockColor>,
    cells: ArrayVec<(i8, i8, BlockId), { GRID_HEIGHT as usize }>,
}

impl RunState {
    fn flush_into(&mut self, out: &mut MatchSet) {
        if self.cells.len() >= MIN_RUN {
            for &(x, y, id) in &self.cells {
                out.add(x, y, id);
            }
        }
        self.cells.clear();
        self.color = None;
    }

    fn feed(&mut self, x: i8, y: i8, cell: Option<(BlockId, BlockColor)>, out: &mut MatchSet) {
        match cell {
            Some((id, color)) if self.color == Some(color) => {
                self.cells.push((x, y, id));
            }
            Some((id, color)) => {
                self.flush_into(out);
                self.color = Some(color);
                self.cells.push((x, y, id));
            }
            None => self.flush_into(out),
        }
    }
}

/// Find every block that is part of a horizontal or vertical run of
/// `MIN_RUN` or more same-colored blocks
pub fn find_matches(grid: &Grid) -> MatchSet {
    let mut out = MatchSet::default();

    let cell_at = |x: i8, y: i8| -> Option<(BlockId, BlockColor)> {
        let id = grid.get(x, y)??;
        let color = grid.block(id)?.color;
        Some((id, color))
    };

    // Horizontal runs
    for y in 0..GRID_HEIGHT as i8 {
        let mut run = RunState::default();
        for x in 0..GRID_WIDTH as i8 {
            run.feed(x, y, cell_at(x, y), &mut out);
        }
        // A run ending exactly at the last cell must still count
        run.flush_into(&mut out);
    }

    // Vertical runs
    for x in 0..GRID_WIDTH as i8 {
        let mut run = RunState::default();
        for y in 0..GRID_HEIGHT as i8 {
            run.feed(x, y, cell_at(x, y), &mut out);
        }
        run.flush_into(&mut out);
    }

    out
}
