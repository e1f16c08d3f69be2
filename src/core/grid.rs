//! Grid module - cell ownership and block arena
//!
//! The grid is a fixed 8x12 field stored as a flat array of cell slots for
//! cache locality, each holding `Option<BlockId>` into an arena of block
//! records. Blocks carry a denormalized coordinate cache; only the mutating
//! methods here touch cells, so cache and cell reference can never drift.
//! Coordinates: (x, y) with x ranging left to right and y ranging 0 (base
//! row) to 11 (top). Gravity compacts toward y = 0.

use arrayvec::ArrayVec;

use crate::services::VisualId;
use crate::types::{BlockColor, CELL_COUNT, GRID_HEIGHT, GRID_WIDTH};

/// Handle into the block arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(u32);

impl BlockId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single block on the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub color: BlockColor,
    /// Special blocks award a bonus when cleared and are visually marked
    pub special: bool,
    /// Cached grid coordinate, kept in sync by `Grid` mutators
    pub x: i8,
    pub y: i8,
    /// Set while a position animation is in flight; animating blocks cannot
    /// be selected or swapped
    pub animating: bool,
    /// Opaque renderer handle, owned by this block
    pub visual: VisualId,
}

/// Cell on the grid (None = empty)
pub type Cell = Option<BlockId>;

/// One block relocation produced by gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityMove {
    pub id: BlockId,
    pub x: i8,
    pub from_y: i8,
    pub to_y: i8,
}

/// The game grid: coordinate-indexed cells plus a block arena
#[derive(Debug, Clone)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; CELL_COUNT],
    blocks: Vec<Option<Block>>,
    free: Vec<BlockId>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; CELL_COUNT],
            blocks: Vec::with_capacity(CELL_COUNT),
            free: Vec::new(),
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (GRID_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Check if position is within bounds
    pub fn in_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_some()
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Check if position is within bounds and empty
    pub fn is_empty(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is within bounds and occupied
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Get the block occupying (x, y), if any
    pub fn block_at(&self, x: i8, y: i8) -> Option<&Block> {
        let id = self.get(x, y)??;
        self.block(id)
    }

    /// Get the color at (x, y); None for empty or out of bounds
    pub fn color_at(&self, x: i8, y: i8) -> Option<BlockColor> {
        self.block_at(x, y).map(|b| b.color)
    }

    /// Borrow a block record by id
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id.index())?.as_ref()
    }

    /// Mutably borrow a block record by id
    pub fn block_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.blocks.get_mut(id.index())?.as_mut()
    }

    /// Place a new block at an empty in-bounds cell
    /// Returns None (no mutation) if the cell is out of bounds or occupied
    pub fn insert_block(
        &mut self,
        x: i8,
        y: i8,
        color: BlockColor,
        special: bool,
        visual: VisualId,
    ) -> Option<BlockId> {
        let idx = Self::index(x, y)?;
        if self.cells[idx].is_some() {
            return None;
        }

        let block = Block {
            color,
            special,
            x,
            y,
            animating: false,
            visual,
        };

        let id = match self.free.pop() {
            Some(id) => {
                self.blocks[id.index()] = Some(block);
                id
            }
            None => {
                let id = BlockId(self.blocks.len() as u32);
                self.blocks.push(Some(block));
                id
            }
        };

        self.cells[idx] = Some(id);
        Some(id)
    }

    /// Remove a block, clearing its cell and recycling its arena slot
    /// Returns the removed record (the caller owns disposing its visual)
    pub fn remove_block(&mut self, id: BlockId) -> Option<Block> {
        let block = self.blocks.get_mut(id.index())?.take()?;
        if let Some(idx) = Self::index(block.x, block.y) {
            if self.cells[idx] == Some(id) {
                self.cells[idx] = None;
            }
        }
        self.free.push(id);
        Some(block)
    }

    /// Move a block to an empty in-bounds cell, syncing cell reference and
    /// coordinate cache. Returns false (no mutation) on any precondition
    /// failure.
    pub fn move_block(&mut self, id: BlockId, x: i8, y: i8) -> bool {
        let Some(dst) = Self::index(x, y) else {
            return false;
        };
        if self.cells[dst].is_some() {
            return false;
        }
        let Some(block) = self.blocks.get_mut(id.index()).and_then(Option::as_mut) else {
            return false;
        };

        let src = Self::index(block.x, block.y);
        block.x = x;
        block.y = y;
        if let Some(src) = src {
            if self.cells[src] == Some(id) {
                self.cells[src] = None;
            }
        }
        self.cells[dst] = Some(id);
        true
    }

    /// Exchange two blocks' cells and coordinate caches atomically
    /// Returns false (no mutation) unless both ids resolve to live blocks
    pub fn swap_blocks(&mut self, a: BlockId, b: BlockId) -> bool {
        if a == b {
            return false;
        }
        let (Some(block_a), Some(block_b)) = (self.block(a), self.block(b)) else {
            return false;
        };
        let (ax, ay) = (block_a.x, block_a.y);
        let (bx, by) = (block_b.x, block_b.y);
        let (Some(ia), Some(ib)) = (Self::index(ax, ay), Self::index(bx, by)) else {
            return false;
        };

        self.cells[ia] = Some(b);
        self.cells[ib] = Some(a);
        if let Some(block) = self.block_mut(a) {
            block.x = bx;
            block.y = by;
        }
        if let Some(block) = self.block_mut(b) {
            block.x = ax;
            block.y = ay;
        }
        true
    }

    /// Compact every column toward the base row, preserving relative order.
    /// Purely logical: coordinates and cells are final when this returns.
    /// Returns the list of blocks that moved.
    pub fn apply_gravity(&mut self) -> ArrayVec<GravityMove, CELL_COUNT> {
        let mut moves = ArrayVec::new();

        for x in 0..GRID_WIDTH as i8 {
            let mut write_y: i8 = 0;
            for y in 0..GRID_HEIGHT as i8 {
                let Some(Some(id)) = self.get(x, y) else {
                    continue;
                };
                if write_y != y {
                    // Cell below is guaranteed empty by the write pointer
                    let from_y = y;
                    let idx_src = Self::index(x, y).unwrap_or(0);
                    self.cells[idx_src] = None;
                    let idx_dst = Self::index(x, write_y).unwrap_or(0);
                    self.cells[idx_dst] = Some(id);
                    if let Some(block) = self.block_mut(id) {
                        block.y = write_y;
                    }
                    moves.push(GravityMove {
                        id,
                        x,
                        from_y,
                        to_y: write_y,
                    });
                }
                write_y += 1;
            }
        }

        moves
    }

    /// Number of occupied cells in a column (bottom-packed after gravity)
    pub fn column_height(&self, x: i8) -> u8 {
        (0..GRID_HEIGHT as i8)
            .filter(|&y| self.is_occupied(x, y))
            .count() as u8
    }

    /// Iterate all live blocks with their ids
    pub fn blocks(&self) -> impl Iterator<Item = (BlockId, &Block)> {
        self.blocks
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|b| (BlockId(i as u32), b)))
    }

    /// Number of live blocks
    pub fn block_count(&self) -> usize {
        self.blocks.iter().filter(|slot| slot.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Remove every block, returning the records so the caller can dispose
    /// their visuals (teardown path)
    pub fn drain_all(&mut self) -> Vec<Block> {
        let ids: Vec<BlockId> = self.blocks().map(|(id, _)| id).collect();
        ids.into_iter()
            .filter_map(|id| self.remove_block(id))
            .collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
