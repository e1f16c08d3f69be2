//! Swap resolver - adjacency checks and the instantaneous logical swap
//!
//! The logical swap is authoritative: it completes (and, on a failed
//! match, reverts) before any animation plays. The game facade holds the
//! processing lock for the visual duration; nothing here waits.

use crate::core::grid::{BlockId, Grid};
use crate::core::matcher::{find_matches, MatchSet};

/// Result of a logical swap attempt
#[derive(Debug, Clone)]
pub enum SwapOutcome {
    /// Preconditions failed; the grid was not touched
    Rejected,
    /// Swap found no match and was reverted; the grid equals its pre-swap
    /// state exactly
    NoMatch,
    /// Swap committed; the detector found these blocks on the swapped grid
    Matched(MatchSet),
}

/// Grid-adjacency: Manhattan distance exactly 1 (same row or column)
pub fn are_adjacent(grid: &Grid, a: BlockId, b: BlockId) -> bool {
    let (Some(block_a), Some(block_b)) = (grid.block(a), grid.block(b)) else {
        return false;
    };
    let dx = (block_a.x - block_b.x).abs();
    let dy = (block_a.y - block_b.y).abs();
    dx + dy == 1
}

/// Check all swap preconditions: both blocks live, neither mid-animation,
/// and the two are grid-adjacent
pub fn can_swap(grid: &Grid, a: BlockId, b: BlockId) -> bool {
    let (Some(block_a), Some(block_b)) = (grid.block(a), grid.block(b)) else {
        return false;
    };
    if block_a.animating || block_b.animating {
        return false;
    }
    are_adjacent(grid, a, b)
}

/// Perform the logical swap and detect the outcome.
///
/// On a match the grid keeps the swapped positions; on no match the grid
/// is restored before this returns. Rejected attempts never mutate.
pub fn try_swap(grid: &mut Grid, a: BlockId, b: BlockId) -> SwapOutcome {
    if !can_swap(grid, a, b) {
        return SwapOutcome::Rejected;
    }
    if !grid.swap_blocks(a, b) {
        return SwapOutcome::Rejected;
    }

    let matches = find_matches(grid);
    if matches.is_empty() {
        grid.swap_blocks(a, b);
        SwapOutcome::NoMatch
    } else {
        SwapOutcome::Matched(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::VisualId;
    use crate::types::BlockColor;

    fn place(grid: &mut Grid, x: i8, y: i8, color: BlockColor) -> BlockId {
        let visual = VisualId::new(((y as u64) << 8) | x as u64);
        grid.insert_block(x, y, color, false, visual).unwrap()
    }

    #[test]
    fn test_adjacency() {
        let mut grid = Grid::new();
        let a = place(&mut grid, 2, 2, BlockColor::Red);
        let right = place(&mut grid, 3, 2, BlockColor::Blue);
        let above = place(&mut grid, 2, 3, BlockColor::Green);
        let diagonal = place(&mut grid, 3, 3, BlockColor::Cyan);
        let far = place(&mut grid, 5, 2, BlockColor::Yellow);

        assert!(are_adjacent(&grid, a, right));
        assert!(are_adjacent(&grid, a, above));
        assert!(!are_adjacent(&grid, a, diagonal));
        assert!(!are_adjacent(&grid, a, far));
        assert!(!are_adjacent(&grid, a, a));
    }

    #[test]
    fn test_animating_block_cannot_swap() {
        let mut grid = Grid::new();
        let a = place(&mut grid, 0, 0, BlockColor::Red);
        let b = place(&mut grid, 1, 0, BlockColor::Blue);

        grid.block_mut(a).unwrap().animating = true;
        assert!(!can_swap(&grid, a, b));

        grid.block_mut(a).unwrap().animating = false;
        assert!(can_swap(&grid, a, b));
    }

    #[test]
    fn test_rejected_swap_leaves_grid_untouched() {
        let mut grid = Grid::new();
        let a = place(&mut grid, 0, 0, BlockColor::Red);
        let b = place(&mut grid, 2, 0, BlockColor::Blue);
        let before = grid.cells().to_vec();

        assert!(matches!(try_swap(&mut grid, a, b), SwapOutcome::Rejected));
        assert_eq!(grid.cells(), &before[..]);
    }

    #[test]
    fn test_no_match_swap_round_trips() {
        let mut grid = Grid::new();
        let a = place(&mut grid, 0, 0, BlockColor::Red);
        let b = place(&mut grid, 1, 0, BlockColor::Blue);
        place(&mut grid, 2, 0, BlockColor::Green);
        let before = grid.cells().to_vec();

        assert!(matches!(try_swap(&mut grid, a, b), SwapOutcome::NoMatch));
        assert_eq!(grid.cells(), &before[..]);
        assert_eq!(grid.block(a).map(|bl| (bl.x, bl.y)), Some((0, 0)));
        assert_eq!(grid.block(b).map(|bl| (bl.x, bl.y)), Some((1, 0)));
    }

    #[test]
    fn test_matching_swap_commits() {
        let mut grid = Grid::new();
        // Blue sits in the corner of a Red L; pulling Red down to (0,0)
        // completes the bottom row run
        let blue = place(&mut grid, 0, 0, BlockColor::Blue);
        let red = place(&mut grid, 0, 1, BlockColor::Red);
        place(&mut grid, 1, 0, BlockColor::Red);
        place(&mut grid, 2, 0, BlockColor::Red);

        match try_swap(&mut grid, red, blue) {
            SwapOutcome::Matched(matches) => {
                assert_eq!(matches.len(), 3);
                assert!(matches.contains(red));
                assert!(!matches.contains(blue));
            }
            other => panic!("expected match, got {:?}", other),
        }
        // Grid keeps the swapped positions
        assert_eq!(grid.block(red).map(|bl| (bl.x, bl.y)), Some((0, 0)));
        assert_eq!(grid.block(blue).map(|bl| (bl.x, bl.y)), Some((0, 1)));
    }
}
