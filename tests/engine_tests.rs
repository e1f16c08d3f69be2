//! Pipeline tests over the public crate API: swap detection feeding the
//! cascade engine, grid compaction invariants, and refill behavior.

use pixel_frenzy::core::{find_matches, try_swap, CascadeEngine, Grid, Spawner, SwapOutcome};
use pixel_frenzy::fx::Scheduler;
use pixel_frenzy::services::{NullHooks, NullRenderer, NullSound, Services, VisualId};
use pixel_frenzy::types::{BlockColor, BASE_ROWS, GRID_WIDTH, TICK_MS};

fn place(grid: &mut Grid, x: i8, y: i8, color: BlockColor) {
    grid.insert_block(x, y, color, false, VisualId::new(0))
        .unwrap();
}

/// Base rows filled with a two-color checkerboard (no runs anywhere)
fn checkerboard() -> Grid {
    let mut grid = Grid::new();
    let safe = [BlockColor::Green, BlockColor::Blue];
    for y in 0..BASE_ROWS as i8 {
        for x in 0..GRID_WIDTH as i8 {
            place(&mut grid, x, y, safe[((x + y) % 2) as usize]);
        }
    }
    grid
}

fn run_cascade(grid: &mut Grid, seed: u32) -> u32 {
    let mut engine = CascadeEngine::new();
    let mut spawner = Spawner::new(seed);
    let mut sched = Scheduler::new();
    let mut render = NullRenderer::default();
    let mut audio = NullSound;
    let mut hooks = NullHooks;

    engine.begin();
    let mut total = 0;
    let mut guard = 0;
    while !engine.is_idle() {
        let mut svc = Services {
            render: &mut render,
            audio: &mut audio,
            hooks: &mut hooks,
        };
        total += engine.tick(TICK_MS, grid, &mut spawner, &mut sched, &mut svc);
        guard += 1;
        assert!(guard < 50_000, "cascade did not terminate");
    }
    total
}

#[test]
fn horizontal_run_of_three_is_detected() {
    let mut grid = Grid::new();
    place(&mut grid, 0, 0, BlockColor::Red);
    place(&mut grid, 1, 0, BlockColor::Red);
    place(&mut grid, 2, 0, BlockColor::Red);

    let matches = find_matches(&grid);
    assert_eq!(matches.len(), 3);
}

#[test]
fn swap_that_completes_a_run_commits_and_cascades() {
    // Plant a Red L around a Cyan corner: swapping the Red at (0,1) down
    // onto (0,0) completes Red Red Red on the base row
    let mut grid = checkerboard();
    for (x, y) in [(0, 0), (0, 1), (1, 0), (2, 0)] {
        let id = grid.get(x, y).unwrap().unwrap();
        grid.remove_block(id).unwrap();
    }
    place(&mut grid, 0, 0, BlockColor::Cyan);
    place(&mut grid, 0, 1, BlockColor::Red);
    place(&mut grid, 1, 0, BlockColor::Red);
    place(&mut grid, 2, 0, BlockColor::Red);
    assert!(find_matches(&grid).is_empty());

    let red = grid.get(0, 1).unwrap().unwrap();
    let cyan = grid.get(0, 0).unwrap().unwrap();
    let outcome = try_swap(&mut grid, red, cyan);
    assert!(matches!(outcome, SwapOutcome::Matched(_)));

    let points = run_cascade(&mut grid, 17);
    assert!(points >= 30, "got {}", points);

    // Quiescence: base rows full, no holes, no residual matches
    assert!(find_matches(&grid).is_empty());
    for x in 0..GRID_WIDTH as i8 {
        assert_eq!(grid.column_height(x), BASE_ROWS);
        for y in 0..BASE_ROWS as i8 {
            assert!(grid.is_occupied(x, y), "hole at ({}, {})", x, y);
        }
    }
}

#[test]
fn failed_swap_restores_the_exact_board() {
    let mut grid = checkerboard();
    let a = grid.get(0, 0).unwrap().unwrap();
    let b = grid.get(1, 0).unwrap().unwrap();
    let before = grid.cells().to_vec();

    assert!(matches!(try_swap(&mut grid, a, b), SwapOutcome::NoMatch));
    assert_eq!(grid.cells(), &before[..]);
}

#[test]
fn non_adjacent_swap_is_rejected() {
    let mut grid = checkerboard();
    let a = grid.get(0, 0).unwrap().unwrap();
    let b = grid.get(4, 4).unwrap().unwrap();
    let diag = grid.get(1, 1).unwrap().unwrap();

    assert!(matches!(try_swap(&mut grid, a, b), SwapOutcome::Rejected));
    assert!(matches!(try_swap(&mut grid, a, diag), SwapOutcome::Rejected));
}

#[test]
fn chained_clears_pay_more_than_their_parts() {
    // A vertical Green run whose clear drops a Red column into a second,
    // horizontal Red run: points must include the chain bonus stage
    let mut grid = Grid::new();
    place(&mut grid, 0, 0, BlockColor::Red);
    place(&mut grid, 1, 0, BlockColor::Red);
    // Column 2: Greens at y 0..3 (vertical run), a Red parked above them
    for y in 0..3 {
        place(&mut grid, 2, y, BlockColor::Green);
    }
    place(&mut grid, 2, 3, BlockColor::Red);

    let points = run_cascade(&mut grid, 23);

    // First stage: 3 Greens = 30. Second stage exists only if the parked
    // Red fell into place: 3 Reds + chain bonus = 35. Refill noise can only
    // add points on top.
    assert!(points >= 65, "expected a chained clear, got {}", points);
}

#[test]
fn gravity_never_leaves_holes() {
    let mut spawner = Spawner::new(31);
    let mut grid = Grid::new();

    // Sparse scatter, then compact
    for x in 0..GRID_WIDTH as i8 {
        for y in 0..BASE_ROWS as i8 {
            if (x as u32 + y as u32 * 3) % 4 != 0 {
                let color = spawner.initial_color(&grid, x, y);
                grid.insert_block(x, y, color, false, VisualId::new(0));
            }
        }
    }
    grid.apply_gravity();

    for x in 0..GRID_WIDTH as i8 {
        let height = grid.column_height(x) as i8;
        for y in 0..height {
            assert!(grid.is_occupied(x, y), "hole at ({}, {})", x, y);
        }
        for y in height..BASE_ROWS as i8 {
            assert!(grid.is_empty(x, y));
        }
    }
}
