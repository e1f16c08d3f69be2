//! Game facade - session state, input staging, and the tick loop
//!
//! All mutating entry points guard on the session flags: nothing happens
//! before `start`, and nothing but visual catch-up happens after game over.
//! Swaps resolve logically inside `select_cell`; the processing lock then
//! holds for the visual duration so input cannot race the animations.

use crate::core::cascade::CascadeEngine;
use crate::core::grid::{BlockId, Grid};
use crate::core::matcher::find_matches;
use crate::core::scoring;
use crate::core::spawner::Spawner;
use crate::core::swap::{try_swap, SwapOutcome};
use crate::fx::{cell_center, AnimTask, Scheduler, Vec2};
use crate::services::Services;
use crate::types::{
    BASE_ROWS, GRID_HEIGHT, GRID_WIDTH, REFILL_DROP_MS, SoundEvent, SWAP_BACK_MS, SWAP_MS,
};

/// Entry height for timed drops, above the visible grid
const DROP_ENTRY_Y: f32 = GRID_HEIGHT as f32 + 2.0;

/// Pending swap visual window: the lock the facade holds after a logical
/// swap, and whether a cascade starts when it expires
#[derive(Debug, Clone, Copy)]
struct SwapState {
    remaining_ms: u32,
    blocks: (BlockId, BlockId),
    start_cascade: bool,
}

pub struct Game {
    grid: Grid,
    spawner: Spawner,
    cascade: CascadeEngine,
    sched: Scheduler,
    selected: Option<BlockId>,
    swap: Option<SwapState>,
    score: u32,
    level: u32,
    difficulty: f32,
    drop_timer_ms: u32,
    started: bool,
    game_over: bool,
}

impl Game {
    pub fn new(seed: u32) -> Self {
        Self {
            grid: Grid::new(),
            spawner: Spawner::new(seed),
            cascade: CascadeEngine::new(),
            sched: Scheduler::new(),
            selected: None,
            swap: None,
            score: 0,
            level: 1,
            difficulty: 1.0,
            drop_timer_ms: 0,
            started: false,
            game_over: false,
        }
    }

    /// Begin a session: fill the base rows bottom-up, left to right, with
    /// the match-avoiding color bias. Idempotent while a session is live.
    pub fn start(&mut self, svc: &mut Services) {
        if self.started {
            return;
        }

        for y in 0..BASE_ROWS as i8 {
            for x in 0..GRID_WIDTH as i8 {
                let color = self.spawner.initial_color(&self.grid, x, y);
                let special = self.spawner.roll_special();
                let visual = svc.render.create_block(x as f32, y as f32, color, special);
                self.grid.insert_block(x, y, color, special, visual);
            }
        }

        self.started = true;
        self.game_over = false;
        self.score = 0;
        self.level = 1;
        self.drop_timer_ms = 0;
        svc.audio.play(SoundEvent::Start);
    }

    /// Handle a cell activation from the frontend: select, deselect, move
    /// the selection, or stage a swap with the already-selected block
    pub fn select_cell(&mut self, x: i8, y: i8, svc: &mut Services) {
        if !self.started || self.game_over || self.is_processing() {
            return;
        }

        let Some(target) = self.grid.get(x, y).flatten() else {
            // Clicking empty space drops the selection
            self.clear_selection(svc);
            return;
        };

        let Some(current) = self.selected else {
            self.set_selection(target, svc);
            svc.audio.play(SoundEvent::Select);
            return;
        };

        if current == target {
            self.clear_selection(svc);
            return;
        }

        match try_swap(&mut self.grid, current, target) {
            SwapOutcome::Matched(_) => {
                self.stage_swap_visuals(current, target, false);
                self.swap = Some(SwapState {
                    remaining_ms: SWAP_MS,
                    blocks: (current, target),
                    start_cascade: true,
                });
                self.clear_selection(svc);
                svc.audio.play(SoundEvent::Swap);
            }
            SwapOutcome::NoMatch => {
                // Grid already reverted; the visuals glide out and back
                self.stage_swap_visuals(current, target, true);
                self.swap = Some(SwapState {
                    remaining_ms: SWAP_MS + SWAP_BACK_MS,
                    blocks: (current, target),
                    start_cascade: false,
                });
                self.clear_selection(svc);
                svc.audio.play(SoundEvent::Swap);
            }
            SwapOutcome::Rejected => {
                // Not adjacent (or not swappable): move the selection
                self.set_selection(target, svc);
                svc.audio.play(SoundEvent::Select);
            }
        }
    }

    /// Advance the session by `dt_ms`
    pub fn tick(&mut self, dt_ms: u32, svc: &mut Services) {
        self.sched.advance(dt_ms, svc.render);
        if !self.started || self.game_over {
            return;
        }

        self.tick_swap_lock(dt_ms);

        let points = self
            .cascade
            .tick(dt_ms, &mut self.grid, &mut self.spawner, &mut self.sched, svc);
        if points > 0 {
            self.award(points, svc);
        }

        if !self.is_processing() {
            self.tick_auto_drop(dt_ms, svc);
        }
    }

    /// Host-tunable pacing knob; values below 1 clamp to 1
    pub fn set_difficulty(&mut self, difficulty: f32) {
        self.difficulty = if difficulty.is_finite() && difficulty > 1.0 {
            difficulty
        } else {
            1.0
        };
    }

    /// End the session and release every visual
    pub fn teardown(&mut self, svc: &mut Services) {
        self.sched.cancel_all(svc.render);
        for block in self.grid.drain_all() {
            svc.render.destroy(block.visual);
        }
        self.selected = None;
        self.swap = None;
        self.started = false;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// True while a swap lock or cascade is in flight; input is ignored and
    /// the drop timer pauses
    pub fn is_processing(&self) -> bool {
        self.swap.is_some() || !self.cascade.is_idle()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn selected(&self) -> Option<BlockId> {
        self.selected
    }

    fn set_selection(&mut self, id: BlockId, svc: &mut Services) {
        self.clear_selection(svc);
        if let Some(block) = self.grid.block(id) {
            svc.render.set_highlight(block.visual, true);
            self.selected = Some(id);
        }
    }

    fn clear_selection(&mut self, svc: &mut Services) {
        if let Some(id) = self.selected.take() {
            if let Some(block) = self.grid.block(id) {
                svc.render.set_highlight(block.visual, false);
            }
        }
    }

    /// Schedule the glide for both swapped visuals. The grid already holds
    /// the final positions (or the reverted ones), so the glide targets are
    /// derived from where each block logically sits now.
    fn stage_swap_visuals(&mut self, a: BlockId, b: BlockId, and_back: bool) {
        let Some(block_a) = self.grid.block(a) else {
            return;
        };
        let Some(block_b) = self.grid.block(b) else {
            return;
        };
        let pos_a = cell_center(block_a.x, block_a.y);
        let pos_b = cell_center(block_b.x, block_b.y);
        let (visual_a, visual_b) = (block_a.visual, block_b.visual);

        // On a committed swap the grid already holds the targets, so each
        // visual starts from the other block's cell; on a reverted swap the
        // grid holds the origins and each visual glides out and back
        let (from_a, to_a) = if and_back { (pos_a, pos_b) } else { (pos_b, pos_a) };
        let (from_b, to_b) = if and_back { (pos_b, pos_a) } else { (pos_a, pos_b) };
        self.sched
            .push(AnimTask::swap(visual_a, from_a, to_a, SWAP_MS, SWAP_BACK_MS, and_back));
        self.sched
            .push(AnimTask::swap(visual_b, from_b, to_b, SWAP_MS, SWAP_BACK_MS, and_back));

        for id in [a, b] {
            if let Some(block) = self.grid.block_mut(id) {
                block.animating = true;
            }
        }
    }

    fn tick_swap_lock(&mut self, dt_ms: u32) {
        let Some(mut state) = self.swap else {
            return;
        };
        if state.remaining_ms > dt_ms {
            state.remaining_ms -= dt_ms;
            self.swap = Some(state);
            return;
        }

        self.swap = None;
        for id in [state.blocks.0, state.blocks.1] {
            if let Some(block) = self.grid.block_mut(id) {
                block.animating = false;
            }
        }
        if state.start_cascade {
            self.cascade.begin();
        }
    }

    fn tick_auto_drop(&mut self, dt_ms: u32, svc: &mut Services) {
        self.drop_timer_ms += dt_ms;
        let interval = scoring::drop_interval_ms(self.difficulty);
        if self.drop_timer_ms < interval {
            return;
        }
        self.drop_timer_ms = 0;

        let x = self.spawner.random_column();
        let y = self.grid.column_height(x) as i8;
        if y >= GRID_HEIGHT as i8 {
            self.finish(svc);
            return;
        }

        let color = self.spawner.refill_color(&self.grid, x, y);
        let special = self.spawner.roll_special();
        let visual = svc.render.create_block(x as f32, DROP_ENTRY_Y, color, special);
        if self.grid.insert_block(x, y, color, special, visual).is_none() {
            svc.render.destroy(visual);
            return;
        }

        self.sched.push(AnimTask::drop(
            visual,
            Vec2::new(x as f32, DROP_ENTRY_Y),
            cell_center(x, y),
            REFILL_DROP_MS,
        ));

        if !find_matches(&self.grid).is_empty() {
            self.cascade.begin();
        }
    }

    fn award(&mut self, points: u32, svc: &mut Services) {
        self.score = self.score.saturating_add(points);
        svc.hooks.on_score_update(points);

        let level = scoring::level_for_score(self.score);
        if level > self.level {
            self.level = level;
            svc.audio.play(SoundEvent::LevelUp);
        }
    }

    /// Terminal transition; runs at most once per session
    fn finish(&mut self, svc: &mut Services) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        svc.audio.play(SoundEvent::GameOver);
        svc.hooks.on_game_over(self.score);
    }

    /// Build a live session around a prepared grid (test rigs)
    #[cfg(test)]
    pub(crate) fn with_grid(grid: Grid, seed: u32) -> Self {
        let mut game = Self::new(seed);
        game.grid = grid;
        game.started = true;
        game
    }
}
