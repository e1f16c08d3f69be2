//! Cascade engine - the Clearing / Gravity / Refill / Rescan pipeline
//!
//! Logical mutations are instantaneous: each stage commits its grid changes
//! the tick it runs, schedules catch-up animations, then waits out a stage
//! delay so the visuals can land before the next stage fires. Chained
//! clears loop back through Clearing with the chain counter raised until a
//! rescan finds nothing.

use crate::core::grid::Grid;
use crate::core::matcher::find_matches;
use crate::core::scoring;
use crate::core::spawner::Spawner;
use crate::fx::{cell_center, AnimTask, Scheduler, Vec2};
use crate::services::Services;
use crate::types::{
    BASE_ROWS, CLEAR_SETTLE_MS, DROP_MS, GRID_HEIGHT, GRID_WIDTH, PARTICLES_PER_BLOCK,
    PARTICLES_PER_SPECIAL, REFILL_DROP_MS, REMOVAL_MS, RESCAN_DELAY_MS, SHAKE_INTENSITY, SHAKE_MS,
    SoundEvent, SPECIAL_SHAKE_INTENSITY,
};

/// Vertical entry point for refill blocks, just above the visible grid
const REFILL_ENTRY_Y: f32 = GRID_HEIGHT as f32 + 2.0;

/// Per-column stagger for refill drops, in milliseconds
const REFILL_STAGGER_MS: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadePhase {
    Idle,
    Clearing,
    Gravity,
    Refill,
    Rescan,
}

/// Stage machine driving one cascade from trigger to quiescence
#[derive(Debug)]
pub struct CascadeEngine {
    phase: CascadePhase,
    delay_ms: u32,
    chain: u32,
}

impl CascadeEngine {
    pub fn new() -> Self {
        Self {
            phase: CascadePhase::Idle,
            delay_ms: 0,
            chain: 0,
        }
    }

    /// Start a cascade at chain depth 0. The triggering match is recomputed
    /// at the Clearing stage; callers only signal that one exists.
    pub fn begin(&mut self) {
        self.phase = CascadePhase::Clearing;
        self.delay_ms = 0;
        self.chain = 0;
    }

    pub fn is_idle(&self) -> bool {
        self.phase == CascadePhase::Idle
    }

    pub fn phase(&self) -> CascadePhase {
        self.phase
    }

    /// Cascade depth of the stage currently in flight (0 for the stage
    /// triggered directly by a swap or drop)
    pub fn chain(&self) -> u32 {
        self.chain
    }

    /// Advance by `dt_ms`, running at most one stage transition.
    /// Returns the points awarded this tick (nonzero only on Clearing).
    pub fn tick(
        &mut self,
        dt_ms: u32,
        grid: &mut Grid,
        spawner: &mut Spawner,
        sched: &mut Scheduler,
        svc: &mut Services,
    ) -> u32 {
        if self.phase == CascadePhase::Idle {
            return 0;
        }
        if self.delay_ms > dt_ms {
            self.delay_ms -= dt_ms;
            return 0;
        }
        self.delay_ms = 0;

        match self.phase {
            CascadePhase::Idle => 0,
            CascadePhase::Clearing => self.run_clearing(grid, spawner, sched, svc),
            CascadePhase::Gravity => {
                self.run_gravity(grid, sched);
                0
            }
            CascadePhase::Refill => {
                self.run_refill(grid, spawner, sched, svc);
                0
            }
            CascadePhase::Rescan => {
                self.run_rescan(grid);
                0
            }
        }
    }

    fn run_clearing(
        &mut self,
        grid: &mut Grid,
        spawner: &mut Spawner,
        sched: &mut Scheduler,
        svc: &mut Services,
    ) -> u32 {
        let matches = find_matches(grid);
        if matches.is_empty() {
            // Stale trigger (nothing to clear); fall back to quiescence
            self.phase = CascadePhase::Idle;
            self.chain = 0;
            return 0;
        }

        let specials = matches.special_count(grid);
        let points = scoring::match_points(matches.len(), specials, self.chain);

        let ids: Vec<_> = matches.ids().to_vec();
        for id in ids {
            let Some(block) = grid.remove_block(id) else {
                continue;
            };
            let center = cell_center(block.x, block.y);
            let spin = 1.0 + spawner.rng_mut().next_signed_unit() * 0.5;
            sched.push(AnimTask::removal(block.visual, spin, REMOVAL_MS));

            let burst = if block.special {
                PARTICLES_PER_SPECIAL
            } else {
                PARTICLES_PER_BLOCK
            };
            for _ in 0..burst {
                let visual = svc.render.create_particle(center.x, center.y, block.color);
                let rng = spawner.rng_mut();
                let vel = Vec2::new(
                    rng.next_signed_unit() * 0.12,
                    0.05 + (rng.next_signed_unit() + 1.0) * 0.08,
                );
                let spin = rng.next_signed_unit() * 0.1;
                sched.push(AnimTask::particle(visual, center, vel, -0.012, spin, 0.025));
            }
        }

        let intensity = if specials > 0 {
            SPECIAL_SHAKE_INTENSITY
        } else {
            SHAKE_INTENSITY
        };
        sched.push(AnimTask::shake(
            intensity,
            SHAKE_MS,
            spawner.rng_mut().next_u32(),
        ));
        svc.audio.play(SoundEvent::Match);

        self.phase = CascadePhase::Gravity;
        self.delay_ms = CLEAR_SETTLE_MS;
        points
    }

    fn run_gravity(&mut self, grid: &mut Grid, sched: &mut Scheduler) {
        for mv in grid.apply_gravity() {
            let Some(block) = grid.block(mv.id) else {
                continue;
            };
            sched.push(AnimTask::drop(
                block.visual,
                cell_center(mv.x, mv.from_y),
                cell_center(mv.x, mv.to_y),
                DROP_MS,
            ));
        }
        self.phase = CascadePhase::Refill;
    }

    fn run_refill(
        &mut self,
        grid: &mut Grid,
        spawner: &mut Spawner,
        sched: &mut Scheduler,
        svc: &mut Services,
    ) {
        for x in 0..GRID_WIDTH as i8 {
            let height = grid.column_height(x) as i8;
            for y in height..BASE_ROWS as i8 {
                let color = spawner.refill_color(grid, x, y);
                let special = spawner.roll_special();
                let visual = svc
                    .render
                    .create_block(x as f32, REFILL_ENTRY_Y, color, special);

                if grid.insert_block(x, y, color, special, visual).is_none() {
                    svc.render.destroy(visual);
                    continue;
                }

                let stagger = (y - height) as u32 * REFILL_STAGGER_MS;
                sched.push(AnimTask::drop(
                    visual,
                    Vec2::new(x as f32, REFILL_ENTRY_Y),
                    cell_center(x, y),
                    REFILL_DROP_MS + stagger,
                ));
            }
        }
        self.phase = CascadePhase::Rescan;
        self.delay_ms = RESCAN_DELAY_MS;
    }

    fn run_rescan(&mut self, grid: &Grid) {
        if find_matches(grid).is_empty() {
            self.phase = CascadePhase::Idle;
            self.chain = 0;
        } else {
            self.chain += 1;
            self.phase = CascadePhase::Clearing;
        }
    }
}

impl Default for CascadeEngine {
    fn default() -> Self {
        Self::new()
    }
}
