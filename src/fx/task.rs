//! Animation tasks - one tagged variant per effect
//!
//! Each task carries exactly the state its effect needs and advances by
//! elapsed milliseconds, reporting completion. Completion side effects are
//! visual only: removal and particle tasks own their visuals and destroy
//! them; movement tasks snap to the final position of visuals owned by
//! blocks.

use crate::core::rng::SimpleRng;
use crate::fx::{ease_out_quad, fall_curve, Vec2};
use crate::services::{Renderer, VisualId};

#[derive(Debug, Clone)]
pub enum AnimTask {
    /// Swap glide between two cells; with `and_back` the visual returns to
    /// its origin over the (faster) second leg
    Swap {
        visual: VisualId,
        from: Vec2,
        to: Vec2,
        elapsed_ms: u32,
        out_ms: u32,
        back_ms: u32,
        and_back: bool,
    },
    /// Fall to a lower cell with the bounce curve
    Drop {
        visual: VisualId,
        from: Vec2,
        to: Vec2,
        elapsed_ms: u32,
        duration_ms: u32,
    },
    /// Shrink-and-spin out, then destroy the owned visual
    Removal {
        visual: VisualId,
        spin_turns: f32,
        elapsed_ms: u32,
        duration_ms: u32,
    },
    /// Ballistic particle with fading life; owns its visual
    Particle {
        visual: VisualId,
        pos: Vec2,
        vel: Vec2,
        gravity: f32,
        spin_turns: f32,
        rotation: f32,
        life: f32,
        decay: f32,
    },
    /// Camera shake with decaying random offsets
    Shake {
        intensity: f32,
        elapsed_ms: u32,
        duration_ms: u32,
        jitter: SimpleRng,
    },
}

impl AnimTask {
    pub fn swap(visual: VisualId, from: Vec2, to: Vec2, out_ms: u32, back_ms: u32, and_back: bool) -> Self {
        AnimTask::Swap {
            visual,
            from,
            to,
            elapsed_ms: 0,
            out_ms,
            back_ms,
            and_back,
        }
    }

    pub fn drop(visual: VisualId, from: Vec2, to: Vec2, duration_ms: u32) -> Self {
        AnimTask::Drop {
            visual,
            from,
            to,
            elapsed_ms: 0,
            duration_ms,
        }
    }

    pub fn removal(visual: VisualId, spin_turns: f32, duration_ms: u32) -> Self {
        AnimTask::Removal {
            visual,
            spin_turns,
            elapsed_ms: 0,
            duration_ms,
        }
    }

    pub fn particle(visual: VisualId, pos: Vec2, vel: Vec2, gravity: f32, spin_turns: f32, decay: f32) -> Self {
        AnimTask::Particle {
            visual,
            pos,
            vel,
            gravity,
            spin_turns,
            rotation: 0.0,
            life: 1.0,
            decay,
        }
    }

    pub fn shake(intensity: f32, duration_ms: u32, seed: u32) -> Self {
        AnimTask::Shake {
            intensity,
            elapsed_ms: 0,
            duration_ms,
            jitter: SimpleRng::new(seed),
        }
    }

    /// Advance by `dt_ms`, applying visual updates. Returns true when the
    /// task is complete and should be dropped from the schedule.
    pub fn advance(&mut self, dt_ms: u32, render: &mut dyn Renderer) -> bool {
        match self {
            AnimTask::Swap {
                visual,
                from,
                to,
                elapsed_ms,
                out_ms,
                back_ms,
                and_back,
            } => {
                *elapsed_ms += dt_ms;
                let total = if *and_back { *out_ms + *back_ms } else { *out_ms };
                if *elapsed_ms >= total {
                    let rest = if *and_back { *from } else { *to };
                    render.set_position(*visual, rest.x, rest.y);
                    return true;
                }
                let pos = if *elapsed_ms < *out_ms {
                    let t = *elapsed_ms as f32 / *out_ms as f32;
                    Vec2::lerp(*from, *to, ease_out_quad(t))
                } else {
                    let t = (*elapsed_ms - *out_ms) as f32 / *back_ms as f32;
                    Vec2::lerp(*to, *from, ease_out_quad(t))
                };
                render.set_position(*visual, pos.x, pos.y);
                false
            }

            AnimTask::Drop {
                visual,
                from,
                to,
                elapsed_ms,
                duration_ms,
            } => {
                *elapsed_ms += dt_ms;
                if *elapsed_ms >= *duration_ms {
                    render.set_position(*visual, to.x, to.y);
                    return true;
                }
                let t = *elapsed_ms as f32 / *duration_ms as f32;
                let pos = Vec2::lerp(*from, *to, fall_curve(t));
                render.set_position(*visual, pos.x, pos.y);
                false
            }

            AnimTask::Removal {
                visual,
                spin_turns,
                elapsed_ms,
                duration_ms,
            } => {
                *elapsed_ms += dt_ms;
                if *elapsed_ms >= *duration_ms {
                    render.destroy(*visual);
                    return true;
                }
                let t = *elapsed_ms as f32 / *duration_ms as f32;
                render.set_scale(*visual, 1.0 - t);
                render.set_rotation(*visual, *spin_turns * t);
                false
            }

            AnimTask::Particle {
                visual,
                pos,
                vel,
                gravity,
                spin_turns,
                rotation,
                life,
                decay,
            } => {
                // Velocity and decay are per nominal 16 ms frame
                let frames = dt_ms as f32 / 16.0;
                pos.x += vel.x * frames;
                pos.y += vel.y * frames;
                vel.y += *gravity * frames;
                *rotation += *spin_turns * frames;
                *life -= *decay * frames;

                if *life <= 0.0 {
                    render.destroy(*visual);
                    return true;
                }
                render.set_position(*visual, pos.x, pos.y);
                render.set_rotation(*visual, *rotation);
                render.set_opacity(*visual, life.clamp(0.0, 1.0));
                render.set_scale(*visual, life.max(0.1));
                false
            }

            AnimTask::Shake {
                intensity,
                elapsed_ms,
                duration_ms,
                jitter,
            } => {
                *elapsed_ms += dt_ms;
                if *elapsed_ms >= *duration_ms {
                    render.set_camera_offset(0.0, 0.0);
                    return true;
                }
                let remaining = *intensity * (1.0 - *elapsed_ms as f32 / *duration_ms as f32);
                let dx = jitter.next_signed_unit() * remaining;
                let dy = jitter.next_signed_unit() * remaining;
                render.set_camera_offset(dx, dy);
                false
            }
        }
    }

    /// Dispose any state this task owns (cancellation path)
    pub fn dispose(&self, render: &mut dyn Renderer) {
        match self {
            AnimTask::Removal { visual, .. } | AnimTask::Particle { visual, .. } => {
                render.destroy(*visual);
            }
            AnimTask::Shake { .. } => render.set_camera_offset(0.0, 0.0),
            AnimTask::Swap { .. } | AnimTask::Drop { .. } => {}
        }
    }
}
