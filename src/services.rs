//! Collaborator ports - rendering, audio, and host callbacks
//!
//! The core never talks to a scene graph, an audio backend, or the host UI
//! directly. It calls these traits, which the frontend implements and tests
//! replace with doubles. All calls are fire-and-forget: the core's logical
//! state transitions never depend on what a collaborator does with them.

use crate::types::{BlockColor, SoundEvent};

/// Opaque handle to a renderable object (block, particle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisualId(u64);

impl VisualId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Rendering primitives consumed by the core and the animation scheduler.
///
/// Positions are in grid units: (0.0, 0.0) is the center of the base-row
/// left cell, y grows upward. Values outside the grid are legal (blocks
/// enter from above it).
pub trait Renderer {
    fn create_block(&mut self, x: f32, y: f32, color: BlockColor, special: bool) -> VisualId;
    fn create_particle(&mut self, x: f32, y: f32, color: BlockColor) -> VisualId;
    fn destroy(&mut self, visual: VisualId);
    fn set_position(&mut self, visual: VisualId, x: f32, y: f32);
    fn set_scale(&mut self, visual: VisualId, scale: f32);
    fn set_opacity(&mut self, visual: VisualId, opacity: f32);
    fn set_rotation(&mut self, visual: VisualId, turns: f32);
    fn set_highlight(&mut self, visual: VisualId, on: bool);
    /// Screen shake: offset applied to the whole scene, (0, 0) to rest
    fn set_camera_offset(&mut self, dx: f32, dy: f32);
}

/// Audio cues, fire-and-forget
pub trait Sound {
    fn play(&mut self, event: SoundEvent);
}

/// Host callbacks: score deltas and the (single) terminal notification
pub trait Hooks {
    /// Invoked once per scoring event with the points just awarded
    fn on_score_update(&mut self, points: u32);
    /// Invoked exactly once when the game reaches its terminal state
    fn on_game_over(&mut self, final_score: u32);
}

/// Bundle of collaborator borrows passed into core entry points
pub struct Services<'a> {
    pub render: &'a mut dyn Renderer,
    pub audio: &'a mut dyn Sound,
    pub hooks: &'a mut dyn Hooks,
}

/// Renderer double that hands out ids and discards everything else
#[derive(Debug, Default)]
pub struct NullRenderer {
    next: u64,
}

impl Renderer for NullRenderer {
    fn create_block(&mut self, _x: f32, _y: f32, _color: BlockColor, _special: bool) -> VisualId {
        self.next += 1;
        VisualId(self.next)
    }

    fn create_particle(&mut self, _x: f32, _y: f32, _color: BlockColor) -> VisualId {
        self.next += 1;
        VisualId(self.next)
    }

    fn destroy(&mut self, _visual: VisualId) {}
    fn set_position(&mut self, _visual: VisualId, _x: f32, _y: f32) {}
    fn set_scale(&mut self, _visual: VisualId, _scale: f32) {}
    fn set_opacity(&mut self, _visual: VisualId, _opacity: f32) {}
    fn set_rotation(&mut self, _visual: VisualId, _turns: f32) {}
    fn set_highlight(&mut self, _visual: VisualId, _on: bool) {}
    fn set_camera_offset(&mut self, _dx: f32, _dy: f32) {}
}

/// Audio double that swallows every cue
#[derive(Debug, Default)]
pub struct NullSound;

impl Sound for NullSound {
    fn play(&mut self, _event: SoundEvent) {}
}

/// Hooks double that ignores every callback
#[derive(Debug, Default)]
pub struct NullHooks;

impl Hooks for NullHooks {
    fn on_score_update(&mut self, _points: u32) {}
    fn on_game_over(&mut self, _final_score: u32) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_renderer_ids_are_distinct() {
        let mut render = NullRenderer::default();
        let a = render.create_block(0.0, 0.0, BlockColor::Red, false);
        let b = render.create_particle(0.0, 0.0, BlockColor::Red);
        assert_ne!(a, b);
    }
}
