//! Retained sprite scene backing the `Renderer` port
//!
//! The core and the animation tasks address sprites by `VisualId`; the view
//! reads the whole scene back every frame. Updates against ids that were
//! already destroyed are silently dropped, matching the fire-and-forget
//! contract of the port.

use std::collections::HashMap;

use crate::services::{Hooks, Renderer, Sound, VisualId};
use crate::types::{BlockColor, SoundEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Block,
    Particle,
}

/// One renderable object with the full attribute set the port can touch
#[derive(Debug, Clone)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub x: f32,
    pub y: f32,
    pub color: BlockColor,
    pub special: bool,
    pub scale: f32,
    pub opacity: f32,
    pub rotation: f32,
    pub highlight: bool,
}

impl Sprite {
    fn new(kind: SpriteKind, x: f32, y: f32, color: BlockColor, special: bool) -> Self {
        Self {
            kind,
            x,
            y,
            color,
            special,
            scale: 1.0,
            opacity: 1.0,
            rotation: 0.0,
            highlight: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct TermScene {
    sprites: HashMap<u64, Sprite>,
    next_id: u64,
    camera: (f32, f32),
}

impl TermScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sprites(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.values()
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    pub fn camera(&self) -> (f32, f32) {
        self.camera
    }

    fn allocate(&mut self, sprite: Sprite) -> VisualId {
        self.next_id += 1;
        self.sprites.insert(self.next_id, sprite);
        VisualId::new(self.next_id)
    }

    fn sprite_mut(&mut self, visual: VisualId) -> Option<&mut Sprite> {
        self.sprites.get_mut(&visual.raw())
    }
}

impl Renderer for TermScene {
    fn create_block(&mut self, x: f32, y: f32, color: BlockColor, special: bool) -> VisualId {
        self.allocate(Sprite::new(SpriteKind::Block, x, y, color, special))
    }

    fn create_particle(&mut self, x: f32, y: f32, color: BlockColor) -> VisualId {
        self.allocate(Sprite::new(SpriteKind::Particle, x, y, color, false))
    }

    fn destroy(&mut self, visual: VisualId) {
        self.sprites.remove(&visual.raw());
    }

    fn set_position(&mut self, visual: VisualId, x: f32, y: f32) {
        if let Some(sprite) = self.sprite_mut(visual) {
            sprite.x = x;
            sprite.y = y;
        }
    }

    fn set_scale(&mut self, visual: VisualId, scale: f32) {
        if let Some(sprite) = self.sprite_mut(visual) {
            sprite.scale = scale;
        }
    }

    fn set_opacity(&mut self, visual: VisualId, opacity: f32) {
        if let Some(sprite) = self.sprite_mut(visual) {
            sprite.opacity = opacity;
        }
    }

    fn set_rotation(&mut self, visual: VisualId, turns: f32) {
        if let Some(sprite) = self.sprite_mut(visual) {
            sprite.rotation = turns;
        }
    }

    fn set_highlight(&mut self, visual: VisualId, on: bool) {
        if let Some(sprite) = self.sprite_mut(visual) {
            sprite.highlight = on;
        }
    }

    fn set_camera_offset(&mut self, dx: f32, dy: f32) {
        self.camera = (dx, dy);
    }
}

/// Sound port for a silent terminal: keeps the latest cue with a short TTL
/// so the HUD can flash its name
#[derive(Debug, Default)]
pub struct CueLine {
    cue: Option<(SoundEvent, u32)>,
}

impl CueLine {
    const CUE_TTL_MS: u32 = 900;

    pub fn tick(&mut self, dt_ms: u32) {
        if let Some((_, ttl)) = &mut self.cue {
            *ttl = ttl.saturating_sub(dt_ms);
            if *ttl == 0 {
                self.cue = None;
            }
        }
    }

    pub fn current(&self) -> Option<SoundEvent> {
        self.cue.map(|(event, _)| event)
    }
}

impl Sound for CueLine {
    fn play(&mut self, event: SoundEvent) {
        self.cue = Some((event, Self::CUE_TTL_MS));
    }
}

/// Host hooks for the HUD: the latest award (for a "+N" popup) and the
/// final score once the session ends
#[derive(Debug, Default)]
pub struct ScoreFeed {
    last_award: Option<(u32, u32)>,
    final_score: Option<u32>,
}

impl ScoreFeed {
    const AWARD_TTL_MS: u32 = 1200;

    pub fn tick(&mut self, dt_ms: u32) {
        if let Some((_, ttl)) = &mut self.last_award {
            *ttl = ttl.saturating_sub(dt_ms);
            if *ttl == 0 {
                self.last_award = None;
            }
        }
    }

    pub fn last_award(&self) -> Option<u32> {
        self.last_award.map(|(points, _)| points)
    }

    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }
}

impl Hooks for ScoreFeed {
    fn on_score_update(&mut self, points: u32) {
        self.last_award = Some((points, Self::AWARD_TTL_MS));
    }

    fn on_game_over(&mut self, final_score: u32) {
        self.final_score = Some(final_score);
    }
}
