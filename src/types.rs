//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Grid dimensions. The bottom `BASE_ROWS` rows hold the playfield; the
/// rows above are headroom for timed drops.
pub const GRID_WIDTH: u8 = 8;
pub const GRID_HEIGHT: u8 = 12;
pub const BASE_ROWS: u8 = 8;

/// Total number of cells on the grid
pub const CELL_COUNT: usize = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

/// Minimum run length that counts as a match
pub const MIN_RUN: usize = 3;

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;
pub const SWAP_MS: u32 = 300;
pub const SWAP_BACK_MS: u32 = 200;
pub const DROP_MS: u32 = 300;
pub const REFILL_DROP_MS: u32 = 500;
pub const REMOVAL_MS: u32 = 300;
pub const SHAKE_MS: u32 = 400;

/// Cascade stage delays: Clearing settles before Gravity runs, and the
/// grid rests before Rescan so drop-in animations can land.
pub const CLEAR_SETTLE_MS: u32 = 500;
pub const RESCAN_DELAY_MS: u32 = 800;

/// Auto-drop pacing. The interval shrinks with difficulty but never below
/// the floor.
pub const BASE_DROP_INTERVAL_MS: u32 = 2500;
pub const DROP_INTERVAL_FLOOR_MS: u32 = 400;

/// Chance (percent) that a spawned block carries the special flag
pub const SPECIAL_CHANCE_PERCENT: u32 = 10;

/// Scoring constants
pub const MATCH_BASE_SCORE: u32 = 10;
pub const SPECIAL_BONUS: u32 = 20;
pub const CASCADE_BONUS: u32 = 5;
pub const LEVEL_STEP: u32 = 100;

/// Particle effect sizing
pub const PARTICLES_PER_BLOCK: u32 = 20;
pub const PARTICLES_PER_SPECIAL: u32 = 30;
pub const SHAKE_INTENSITY: f32 = 0.15;
pub const SPECIAL_SHAKE_INTENSITY: f32 = 0.25;

/// Block colors (fixed palette)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockColor {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Cyan,
}

impl BlockColor {
    pub const ALL: [BlockColor; 6] = [
        BlockColor::Red,
        BlockColor::Green,
        BlockColor::Blue,
        BlockColor::Yellow,
        BlockColor::Purple,
        BlockColor::Cyan,
    ];

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockColor::Red => "red",
            BlockColor::Green => "green",
            BlockColor::Blue => "blue",
            BlockColor::Yellow => "yellow",
            BlockColor::Purple => "purple",
            BlockColor::Cyan => "cyan",
        }
    }

    /// Parse color from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(BlockColor::Red),
            "green" => Some(BlockColor::Green),
            "blue" => Some(BlockColor::Blue),
            "yellow" => Some(BlockColor::Yellow),
            "purple" => Some(BlockColor::Purple),
            "cyan" => Some(BlockColor::Cyan),
            _ => None,
        }
    }
}

/// Sound cues consumed by the audio collaborator (fire-and-forget)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    Select,
    Swap,
    Match,
    LevelUp,
    GameOver,
    Start,
}

impl SoundEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEvent::Select => "select",
            SoundEvent::Swap => "swap",
            SoundEvent::Match => "match",
            SoundEvent::LevelUp => "levelUp",
            SoundEvent::GameOver => "gameOver",
            SoundEvent::Start => "start",
        }
    }
}
