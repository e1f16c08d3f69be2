//! Pixel Frenzy - a match-3 puzzle engine with a terminal frontend
//!
//! The core is a pure state machine: a fixed grid of colored blocks, a
//! match detector, a swap resolver, and a cascade engine that clears,
//! compacts, and refills until the board is quiet. Rendering, audio, and
//! host callbacks sit behind traits in [`services`], so the same core runs
//! under the bundled crossterm frontend or under test doubles.

pub mod core;
pub mod fx;
pub mod services;
pub mod term;
pub mod types;
