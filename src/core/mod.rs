//! Core game logic, independent of any frontend

pub mod cascade;
pub mod game;
pub mod grid;
pub mod matcher;
pub mod rng;
pub mod scoring;
pub mod spawner;
pub mod swap;

pub use cascade::{CascadeEngine, CascadePhase};
pub use game::Game;
pub use grid::{Block, BlockId, Cell, GravityMove, Grid};
pub use matcher::{find_matches, MatchSet};
pub use rng::SimpleRng;
pub use spawner::Spawner;
pub use swap::{are_adjacent, can_swap, try_swap, SwapOutcome};
