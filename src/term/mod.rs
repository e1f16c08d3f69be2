//! Terminal frontend
//!
//! The core talks to the `Renderer` port; here that port is a retained
//! sprite scene which the view flattens into a framebuffer of styled
//! character cells, flushed to the terminal with crossterm. The core stays
//! deterministic and testable; everything in this module is presentation.

pub mod scene;
pub mod screen;
pub mod view;

pub use scene::{CueLine, ScoreFeed, Sprite, SpriteKind, TermScene};
pub use screen::TermScreen;
pub use view::{FrameBuffer, GameView, VIEW_HEIGHT, VIEW_WIDTH};
