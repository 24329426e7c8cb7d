//! Two-paddle Pong against a simple tracking AI.
//!
//! The simulation runs in an 800x600 world and is drawn onto a character
//! grid; `state` holds the game, `tick` advances it, `draw` renders it.

pub mod draw;
pub mod state;
pub mod tick;

use std::time::Duration;

pub use state::{GameState, Phase};
pub use tick::{tick, TickInput};

pub const WORLD_WIDTH: f32 = 800.0;
pub const WORLD_HEIGHT: f32 = 600.0;

pub const PADDLE_WIDTH: f32 = 10.0;
pub const PADDLE_HEIGHT: f32 = 100.0;
pub const PADDLE_SPEED: f32 = 5.0;

pub const BALL_RADIUS: f32 = 10.0;
pub const BALL_START_SPEED: f32 = 3.0;
pub const MAX_BALL_SPEED: f32 = 8.0;
/// Horizontal speed multiplier on a paddle hit (sign flips too).
pub const PADDLE_BOOST: f32 = 1.05;
/// Vertical kick per world unit of offset from the paddle center.
pub const PADDLE_SPIN: f32 = 0.1;

/// The AI only moves when the ball is further than this from its center.
pub const AI_DEAD_ZONE: f32 = 30.0;
pub const WIN_SCORE: u32 = 3;
/// Ticks between restart prompt blinks.
pub const FLASH_INTERVAL: u32 = 15;

pub const GRID_COLS: usize = 80;
pub const GRID_ROWS: usize = 24;

pub const TICK_PERIOD: Duration = Duration::from_millis(16);
