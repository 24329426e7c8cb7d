//! Terminal ASCII demos.
//!
//! - `torus`: the rotating donut rasterizer
//! - `pong`: two-paddle Pong simulation and its character-grid renderer
//! - `render`: scenes, frame presentation, HUD and plain text output
//! - `input`, `ticker`, `terminal_setup`: the interactive loop plumbing

pub mod error;
pub mod input;
pub mod pong;
pub mod render;
pub mod terminal_setup;
pub mod ticker;
pub mod torus;
