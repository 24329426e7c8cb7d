pub mod frame;
pub mod hud;
pub mod plain;

use std::time::Instant;

use crossterm::style::Color;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::input::state::InputState;
use crate::pong::{self, GameState};
use crate::ticker::Ticker;
use crate::torus::Rasterizer;

pub fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        if r < 8 {
            return 16;
        }
        if r > 248 {
            return 231;
        }
        return 232 + ((r as f32 - 8.0) / 247.0 * 24.0) as u8;
    }
    let ri = (r as f32 / 255.0 * 5.0 + 0.5) as u8;
    let gi = (g as f32 / 255.0 * 5.0 + 0.5) as u8;
    let bi = (b as f32 / 255.0 * 5.0 + 0.5) as u8;
    16 + 36 * ri + 6 * gi + bi
}

pub fn make_color(r: u8, g: u8, b: u8, use_truecolor: bool) -> Color {
    if use_truecolor {
        Color::Rgb { r, g, b }
    } else {
        Color::AnsiValue(rgb_to_ansi256(r, g, b))
    }
}

// --- Character grid ---

/// Row-major grid of characters, blank cells are spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharGrid {
    cells: Vec<char>,
    width: usize,
    height: usize,
}

impl CharGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![' '; width * height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_slice(&self) -> &[char] {
        &self.cells
    }

    pub fn clear(&mut self) {
        self.cells.fill(' ');
    }

    pub fn index_of(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(x as usize + self.width * y as usize)
    }

    pub fn set_index(&mut self, idx: usize, ch: char) {
        self.cells[idx] = ch;
    }

    /// Writes `ch` at `(x, y)`; off-grid positions are ignored.
    pub fn set(&mut self, x: i64, y: i64, ch: char) -> bool {
        match self.index_of(x, y) {
            Some(idx) => {
                self.cells[idx] = ch;
                true
            }
            None => false,
        }
    }

    pub fn put_str(&mut self, x: i64, y: i64, text: &str) {
        for (offset, ch) in text.chars().enumerate() {
            self.set(x + offset as i64, y, ch);
        }
    }

    /// Writes `text` so that its middle character sits on column `center_x`.
    pub fn put_str_centered(&mut self, center_x: i64, y: i64, text: &str) {
        let len = text.chars().count() as i64;
        self.put_str(center_x - len / 2, y, text);
    }

    /// Splits the grid into `height` rows of `width` characters.
    pub fn to_lines(&self) -> Vec<String> {
        if self.width == 0 {
            return vec![String::new(); self.height];
        }
        self.as_slice()
            .chunks(self.width)
            .map(|row| row.iter().collect())
            .collect()
    }
}

// --- App state ---

/// The torus demo: its rasterizer plus the last serialized frame.
#[derive(Debug)]
pub struct DonutScene {
    pub rasterizer: Rasterizer,
    pub lines: Vec<String>,
}

#[derive(Debug)]
pub struct PongScene {
    pub game: GameState,
    pub grid: CharGrid,
    pub lines: Vec<String>,
    pub rng: StdRng,
}

impl PongScene {
    pub fn new(rng: StdRng) -> Self {
        let grid = CharGrid::new(pong::GRID_COLS, pong::GRID_ROWS);
        let lines = grid.to_lines();
        Self {
            game: GameState::new(),
            grid,
            lines,
            rng,
        }
    }
}

#[derive(Debug)]
pub enum Scene {
    Donut(Box<DonutScene>),
    Pong(Box<PongScene>),
}

impl Scene {
    pub fn donut(rasterizer: Rasterizer) -> Self {
        let lines = rasterizer.screen().to_lines();
        Self::Donut(Box::new(DonutScene { rasterizer, lines }))
    }

    pub fn pong() -> Self {
        Self::Pong(Box::new(PongScene::new(StdRng::from_os_rng())))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Donut(_) => "Donut",
            Self::Pong(_) => "Pong",
        }
    }

    /// Runs one tick of the active demo and refreshes its frame.
    pub fn advance(&mut self, input_state: &mut InputState) {
        match self {
            Self::Donut(donut) => {
                donut.lines = donut.rasterizer.tick();
            }
            Self::Pong(scene) => {
                input_state.expire_held(Instant::now());
                let input = pong::TickInput {
                    up: input_state.held.up,
                    down: input_state.held.down,
                    restart: std::mem::take(&mut input_state.restart_requested),
                };
                pong::tick(&mut scene.game, &input, &mut scene.rng);
                pong::draw::draw_game(&scene.game, &mut scene.grid);
                scene.lines = scene.grid.to_lines();
            }
        }
    }

    pub fn frame_lines(&self) -> &[String] {
        match self {
            Self::Donut(donut) => &donut.lines,
            Self::Pong(scene) => &scene.lines,
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub scene: Scene,
    pub ticker: Ticker,
    pub input_state: InputState,
    pub hud_string_buf: String,
    pub show_hud: bool,
    pub use_truecolor: bool,
    pub frame_count: u64,
    pub frame_limit: Option<u64>,
    pub last_frame_time: Instant,
    pub fps: f32,
}

impl AppState {
    pub fn new(scene: Scene, ticker: Ticker) -> Self {
        Self {
            scene,
            ticker,
            input_state: InputState::default(),
            hud_string_buf: String::with_capacity(256),
            show_hud: true,
            use_truecolor: false,
            frame_count: 0,
            frame_limit: None,
            last_frame_time: Instant::now(),
            fps: 0.0,
        }
    }

    pub fn frame_limit_reached(&self) -> bool {
        self.frame_limit.is_some_and(|limit| self.frame_count >= limit)
    }
}
