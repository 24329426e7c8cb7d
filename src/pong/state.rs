use super::{BALL_START_SPEED, PADDLE_HEIGHT, WORLD_HEIGHT, WORLD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Top edge of the player paddle (left side).
    pub player_y: f32,
    /// Top edge of the AI paddle (right side).
    pub ai_y: f32,
    pub ball_x: f32,
    pub ball_y: f32,
    pub ball_vx: f32,
    pub ball_vy: f32,
    pub player_score: u32,
    pub ai_score: u32,
    pub phase: Phase,
    pub flash_visible: bool,
    pub flash_timer: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        let paddle_y = (WORLD_HEIGHT - PADDLE_HEIGHT) / 2.0;
        Self {
            player_y: paddle_y,
            ai_y: paddle_y,
            ball_x: WORLD_WIDTH / 2.0,
            ball_y: WORLD_HEIGHT / 2.0,
            ball_vx: BALL_START_SPEED,
            ball_vy: BALL_START_SPEED,
            player_score: 0,
            ai_score: 0,
            phase: Phase::Playing,
            flash_visible: true,
            flash_timer: 0,
        }
    }

    /// Scores and ball back to their opening values; paddles stay put.
    pub fn reset_game(&mut self) {
        self.player_score = 0;
        self.ai_score = 0;
        self.ball_x = WORLD_WIDTH / 2.0;
        self.ball_y = WORLD_HEIGHT / 2.0;
        self.ball_vx = BALL_START_SPEED;
        self.ball_vy = BALL_START_SPEED;
        self.phase = Phase::Playing;
    }

    pub fn winner(&self) -> Option<&'static str> {
        if self.phase != Phase::GameOver {
            return None;
        }
        Some(if self.player_score > self.ai_score {
            "You"
        } else {
            "AI"
        })
    }
}
