use rand::Rng;

use super::state::{GameState, Phase};
use super::{
    AI_DEAD_ZONE, BALL_RADIUS, FLASH_INTERVAL, MAX_BALL_SPEED, PADDLE_BOOST, PADDLE_HEIGHT,
    PADDLE_SPEED, PADDLE_SPIN, PADDLE_WIDTH, WIN_SCORE, WORLD_HEIGHT, WORLD_WIDTH,
};

/// Player input sampled for one tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub restart: bool,
}

pub fn tick(state: &mut GameState, input: &TickInput, rng: &mut impl Rng) {
    match state.phase {
        Phase::GameOver => {
            state.flash_timer = state.flash_timer.wrapping_add(1);
            if state.flash_timer % FLASH_INTERVAL == 0 {
                state.flash_visible = !state.flash_visible;
            }
            if input.restart {
                state.reset_game();
                log::info!("pong restarted");
            }
        }
        Phase::Playing => {
            move_paddles(state, input);
            move_ball(state, rng);
        }
    }
}

pub fn move_paddles(state: &mut GameState, input: &TickInput) {
    let max_y = WORLD_HEIGHT - PADDLE_HEIGHT;
    if input.up && state.player_y > 0.0 {
        state.player_y -= PADDLE_SPEED;
    }
    if input.down && state.player_y < max_y {
        state.player_y += PADDLE_SPEED;
    }

    let ai_center = state.ai_y + PADDLE_HEIGHT / 2.0;
    if ai_center < state.ball_y - AI_DEAD_ZONE && state.ai_y < max_y {
        state.ai_y += PADDLE_SPEED;
    } else if ai_center > state.ball_y + AI_DEAD_ZONE && state.ai_y > 0.0 {
        state.ai_y -= PADDLE_SPEED;
    }
}

/// Offset of `ball_y` from the paddle center, if the ball is within its span.
fn paddle_offset(ball_y: f32, paddle_y: f32) -> Option<f32> {
    (ball_y > paddle_y && ball_y < paddle_y + PADDLE_HEIGHT)
        .then(|| ball_y - (paddle_y + PADDLE_HEIGHT / 2.0))
}

fn bounce_off_paddle(state: &mut GameState, offset: f32) {
    state.ball_vx = (-state.ball_vx * PADDLE_BOOST).clamp(-MAX_BALL_SPEED, MAX_BALL_SPEED);
    state.ball_vy = (state.ball_vy + offset * PADDLE_SPIN).clamp(-MAX_BALL_SPEED, MAX_BALL_SPEED);
}

pub fn move_ball(state: &mut GameState, rng: &mut impl Rng) {
    state.ball_x += state.ball_vx;
    state.ball_y += state.ball_vy;

    // Reflect only while heading into a wall or paddle, otherwise a ball that
    // overshoots flips back and forth without leaving.
    let hits_top = state.ball_y <= BALL_RADIUS && state.ball_vy < 0.0;
    let hits_bottom = state.ball_y >= WORLD_HEIGHT - BALL_RADIUS && state.ball_vy > 0.0;
    if hits_top || hits_bottom {
        state.ball_vy = -state.ball_vy;
    }

    if state.ball_x <= PADDLE_WIDTH && state.ball_vx < 0.0 {
        if let Some(offset) = paddle_offset(state.ball_y, state.player_y) {
            bounce_off_paddle(state, offset);
        }
    } else if state.ball_x >= WORLD_WIDTH - PADDLE_WIDTH && state.ball_vx > 0.0 {
        if let Some(offset) = paddle_offset(state.ball_y, state.ai_y) {
            bounce_off_paddle(state, offset);
        }
    }

    if state.ball_x <= 0.0 {
        state.ai_score += 1;
        reset_ball(state, rng);
    } else if state.ball_x >= WORLD_WIDTH {
        state.player_score += 1;
        reset_ball(state, rng);
    }
}

/// Recenters the ball after a point, serving toward the side that scored.
pub fn reset_ball(state: &mut GameState, rng: &mut impl Rng) {
    state.ball_x = WORLD_WIDTH / 2.0;
    state.ball_y = WORLD_HEIGHT / 2.0;
    state.ball_vx = -state.ball_vx;
    state.ball_vy = (state.ball_vy * rng.random_range(-1.5_f32..1.5))
        .clamp(-MAX_BALL_SPEED, MAX_BALL_SPEED);

    log::debug!("score {} - {}", state.player_score, state.ai_score);
    if state.player_score >= WIN_SCORE || state.ai_score >= WIN_SCORE {
        state.phase = Phase::GameOver;
        log::info!(
            "pong game over: {} - {}",
            state.player_score,
            state.ai_score
        );
    }
}
