use super::state::{GameState, Phase};
use super::{PADDLE_HEIGHT, PADDLE_WIDTH, WORLD_HEIGHT, WORLD_WIDTH};
use crate::render::CharGrid;

pub const PADDLE_CHAR: char = '\u{2588}';
pub const BALL_CHAR: char = 'O';

fn to_col(grid: &CharGrid, x: f32) -> i64 {
    (x * grid.width() as f32 / WORLD_WIDTH).floor() as i64
}

fn to_row(grid: &CharGrid, y: f32) -> i64 {
    (y * grid.height() as f32 / WORLD_HEIGHT).floor() as i64
}

fn draw_paddle(grid: &mut CharGrid, col: i64, top: f32) {
    let first = to_row(grid, top);
    let last = ((top + PADDLE_HEIGHT) * grid.height() as f32 / WORLD_HEIGHT).ceil() as i64 - 1;
    for row in first..=last {
        grid.set(col, row, PADDLE_CHAR);
    }
}

pub fn draw_game(state: &GameState, grid: &mut CharGrid) {
    grid.clear();
    let center = to_col(grid, WORLD_WIDTH / 2.0);

    match state.phase {
        Phase::Playing => {
            let player_col = to_col(grid, 0.0);
            let ai_col = to_col(grid, WORLD_WIDTH - PADDLE_WIDTH);
            draw_paddle(grid, player_col, state.player_y);
            draw_paddle(grid, ai_col, state.ai_y);

            let (ball_col, ball_row) = (to_col(grid, state.ball_x), to_row(grid, state.ball_y));
            grid.set(ball_col, ball_row, BALL_CHAR);

            let score_row = to_row(grid, 50.0);
            let player_score_col = to_col(grid, WORLD_WIDTH / 4.0);
            let ai_score_col = to_col(grid, WORLD_WIDTH * 3.0 / 4.0);
            grid.put_str_centered(player_score_col, score_row, &state.player_score.to_string());
            grid.put_str_centered(ai_score_col, score_row, &state.ai_score.to_string());
        }
        Phase::GameOver => {
            let title_row = to_row(grid, WORLD_HEIGHT / 2.0 - 50.0);
            grid.put_str_centered(center, title_row, "Game Over");
            if let Some(winner) = state.winner() {
                let line = format!("{winner} win{}", if winner == "You" { "" } else { "s" });
                grid.put_str_centered(center, title_row + 1, &line);
            }
            if state.flash_visible {
                let prompt_row = to_row(grid, WORLD_HEIGHT / 2.0 + 30.0);
                grid.put_str_centered(center, prompt_row, "Press Space to Play Again");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pong::{GRID_COLS, GRID_ROWS};

    fn grid() -> CharGrid {
        CharGrid::new(GRID_COLS, GRID_ROWS)
    }

    fn at(grid: &CharGrid, x: usize, y: usize) -> char {
        grid.as_slice()[x + grid.width() * y]
    }

    #[test]
    fn opening_position_layout() {
        let mut g = grid();
        draw_game(&GameState::new(), &mut g);

        assert_eq!(at(&g, 40, 12), BALL_CHAR);
        for row in 10..=13 {
            assert_eq!(at(&g, 0, row), PADDLE_CHAR);
            assert_eq!(at(&g, 79, row), PADDLE_CHAR);
        }
        assert_eq!(at(&g, 0, 9), ' ');
        assert_eq!(at(&g, 0, 14), ' ');
        assert_eq!(at(&g, 20, 2), '0');
        assert_eq!(at(&g, 60, 2), '0');
    }

    #[test]
    fn ball_outside_world_is_clipped() {
        let mut g = grid();
        let mut state = GameState::new();
        state.ball_x = -5.0;
        state.ball_y = 700.0;
        draw_game(&state, &mut g);
        assert!(!g.as_slice().contains(&BALL_CHAR));
    }

    #[test]
    fn game_over_screen_blinks_prompt() {
        let mut g = grid();
        let mut state = GameState::new();
        state.phase = Phase::GameOver;
        state.player_score = 3;
        draw_game(&state, &mut g);
        let lines = g.to_lines();
        assert!(lines[10].contains("Game Over"));
        assert!(lines[11].contains("You win"));
        assert!(lines[13].contains("Press Space to Play Again"));
        assert!(!g.as_slice().contains(&PADDLE_CHAR));

        state.flash_visible = false;
        draw_game(&state, &mut g);
        assert!(!g.to_lines()[13].contains("Press Space"));
    }
}
