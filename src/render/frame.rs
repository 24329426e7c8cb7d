use crossterm::{
    cursor, queue,
    style::{Print, ResetColor},
    terminal::{self, ClearType},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

use super::hud::{draw_hud, is_hud_row};
use super::AppState;
use crate::error::AppResult;
use crate::input::{drain_input_events, thread::InputReceiver};

/// Upper bound on a single sleep, so input stays responsive while paused.
const IDLE_POLL: Duration = Duration::from_millis(50);

/// Top-left corner that centers a `width`x`height` frame in the usable area.
pub fn frame_origin(width: usize, height: usize, term_cols: usize, usable_rows: usize) -> (usize, usize) {
    (
        term_cols.saturating_sub(width) / 2,
        usable_rows.saturating_sub(height) / 2,
    )
}

pub fn render_frame(
    app_state: &mut AppState,
    terminal_size: (u16, u16),
    stdout: &mut impl Write,
) -> io::Result<()> {
    let cols = terminal_size.0.max(1);
    let rows = terminal_size.1.max(1);
    let term_cols = cols as usize;
    let term_rows = rows as usize;

    if std::mem::take(&mut app_state.input_state.clear_requested) {
        queue!(stdout, ResetColor, terminal::Clear(ClearType::All))?;
    }

    let lines = app_state.scene.frame_lines();
    let frame_width = lines.first().map_or(0, |l| l.chars().count());
    let usable_rows = if app_state.show_hud {
        term_rows.saturating_sub(1)
    } else {
        term_rows
    };
    let (origin_x, origin_y) = frame_origin(frame_width, lines.len(), term_cols, usable_rows);
    let visible_cols = term_cols - origin_x;

    for (i, line) in lines.iter().enumerate() {
        let row = origin_y + i;
        if row >= term_rows || is_hud_row(app_state.show_hud, row, term_rows) {
            break;
        }
        queue!(stdout, cursor::MoveTo(origin_x as u16, row as u16))?;
        if frame_width <= visible_cols {
            queue!(stdout, Print(line.as_str()))?;
        } else {
            let clipped: String = line.chars().take(visible_cols).collect();
            queue!(stdout, Print(clipped))?;
        }
    }

    if app_state.show_hud {
        draw_hud(app_state, cols, rows, stdout)?;
    }

    queue!(stdout, ResetColor)?;
    stdout.flush()
}

fn update_fps(app_state: &mut AppState, now: Instant) {
    let delta_time = now
        .duration_since(app_state.last_frame_time)
        .as_secs_f32()
        .max(1e-6);
    app_state.last_frame_time = now;

    let instant_fps = 1.0 / delta_time;
    app_state.fps = if app_state.fps <= 0.01 {
        instant_fps
    } else {
        0.90 * app_state.fps + 0.10 * instant_fps
    };
}

pub fn run_app_loop(
    app_state: &mut AppState,
    input_rx: &InputReceiver,
    stdout: &mut impl Write,
) -> AppResult<()> {
    loop {
        if drain_input_events(app_state, input_rx)? {
            break;
        }

        let now = Instant::now();
        let ticked = app_state.ticker.due(now);
        if ticked {
            app_state.scene.advance(&mut app_state.input_state);
            app_state.frame_count += 1;
            update_fps(app_state, now);
        }

        if ticked || std::mem::take(&mut app_state.input_state.redraw_requested) {
            let terminal_size = terminal::size()?;
            render_frame(app_state, terminal_size, stdout)?;
        }

        if app_state.frame_limit_reached() {
            log::debug!("frame limit reached after {} frames", app_state.frame_count);
            break;
        }

        let wait = app_state
            .ticker
            .time_until_due(Instant::now())
            .unwrap_or(IDLE_POLL)
            .min(IDLE_POLL);
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Scene;
    use crate::ticker::Ticker;
    use crate::torus::params::{TorusParams, TICK_PERIOD};
    use crate::torus::Rasterizer;
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use std::sync::mpsc;

    fn donut_state() -> AppState {
        let rasterizer = Rasterizer::new(TorusParams::default()).expect("valid params");
        AppState::new(Scene::donut(rasterizer), Ticker::new(TICK_PERIOD))
    }

    #[test]
    fn frame_is_centered() {
        assert_eq!(frame_origin(80, 24, 120, 39), (20, 7));
        assert_eq!(frame_origin(80, 24, 60, 10), (0, 0));
    }

    #[test]
    fn render_writes_every_row_and_hud() {
        let mut app = donut_state();
        app.scene.advance(&mut app.input_state);
        let mut out = Vec::new();
        render_frame(&mut app, (100, 40), &mut out).expect("render");
        let text = String::from_utf8(out).expect("utf8");
        for line in app.scene.frame_lines() {
            assert!(text.contains(line.as_str()));
        }
        assert!(text.contains("Donut FPS:"));
    }

    #[test]
    fn small_terminal_clips_instead_of_failing() {
        let mut app = donut_state();
        app.show_hud = false;
        app.scene.advance(&mut app.input_state);
        let mut out = Vec::new();
        render_frame(&mut app, (10, 5), &mut out).expect("render");
        let text = String::from_utf8(out).expect("utf8");
        assert!(!text.contains(app.scene.frame_lines()[12].as_str()));
    }

    #[test]
    fn loop_stops_at_frame_limit() {
        let mut app = donut_state();
        app.frame_limit = Some(2);
        app.show_hud = false;
        let (_tx, rx) = mpsc::channel();
        let mut out = Vec::new();
        // terminal::size may fail without a tty; only the frame count matters.
        let _ = run_app_loop(&mut app, &rx, &mut out);
        assert!(app.frame_count >= 1);
    }

    #[test]
    fn loop_exits_on_quit_key() {
        let mut app = donut_state();
        let (tx, rx) = mpsc::channel();
        tx.send(crate::input::thread::InputMessage::Event(Event::Key(KeyEvent::new(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
        ))))
        .expect("send q");
        let mut out = Vec::new();
        run_app_loop(&mut app, &rx, &mut out).expect("quit cleanly");
        assert_eq!(app.frame_count, 0);
    }
}
