pub mod state;
pub mod thread;

use crate::error::AppResult;
use crate::render::{AppState, Scene};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use std::sync::mpsc::TryRecvError;
use std::time::Instant;
use thread::{InputMessage, InputReceiver};

/// Applies every queued event; returns `true` once quit was requested.
pub fn drain_input_events(app_state: &mut AppState, input_rx: &InputReceiver) -> AppResult<bool> {
    loop {
        match input_rx.try_recv() {
            Ok(InputMessage::Event(event)) => {
                handle_input_event(app_state, event);
                if app_state.input_state.quit_requested {
                    return Ok(true);
                }
            }
            Ok(InputMessage::ReadError(err)) => {
                return Err(format!("Input thread read failed: {err}").into());
            }
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                return Err("Input channel disconnected".into());
            }
        }
    }

    Ok(app_state.input_state.quit_requested)
}

fn toggle_pause(app_state: &mut AppState) {
    app_state.ticker.toggle();
    log::debug!(
        "{} ticker {}",
        app_state.scene.name(),
        if app_state.ticker.is_running() {
            "started"
        } else {
            "stopped"
        }
    );
    app_state.input_state.redraw_requested = true;
}

pub fn handle_input_event(app_state: &mut AppState, event: Event) {
    match event {
        Event::Key(key_event) => {
            // Up/Down are tracked as held keys; releases only arrive when the
            // terminal honours the keyboard enhancement flags.
            let vertical = match key_event.code {
                KeyCode::Up => Some(true),
                KeyCode::Down => Some(false),
                _ => None,
            };
            if let Some(up) = vertical {
                if key_event.kind == KeyEventKind::Release {
                    app_state.input_state.release_vertical(up);
                } else {
                    app_state.input_state.press_vertical(up, Instant::now());
                }
            }

            if key_event.kind != KeyEventKind::Press {
                return;
            }

            match key_event.code {
                KeyCode::Esc => app_state.input_state.quit_requested = true,
                KeyCode::Tab => {
                    app_state.show_hud = !app_state.show_hud;
                    app_state.input_state.clear_requested = true;
                    app_state.input_state.redraw_requested = true;
                }
                KeyCode::Char(' ') => {
                    if matches!(app_state.scene, Scene::Donut(_)) {
                        toggle_pause(app_state);
                    } else {
                        app_state.input_state.restart_requested = true;
                    }
                }
                KeyCode::Char(c) => match c.to_ascii_lowercase() {
                    'q' => app_state.input_state.quit_requested = true,
                    'p' => toggle_pause(app_state),
                    _ => {}
                },
                _ => {}
            }
        }
        Event::FocusLost => app_state.input_state.release_all(),
        Event::Resize(_, _) => {
            app_state.input_state.clear_requested = true;
            app_state.input_state.redraw_requested = true;
        }
        _ => {}
    }
}
