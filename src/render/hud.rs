use crossterm::{
    cursor, queue,
    style::{Print, SetBackgroundColor, SetForegroundColor},
};
use std::fmt::Write as _;
use std::io::{self, Write};

use super::{make_color, AppState, Scene};
use crate::pong::Phase;

pub fn truncate_and_pad_in_place(text: &mut String, width: usize) {
    if width == 0 {
        text.clear();
        return;
    }

    let mut seen_chars = 0usize;
    let mut truncate_byte = None;
    for (idx, _) in text.char_indices() {
        if seen_chars == width {
            truncate_byte = Some(idx);
            break;
        }
        seen_chars += 1;
    }

    if let Some(idx) = truncate_byte {
        text.truncate(idx);
    } else {
        for _ in seen_chars..width {
            text.push(' ');
        }
    }
}

/// The HUD takes over the bottom terminal row.
pub fn is_hud_row(show_hud: bool, row: usize, term_rows: usize) -> bool {
    show_hud && row + 1 == term_rows
}

pub fn format_status(app_state: &AppState, hud: &mut String) -> std::fmt::Result {
    hud.clear();
    let ticker = if app_state.ticker.is_running() {
        "RUN"
    } else {
        "PAUSED"
    };
    write!(
        hud,
        "{} FPS:{:>5.1} Frame:{} [{}]",
        app_state.scene.name(),
        app_state.fps,
        app_state.frame_count,
        ticker
    )?;

    match &app_state.scene {
        Scene::Donut(donut) => {
            let (a, b) = donut.rasterizer.angles();
            write!(hud, "  A:{a:.4} B:{b:.4}  Space/P:Pause Tab:HUD Q:Quit")?;
        }
        Scene::Pong(scene) => {
            write!(
                hud,
                "  You {} - {} AI",
                scene.game.player_score, scene.game.ai_score
            )?;
            match scene.game.phase {
                Phase::Playing => hud.push_str("  Up/Down:Move P:Pause Tab:HUD Q:Quit"),
                Phase::GameOver => hud.push_str("  Space:Play again Q:Quit"),
            }
        }
    }
    Ok(())
}

pub fn draw_hud(
    app_state: &mut AppState,
    cols: u16,
    rows: u16,
    stdout: &mut impl Write,
) -> io::Result<()> {
    let mut hud = std::mem::take(&mut app_state.hud_string_buf);
    format_status(app_state, &mut hud).map_err(|_| io::Error::other("failed to format HUD"))?;
    truncate_and_pad_in_place(&mut hud, cols as usize);

    let tc = app_state.use_truecolor;
    let result = queue!(
        stdout,
        cursor::MoveTo(0, rows.saturating_sub(1)),
        SetBackgroundColor(make_color(0, 0, 0, tc)),
        SetForegroundColor(make_color(220, 220, 220, tc)),
        Print(hud.as_str())
    );
    app_state.hud_string_buf = hud;
    result
}
