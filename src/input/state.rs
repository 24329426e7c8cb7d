use std::time::{Duration, Instant};

/// How long a press counts as held when the terminal never reports releases.
/// Long enough to bridge the usual auto-repeat delay.
pub const HOLD_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
}

/// Input collected between ticks.
#[derive(Debug, Default)]
pub struct InputState {
    pub held: HeldKeys,
    /// Whether the terminal reports key releases.
    pub release_events: bool,
    pub last_press: Option<Instant>,
    /// Latched until the next Pong tick consumes it.
    pub restart_requested: bool,
    pub redraw_requested: bool,
    pub clear_requested: bool,
    pub quit_requested: bool,
}

impl InputState {
    pub fn release_all(&mut self) {
        self.held = HeldKeys::default();
        self.last_press = None;
    }

    pub fn press_vertical(&mut self, up: bool, now: Instant) {
        if up {
            self.held.up = true;
        } else {
            self.held.down = true;
        }
        if !self.release_events {
            // Without releases the previous direction would never let go.
            if up {
                self.held.down = false;
            } else {
                self.held.up = false;
            }
            self.last_press = Some(now);
        }
    }

    pub fn release_vertical(&mut self, up: bool) {
        if up {
            self.held.up = false;
        } else {
            self.held.down = false;
        }
    }

    /// Drops held keys once auto-repeat has gone quiet.
    pub fn expire_held(&mut self, now: Instant) {
        if self.release_events {
            return;
        }
        if let Some(pressed_at) = self.last_press {
            if now.saturating_duration_since(pressed_at) >= HOLD_TIMEOUT {
                self.release_all();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_all_keeps_latches() {
        let mut state = InputState {
            held: HeldKeys {
                up: true,
                down: true,
            },
            restart_requested: true,
            ..InputState::default()
        };
        state.release_all();
        assert_eq!(state.held, HeldKeys::default());
        assert!(state.restart_requested);
    }

    #[test]
    fn presses_expire_without_release_events() {
        let t0 = Instant::now();
        let mut state = InputState::default();
        state.press_vertical(true, t0);
        state.expire_held(t0 + HOLD_TIMEOUT / 2);
        assert!(state.held.up);

        state.press_vertical(true, t0 + HOLD_TIMEOUT / 2);
        state.expire_held(t0 + HOLD_TIMEOUT);
        assert!(state.held.up);

        state.expire_held(t0 + HOLD_TIMEOUT * 2);
        assert!(!state.held.up);
    }

    #[test]
    fn opposite_press_replaces_direction_without_release_events() {
        let t0 = Instant::now();
        let mut state = InputState::default();
        state.press_vertical(true, t0);
        state.press_vertical(false, t0);
        assert_eq!(
            state.held,
            HeldKeys {
                up: false,
                down: true
            }
        );
    }

    #[test]
    fn reported_releases_disable_expiry() {
        let t0 = Instant::now();
        let mut state = InputState {
            release_events: true,
            ..InputState::default()
        };
        state.press_vertical(true, t0);
        state.press_vertical(false, t0);
        state.expire_held(t0 + HOLD_TIMEOUT * 10);
        assert!(state.held.up && state.held.down);

        state.release_vertical(true);
        assert!(!state.held.up);
    }
}
