use std::time::{Duration, Instant};

/// Fixed-period scheduler with explicit start/stop.
///
/// `due` fires at most once per call; after a stall the next deadline is
/// pushed past `now` instead of replaying the missed ticks.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    running: bool,
    next_due: Option<Instant>,
}

impl Ticker {
    /// A running ticker whose first tick is due immediately.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            running: true,
            next_due: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.next_due = None;
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
    }

    pub fn due(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }
        match self.next_due {
            Some(deadline) if now < deadline => false,
            Some(deadline) => {
                let mut next = deadline + self.period;
                if next <= now {
                    next = now + self.period;
                }
                self.next_due = Some(next);
                true
            }
            None => {
                self.next_due = Some(now + self.period);
                true
            }
        }
    }

    /// Time left before the next tick, `None` while stopped.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        if !self.running {
            return None;
        }
        Some(
            self.next_due
                .map(|deadline| deadline.saturating_duration_since(now))
                .unwrap_or(Duration::ZERO),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(17);

    #[test]
    fn first_tick_is_immediate_then_periodic() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(PERIOD);
        assert!(ticker.due(t0));
        assert!(!ticker.due(t0));
        assert!(!ticker.due(t0 + Duration::from_millis(16)));
        assert!(ticker.due(t0 + PERIOD));
        assert!(!ticker.due(t0 + PERIOD));
        assert_eq!(ticker.time_until_due(t0 + PERIOD), Some(PERIOD));
    }

    #[test]
    fn stalls_do_not_burst() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(PERIOD);
        assert!(ticker.due(t0));
        let late = t0 + PERIOD * 10;
        assert!(ticker.due(late));
        assert!(!ticker.due(late + Duration::from_millis(1)));
        assert!(ticker.due(late + PERIOD));
    }

    #[test]
    fn stopped_ticker_never_fires() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(PERIOD);
        ticker.stop();
        assert!(!ticker.is_running());
        assert!(!ticker.due(t0));
        assert!(!ticker.due(t0 + PERIOD * 3));
        assert_eq!(ticker.time_until_due(t0), None);
    }

    #[test]
    fn restart_fires_immediately() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(PERIOD);
        assert!(ticker.due(t0));
        ticker.toggle();
        assert!(!ticker.due(t0 + PERIOD));
        ticker.toggle();
        assert!(ticker.is_running());
        let t1 = t0 + PERIOD + Duration::from_millis(1);
        assert_eq!(ticker.time_until_due(t1), Some(Duration::ZERO));
        assert!(ticker.due(t1));
    }
}
