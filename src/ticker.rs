// Cancellable fixed-interval schedule driving the tick engine.
use std::time::{Duration, Instant};

use tracing::trace;

/// Fixed-interval schedule for the tick engine. At most one schedule exists:
/// `start` cancels any pending one before arming a new one.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Ticker {
            interval,
            next_due: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.stop();
        self.next_due = Some(now + self.interval);
        trace!(interval_ms = self.interval.as_millis() as u64, "ticker armed");
    }

    pub fn stop(&mut self) {
        if self.next_due.take().is_some() {
            trace!("ticker cancelled");
        }
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// True once per elapsed interval; the next firing is measured from `now`
    /// so a stalled loop does not replay missed ticks.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(100);

    #[test]
    fn test_fires_after_interval() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(INTERVAL);
        ticker.start(t0);
        assert!(!ticker.poll(t0 + Duration::from_millis(99)));
        assert!(ticker.poll(t0 + INTERVAL));
        assert!(!ticker.poll(t0 + INTERVAL));
        assert!(ticker.poll(t0 + INTERVAL * 2));
    }

    #[test]
    fn test_stopped_never_fires() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(INTERVAL);
        assert!(!ticker.poll(t0 + INTERVAL * 10));
        ticker.start(t0);
        ticker.stop();
        assert!(!ticker.is_running());
        assert!(!ticker.poll(t0 + INTERVAL * 10));
    }

    #[test]
    fn test_restart_replaces_pending_schedule() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(INTERVAL);
        ticker.start(t0);
        ticker.start(t0 + Duration::from_millis(50));
        // the first schedule would have fired here
        assert!(!ticker.poll(t0 + INTERVAL));
        assert!(ticker.poll(t0 + Duration::from_millis(150)));
    }

    #[test]
    fn test_missed_ticks_are_not_replayed() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(INTERVAL);
        ticker.start(t0);
        let late = t0 + INTERVAL * 5;
        assert!(ticker.poll(late));
        assert!(!ticker.poll(late));
    }
}
