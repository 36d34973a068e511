use std::time::{Duration, Instant};

/// Fixed-interval timer polled from the UI loop
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self { interval, next: None }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// First tick fires one interval from now
    pub fn start(&mut self) {
        self.next = Some(Instant::now() + self.interval);
    }

    pub fn stop(&mut self) {
        self.next = None;
    }

    pub fn is_active(&self) -> bool {
        self.next.is_some()
    }

    /// True once per elapsed interval.
    ///
    /// A late poll fires once and schedules the next tick from now, so a
    /// stalled loop does not burst through missed ticks.
    pub fn poll(&mut self) -> bool {
        match self.next {
            Some(due) if Instant::now() >= due => {
                self.next = Some(Instant::now() + self.interval);
                true
            }
            _ => false,
        }
    }

    pub fn time_until_next(&self) -> Option<Duration> {
        self.next.map(|due| due.saturating_duration_since(Instant::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn fires_only_after_the_interval() {
        let mut ticker = Ticker::new(Duration::from_millis(30));
        assert!(!ticker.poll());
        ticker.start();
        assert!(!ticker.poll());
        thread::sleep(Duration::from_millis(35));
        assert!(ticker.poll());
        assert!(!ticker.poll());
    }

    #[test]
    fn stop_disarms() {
        let mut ticker = Ticker::new(Duration::ZERO);
        ticker.start();
        assert!(ticker.is_active());
        ticker.stop();
        assert!(!ticker.poll());
        assert_eq!(ticker.time_until_next(), None);
    }

    #[test]
    fn time_until_next_is_bounded_by_interval() {
        let mut ticker = Ticker::new(Duration::from_millis(500));
        ticker.start();
        let remaining = ticker.time_until_next().unwrap();
        assert!(remaining <= Duration::from_millis(500));
        assert!(remaining > Duration::from_millis(400));
    }
}
