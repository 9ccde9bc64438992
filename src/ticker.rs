use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Schedule {
    interval: Duration,
    next_tick: Instant,
}

/// The single repeating tick schedule owned by the game.
///
/// Starting a new schedule replaces the old one in place, so there is never
/// more than one pending tick.
#[derive(Debug, Default)]
pub struct Ticker {
    schedule: Option<Schedule>,
}

impl Ticker {
    pub fn new() -> Self {
        Ticker { schedule: None }
    }

    pub fn start(&mut self, interval: Duration, now: Instant) {
        self.schedule = Some(Schedule {
            interval,
            next_tick: now + interval,
        });
    }

    pub fn stop(&mut self) {
        self.schedule = None;
    }

    pub fn interval(&self) -> Option<Duration> {
        self.schedule.map(|s| s.interval)
    }

    /// How long the caller may block waiting for input before the next tick.
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.schedule
            .map(|s| s.next_tick.saturating_duration_since(now))
    }

    /// Consumes one due tick, if any, and schedules the following one.
    pub fn fire(&mut self, now: Instant) -> bool {
        match &mut self.schedule {
            Some(schedule) if now >= schedule.next_tick => {
                schedule.next_tick = now + schedule.interval;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_ticker_never_fires() {
        let mut ticker = Ticker::new();
        let now = Instant::now();
        assert_eq!(ticker.interval(), None);
        assert!(!ticker.fire(now + Duration::from_secs(10)));
        assert_eq!(ticker.time_until_tick(now), None);
    }

    #[test]
    fn test_fires_once_per_interval() {
        let mut ticker = Ticker::new();
        let start = Instant::now();
        ticker.start(Duration::from_millis(200), start);

        assert!(!ticker.fire(start + Duration::from_millis(199)));
        assert!(ticker.fire(start + Duration::from_millis(200)));
        assert!(!ticker.fire(start + Duration::from_millis(300)));
        assert!(ticker.fire(start + Duration::from_millis(400)));
    }

    #[test]
    fn test_restart_replaces_schedule() {
        let mut ticker = Ticker::new();
        let start = Instant::now();
        ticker.start(Duration::from_millis(200), start);

        let later = start + Duration::from_millis(150);
        ticker.start(Duration::from_millis(180), later);

        assert_eq!(ticker.interval(), Some(Duration::from_millis(180)));
        // The old deadline at 200ms is gone.
        assert!(!ticker.fire(start + Duration::from_millis(200)));
        assert!(ticker.fire(later + Duration::from_millis(180)));
    }

    #[test]
    fn test_time_until_tick() {
        let mut ticker = Ticker::new();
        let start = Instant::now();
        ticker.start(Duration::from_millis(100), start);

        assert_eq!(
            ticker.time_until_tick(start + Duration::from_millis(40)),
            Some(Duration::from_millis(60))
        );
        assert_eq!(
            ticker.time_until_tick(start + Duration::from_millis(150)),
            Some(Duration::ZERO)
        );

        ticker.stop();
        assert_eq!(ticker.time_until_tick(start), None);
    }
}
