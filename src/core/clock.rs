use std::time::Instant;

/// Frame clock - tracks wall-clock delta between ticks
/// The first tick only seeds the clock and reports zero elapsed time
#[derive(Debug, Default)]
pub struct Clock {
    last_tick: Option<Instant>,
}

impl Clock {
    /// Create an unseeded clock
    pub fn new() -> Self {
        Self { last_tick: None }
    }

    /// Get delta time since last tick and advance clock
    /// Returns delta in seconds
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Same as `tick`, with the current instant supplied by the caller
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let delta = self
            .last_tick
            .map(|last| now.saturating_duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last_tick = Some(now);
        delta
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn first_tick_is_zero() {
        let mut clock = Clock::new();
        thread::sleep(Duration::from_millis(5));
        assert_eq!(clock.tick(), 0.0);
    }

    #[test]
    fn clock_measures_delta() {
        let mut clock = Clock::new();
        clock.tick();

        thread::sleep(Duration::from_millis(10));
        let delta = clock.tick();

        // Should be roughly 10ms = 0.01s
        assert!(delta >= 0.009 && delta <= 0.050);
    }

    #[test]
    fn injected_instants_are_exact() {
        let mut clock = Clock::new();
        let start = Instant::now();

        assert_eq!(clock.tick_at(start), 0.0);
        let delta = clock.tick_at(start + Duration::from_millis(250));
        assert!((delta - 0.25).abs() < 1e-6);
    }

    #[test]
    fn going_backwards_yields_zero() {
        let mut clock = Clock::new();
        let start = Instant::now() + Duration::from_secs(1);

        clock.tick_at(start);
        assert_eq!(clock.tick_at(start - Duration::from_millis(500)), 0.0);
    }
}
