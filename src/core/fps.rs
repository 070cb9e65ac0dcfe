/// Frame rate averaged over a fixed reporting interval
#[derive(Debug, Clone, Copy)]
pub struct FpsCounter {
    interval: f32,
    elapsed: f32,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    /// Report every `interval` seconds
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Count one frame; returns the fresh average when an interval completes
    pub fn tick(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += delta;

        if self.elapsed >= self.interval {
            self.fps = self.frames as f32 / self.elapsed;
            self.frames = 0;
            self.elapsed = 0.0;
            Some(self.fps)
        } else {
            None
        }
    }

    /// Last reported average
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_once_per_interval() {
        let mut counter = FpsCounter::new(1.0);

        for _ in 0..59 {
            assert!(counter.tick(1.0 / 60.0).is_none());
        }
        let fps = counter.tick(1.0 / 60.0 + 1e-4).unwrap();
        assert!((fps - 60.0).abs() < 0.1);
        assert_eq!(counter.fps(), fps);

        // Window restarts after reporting
        assert!(counter.tick(0.5).is_none());
    }

    #[test]
    fn zero_deltas_never_report() {
        let mut counter = FpsCounter::new(1.0);
        for _ in 0..100 {
            assert!(counter.tick(0.0).is_none());
        }
        assert_eq!(counter.fps(), 0.0);
    }
}
