/// Frame clock. Times are seconds on a monotonic clock; the previous frame
/// starts at zero, so the first delta is the time since the clock origin.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameTiming {
    current: f32,
    last: f32,
    delta: f32,
}

impl FrameTiming {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new frame at `now` and return the elapsed time.
    pub fn tick(&mut self, now: f32) -> f32 {
        self.current = now;
        self.delta = self.current - self.last;
        self.last = self.current;
        self.delta
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    /// Distance covered this frame at `speed` units per second.
    pub fn distance(&self, speed: f32) -> f32 {
        speed * self.delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_measures_from_zero() {
        let mut timing = FrameTiming::new();
        assert_eq!(timing.tick(0.25), 0.25);
        assert_eq!(timing.current(), 0.25);
    }

    #[test]
    fn deltas_between_frames() {
        let mut timing = FrameTiming::new();
        timing.tick(1.0);
        let dt = timing.tick(1.5);
        assert_eq!(dt, 0.5);
        assert_eq!(timing.delta(), 0.5);
        assert_eq!(timing.distance(2.0), 1.0);
    }
}
