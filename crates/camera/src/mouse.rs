use glam::Vec2;

/// Tracks the last absolute cursor sample so motion events can be turned
/// into deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseState {
    last: Vec2,
    seen_first: bool,
}

impl Default for MouseState {
    fn default() -> Self {
        Self::new(Vec2::new(400.0, 300.0))
    }
}

impl MouseState {
    pub fn new(initial: Vec2) -> Self {
        Self {
            last: initial,
            seen_first: false,
        }
    }

    /// Screen-space delta (y grows downward) since the previous sample.
    ///
    /// The very first sample only primes the tracker and yields zero, so a
    /// cursor that starts far from `initial` does not snap the view.
    pub fn delta(&mut self, x: f32, y: f32) -> Vec2 {
        let pos = Vec2::new(x, y);
        if !self.seen_first {
            self.last = pos;
            self.seen_first = true;
        }
        let delta = pos - self.last;
        self.last = pos;
        delta
    }

    pub fn last(&self) -> Vec2 {
        self.last
    }

    pub fn has_sample(&self) -> bool {
        self.seen_first
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_yields_zero() {
        let mut mouse = MouseState::default();
        assert!(!mouse.has_sample());
        assert_eq!(mouse.delta(1000.0, 5.0), Vec2::ZERO);
        assert!(mouse.has_sample());
        assert_eq!(mouse.last(), Vec2::new(1000.0, 5.0));
    }

    #[test]
    fn later_samples_are_raw_screen_deltas() {
        let mut mouse = MouseState::default();
        mouse.delta(10.0, 10.0);
        assert_eq!(mouse.delta(15.0, 4.0), Vec2::new(5.0, -6.0));
        assert_eq!(mouse.delta(15.0, 4.0), Vec2::ZERO);
    }
}
