use std::time::{Duration, Instant};

/// Measures the time between frames and derives the FPS readout shown in the
/// window title.
///
/// Delta time is clamped so the readout stays sane when the loop is paused by
/// a debugger, the window is minimized, or the first tick runs hot.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            dt_min: Duration::from_micros(100),
            dt_max: Duration::from_millis(250),
        }
    }

    /// Advances the clock and returns the clamped delta in seconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;
        dt.as_secs_f32()
    }

    /// Rounded frames-per-second for a frame delta.
    pub fn fps(dt: f32) -> u32 {
        (1.0 / dt).round() as u32
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_rounds_the_reciprocal() {
        assert_eq!(FrameClock::fps(1.0 / 60.0), 60);
        assert_eq!(FrameClock::fps(0.0165), 61);
        assert_eq!(FrameClock::fps(0.25), 4);
    }

    #[test]
    fn tick_is_clamped_below() {
        let mut clock = FrameClock::new();
        clock.tick();
        // Two immediate ticks: dt must not collapse to zero.
        let dt = clock.tick();
        assert!(dt >= 0.0001);
    }
}
