use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds (clamped).
    pub dt: f32,

    /// Time elapsed since the clock was created, in seconds (not clamped).
    pub elapsed: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// `dt` is clamped so a stalled process (debugger, minimized window) does not
/// produce a huge step. `elapsed` is measured from the creation instant and is
/// never clamped: it is the animation time base.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default `dt` clamps (100 µs .. 250 ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the `dt` baseline. `elapsed` keeps counting from creation.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Seconds since the clock was created.
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
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
    fn frame_index_counts_ticks() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick().frame_index, 0);
        assert_eq!(clock.tick().frame_index, 1);
        assert_eq!(clock.tick().frame_index, 2);
    }

    #[test]
    fn dt_is_clamped_but_elapsed_is_not() {
        let mut clock = FrameClock::new();
        let later = clock.start + Duration::from_secs(3);
        let ft = clock.tick_at(later);
        assert_eq!(ft.dt, 0.25);
        assert!((ft.elapsed - 3.0).abs() < 1e-6);
    }

    #[test]
    fn dt_has_a_floor() {
        let mut clock = FrameClock::new();
        let start = clock.start;
        let ft = clock.tick_at(start);
        assert!((ft.dt - 0.0001).abs() < 1e-7);
        assert_eq!(ft.elapsed, 0.0);
    }

    #[test]
    fn elapsed_is_monotonic() {
        let mut clock = FrameClock::new();
        let a = clock.tick_at(clock.start + Duration::from_millis(10)).elapsed;
        let b = clock.tick_at(clock.start + Duration::from_millis(20)).elapsed;
        assert!(b > a);
    }

    #[test]
    fn reset_keeps_elapsed_base() {
        let mut clock = FrameClock::new();
        let start = clock.start;
        clock.reset();
        let ft = clock.tick_at(start + Duration::from_secs(1));
        assert!((ft.elapsed - 1.0).abs() < 1e-6);
    }
}
