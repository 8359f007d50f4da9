use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds.
    pub dt: f32,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

#[derive(Debug, Clone)]
enum Source {
    Wall { last: Instant },
    Fixed { step: Duration },
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Wall-clock deltas are clamped so a stalled host (debugger, minimized
/// window) does not make tweens jump to their end.
#[derive(Debug, Clone)]
pub struct FrameClock {
    source: Source,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Wall-clock timing with default clamps (0.1 ms to 250 ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Wall-clock timing with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            source: Source::Wall { last: Instant::now() },
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Deterministic timing: every tick advances by exactly `step`.
    ///
    /// Clamps do not apply.
    pub fn fixed(step: Duration) -> Self {
        Self {
            source: Source::Fixed { step },
            frame_index: 0,
            dt_min: step,
            dt_max: step,
        }
    }

    /// Resets the wall-clock baseline, e.g. after the host resumes.
    pub fn reset(&mut self) {
        if let Source::Wall { last } = &mut self.source {
            *last = Instant::now();
        }
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let dt = match &mut self.source {
            Source::Wall { last } => {
                let now = Instant::now();
                let dt = now.saturating_duration_since(*last).clamp(self.dt_min, self.dt_max);
                *last = now;
                dt
            }
            Source::Fixed { step } => *step,
        };

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
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
