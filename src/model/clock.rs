use std::time::{Duration, Instant};

use crate::config::TimeMode;

/// Decides how many animation ticks a frame is worth.
pub struct FrameClock {
    mode: TimeMode,
    base_rate: f32,
    last_frame: Option<Instant>,
}

impl FrameClock {
    pub fn new(mode: TimeMode, base_rate: f32) -> Self {
        FrameClock {
            mode,
            base_rate,
            last_frame: None,
        }
    }

    pub fn mode(&self) -> TimeMode {
        self.mode
    }

    /// Forget the previous frame, so that time spent paused doesn't count.
    pub fn restart(&mut self) {
        self.last_frame = None;
    }

    /// Whether a frame has been timed since the last restart.
    pub fn is_running(&self) -> bool {
        self.last_frame.is_some()
    }

    /// Ticks to advance for the frame happening now.
    pub fn steps_for_frame(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = match self.last_frame {
            Some(last) => now.duration_since(last),
            None => Duration::ZERO,
        };
        self.last_frame = Some(now);
        self.steps_for_elapsed(elapsed)
    }

    pub fn steps_for_elapsed(&self, elapsed: Duration) -> f32 {
        match self.mode {
            // No catch-up: a slow frame is still one tick
            TimeMode::Fixed => 1.0,
            TimeMode::RealTime { rate_per_second } => {
                rate_per_second * elapsed.as_secs_f32() / self.base_rate
            }
        }
    }
}
