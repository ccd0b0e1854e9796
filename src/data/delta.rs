use std::time::Instant;

use crate::bubbles::config::{DEFAULT_FRAME_MS, MAX_FRAME_MS, MIN_FRAME_MS};

/// Milliseconds since the program started, the timestamp handed to
/// `BubbleField::on_frame`.
pub struct Timeline {
    start: Instant,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Turns frame timestamps into a frame delta that can neither stall the
/// simulation nor make it jump.
#[derive(Debug, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, now: f64) -> f32 {
        let dt = match self.last {
            Some(last) => ((now - last) as f32).clamp(MIN_FRAME_MS, MAX_FRAME_MS),
            None => DEFAULT_FRAME_MS,
        };

        self.last = Some(now);
        dt
    }

    /// Record a frame that did no work, so the next delta starts from here.
    pub fn skip(&mut self, now: f64) {
        self.last = Some(now);
    }
}
