use std::time::Duration;

/// Decides which frames get drawn.
///
/// A frame is drawn once the clock reaches the time target. Each draw pushes the target
/// forward by the latest frame delta, and if the clock is already past the new target, the
/// target jumps to the current time instead of trying to catch up.
#[derive(Debug, Default, Clone)]
pub struct FrameGate {
    time_target: Duration,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// `now` is time since start, `frame_delta` the duration of the last frame.
    pub fn poll(&mut self, now: Duration, frame_delta: Duration) -> bool {
        if now < self.time_target {
            return false;
        }

        self.time_target += frame_delta;
        if now >= self.time_target {
            self.time_target = now;
        }

        true
    }

    #[cfg(test)]
    pub fn time_target(&self) -> Duration {
        self.time_target
    }
}
