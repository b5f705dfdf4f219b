use std::{
    thread,
    time::{Duration, Instant},
};

/// Sleep-based frame cap layered on top of the platform's swap interval.
#[derive(Clone, Copy, Debug)]
pub struct FrameLimiter {
    frame_budget: Option<Duration>,
    frame_started: Instant,
}

impl FrameLimiter {
    /// Creates a limiter targeting `target_fps`; zero disables the cap.
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let frame_budget = (target_fps > 0).then(|| Duration::from_secs(1) / target_fps);
        Self {
            frame_budget,
            frame_started: Instant::now(),
        }
    }

    /// Time allotted to a single frame, if capped.
    #[must_use]
    pub const fn frame_budget(&self) -> Option<Duration> {
        self.frame_budget
    }

    /// How long to sleep after a frame that took `elapsed`.
    ///
    /// Never exceeds the frame budget and is zero once the budget is spent.
    #[must_use]
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.frame_budget
            .map_or(Duration::ZERO, |budget| budget.saturating_sub(elapsed))
    }

    /// Sleeps out the rest of the current frame and starts timing the next.
    pub fn wait(&mut self) {
        let pause = self.remaining(self.frame_started.elapsed());
        if !pause.is_zero() {
            thread::sleep(pause);
        }
        self.frame_started = Instant::now();
    }
}

impl Default for FrameLimiter {
    fn default() -> Self {
        Self::new(60)
    }
}
