use std::time::{Duration, Instant};

/// A stopwatch that can be paused.
///
/// Starts running as soon as it is created.
#[derive(Debug, Clone)]
pub struct Timer {
    start_time: Instant,

    /// Time accumulated when the timer was paused; `None` while running
    paused_at: Option<Duration>,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            paused_at: None,
        }
    }

    /// Freezes the elapsed time. Does nothing if already paused.
    pub fn pause(&mut self) {
        if self.paused_at.is_none() {
            self.paused_at = Some(self.start_time.elapsed());
        }
    }

    /// Resumes counting from where [`Timer::pause`] left off. Does nothing if running.
    pub fn unpause(&mut self) {
        if let Some(elapsed) = self.paused_at.take() {
            self.start_time = Instant::now()
                .checked_sub(elapsed)
                .unwrap_or_else(Instant::now);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Starts over, running, and returns the time elapsed before the restart
    pub fn restart(&mut self) -> Duration {
        let elapsed = self.elapsed();
        self.start_time = Instant::now();
        self.paused_at = None;
        elapsed
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.paused_at
            .unwrap_or_else(|| self.start_time.elapsed())
    }

    #[inline]
    pub fn seconds(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    #[inline]
    pub fn milliseconds(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
