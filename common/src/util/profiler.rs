use std::time::{Duration, Instant};

/// Times one phase of a floorplanning run and logs the result when dropped.
pub struct ScopedTimer {
    phase: &'static str,
    level: log::Level,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(phase: &'static str) -> Self {
        Self {
            phase,
            level: log::Level::Info,
            start: Instant::now(),
        }
    }

    /// Level of the closing log line, e.g. `Debug` for per-chain timings.
    pub fn with_level(mut self, level: log::Level) -> Self {
        self.level = level;
        self
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        log::log!(
            self.level,
            "{} finished in {:.3}s",
            self.phase,
            self.elapsed().as_secs_f64()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_grows_and_level_is_kept() {
        let timer = ScopedTimer::new("Test phase").with_level(log::Level::Debug);
        assert_eq!(timer.level, log::Level::Debug);
        let first = timer.elapsed();
        std::thread::sleep(Duration::from_millis(2));
        assert!(timer.elapsed() > first);
    }
}
