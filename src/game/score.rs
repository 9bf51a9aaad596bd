//! Score Timer
//!
//! Wall-clock periodic counter, independent of the frame loop. The driver
//! feeds it elapsed real time; every full interval bumps the score.

/// Counts completed intervals.
///
/// The score is bumped before anyone reads it, so it reads 0 during the
/// first interval and 1 as soon as that interval completes. A display that
/// showed the count before each bump would trail this value by one.
#[derive(Debug, Clone)]
pub struct ScoreTimer {
    interval: f64,
    accumulated: f64,
    score: u64,
    running: bool,
}

impl ScoreTimer {
    pub fn new(interval_secs: f64) -> Self {
        Self {
            interval: interval_secs,
            accumulated: 0.0,
            score: 0,
            running: true,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Feed `elapsed` seconds of wall-clock time. Returns how many ticks fired.
    pub fn advance(&mut self, elapsed: f64) -> u32 {
        if !self.running || !(elapsed > 0.0) {
            return 0;
        }

        self.accumulated += elapsed;
        let mut ticks = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            self.score += 1;
            ticks += 1;
        }
        ticks
    }

    /// Cancel the timer. Further time is ignored.
    pub fn stop(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_once_per_interval() {
        let mut t = ScoreTimer::new(1.0);
        assert_eq!(t.advance(0.4), 0);
        assert_eq!(t.advance(0.4), 0);
        assert_eq!(t.advance(0.4), 1);
        assert_eq!(t.score(), 1);
        assert_eq!(t.advance(2.0), 2);
        assert_eq!(t.score(), 3);
    }

    #[test]
    fn test_reads_one_once_first_interval_completes() {
        let mut t = ScoreTimer::new(1.0);
        assert_eq!(t.score(), 0);
        t.advance(0.75);
        assert_eq!(t.score(), 0);
        t.advance(0.25);
        assert_eq!(t.score(), 1);
    }

    #[test]
    fn test_frame_sized_steps() {
        let mut t = ScoreTimer::new(1.0);
        for _ in 0..600 {
            t.advance(1.0 / 60.0);
        }
        // Floating error may land the 10th tick one frame late
        assert!(t.score() == 9 || t.score() == 10);
    }

    #[test]
    fn test_stop_freezes_score() {
        let mut t = ScoreTimer::new(1.0);
        t.advance(3.0);
        t.stop();
        assert!(!t.is_running());
        assert_eq!(t.advance(10.0), 0);
        assert_eq!(t.score(), 3);
    }

    #[test]
    fn test_ignores_negative_and_nan() {
        let mut t = ScoreTimer::new(1.0);
        assert_eq!(t.advance(-5.0), 0);
        assert_eq!(t.advance(f64::NAN), 0);
        assert_eq!(t.advance(1.0), 1);
    }
}
