//! Frame timing
//!
//! Real-time mode sleeps away whatever is left of the frame budget and
//! measures wall-clock dt. Virtual mode hands out a fixed dt and never
//! sleeps, for headless runs and tests.

use std::thread;
use std::time::{Duration, Instant};

use crate::consts::MAX_FRAME_DT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockMode {
    RealTime,
    Virtual,
}

/// Frame-rate figures, produced about once per second
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub fps: f32,
    pub dt: f32,
    pub ticks: u32,
}

#[derive(Debug)]
pub struct FrameClock {
    mode: ClockMode,
    budget: Duration,
    frame_start: Instant,
    /// dt for the frame about to run; zero before the first interval is known
    dt: f32,
    elapsed: f32,
    ticks: u32,
}

impl FrameClock {
    pub fn real_time(target_fps: u32) -> Self {
        Self::new(ClockMode::RealTime, target_fps)
    }

    pub fn virtual_time(target_fps: u32) -> Self {
        Self::new(ClockMode::Virtual, target_fps)
    }

    fn new(mode: ClockMode, target_fps: u32) -> Self {
        Self {
            mode,
            budget: Duration::from_secs_f64(1.0 / target_fps.max(1) as f64),
            frame_start: Instant::now(),
            dt: 0.0,
            elapsed: 0.0,
            ticks: 0,
        }
    }

    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Seconds to simulate in the coming frame
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Close the current frame: pace, measure the next dt, and report stats
    /// once a second has passed
    pub fn end_frame(&mut self) -> Option<FrameStats> {
        match self.mode {
            ClockMode::RealTime => {
                let work = self.frame_start.elapsed();
                if work < self.budget {
                    thread::sleep(self.budget - work);
                }
                let now = Instant::now();
                self.dt = now
                    .duration_since(self.frame_start)
                    .as_secs_f32()
                    .min(MAX_FRAME_DT);
                self.frame_start = now;
            }
            ClockMode::Virtual => {
                self.dt = self.budget.as_secs_f32();
            }
        }

        self.elapsed += self.dt;
        self.ticks += 1;
        if self.elapsed < 1.0 {
            return None;
        }

        let stats = FrameStats {
            fps: self.ticks as f32 / self.elapsed,
            dt: self.dt,
            ticks: self.ticks,
        };
        self.elapsed = 0.0;
        self.ticks = 0;
        Some(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_dt_is_zero() {
        assert_eq!(FrameClock::real_time(60).dt(), 0.0);
        assert_eq!(FrameClock::virtual_time(60).dt(), 0.0);
    }

    #[test]
    fn test_mode_and_budget() {
        let clock = FrameClock::real_time(50);
        assert_eq!(clock.mode(), ClockMode::RealTime);
        assert_eq!(clock.budget(), Duration::from_millis(20));

        let clock = FrameClock::virtual_time(0);
        assert_eq!(clock.mode(), ClockMode::Virtual);
        // Zero fps is treated as one frame per second
        assert_eq!(clock.budget(), Duration::from_secs(1));
    }

    #[test]
    fn test_virtual_clock_fixed_dt_and_stats() {
        let mut clock = FrameClock::virtual_time(50);
        let mut reports = Vec::new();
        for _ in 0..120 {
            if let Some(stats) = clock.end_frame() {
                reports.push(stats);
            }
        }
        assert!((clock.dt() - 0.02).abs() < 1e-6);
        assert_eq!(reports.len(), 2);
        assert!((reports[0].fps - 50.0).abs() < 1.0);
    }

    #[test]
    fn test_real_time_clock_paces_frames() {
        let mut clock = FrameClock::real_time(100);
        let start = Instant::now();
        for _ in 0..3 {
            clock.end_frame();
        }
        assert!(start.elapsed() >= Duration::from_millis(25));
        assert!(clock.dt() >= 0.009);
        assert!(clock.dt() <= MAX_FRAME_DT);
    }
}
