//! Frame pacing for the single-threaded loop.
//!
//! One redraw is one frame: the loop renders, updates, then waits until
//! `next_deadline()` before asking the window for the next redraw. Transitions
//! and strand animations advance by a fixed amount per frame, so holding the
//! rate keeps their speed stable.

use std::time::{Duration, Instant};

const FPS_SAMPLE_COUNT: usize = 60;

pub struct FrameClock {
    pub target_dt: Duration,
    /// Longer gaps (window drag, modal file dialog) are reported as this much.
    pub max_dt: Duration,
    pub frame_count: u64,
    pub real_dt: Duration,
    last_instant: Instant,
    next_deadline: Instant,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        let fps = fps.max(1);
        let target_dt = Duration::from_secs_f64(1.0 / fps as f64);
        let now = Instant::now();
        Self {
            target_dt,
            max_dt: Duration::from_millis(250),
            frame_count: 0,
            real_dt: Duration::ZERO,
            last_instant: now,
            next_deadline: now,
            fps_samples: [target_dt.as_secs_f64(); FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: fps as f64,
            smoothed_frame_time_ms: target_dt.as_secs_f64() * 1000.0,
        }
    }

    pub fn begin_frame(&mut self) -> Duration {
        self.begin_frame_at(Instant::now())
    }

    /// Measure the wall-clock delta since the previous frame and schedule the
    /// next deadline. Returns the (capped) delta.
    pub fn begin_frame_at(&mut self, now: Instant) -> Duration {
        self.real_dt = now.saturating_duration_since(self.last_instant);
        self.last_instant = now;

        if self.real_dt > self.max_dt {
            log::warn!(
                "Frame took {:.1}ms, reporting {}ms",
                self.real_dt.as_secs_f64() * 1000.0,
                self.max_dt.as_millis()
            );
            self.real_dt = self.max_dt;
        }

        self.frame_count += 1;

        // Keep a steady cadence, but never schedule into the past.
        self.next_deadline += self.target_dt;
        if self.next_deadline < now {
            self.next_deadline = now + self.target_dt;
        }

        self.fps_samples[self.fps_sample_index] = self.real_dt.as_secs_f64();
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };

        self.real_dt
    }

    pub fn next_deadline(&self) -> Instant {
        self.next_deadline
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_deadline
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(60)
    }
}
