//! Frame-rate smoothing for the render loop.

use web_time::{Duration, Instant};

/// Smoothed frame-rate measurement for the render loop.
pub struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
    /// Frames measured so far
    frames: u64,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Start timing from now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            smoothed_fps: 0.0,
            smoothing: 0.05, // 5% new value, 95% old value
            frames: 0,
        }
    }

    /// Expected frame rate for a fixed per-frame delay, ignoring render time.
    #[must_use]
    pub fn nominal_fps(delay: Duration) -> Option<f32> {
        let secs = delay.as_secs_f32();
        (secs > 0.0).then(|| 1.0 / secs)
    }

    /// Call once after each presented frame.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.record(elapsed);
    }

    /// Fold one frame duration into the average.
    pub fn record(&mut self, elapsed: Duration) {
        self.frames += 1;
        let frame_time = elapsed.as_secs_f32();
        if frame_time <= 0.0 {
            return;
        }
        let instant_fps = 1.0 / frame_time;
        // The first sample seeds the average instead of blending with zero.
        self.smoothed_fps = if self.smoothed_fps == 0.0 {
            instant_fps
        } else {
            self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing
        };
    }

    /// Current smoothed FPS (0 before the first frame).
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Frames measured so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_seeds_average() {
        let mut timing = FrameTiming::new();
        timing.record(Duration::from_millis(50));
        assert!((timing.fps() - 20.0).abs() < 1e-3);
        assert_eq!(timing.frames(), 1);
    }

    #[test]
    fn average_moves_slowly_toward_new_rate() {
        let mut timing = FrameTiming::new();
        timing.record(Duration::from_millis(50));
        timing.record(Duration::from_millis(10));
        let fps = timing.fps();
        assert!(fps > 20.0 && fps < 30.0, "fps {fps}");
    }

    #[test]
    fn zero_duration_counts_frame_without_changing_rate() {
        let mut timing = FrameTiming::new();
        timing.record(Duration::ZERO);
        assert_eq!(timing.fps(), 0.0);
        assert_eq!(timing.frames(), 1);
    }

    #[test]
    fn nominal_rate_from_delay() {
        let fps = FrameTiming::nominal_fps(Duration::from_millis(50)).unwrap();
        assert!((fps - 20.0).abs() < 1e-3);
        assert_eq!(FrameTiming::nominal_fps(Duration::ZERO), None);
    }
}
