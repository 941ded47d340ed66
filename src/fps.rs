use std::time::{Duration, Instant};

/// Seconds of frames averaged before the counter restarts
const REFRESH_INTERVAL: f64 = 0.2;

#[allow(clippy::upper_case_acronyms)]
pub struct FPS {
    previous_time: Instant,
    frames: usize,
    fps: f64,
}

impl FPS {
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            frames: 0,
            fps: f64::NAN,
        }
    }

    /// Count a frame, sleep if it came in faster than `limit_fps`
    /// allows, and return the current fps.
    pub fn update_and_get(&mut self, limit_fps: Option<f64>) -> f64 {
        self.frames += 1;

        if let Some(limit_fps) = limit_fps {
            if let Some(wait_time) =
                limiter_wait_time(self.frames, limit_fps, self.previous_time.elapsed())
            {
                std::thread::sleep(wait_time);
            }
        }

        let current = Instant::now();
        let time_diff = (current - self.previous_time).as_secs_f64();

        self.fps = self.frames as f64 / time_diff;

        if time_diff > REFRESH_INTERVAL {
            self.previous_time = current;
            self.frames = 0;
        }

        self.fps
    }

    /// Get the cached fps
    pub fn get_last_processed(&self) -> f64 {
        self.fps
    }
}

impl Default for FPS {
    fn default() -> Self {
        Self::new()
    }
}

/// Time left to wait so that `frames` frames take at least
/// `frames / limit_fps` seconds, `None` if already behind.
pub fn limiter_wait_time(frames: usize, limit_fps: f64, elapsed: Duration) -> Option<Duration> {
    let expected_time = frames as f64 / limit_fps;
    let wait_time = expected_time - elapsed.as_secs_f64();
    if wait_time.is_finite() && wait_time > 0.0 {
        Some(Duration::from_secs_f64(wait_time))
    } else {
        None
    }
}
