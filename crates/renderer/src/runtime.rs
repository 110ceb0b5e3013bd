use std::time::{Duration, Instant};

/// Slack allowed when comparing against the frame interval so a wake-up that
/// lands a hair early still renders.
const PACING_SLACK: Duration = Duration::from_micros(250);

/// Snapshot of the clock handed to the live sketch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSample {
    /// Seconds elapsed since the sketch was instantiated.
    pub seconds: f32,
    /// Monotonic frame counter for the running sketch.
    pub frame_index: u64,
}

impl TimeSample {
    /// Creates a new time sample.
    pub fn new(seconds: f32, frame_index: u64) -> Self {
        Self {
            seconds,
            frame_index,
        }
    }
}

/// Abstraction over where time values originate from.
pub trait TimeSource {
    /// Restarts the clock, typically when a new sketch is instantiated.
    fn reset(&mut self, now: Instant);
    /// Produces a time sample for the frame drawn at `now`.
    fn sample(&mut self, now: Instant) -> TimeSample;
}

/// Time source backed by the system monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemTimeSource {
    origin: Instant,
    frame: u64,
}

impl SystemTimeSource {
    /// Creates a system time source starting at `origin`.
    pub fn new(origin: Instant) -> Self {
        Self { origin, frame: 0 }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl TimeSource for SystemTimeSource {
    fn reset(&mut self, now: Instant) {
        self.origin = now;
        self.frame = 0;
    }

    fn sample(&mut self, now: Instant) -> TimeSample {
        let elapsed = now.saturating_duration_since(self.origin);
        let sample = TimeSample::new(elapsed.as_secs_f32(), self.frame);
        self.frame = self.frame.saturating_add(1);
        sample
    }
}

/// Decides when the next frame may be drawn.
///
/// Without a cap every wake-up renders and pacing is left to the surface's
/// vsync. With a cap, frames are spaced at least `1 / fps` apart and
/// [`FramePacer::next_deadline`] tells the event loop how long to sleep.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Option<Duration>,
    last_frame: Option<Instant>,
}

impl FramePacer {
    /// A cap of `None`, zero or a non-finite value disables pacing, as does a
    /// cap so small its interval cannot be represented.
    pub fn new(target_fps: Option<f32>) -> Self {
        let interval = target_fps
            .filter(|fps| fps.is_finite() && *fps > 0.0)
            .and_then(|fps| Duration::try_from_secs_f32(1.0 / fps).ok());
        Self {
            interval,
            last_frame: None,
        }
    }

    /// Interval between frames when a cap is active.
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Returns true when enough time has passed since the last frame.
    pub fn ready_for_frame(&self, now: Instant) -> bool {
        match (self.interval, self.last_frame) {
            (Some(interval), Some(last)) => {
                now.saturating_duration_since(last) + PACING_SLACK >= interval
            }
            _ => true,
        }
    }

    /// Records that a frame was presented at `now`.
    pub fn mark_rendered(&mut self, now: Instant) {
        self.last_frame = Some(now);
    }

    /// Earliest instant the next capped frame is due, if pacing is active.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.interval, self.last_frame) {
            (Some(interval), Some(last)) => last.checked_add(interval),
            _ => None,
        }
    }

    /// Forgets the last frame so the next wake-up renders immediately.
    pub fn reset(&mut self) {
        self.last_frame = None;
    }
}
