//! Frame loop: one update and one render per tick.
//!
//! Ticks come from a [`FrameSource`]; the loop ends as soon as the source
//! returns `None`, which keeps the loop testable without a real clock.

use std::thread;
use std::time::{Duration, Instant};

use orrery_core::Surface;

use crate::state::SceneState;

/// One frame handed out by a [`FrameSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Zero-based frame number.
    pub index: u64,
    /// Time since the first frame.
    pub elapsed: Duration,
}

/// Supplies frames to the loop until it decides to stop.
pub trait FrameSource {
    /// The next frame, or `None` to stop the loop.
    fn next_frame(&mut self) -> Option<Tick>;
}

/// A fixed number of frames at a nominal rate, handed out immediately.
#[derive(Debug, Clone)]
pub struct FixedFrames {
    total: u64,
    interval: Duration,
    index: u64,
}

impl FixedFrames {
    pub fn new(total: u64, fps: u32) -> Self {
        Self {
            total,
            interval: frame_interval(fps),
            index: 0,
        }
    }
}

impl FrameSource for FixedFrames {
    fn next_frame(&mut self) -> Option<Tick> {
        if self.index >= self.total {
            return None;
        }
        let tick = Tick {
            index: self.index,
            elapsed: self
                .interval
                .saturating_mul(u32::try_from(self.index).unwrap_or(u32::MAX)),
        };
        self.index += 1;
        Some(tick)
    }
}

/// Wall-clock paced frames at a target rate, until stopped.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    start: Instant,
    next_due: Instant,
    index: u64,
    stopped: bool,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        let now = Instant::now();
        Self {
            interval: frame_interval(fps),
            start: now,
            next_due: now,
            index: 0,
            stopped: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Make every later `next_frame` return `None`.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Time left before the next frame is due.
    pub fn time_until_next(&self) -> Duration {
        self.next_due.saturating_duration_since(Instant::now())
    }
}

impl FrameSource for FrameClock {
    fn next_frame(&mut self) -> Option<Tick> {
        if self.stopped {
            return None;
        }
        let wait = self.time_until_next();
        if !wait.is_zero() {
            thread::sleep(wait);
        }
        let now = Instant::now();
        // Skip missed frames instead of bursting to catch up.
        self.next_due = (self.next_due + self.interval).max(now);
        let tick = Tick {
            index: self.index,
            elapsed: now - self.start,
        };
        self.index += 1;
        Some(tick)
    }
}

fn frame_interval(fps: u32) -> Duration {
    Duration::from_secs(1) / fps.max(1)
}

/// Follow the surface size, advance the scene, then draw it.
pub fn step<S: Surface>(state: &mut SceneState, surface: &mut S) {
    state.sync_bounds(surface.bounds());
    state.tick();
    state.render(surface);
}

/// Run frames until `frames` runs dry. Returns the number of frames drawn.
pub fn run<S: Surface, F: FrameSource>(
    state: &mut SceneState,
    surface: &mut S,
    frames: &mut F,
) -> u64 {
    let mut drawn = 0;
    while frames.next_frame().is_some() {
        step(state, surface);
        drawn += 1;
    }
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_frames_count_and_timing() {
        let mut frames = FixedFrames::new(3, 10);
        let ticks: Vec<_> = std::iter::from_fn(|| frames.next_frame()).collect();
        assert_eq!(ticks.len(), 3);
        assert_eq!(ticks[2].index, 2);
        assert_eq!(ticks[2].elapsed, Duration::from_millis(200));
        assert_eq!(frames.next_frame(), None);
    }

    #[test]
    fn elapsed_saturates_instead_of_wrapping() {
        let mut frames = FixedFrames::new(u64::MAX, 1);
        frames.index = u64::from(u32::MAX) + 5;
        let tick = frames.next_frame().unwrap();
        assert_eq!(tick.elapsed, Duration::from_secs(u64::from(u32::MAX)));
        assert!(tick.elapsed > Duration::from_secs(5));
    }

    #[test]
    fn zero_fps_is_treated_as_one() {
        assert_eq!(frame_interval(0), Duration::from_secs(1));
    }

    #[test]
    fn stopped_clock_yields_nothing() {
        let mut clock = FrameClock::new(1000);
        assert_eq!(clock.next_frame().map(|t| t.index), Some(0));
        assert_eq!(clock.next_frame().map(|t| t.index), Some(1));
        clock.stop();
        assert!(clock.is_stopped());
        assert_eq!(clock.next_frame(), None);
    }

    #[test]
    fn clock_paces_frames() {
        let start = Instant::now();
        let mut clock = FrameClock::new(100);
        for _ in 0..4 {
            clock.next_frame();
        }
        // The first frame is immediate, the next three wait one interval each.
        assert!(start.elapsed() >= clock.interval() * 3);
    }
}
