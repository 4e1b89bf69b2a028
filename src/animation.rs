//! Timer-driven playback of the bubble chart across all years.
//!
//! The driver owns the whole animation state: the frame list, the cursor and
//! the deadline of the pending frame. Callers poll it with the current instant
//! from their event loop (GUI repaint, CLI sleep loop). Stopping clears the
//! pending deadline in the same call, so no frame can fire afterwards.

use log::debug;
use std::time::{Duration, Instant};

pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    Running,
    /// Stopped by request before the last frame.
    Stopped,
}

/// Receives each frame: the year selector is updated first, then the chart is redrawn.
pub trait FrameSink {
    fn select_year(&mut self, year: i32);
    fn render_year(&mut self, year: i32);

    /// Checked after every frame; returning `false` stops playback.
    fn keep_running(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone)]
pub struct AnimationDriver {
    state: AnimationState,
    years: Vec<i32>,
    frame: usize,
    delay: Duration,
    next_due: Option<Instant>,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_DELAY)
    }
}

impl AnimationDriver {
    pub fn new(delay: Duration) -> Self {
        Self {
            state: AnimationState::Idle,
            years: Vec::new(),
            frame: 0,
            delay,
            next_due: None,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimationState::Running
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Index of the next frame to render.
    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Start (or restart) playback over `years`, sorted and deduplicated.
    /// The first frame is due immediately. An empty year list leaves the driver idle.
    pub fn start(&mut self, years: impl IntoIterator<Item = i32>, now: Instant) {
        let mut years: Vec<i32> = years.into_iter().collect();
        years.sort_unstable();
        years.dedup();
        self.years = years;
        self.frame = 0;
        if self.years.is_empty() {
            self.state = AnimationState::Idle;
            self.next_due = None;
        } else {
            self.state = AnimationState::Running;
            self.next_due = Some(now);
        }
        debug!("animation {:?} over {} years", self.state, self.years.len());
    }

    /// Cancel the pending frame. No-op unless running.
    pub fn stop(&mut self) {
        if self.state == AnimationState::Running {
            self.state = AnimationState::Stopped;
            debug!("animation stopped before frame {}", self.frame);
        }
        self.next_due = None;
    }

    /// Time left until the pending frame, `None` when nothing is scheduled.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    /// Advance if a frame is due at `now`, returning its year.
    ///
    /// After the last frame the driver returns to [`AnimationState::Idle`].
    pub fn poll(&mut self, now: Instant) -> Option<i32> {
        if self.state != AnimationState::Running {
            return None;
        }
        let due = self.next_due?;
        if now < due {
            return None;
        }
        let year = *self.years.get(self.frame)?;
        self.frame += 1;
        if self.frame >= self.years.len() {
            self.state = AnimationState::Idle;
            self.next_due = None;
            debug!("animation finished");
        } else {
            self.next_due = Some(now + self.delay);
        }
        Some(year)
    }

    /// [`poll`](Self::poll) and hand a due frame to `sink`.
    ///
    /// Stops the animation when the sink no longer wants frames.
    pub fn poll_with<S: FrameSink + ?Sized>(&mut self, now: Instant, sink: &mut S) -> Option<i32> {
        let year = self.poll(now)?;
        sink.select_year(year);
        sink.render_year(year);
        if !sink.keep_running() {
            self.stop();
        }
        Some(year)
    }

    /// Play every remaining frame on the current thread, sleeping between frames.
    pub fn run_blocking<S: FrameSink + ?Sized>(&mut self, sink: &mut S) {
        while self.is_running() {
            let now = Instant::now();
            if self.poll_with(now, sink).is_none()
                && let Some(wait) = self.time_until_next(now)
            {
                std::thread::sleep(wait);
            }
        }
    }
}
