//! Simulated calendar time and throttling timers.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A span of simulated time, in whole milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimDuration(u64);

impl SimDuration {
    pub const ZERO: SimDuration = SimDuration(0);

    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Saturates at `u64::MAX` milliseconds.
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs.saturating_mul(1_000))
    }

    pub const fn from_hours(hours: u64) -> Self {
        Self(hours.saturating_mul(3_600_000))
    }

    /// Negative and NaN inputs clamp to zero.
    pub fn from_secs_f32(secs: f32) -> Self {
        if secs.is_nan() || secs <= 0.0 {
            return Self::ZERO;
        }
        Self((f64::from(secs) * 1_000.0).round() as u64)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    pub fn as_secs_f32(self) -> f32 {
        self.0 as f32 / 1_000.0
    }
}

/// An instant on the simulated calendar, in milliseconds since the world began.
///
/// Monotonic: the simulation only ever moves it forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimTime(u64);

impl SimTime {
    pub const START: SimTime = SimTime(0);

    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    pub fn after(self, span: SimDuration) -> Self {
        Self(self.0.saturating_add(span.0))
    }

    pub fn after_seconds(self, secs: f32) -> Self {
        self.after(SimDuration::from_secs_f32(secs))
    }

    /// Time elapsed since `earlier`; zero if `earlier` is in the future.
    pub fn since(self, earlier: SimTime) -> SimDuration {
        SimDuration(self.0.saturating_sub(earlier.0))
    }
}

/// Repeating countdown driven by per-tick `dt`.
///
/// `update` reports whether the period elapsed during this step; the overshoot
/// carries into the next period so long runs do not drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    period_seconds: f32,
    elapsed_seconds: f32,
    triggered: bool,
}

impl Timer {
    pub fn new(period_seconds: f32) -> Self {
        Self {
            period_seconds: period_seconds.max(0.0),
            elapsed_seconds: 0.0,
            triggered: false,
        }
    }

    pub fn period_seconds(&self) -> f32 {
        self.period_seconds
    }

    pub fn update(&mut self, dt_seconds: f32) -> bool {
        self.elapsed_seconds += dt_seconds.max(0.0);
        self.triggered = self.elapsed_seconds >= self.period_seconds;
        if self.triggered {
            self.elapsed_seconds -= self.period_seconds;
            if self.period_seconds <= 0.0 {
                self.elapsed_seconds = 0.0;
            }
        }
        self.triggered
    }

    /// Whether the most recent `update` fired.
    pub fn has_triggered(&self) -> bool {
        self.triggered
    }

    pub fn reset(&mut self) {
        self.elapsed_seconds = 0.0;
        self.triggered = false;
    }
}
