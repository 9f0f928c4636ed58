//! # Request-Time Skew Policy
//!
//! Decides whether a caller-claimed request time is close enough to the local
//! clock. The window is symmetric: a request stamped too far in the future is
//! rejected exactly like one stamped too far in the past.
//!
//! Valid range: `now - window <= request_time <= now + window`

use crate::ports::outbound::Clock;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use std::time::Duration;

/// Default allowed skew between any RPC request time and the server clock.
pub const DEFAULT_SKEW_WINDOW: Duration = Duration::from_secs(3);

/// Symmetric two-sided window around the local clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkewPolicy {
    window: TimeDelta,
}

impl SkewPolicy {
    /// Creates a policy with the given window.
    ///
    /// Windows too large for `chrono` saturate to the largest representable
    /// delta, which accepts every request time.
    pub fn new(window: Duration) -> Self {
        let window = TimeDelta::from_std(window).unwrap_or(TimeDelta::MAX);
        Self { window }
    }

    /// The configured window.
    pub fn window(&self) -> TimeDelta {
        self.window
    }

    /// Checks `request_time` against the current time read from `clock`.
    pub fn is_request_time_allowed<Tz, C>(&self, request_time: &DateTime<Tz>, clock: &C) -> bool
    where
        Tz: TimeZone,
        C: Clock + ?Sized,
    {
        self.is_allowed_at(request_time, clock.now_utc())
    }

    /// Pure form of [`Self::is_request_time_allowed`] with an explicit `now`.
    ///
    /// The boundary is inclusive: a delta exactly equal to the window passes.
    pub fn is_allowed_at<Tz: TimeZone>(&self, request_time: &DateTime<Tz>, now: DateTime<Utc>) -> bool {
        let request_time = request_time.with_timezone(&Utc);
        let ahead = request_time.signed_duration_since(now);
        let behind = now.signed_duration_since(request_time);
        !(ahead > self.window || behind > self.window)
    }
}

impl Default for SkewPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_SKEW_WINDOW)
    }
}
