// SPDX-License-Identifier: GPL-3.0-only

//! Capture session: one press of the capture button

use std::time::{Duration, Instant};

/// Identity of a capture session
///
/// Monotonically increasing per arbiter, so a deferred trigger scheduled for
/// an old press can never match a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub(crate) u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Transient state between press start and release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSession {
    pub id: SessionId,
    pub started_at: Instant,
    /// Continuous capture has been started for this press
    pub committed: bool,
    /// Press duration, set when the session closes
    pub elapsed: Duration,
}

impl CaptureSession {
    pub(crate) fn open(id: SessionId, started_at: Instant) -> Self {
        Self {
            id,
            started_at,
            committed: false,
            elapsed: Duration::ZERO,
        }
    }

    /// Time held as of `now` (zero if `now` precedes the press)
    pub fn held_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }
}
