// SPDX-License-Identifier: GPL-3.0-only

//! Capture mode arbiter
//!
//! Decides whether a press of the capture button is a photo or a video and
//! which toggles are interactive for the current device.
//!
//! # Press lifecycle
//!
//! ```text
//! press start ──► session open ──(threshold elapsed, same session)──► recording
//!      │                │                                                 │
//!      │          release < threshold                              release ≥ threshold
//!      │                ▼                                                 ▼
//!      │            snapshot                                            stop
//!      ▼
//!  HoldTimer { session, delay }  ← scheduled by the runtime, checked at fire time
//! ```
//!
//! The deferred trigger is never cancelled. Instead, when it fires the arbiter
//! compares the session id captured at schedule time with the open session,
//! so a release that happened first always wins regardless of how the timer
//! is scheduled.

pub mod display;
pub mod session;
pub mod zoom;

pub use display::{
    CapabilityGap, CaptureToggles, ControlAvailability, DisplayConfiguration, Presentation,
    compute_effective_frame_rate, compute_night_mode_toggle_availability, select_format,
    sort_formats,
};
pub use session::{CaptureSession, SessionId};
pub use zoom::{DragZoom, PinchZoom, ZoomBounds, clamp_zoom, interpolate};

use crate::constants::capture::HOLD_THRESHOLD;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Request the arbiter issues to the capture backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArbiterCommand {
    /// Single still image
    TakeSnapshot,
    /// Begin continuous capture
    StartContinuous,
    /// End continuous capture
    StopContinuous,
}

/// Deferred trigger the caller must schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldTimer {
    pub session: SessionId,
    pub delay: Duration,
}

/// Result of a press start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressStart {
    pub timer: HoldTimer,
    /// Stop request for a previous, still-recording session that this press replaced
    pub superseded: Option<ArbiterCommand>,
}

/// Press/hold/release classifier
///
/// Owns at most one [`CaptureSession`]. All methods take the time the event
/// was observed, so the arbiter itself never reads the clock.
#[derive(Debug)]
pub struct CaptureArbiter {
    threshold: Duration,
    session: Option<CaptureSession>,
    last_closed: Option<CaptureSession>,
    next_id: u64,
}

impl Default for CaptureArbiter {
    fn default() -> Self {
        Self::new(HOLD_THRESHOLD)
    }
}

impl CaptureArbiter {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            session: None,
            last_closed: None,
            next_id: 0,
        }
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// The open session, if the button is currently held
    pub fn open_session(&self) -> Option<&CaptureSession> {
        self.session.as_ref()
    }

    /// The most recently closed session
    pub fn last_session(&self) -> Option<&CaptureSession> {
        self.last_closed.as_ref()
    }

    /// Continuous capture is running for the open session
    pub fn is_recording(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.committed)
    }

    /// Open a new session
    ///
    /// The returned timer must be delivered back through
    /// [`CaptureArbiter::on_hold_elapsed`] after `delay`.
    pub fn on_press_start(&mut self, now: Instant) -> PressStart {
        let superseded = self.session.take().and_then(|previous| {
            warn!(session = %previous.id, "Press started while a session was open");
            let command = previous.committed.then_some(ArbiterCommand::StopContinuous);
            self.close(previous, now);
            command
        });

        self.next_id += 1;
        let id = SessionId(self.next_id);
        self.session = Some(CaptureSession::open(id, now));
        debug!(session = %id, "Capture session opened");

        PressStart {
            timer: HoldTimer {
                session: id,
                delay: self.threshold,
            },
            superseded,
        }
    }

    /// Deferred trigger fired
    ///
    /// Starts continuous capture only if `session` is still the open session,
    /// has not started yet, and has been held for at least the threshold.
    pub fn on_hold_elapsed(&mut self, session: SessionId, now: Instant) -> Option<ArbiterCommand> {
        let threshold = self.threshold;
        let Some(open) = self.session.as_mut() else {
            debug!(session = %session, "Hold trigger fired after release");
            return None;
        };
        if open.id != session {
            debug!(stale = %session, open = %open.id, "Ignoring stale hold trigger");
            return None;
        }
        if open.committed || open.held_for(now) < threshold {
            return None;
        }

        open.committed = true;
        info!(session = %open.id, "Hold threshold reached, starting continuous capture");
        Some(ArbiterCommand::StartContinuous)
    }

    /// Button released (or the gesture was cancelled)
    ///
    /// Returns `None` when no session is open, so a duplicate release never
    /// issues a second request. A release at or past the threshold whose
    /// trigger has not been delivered yet also issues nothing.
    pub fn on_press_end(&mut self, now: Instant) -> Option<ArbiterCommand> {
        let Some(session) = self.session.take() else {
            debug!("Release without open session");
            return None;
        };

        let held = session.held_for(now);
        let command = if held < self.threshold {
            if session.committed {
                // Only reachable if the trigger was delivered with a later
                // timestamp than this release; stop what was started.
                warn!(session = %session.id, ?held, "Release before threshold on a recording session");
                ArbiterCommand::StopContinuous
            } else {
                ArbiterCommand::TakeSnapshot
            }
        } else if session.committed {
            ArbiterCommand::StopContinuous
        } else {
            // Held long enough but the trigger has not been delivered yet. The
            // late trigger finds no session, so nothing is captured.
            debug!(session = %session.id, ?held, "Trigger pending at release, capturing nothing");
            info!(session = %session.id, ?held, "Capture session closed");
            self.close(session, now);
            return None;
        };

        info!(session = %session.id, ?held, ?command, "Capture session closed");
        self.close(session, now);
        Some(command)
    }

    /// Close `session` after a capture failure
    ///
    /// Does nothing unless `session` is the open session, so a late failure
    /// report never closes a newer press. The following release finds no
    /// session and issues nothing.
    pub fn abort_session(&mut self, session: SessionId, now: Instant, reason: &str) -> bool {
        match self.session.take() {
            Some(open) if open.id == session => {
                warn!(session = %open.id, reason, "Capture session aborted");
                self.close(open, now);
                true
            }
            open => {
                debug!(stale = %session, open = ?open.as_ref().map(|s| s.id), reason, "Failure for a session that is no longer open");
                self.session = open;
                false
            }
        }
    }

    fn close(&mut self, mut session: CaptureSession, now: Instant) {
        session.elapsed = session.held_for(now);
        self.last_closed = Some(session);
    }
}
