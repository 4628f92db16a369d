// SPDX-License-Identifier: GPL-3.0-only

//! Capture operations handlers
//!
//! Handles the capture button press lifecycle, photo capture, video recording
//! and zoom gestures.

use crate::app::state::{CameraScreen, Effect, Message, MediaViewer, Notice};
use crate::arbiter::{ArbiterCommand, DragZoom, PinchZoom, SessionId};
use crate::backends::camera::{BackendResult, MediaDescriptor, RecordingOptions, SnapshotOptions};
use crate::constants::capture::{PRESS_ANIMATION_RESET, SNAPSHOT_QUALITY};
use crate::errors::CaptureError;
use crate::navigation::Route;
use std::time::Instant;
use tracing::{debug, error, info, warn};

impl CameraScreen {
    // =========================================================================
    // Press Lifecycle Handlers
    // =========================================================================

    pub(crate) fn handle_capture_pressed(&mut self, at: Instant) -> Effect {
        if !self.capture_enabled() {
            debug!(
                initialized = self.camera_initialized,
                active = self.is_active(),
                "Capture button disabled, ignoring press"
            );
            return Effect::None;
        }

        self.is_pressing_button = true;
        let press = self.arbiter.on_press_start(at);
        if let Some(command) = press.superseded {
            self.execute(command, at);
        }

        Effect::Delay {
            after: press.timer.delay,
            message: Message::HoldThresholdElapsed {
                session: press.timer.session,
                at: at + press.timer.delay,
            },
        }
    }

    pub(crate) fn handle_hold_elapsed(&mut self, session: SessionId, at: Instant) -> Effect {
        if let Some(command) = self.arbiter.on_hold_elapsed(session, at) {
            self.execute(command, at);
        }
        Effect::None
    }

    pub(crate) fn handle_capture_released(&mut self, at: Instant) -> Effect {
        self.drag = None;
        if let Some(command) = self.arbiter.on_press_end(at) {
            self.execute(command, at);
        }

        if !self.is_pressing_button {
            return Effect::None;
        }
        Effect::Delay {
            after: PRESS_ANIMATION_RESET,
            message: Message::PressAnimationFinished,
        }
    }

    pub(crate) fn handle_press_animation_finished(&mut self) -> Effect {
        self.is_pressing_button = false;
        Effect::None
    }

    // =========================================================================
    // Capture Backend Requests
    // =========================================================================

    fn execute(&mut self, command: ArbiterCommand, at: Instant) {
        debug!(?command, "Executing capture command");
        match command {
            ArbiterCommand::TakeSnapshot => self.take_snapshot(),
            ArbiterCommand::StartContinuous => self.start_recording(at),
            ArbiterCommand::StopContinuous => self.stop_recording(),
        }
    }

    fn take_snapshot(&mut self) {
        let Some(active) = self.display() else {
            warn!("No active camera, cannot take photo");
            return;
        };
        let options = SnapshotOptions {
            flash: active.flash,
            quality: SNAPSHOT_QUALITY,
            skip_metadata: true,
        };

        info!(flash = ?options.flash, "Taking photo...");
        let result = self.collaborators.capture.take_snapshot(&options);
        self.handle_snapshot_finished(result);
    }

    fn start_recording(&mut self, at: Instant) {
        let Some(session) = self.arbiter.open_session().map(|s| s.id) else {
            warn!("No open session, not recording");
            return;
        };
        let Some(active) = self.display() else {
            warn!("No active camera, cannot record");
            self.arbiter.abort_session(session, at, "no active camera");
            return;
        };
        let options = RecordingOptions {
            flash: active.flash,
            audio: self.audio_enabled(),
            fps: active.frame_rate,
        };

        let events = self.events.clone();
        let on_finished = Box::new(move |result: BackendResult<MediaDescriptor>| {
            let finished = Message::RecordingFinished {
                session,
                at: Instant::now(),
                result,
            };
            if events.send(finished).is_err() {
                warn!("Recording finished after the screen was dropped");
            }
        });

        info!(%session, fps = options.fps, audio = options.audio, flash = ?options.flash, "Starting recording");
        if let Err(e) = self
            .collaborators
            .capture
            .start_continuous_capture(&options, on_finished)
        {
            let err = CaptureError::StartFailed(e.to_string());
            error!(error = %err, "Failed to start recording");
            self.notice = Some(Notice::new("Failed to start recording", err.to_string()));
            self.arbiter.abort_session(session, at, "start failed");
        }
    }

    fn stop_recording(&mut self) {
        if !self.collaborators.capture.is_recording() {
            debug!("Backend is not recording, nothing to stop");
            return;
        }
        info!("Stopping recording");
        if let Err(e) = self.collaborators.capture.stop_continuous_capture() {
            let err = CaptureError::StopFailed(e.to_string());
            error!(error = %err, "Failed to stop recording");
            self.notice = Some(Notice::new("Failed to stop recording", err.to_string()));
        }
    }

    // =========================================================================
    // Capture Results
    // =========================================================================

    pub(crate) fn handle_snapshot_finished(
        &mut self,
        result: BackendResult<MediaDescriptor>,
    ) -> Effect {
        match result {
            Ok(media) => {
                info!(path = %media.path.display(), "Photo captured");
                self.show_media(media);
            }
            Err(e) => {
                let err = CaptureError::SnapshotFailed(e.to_string());
                error!(error = %err, "Failed to take photo");
                self.notice = Some(Notice::new("Failed to take photo", err.to_string()));
            }
        }
        Effect::None
    }

    /// Completion of the recording started for `session`
    ///
    /// A failure only closes `session` itself. If the user has pressed again
    /// since, the newer press keeps its session and its release still stops.
    pub(crate) fn handle_recording_finished(
        &mut self,
        session: SessionId,
        at: Instant,
        result: BackendResult<MediaDescriptor>,
    ) -> Effect {
        match result {
            Ok(media) => {
                info!(
                    %session,
                    path = %media.path.display(),
                    duration = ?media.duration_secs,
                    "Recording finished"
                );
                self.show_media(media);
            }
            Err(e) => {
                let err = CaptureError::RecordingFailed(e.to_string());
                error!(%session, error = %err, "Recording failed");
                self.notice = Some(Notice::new("Recording failed", err.to_string()));
                self.arbiter.abort_session(session, at, "recording failed");
            }
        }
        Effect::None
    }

    fn show_media(&mut self, media: MediaDescriptor) {
        let route = Route::Media {
            path: media.path.clone(),
            kind: media.kind,
        };
        self.media = Some(MediaViewer::new(media));
        self.collaborators.navigator.navigate(route);
    }

    // =========================================================================
    // Zoom Gestures
    // =========================================================================

    pub(crate) fn handle_pinch_began(&mut self) -> Effect {
        if self.display().is_none() {
            return Effect::None;
        }
        self.pinch = Some(PinchZoom::begin(self.zoom));
        Effect::None
    }

    pub(crate) fn handle_pinch_changed(&mut self, scale: f64) -> Effect {
        let (Some(pinch), Some(bounds)) = (self.pinch, self.display().map(|d| d.zoom)) else {
            return Effect::None;
        };
        match pinch.update(scale, &bounds) {
            Ok(zoom) => self.zoom = zoom,
            Err(e) => warn!(scale, error = %e, "Pinch zoom rejected"),
        }
        Effect::None
    }

    pub(crate) fn handle_drag_began(&mut self, start_y: f64) -> Effect {
        let Some(bounds) = self.display().map(|d| d.zoom) else {
            return Effect::None;
        };
        self.drag = Some(DragZoom::begin(start_y, self.zoom, &bounds));
        Effect::None
    }

    pub(crate) fn handle_drag_changed(&mut self, absolute_y: f64) -> Effect {
        let (Some(drag), Some(bounds)) = (self.drag, self.display().map(|d| d.zoom)) else {
            return Effect::None;
        };
        match drag.update(absolute_y, &bounds) {
            Ok(zoom) => self.zoom = zoom,
            Err(e) => warn!(absolute_y, error = %e, "Drag zoom rejected"),
        }
        Effect::None
    }
}
