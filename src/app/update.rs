// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! `update()` is a dispatcher; the handling code lives in the `handlers`
//! submodules:
//!
//! - `handlers::camera`: device list, initialization, errors, flipping
//! - `handlers::format`: frame rate, HDR, night mode and flash toggles
//! - `handlers::capture`: press lifecycle, photo, video, zoom gestures
//! - `handlers::media`: permissions, media screen, saving
//! - `handlers::system`: app lifecycle and focus

use crate::app::state::{CameraScreen, Effect, Message};
use tracing::debug;

impl CameraScreen {
    /// Main message handler - routes messages to handler methods
    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            // ===== Lifecycle =====
            Message::LifecycleChanged(lifecycle, at) => {
                self.handle_lifecycle_changed(lifecycle, at)
            }
            Message::FocusChanged(focused, at) => self.handle_focus_changed(focused, at),

            // ===== Camera =====
            Message::DevicesChanged => self.handle_devices_changed(),
            Message::CameraInitialized => self.handle_camera_initialized(),
            Message::CameraError(message) => self.handle_camera_error(message),

            // ===== Toggles =====
            Message::Toggle60Fps => self.handle_toggle_60fps(),
            Message::ToggleHdr => self.handle_toggle_hdr(),
            Message::ToggleNightMode => self.handle_toggle_night_mode(),
            Message::ToggleFlash => self.handle_toggle_flash(),
            Message::FlipCamera | Message::DoubleTap => self.handle_flip_camera(),

            // ===== Zoom =====
            Message::PinchBegan => self.handle_pinch_began(),
            Message::PinchChanged(scale) => self.handle_pinch_changed(scale),
            Message::DragBegan(y) => self.handle_drag_began(y),
            Message::DragChanged(y) => self.handle_drag_changed(y),

            // ===== Capture =====
            Message::CapturePressed(at) => self.handle_capture_pressed(at),
            Message::CaptureReleased(at) => self.handle_capture_released(at),
            Message::HoldThresholdElapsed { session, at } => self.handle_hold_elapsed(session, at),
            Message::SnapshotFinished(result) => self.handle_snapshot_finished(result),
            Message::RecordingFinished {
                session,
                at,
                result,
            } => self.handle_recording_finished(session, at, result),
            Message::PressAnimationFinished => self.handle_press_animation_finished(),

            // ===== Permissions =====
            Message::RequestPermission(kind) => self.handle_request_permission(kind),

            // ===== Media =====
            Message::MediaLoaded => self.handle_media_loaded(),
            Message::SaveMedia => self.handle_save_media(),
            Message::MediaSaved(result) => self.handle_media_saved(result),
            Message::NavigateBack => self.handle_navigate_back(),

            Message::Quit => {
                debug!("Quit requested");
                Effect::None
            }
        }
    }
}
