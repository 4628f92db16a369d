// SPDX-License-Identifier: GPL-3.0-only

//! Lifecycle handlers

use crate::app::state::{AppLifecycle, CameraScreen, Effect};
use std::time::Instant;
use tracing::{debug, info};

impl CameraScreen {
    pub(crate) fn handle_lifecycle_changed(
        &mut self,
        lifecycle: AppLifecycle,
        at: Instant,
    ) -> Effect {
        info!(from = ?self.lifecycle, to = ?lifecycle, "App lifecycle changed");
        self.lifecycle = lifecycle;
        self.cancel_press_if_inactive(at)
    }

    pub(crate) fn handle_focus_changed(&mut self, focused: bool, at: Instant) -> Effect {
        debug!(focused, "Camera screen focus changed");
        self.focused = focused;
        self.cancel_press_if_inactive(at)
    }

    /// Leaving the screen cancels the capture gesture, which ends the press
    fn cancel_press_if_inactive(&mut self, at: Instant) -> Effect {
        if self.is_active() || self.arbiter.open_session().is_none() {
            return Effect::None;
        }
        info!("Screen became inactive during a press, ending it");
        self.handle_capture_released(at)
    }
}
