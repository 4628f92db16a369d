// SPDX-License-Identifier: GPL-3.0-only

//! Capture toggle handlers
//!
//! Frame rate, HDR, night mode and flash. A toggle whose control is not
//! interactive for the current device is ignored. Availability comes from the
//! device rather than the active presentation, so a toggle that leaves the
//! device without a matching format can be undone.

use crate::app::state::{CameraScreen, Effect};
use crate::arbiter::ControlAvailability;
use tracing::{debug, info, warn};

impl CameraScreen {
    fn controls(&self) -> Option<ControlAvailability> {
        ControlAvailability::derive(&self.devices, &self.toggles)
    }

    pub(crate) fn handle_toggle_60fps(&mut self) -> Effect {
        if !self.controls().is_some_and(|c| c.frame_rate_switch) {
            debug!("Frame rate switch unavailable");
            return Effect::None;
        }
        self.toggles.prefer_60fps = !self.toggles.prefer_60fps;
        info!(prefer_60fps = self.toggles.prefer_60fps, "Frame rate preference changed");
        self.apply_toggle_change()
    }

    pub(crate) fn handle_toggle_hdr(&mut self) -> Effect {
        if !self.controls().is_some_and(|c| c.hdr_switch) {
            debug!("HDR switch unavailable");
            return Effect::None;
        }
        self.toggles.hdr_enabled = !self.toggles.hdr_enabled;
        info!(hdr = self.toggles.hdr_enabled, "HDR toggled");
        self.apply_toggle_change()
    }

    pub(crate) fn handle_toggle_night_mode(&mut self) -> Effect {
        if !self.controls().is_some_and(|c| c.night_mode_switch) {
            debug!("Night mode switch unavailable");
            return Effect::None;
        }
        self.toggles.night_mode_enabled = !self.toggles.night_mode_enabled;
        info!(night_mode = self.toggles.night_mode_enabled, "Night mode toggled");
        self.apply_toggle_change()
    }

    pub(crate) fn handle_toggle_flash(&mut self) -> Effect {
        if !self.controls().is_some_and(|c| c.flash) {
            debug!("Device has no flash");
            return Effect::None;
        }
        self.toggles.flash = self.toggles.flash.toggled();
        info!(flash = ?self.toggles.flash, "Flash toggled");
        self.apply_toggle_change()
    }

    fn apply_toggle_change(&mut self) -> Effect {
        self.recompute_presentation();
        match self.display() {
            Some(active) => {
                debug!(fps = active.frame_rate, hdr = active.hdr, format = %active.format, "Toggles applied")
            }
            None => warn!(presentation = ?self.presentation, "Toggles leave no active capture"),
        }
        self.persist_toggles();
        Effect::None
    }

    /// Save current toggles when a config path is set
    pub(crate) fn persist_toggles(&mut self) {
        self.config.apply_toggles(&self.toggles);
        let Some(path) = &self.config_path else {
            return;
        };
        if let Err(e) = self.config.save_to(path) {
            warn!(path = %path.display(), error = %e, "Failed to save config");
        }
    }
}
