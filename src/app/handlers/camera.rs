// SPDX-License-Identifier: GPL-3.0-only

//! Camera device handlers
//!
//! Handles device list changes, camera initialization and errors, and
//! switching between front and back cameras.

use crate::app::state::{CameraScreen, Effect, Notice};
use crate::arbiter::{DisplayConfiguration, Presentation};
use crate::errors::CameraError;
use tracing::{debug, error, info, warn};

impl CameraScreen {
    // =========================================================================
    // Device Handlers
    // =========================================================================

    /// Re-read devices from the provider and reselect the current position
    pub(crate) fn refresh_devices(&mut self) {
        self.devices = self.collaborators.devices.list_devices();
        info!(
            front = self.devices.front.is_some(),
            back = self.devices.back.is_some(),
            "Device list refreshed"
        );

        if self.devices.get(self.toggles.position).is_some() {
            if let Err(e) = self
                .collaborators
                .devices
                .select_device(self.toggles.position)
            {
                warn!(position = %self.toggles.position, error = %e, "Failed to select device");
            }
        } else {
            debug!(position = %self.toggles.position, "No device at selected position");
        }

        self.recompute_presentation();
    }

    /// Derive the presentation from the current devices and toggles
    ///
    /// Zoom resets to neutral when the active device changes and is kept
    /// inside the new device's bounds otherwise.
    pub(crate) fn recompute_presentation(&mut self) {
        let previous_device = self.display().map(|d| d.device_id.clone());
        self.presentation = DisplayConfiguration::derive_with_zoom_cap(
            &self.devices,
            &self.toggles,
            self.config.max_zoom_cap,
        );

        let Presentation::Active(active) = &self.presentation else {
            debug!(presentation = ?self.presentation, "No active capture");
            return;
        };

        if previous_device.as_deref() != Some(active.device_id.as_str()) {
            debug!(device = %active.device_id, neutral = active.zoom.neutral, "Device changed, resetting zoom");
            self.zoom = active.zoom.neutral;
        } else {
            match active.zoom.clamp(self.zoom) {
                Ok(zoom) => self.zoom = zoom,
                Err(e) => warn!(error = %e, "Failed to clamp zoom to new bounds"),
            }
        }
    }

    pub(crate) fn handle_devices_changed(&mut self) -> Effect {
        self.refresh_devices();
        Effect::None
    }

    pub(crate) fn handle_camera_initialized(&mut self) -> Effect {
        info!("Camera initialized");
        self.camera_initialized = true;
        Effect::None
    }

    /// Native camera runtime error: log and tell the user
    pub(crate) fn handle_camera_error(&mut self, message: String) -> Effect {
        let err = CameraError::Runtime(message);
        error!(error = %err, "Camera error");
        self.notice = Some(Notice::new("Camera error", err.to_string()));
        Effect::None
    }

    /// Switch between front and back cameras
    pub(crate) fn handle_flip_camera(&mut self) -> Effect {
        if !self.devices.supports_flipping() {
            debug!("Only one camera available, ignoring flip");
            return Effect::None;
        }
        if self.arbiter.open_session().is_some() {
            debug!("Capture in progress, ignoring flip");
            return Effect::None;
        }

        let position = self.toggles.position.flipped();
        info!(from = %self.toggles.position, to = %position, "Flipping camera");
        self.toggles.position = position;

        if let Err(e) = self.collaborators.devices.select_device(position) {
            warn!(%position, error = %e, "Failed to select device");
        }
        self.recompute_presentation();
        self.persist_toggles();
        Effect::None
    }
}
