// SPDX-License-Identifier: GPL-3.0-only

//! Display configuration derivation
//!
//! Everything here is a pure function of the device set and the user toggles.
//! A [`DisplayConfiguration`] is recomputed on every relevant change, never
//! mutated in place.

use super::zoom::ZoomBounds;
use crate::backends::camera::{
    CameraDevice, CameraDeviceFormat, CameraPosition, DeviceCapability, DeviceSet, FlashMode,
};
use crate::constants::framerate::{BASELINE_FPS, HIGH_FPS};
use crate::constants::zoom::MAX_ZOOM_CAP;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, warn};

/// User-controlled capture toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureToggles {
    /// User wants 60 fps when possible
    pub prefer_60fps: bool,
    pub hdr_enabled: bool,
    pub night_mode_enabled: bool,
    pub flash: FlashMode,
    pub position: CameraPosition,
}

impl Default for CaptureToggles {
    fn default() -> Self {
        Self {
            prefer_60fps: true,
            hdr_enabled: false,
            night_mode_enabled: false,
            flash: FlashMode::Off,
            position: CameraPosition::Back,
        }
    }
}

/// Frame rate the preview and recordings run at
///
/// Returns 30 unless 60 fps is wanted and nothing disqualifies it:
/// - night mode is on but the device has no native low-light boost (it is
///   simulated by staying at 30 fps);
/// - HDR is on but no format supports HDR at 60 fps;
/// - no format supports 60 fps at all.
pub fn compute_effective_frame_rate(
    desired_60: bool,
    night_mode_enabled: bool,
    hdr_enabled: bool,
    capability: &DeviceCapability,
) -> u32 {
    if !desired_60 {
        return BASELINE_FPS;
    }
    if night_mode_enabled && !capability.supports_low_light_boost {
        return BASELINE_FPS;
    }
    if hdr_enabled && !capability.supports_hdr_at(HIGH_FPS) {
        return BASELINE_FPS;
    }
    if !capability.supports_60fps() {
        return BASELINE_FPS;
    }
    HIGH_FPS
}

/// Whether the night-mode switch is interactive
///
/// An enabled night mode can always be turned off. Otherwise it needs native
/// low-light support or frame-rate headroom to drop to.
pub fn compute_night_mode_toggle_availability(
    night_mode_enabled: bool,
    low_light_support: bool,
    effective_frame_rate: u32,
) -> bool {
    night_mode_enabled || low_light_support || effective_frame_rate > BASELINE_FPS
}

/// Order formats best-first
///
/// Highest photo resolution, then highest video resolution, then highest
/// maximum frame rate.
pub fn sort_formats(formats: &[CameraDeviceFormat]) -> Vec<CameraDeviceFormat> {
    let mut sorted = formats.to_vec();
    sorted.sort_by(|a, b| {
        b.photo_pixels()
            .cmp(&a.photo_pixels())
            .then_with(|| b.video_pixels().cmp(&a.video_pixels()))
            .then_with(|| {
                b.max_frame_rate()
                    .partial_cmp(&a.max_frame_rate())
                    .unwrap_or(Ordering::Equal)
            })
    });
    sorted
}

/// Pick the format to run at `fps`
///
/// Formats are taken best-first. With HDR enabled only HDR-capable formats are
/// considered; otherwise HDR support is ignored.
pub fn select_format(
    formats: &[CameraDeviceFormat],
    fps: u32,
    hdr_enabled: bool,
) -> Option<CameraDeviceFormat> {
    sort_formats(formats)
        .into_iter()
        .filter(|f| !hdr_enabled || f.supports_hdr())
        .find(|f| f.supports_frame_rate(fps))
}

/// Which toggle controls are interactive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ControlAvailability {
    pub frame_rate_switch: bool,
    pub hdr_switch: bool,
    pub night_mode_switch: bool,
    pub flip_camera: bool,
    pub flash: bool,
}

impl ControlAvailability {
    /// Controls for `device`, whether or not a format matches the toggles
    ///
    /// Depends only on the device's capability, so a toggle that left the
    /// device without a matching format can always be switched back.
    pub fn for_device(
        device: &CameraDevice,
        supports_flipping: bool,
        toggles: &CaptureToggles,
    ) -> Self {
        let capability = &device.capability;
        let frame_rate = compute_effective_frame_rate(
            toggles.prefer_60fps,
            toggles.night_mode_enabled,
            toggles.hdr_enabled,
            capability,
        );
        Self {
            frame_rate_switch: capability.supports_60fps(),
            hdr_switch: capability.supports_hdr(),
            night_mode_switch: compute_night_mode_toggle_availability(
                toggles.night_mode_enabled,
                capability.supports_low_light_boost,
                frame_rate,
            ),
            flip_camera: supports_flipping,
            flash: capability.has_flash,
        }
    }

    /// Controls for the toggles' position, `None` without a device there
    pub fn derive(devices: &DeviceSet, toggles: &CaptureToggles) -> Option<Self> {
        devices
            .get(toggles.position)
            .map(|device| Self::for_device(device, devices.supports_flipping(), toggles))
    }
}

/// Why no camera is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CapabilityGap {
    /// No device at the selected position
    NoDevice,
    /// The device has no format for the chosen frame rate / HDR combination
    NoMatchingFormat,
}

impl std::fmt::Display for CapabilityGap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CapabilityGap::NoDevice => write!(f, "no camera device"),
            CapabilityGap::NoMatchingFormat => write!(f, "no matching format"),
        }
    }
}

/// Derived configuration for an active camera
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayConfiguration {
    pub device_id: String,
    /// 30 or 60, always advertised by some format
    pub frame_rate: u32,
    /// Only true when some format supports HDR
    pub hdr: bool,
    /// Native low-light boost engaged
    pub low_light_boost: bool,
    /// Flash actually passed to captures
    pub flash: FlashMode,
    pub format: CameraDeviceFormat,
    pub zoom: ZoomBounds,
    pub controls: ControlAvailability,
}

/// What the camera screen should present
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Presentation {
    /// Degraded state: capture disabled, toggles hidden
    NoActiveCapture(CapabilityGap),
    Active(DisplayConfiguration),
}

impl Presentation {
    pub fn active(&self) -> Option<&DisplayConfiguration> {
        match self {
            Presentation::Active(config) => Some(config),
            Presentation::NoActiveCapture(_) => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Presentation::Active(_))
    }
}

impl DisplayConfiguration {
    /// Derive the presentation for the toggles' camera position
    pub fn derive(devices: &DeviceSet, toggles: &CaptureToggles) -> Presentation {
        Self::derive_with_zoom_cap(devices, toggles, MAX_ZOOM_CAP)
    }

    /// Same as [`DisplayConfiguration::derive`] with a custom zoom cap
    pub fn derive_with_zoom_cap(
        devices: &DeviceSet,
        toggles: &CaptureToggles,
        zoom_cap: f64,
    ) -> Presentation {
        let Some(device) = devices.get(toggles.position) else {
            debug!(position = %toggles.position, "No device at position");
            return Presentation::NoActiveCapture(CapabilityGap::NoDevice);
        };

        match Self::for_device(device, devices.supports_flipping(), toggles, zoom_cap) {
            Ok(config) => {
                debug!(
                    device = %device.name,
                    fps = config.frame_rate,
                    hdr = config.hdr,
                    format = %config.format,
                    "Derived display configuration"
                );
                Presentation::Active(config)
            }
            Err(gap) => Presentation::NoActiveCapture(gap),
        }
    }

    fn for_device(
        device: &CameraDevice,
        supports_flipping: bool,
        toggles: &CaptureToggles,
        zoom_cap: f64,
    ) -> Result<Self, CapabilityGap> {
        let capability = &device.capability;

        let frame_rate = compute_effective_frame_rate(
            toggles.prefer_60fps,
            toggles.night_mode_enabled,
            toggles.hdr_enabled,
            capability,
        );

        // A stale HDR toggle never filters out every format of a device without HDR
        let hdr = toggles.hdr_enabled && capability.supports_hdr();
        let format = select_format(&capability.formats, frame_rate, hdr)
            .ok_or(CapabilityGap::NoMatchingFormat)?;

        let zoom = ZoomBounds::with_cap(capability, zoom_cap).map_err(|e| {
            warn!(device = %device.name, error = %e, "Device advertises unusable zoom range");
            CapabilityGap::NoMatchingFormat
        })?;

        let controls = ControlAvailability::for_device(device, supports_flipping, toggles);

        Ok(Self {
            device_id: device.id.clone(),
            frame_rate,
            hdr,
            low_light_boost: toggles.night_mode_enabled && capability.supports_low_light_boost,
            flash: if capability.has_flash {
                toggles.flash
            } else {
                FlashMode::Off
            },
            format,
            zoom,
            controls,
        })
    }
}
