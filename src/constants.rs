// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// Capture button timing
pub mod capture {
    use super::Duration;

    /// How long the capture button must be held before a press becomes a recording
    pub const HOLD_THRESHOLD_MS: u64 = 200;

    /// Hold threshold as a [`Duration`]
    pub const HOLD_THRESHOLD: Duration = Duration::from_millis(HOLD_THRESHOLD_MS);

    /// Delay after release before the pressed-button animation is cleared
    pub const PRESS_ANIMATION_RESET: Duration = Duration::from_millis(500);

    /// JPEG quality requested for snapshots
    pub const SNAPSHOT_QUALITY: u8 = 90;
}

/// Frame rate policy
pub mod framerate {
    /// Frame rate used whenever 60 fps is unavailable or not wanted
    pub const BASELINE_FPS: u32 = 30;

    /// Frame rate used when the user asks for smooth video and nothing blocks it
    pub const HIGH_FPS: u32 = 60;
}

/// Zoom limits and gesture mapping
pub mod zoom {
    /// Upper bound applied on top of whatever the device advertises
    pub const MAX_ZOOM_CAP: f64 = 20.0;

    /// Zoom level the preview resets to when the device changes
    pub const NEUTRAL_ZOOM: f64 = 1.0;

    /// Pinch scale input range mapped onto [-1, 0, 1]
    pub const PINCH_SCALE_RANGE: [f64; 3] = [1.0 - 1.0 / 3.0, 1.0, 3.0];

    /// Fraction of the press height at which a capture-button drag reaches max zoom
    pub const DRAG_FULL_ZOOM_FRACTION: f64 = 0.7;
}

/// Resolution labels for device listings
pub fn get_resolution_label(width: u32) -> Option<&'static str> {
    match width {
        w if w >= 7680 => Some("8K"), // 7680x4320
        w if w >= 3840 => Some("4K"), // 3840x2160
        w if w >= 2560 => Some("2K"), // 2560x1440
        w if w >= 1920 => Some("HD"), // 1920x1080
        w if w >= 640 => Some("SD"),  // 640x480
        _ => None,
    }
}

/// Application information utilities
pub mod app_info {
    /// Get the application version from build-time environment
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_labels() {
        assert_eq!(get_resolution_label(3840), Some("4K"));
        assert_eq!(get_resolution_label(1920), Some("HD"));
        assert_eq!(get_resolution_label(640), Some("SD"));
        assert_eq!(get_resolution_label(320), None);
    }

    #[test]
    fn test_hold_threshold_matches_millis() {
        assert_eq!(capture::HOLD_THRESHOLD.as_millis(), 200);
    }
}
