// SPDX-License-Identifier: GPL-3.0-only
// Shared types for camera backend abstraction

//! Shared types for camera backends
//!
//! A [`DeviceCapability`] is a read-only snapshot owned by the device provider.
//! The arbiter only ever borrows it.

use crate::constants::framerate;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Physical position of a camera on the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CameraPosition {
    /// Selfie camera
    Front,
    /// Main camera
    #[default]
    Back,
}

impl CameraPosition {
    /// The opposite camera (used by the flip button and double-tap)
    pub fn flipped(self) -> Self {
        match self {
            CameraPosition::Front => CameraPosition::Back,
            CameraPosition::Back => CameraPosition::Front,
        }
    }
}

impl std::fmt::Display for CameraPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraPosition::Front => write!(f, "front"),
            CameraPosition::Back => write!(f, "back"),
        }
    }
}

impl std::str::FromStr for CameraPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "front" => Ok(CameraPosition::Front),
            "back" => Ok(CameraPosition::Back),
            other => Err(format!("unknown camera position '{}'", other)),
        }
    }
}

/// Inclusive frame rate range advertised by a format
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameRateRange {
    pub min: f64,
    pub max: f64,
}

impl FrameRateRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Fixed-rate range (e.g. exactly 30 fps)
    pub fn fixed(fps: f64) -> Self {
        Self { min: fps, max: fps }
    }

    /// Check if `fps` lies within the range
    pub fn includes(&self, fps: u32) -> bool {
        let fps = fps as f64;
        self.min <= fps && fps <= self.max
    }
}

/// One capture format a device advertises
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraDeviceFormat {
    pub photo_width: u32,
    pub photo_height: u32,
    pub video_width: u32,
    pub video_height: u32,
    pub frame_rate_ranges: Vec<FrameRateRange>,
    #[serde(default)]
    pub supports_video_hdr: bool,
    #[serde(default)]
    pub supports_photo_hdr: bool,
}

impl CameraDeviceFormat {
    pub fn photo_pixels(&self) -> u64 {
        self.photo_width as u64 * self.photo_height as u64
    }

    pub fn video_pixels(&self) -> u64 {
        self.video_width as u64 * self.video_height as u64
    }

    /// Highest frame rate any of the ranges reaches
    pub fn max_frame_rate(&self) -> f64 {
        self.frame_rate_ranges
            .iter()
            .map(|r| r.max)
            .fold(0.0, f64::max)
    }

    pub fn supports_frame_rate(&self, fps: u32) -> bool {
        self.frame_rate_ranges.iter().any(|r| r.includes(fps))
    }

    /// Photo or video HDR
    pub fn supports_hdr(&self) -> bool {
        self.supports_video_hdr || self.supports_photo_hdr
    }
}

impl std::fmt::Display for CameraDeviceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} photo, {}x{} video @ {}fps",
            self.photo_width,
            self.photo_height,
            self.video_width,
            self.video_height,
            self.max_frame_rate()
        )?;
        if self.supports_hdr() {
            write!(f, " HDR")?;
        }
        Ok(())
    }
}

/// Capability snapshot of one device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceCapability {
    pub min_zoom: f64,
    pub max_zoom: f64,
    #[serde(default)]
    pub formats: Vec<CameraDeviceFormat>,
    #[serde(default)]
    pub supports_low_light_boost: bool,
    #[serde(default)]
    pub has_flash: bool,
}

impl Default for DeviceCapability {
    fn default() -> Self {
        Self {
            min_zoom: 1.0,
            max_zoom: 1.0,
            formats: Vec::new(),
            supports_low_light_boost: false,
            has_flash: false,
        }
    }
}

impl DeviceCapability {
    /// Any format includes `fps`
    pub fn supports_frame_rate(&self, fps: u32) -> bool {
        self.formats.iter().any(|f| f.supports_frame_rate(fps))
    }

    pub fn supports_60fps(&self) -> bool {
        self.supports_frame_rate(framerate::HIGH_FPS)
    }

    /// Any format advertises photo or video HDR
    pub fn supports_hdr(&self) -> bool {
        self.formats.iter().any(|f| f.supports_hdr())
    }

    /// A video-HDR format exists whose ranges include `fps`
    pub fn supports_hdr_at(&self, fps: u32) -> bool {
        self.formats
            .iter()
            .any(|f| f.supports_video_hdr && f.supports_frame_rate(fps))
    }

    /// The fixed frame rates the screen can choose from that this device supports
    pub fn supported_frame_rates(&self) -> Vec<u32> {
        [framerate::BASELINE_FPS, framerate::HIGH_FPS]
            .into_iter()
            .filter(|fps| self.supports_frame_rate(*fps))
            .collect()
    }
}

/// Represents a camera device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraDevice {
    pub id: String,
    pub name: String,
    pub position: CameraPosition,
    pub capability: DeviceCapability,
}

/// Devices reported by the provider, at most one per position
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceSet {
    #[serde(default)]
    pub front: Option<CameraDevice>,
    #[serde(default)]
    pub back: Option<CameraDevice>,
}

impl DeviceSet {
    pub fn get(&self, position: CameraPosition) -> Option<&CameraDevice> {
        match position {
            CameraPosition::Front => self.front.as_ref(),
            CameraPosition::Back => self.back.as_ref(),
        }
    }

    /// Both a front and a back camera exist
    pub fn supports_flipping(&self) -> bool {
        self.front.is_some() && self.back.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.front.is_none() && self.back.is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CameraDevice> {
        self.back.iter().chain(self.front.iter())
    }
}

/// Flash setting passed to snapshots and recordings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashMode {
    #[default]
    Off,
    On,
}

impl FlashMode {
    pub fn toggled(self) -> Self {
        match self {
            FlashMode::Off => FlashMode::On,
            FlashMode::On => FlashMode::Off,
        }
    }
}

/// Kind of captured media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
}

impl MediaKind {
    pub fn extension(&self) -> &'static str {
        match self {
            MediaKind::Photo => "jpg",
            MediaKind::Video => "mp4",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Photo => write!(f, "photo"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

/// A captured photo or video as reported by the capture backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaDescriptor {
    pub path: PathBuf,
    pub kind: MediaKind,
    pub captured_at: DateTime<Local>,
    pub width: u32,
    pub height: u32,
    /// Recording length in seconds (videos only)
    pub duration_secs: Option<f64>,
}

/// Options for a single-shot capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotOptions {
    pub flash: FlashMode,
    pub quality: u8,
    pub skip_metadata: bool,
}

/// Options for a continuous capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordingOptions {
    pub flash: FlashMode,
    /// Record audio (only when microphone permission is authorized)
    pub audio: bool,
    pub fps: u32,
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Error types for backend operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Camera device not found
    DeviceNotFound(String),
    /// Capture failed
    CaptureFailed(String),
    /// Recording already in progress
    RecordingInProgress,
    /// No recording in progress
    NoRecordingInProgress,
    /// General I/O error
    IoError(String),
    /// Other errors
    Other(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::DeviceNotFound(msg) => write!(f, "Device not found: {}", msg),
            BackendError::CaptureFailed(msg) => write!(f, "Capture failed: {}", msg),
            BackendError::RecordingInProgress => write!(f, "Recording already in progress"),
            BackendError::NoRecordingInProgress => write!(f, "No recording in progress"),
            BackendError::IoError(msg) => write!(f, "I/O error: {}", msg),
            BackendError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError::IoError(err.to_string())
    }
}
