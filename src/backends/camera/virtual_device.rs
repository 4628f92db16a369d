// SPDX-License-Identifier: GPL-3.0-only

//! Simulated camera
//!
//! Implements both [`CameraDeviceProvider`] and [`CaptureBackend`] on top of a
//! [`DeviceSet`] loaded from a JSON profile (or the built-in sample). Captures
//! write an empty placeholder file so downstream save paths can be exercised.
//!
//! The handle is cheap to clone; clones share state, so a test can keep one
//! clone while the screen owns another.

use super::types::*;
use super::{CameraDeviceProvider, CaptureBackend, RecordingCallback};
use crate::errors::{AppResult, CameraError};
use chrono::Local;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Call counters, for diagnostics and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureStats {
    pub snapshots: usize,
    pub recordings_started: usize,
    pub recordings_stopped: usize,
    /// Options of the last recording that started
    pub last_recording: Option<RecordingOptions>,
}

struct ActiveRecording {
    started_at: Instant,
    options: RecordingOptions,
    on_complete: RecordingCallback,
}

struct VirtualState {
    devices: DeviceSet,
    current: Option<CameraPosition>,
    recording: Option<ActiveRecording>,
    output_dir: PathBuf,
    sequence: u64,
    fail_next_snapshot: bool,
    fail_next_start: bool,
    stats: CaptureStats,
}

/// In-memory camera device provider and capture backend
#[derive(Clone)]
pub struct VirtualCamera {
    state: Arc<Mutex<VirtualState>>,
}

impl VirtualCamera {
    /// Create a simulated camera exposing `devices`
    pub fn new(devices: DeviceSet) -> Self {
        let output_dir = std::env::temp_dir().join("shutter");
        info!(
            front = devices.front.is_some(),
            back = devices.back.is_some(),
            "Creating virtual camera"
        );

        Self {
            state: Arc::new(Mutex::new(VirtualState {
                devices,
                current: None,
                recording: None,
                output_dir,
                sequence: 0,
                fail_next_snapshot: false,
                fail_next_start: false,
                stats: CaptureStats::default(),
            })),
        }
    }

    /// Load a device profile (JSON-serialized [`DeviceSet`])
    pub fn from_profile(path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let devices: DeviceSet = serde_json::from_str(&text)
            .map_err(|e| CameraError::InvalidProfile(format!("{}: {}", path.display(), e)))?;
        Ok(Self::new(devices))
    }

    /// Direct captured files to `dir` instead of the temp directory
    pub fn with_output_dir(self, dir: impl Into<PathBuf>) -> Self {
        self.lock().output_dir = dir.into();
        self
    }

    /// Make the next snapshot fail
    pub fn fail_next_snapshot(&self) {
        self.lock().fail_next_snapshot = true;
    }

    /// Make the next recording start fail
    pub fn fail_next_start(&self) {
        self.lock().fail_next_start = true;
    }

    /// Abort the active recording, reporting the failure through its callback
    pub fn fail_active_recording(&self, reason: &str) -> bool {
        let recording = self.lock().recording.take();
        match recording {
            Some(recording) => {
                warn!(reason, "Simulated recording failure");
                (recording.on_complete)(Err(BackendError::CaptureFailed(reason.to_string())));
                true
            }
            None => false,
        }
    }

    /// Replace the reported devices (simulates hot-plug)
    pub fn set_devices(&self, devices: DeviceSet) {
        let mut state = self.lock();
        if let Some(position) = state.current
            && devices.get(position).is_none()
        {
            state.current = None;
        }
        state.devices = devices;
    }

    pub fn stats(&self) -> CaptureStats {
        self.lock().stats
    }

    fn lock(&self) -> MutexGuard<'_, VirtualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl VirtualState {
    fn current_device(&self) -> Option<&CameraDevice> {
        self.current.and_then(|p| self.devices.get(p))
    }

    /// Largest photo/video size of the current device
    fn capture_size(&self, kind: MediaKind) -> (u32, u32) {
        let formats = self
            .current_device()
            .map(|d| d.capability.formats.as_slice())
            .unwrap_or_default();
        let best = match kind {
            MediaKind::Photo => formats.iter().max_by_key(|f| f.photo_pixels()),
            MediaKind::Video => formats.iter().max_by_key(|f| f.video_pixels()),
        };
        match (kind, best) {
            (MediaKind::Photo, Some(f)) => (f.photo_width, f.photo_height),
            (MediaKind::Video, Some(f)) => (f.video_width, f.video_height),
            (_, None) => (0, 0),
        }
    }

    fn write_placeholder(&mut self, kind: MediaKind) -> BackendResult<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;
        self.sequence += 1;
        let filename = format!(
            "{}_{}_{}.{}",
            kind,
            Local::now().format("%Y%m%d_%H%M%S"),
            self.sequence,
            kind.extension()
        );
        let path = self.output_dir.join(filename);
        std::fs::write(&path, [])?;
        Ok(path)
    }
}

impl CameraDeviceProvider for VirtualCamera {
    fn list_devices(&self) -> DeviceSet {
        self.lock().devices.clone()
    }

    fn select_device(&mut self, position: CameraPosition) -> BackendResult<CameraDevice> {
        let mut state = self.lock();
        let device = state
            .devices
            .get(position)
            .cloned()
            .ok_or_else(|| BackendError::DeviceNotFound(format!("no {} camera", position)))?;
        state.current = Some(position);
        info!(device = %device.name, %position, "Selected camera");
        Ok(device)
    }

    fn current_device(&self) -> Option<CameraDevice> {
        self.lock().current_device().cloned()
    }
}

impl CaptureBackend for VirtualCamera {
    fn take_snapshot(&mut self, options: &SnapshotOptions) -> BackendResult<MediaDescriptor> {
        let mut state = self.lock();
        state.stats.snapshots += 1;

        if state.current_device().is_none() {
            return Err(BackendError::DeviceNotFound("no camera selected".into()));
        }
        if std::mem::take(&mut state.fail_next_snapshot) {
            return Err(BackendError::CaptureFailed("simulated snapshot failure".into()));
        }

        let (width, height) = state.capture_size(MediaKind::Photo);
        let path = state.write_placeholder(MediaKind::Photo)?;
        debug!(path = %path.display(), flash = ?options.flash, quality = options.quality, "Snapshot taken");

        Ok(MediaDescriptor {
            path,
            kind: MediaKind::Photo,
            captured_at: Local::now(),
            width,
            height,
            duration_secs: None,
        })
    }

    fn start_continuous_capture(
        &mut self,
        options: &RecordingOptions,
        on_complete: RecordingCallback,
    ) -> BackendResult<()> {
        let mut state = self.lock();
        state.stats.recordings_started += 1;

        if state.recording.is_some() {
            return Err(BackendError::RecordingInProgress);
        }
        if state.current_device().is_none() {
            return Err(BackendError::DeviceNotFound("no camera selected".into()));
        }
        if std::mem::take(&mut state.fail_next_start) {
            return Err(BackendError::CaptureFailed("simulated start failure".into()));
        }

        info!(fps = options.fps, audio = options.audio, "Recording started");
        state.stats.last_recording = Some(*options);
        state.recording = Some(ActiveRecording {
            started_at: Instant::now(),
            options: *options,
            on_complete,
        });
        Ok(())
    }

    fn stop_continuous_capture(&mut self) -> BackendResult<()> {
        let (recording, result) = {
            let mut state = self.lock();
            state.stats.recordings_stopped += 1;
            let recording = state
                .recording
                .take()
                .ok_or(BackendError::NoRecordingInProgress)?;
            let (width, height) = state.capture_size(MediaKind::Video);
            let result = state.write_placeholder(MediaKind::Video).map(|path| MediaDescriptor {
                path,
                kind: MediaKind::Video,
                captured_at: Local::now(),
                width,
                height,
                duration_secs: Some(recording.started_at.elapsed().as_secs_f64()),
            });
            (recording, result)
        };

        info!(fps = recording.options.fps, ok = result.is_ok(), "Recording stopped");
        // Callback runs outside the lock; it may call back into this camera
        (recording.on_complete)(result);
        Ok(())
    }

    fn is_recording(&self) -> bool {
        self.lock().recording.is_some()
    }
}

/// Built-in profile: a back camera with 60 fps and HDR formats plus a 30 fps front camera
pub fn sample_devices() -> DeviceSet {
    let back = CameraDevice {
        id: "virtual-back-0".into(),
        name: "Virtual Back Camera".into(),
        position: CameraPosition::Back,
        capability: DeviceCapability {
            min_zoom: 1.0,
            max_zoom: 64.0,
            formats: vec![
                CameraDeviceFormat {
                    photo_width: 4032,
                    photo_height: 3024,
                    video_width: 3840,
                    video_height: 2160,
                    frame_rate_ranges: vec![FrameRateRange::new(1.0, 30.0)],
                    supports_video_hdr: true,
                    supports_photo_hdr: true,
                },
                CameraDeviceFormat {
                    photo_width: 4032,
                    photo_height: 3024,
                    video_width: 1920,
                    video_height: 1080,
                    frame_rate_ranges: vec![FrameRateRange::new(1.0, 60.0)],
                    supports_video_hdr: true,
                    supports_photo_hdr: false,
                },
                CameraDeviceFormat {
                    photo_width: 1920,
                    photo_height: 1080,
                    video_width: 1280,
                    video_height: 720,
                    frame_rate_ranges: vec![FrameRateRange::new(1.0, 240.0)],
                    supports_video_hdr: false,
                    supports_photo_hdr: false,
                },
            ],
            supports_low_light_boost: false,
            has_flash: true,
        },
    };

    let front = CameraDevice {
        id: "virtual-front-1".into(),
        name: "Virtual Front Camera".into(),
        position: CameraPosition::Front,
        capability: DeviceCapability {
            min_zoom: 1.0,
            max_zoom: 4.0,
            formats: vec![CameraDeviceFormat {
                photo_width: 3088,
                photo_height: 2320,
                video_width: 1920,
                video_height: 1080,
                frame_rate_ranges: vec![FrameRateRange::new(1.0, 30.0)],
                supports_video_hdr: false,
                supports_photo_hdr: false,
            }],
            supports_low_light_boost: true,
            has_flash: false,
        },
    };

    DeviceSet {
        front: Some(front),
        back: Some(back),
    }
}
