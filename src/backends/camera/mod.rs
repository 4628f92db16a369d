// SPDX-License-Identifier: GPL-3.0-only

//! Camera collaborator abstraction
//!
//! The camera screen never talks to a camera library directly. It consumes two
//! traits: one for device enumeration and selection, one for capture.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │  CameraScreen (app) │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │ CameraDeviceProvider│  ← list devices, select front/back
//! │ CaptureBackend      │  ← snapshot, start/stop recording
//! └──────────┬──────────┘
//!            │
//!            ▼
//!   ┌────────────────┐
//!   │ VirtualCamera  │  ← in-memory simulation
//!   └────────────────┘
//! ```

pub mod types;
pub mod virtual_device;

pub use types::*;
pub use virtual_device::{CaptureStats, VirtualCamera, sample_devices};

/// Completion callback for a continuous capture
///
/// Called exactly once: `Ok` with the finished video, or `Err` when the
/// recording failed after it had started.
pub type RecordingCallback = Box<dyn FnOnce(BackendResult<MediaDescriptor>) + Send>;

/// Device enumeration and selection
pub trait CameraDeviceProvider: Send {
    /// List the devices currently available, at most one per position
    fn list_devices(&self) -> DeviceSet;

    /// Select the device at `position` and make it current
    ///
    /// # Returns
    /// * `Ok(CameraDevice)` - The now-current device
    /// * `Err(BackendError::DeviceNotFound)` - No device at that position
    fn select_device(&mut self, position: CameraPosition) -> BackendResult<CameraDevice>;

    /// The currently selected device, if any
    fn current_device(&self) -> Option<CameraDevice>;
}

/// Snapshot and recording operations
pub trait CaptureBackend: Send {
    /// Capture a single still image
    fn take_snapshot(&mut self, options: &SnapshotOptions) -> BackendResult<MediaDescriptor>;

    /// Start recording video
    ///
    /// The call returns once recording has started. `on_complete` is invoked
    /// later, after [`CaptureBackend::stop_continuous_capture`] or on failure.
    fn start_continuous_capture(
        &mut self,
        options: &RecordingOptions,
        on_complete: RecordingCallback,
    ) -> BackendResult<()>;

    /// Stop the active recording and finalize the file
    fn stop_continuous_capture(&mut self) -> BackendResult<()>;

    /// Check if currently recording
    fn is_recording(&self) -> bool;
}
