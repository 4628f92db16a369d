// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the camera screen core
//!
//! None of these are fatal: every error resolves to a degraded but responsive
//! screen state. Capability gaps (no device, no matching format) are not errors
//! at all and are modelled by [`crate::arbiter::display::Presentation`].

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Camera-related errors
    Camera(CameraError),
    /// Snapshot or recording errors
    Capture(CaptureError),
    /// Permission errors
    Permission(PermissionError),
    /// Zoom range errors
    Zoom(ZoomError),
    /// Configuration errors
    Config(String),
    /// Storage/filesystem errors
    Storage(String),
    /// Generic error with message
    Other(String),
}

/// Camera-specific errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// No camera device at the requested position
    NoCameraFound,
    /// Camera reported a runtime error
    Runtime(String),
    /// Device profile could not be parsed
    InvalidProfile(String),
}

/// Capture backend errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// Snapshot failed
    SnapshotFailed(String),
    /// Recording could not be started
    StartFailed(String),
    /// Recording could not be stopped
    StopFailed(String),
    /// Recording aborted while in progress
    RecordingFailed(String),
}

/// Permission errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionError {
    /// The user denied the permission; a settings redirect was issued
    Denied(crate::backends::permissions::PermissionKind),
}

/// Zoom clamping errors
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomError {
    /// Lower bound is greater than upper bound
    InvertedRange { min: f64, max: f64 },
    /// An input was NaN
    NotANumber,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Capture(e) => write!(f, "Capture error: {}", e),
            AppError::Permission(e) => write!(f, "Permission error: {}", e),
            AppError::Zoom(e) => write!(f, "Zoom error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::NoCameraFound => write!(f, "No camera devices found"),
            CameraError::Runtime(msg) => write!(f, "Runtime error: {}", msg),
            CameraError::InvalidProfile(msg) => write!(f, "Invalid device profile: {}", msg),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::SnapshotFailed(msg) => write!(f, "Failed to take photo: {}", msg),
            CaptureError::StartFailed(msg) => write!(f, "Failed to start recording: {}", msg),
            CaptureError::StopFailed(msg) => write!(f, "Failed to stop recording: {}", msg),
            CaptureError::RecordingFailed(msg) => write!(f, "Recording failed: {}", msg),
        }
    }
}

impl fmt::Display for PermissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionError::Denied(kind) => write!(f, "{} permission denied", kind),
        }
    }
}

impl fmt::Display for ZoomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoomError::InvertedRange { min, max } => {
                write!(f, "Zoom range is inverted (min {} > max {})", min, max)
            }
            ZoomError::NotANumber => write!(f, "Zoom value is not a number"),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CameraError {}
impl std::error::Error for CaptureError {}
impl std::error::Error for PermissionError {}
impl std::error::Error for ZoomError {}

// Conversions from sub-errors to AppError
impl From<CameraError> for AppError {
    fn from(err: CameraError) -> Self {
        AppError::Camera(err)
    }
}

impl From<CaptureError> for AppError {
    fn from(err: CaptureError) -> Self {
        AppError::Capture(err)
    }
}

impl From<PermissionError> for AppError {
    fn from(err: PermissionError) -> Self {
        AppError::Permission(err)
    }
}

impl From<ZoomError> for AppError {
    fn from(err: ZoomError) -> Self {
        AppError::Zoom(err)
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
