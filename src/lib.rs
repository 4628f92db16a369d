// SPDX-License-Identifier: GPL-3.0-only

//! Shutter - capture-mode arbitration for touch camera screens
//!
//! A single capture button takes a photo on a quick tap and records a video
//! while held. This crate decides which one happened, derives the camera
//! configuration the screen should present for the selected device, and owns
//! the screen state that reacts to gestures, lifecycle and backend callbacks.
//!
//! # Architecture
//!
//! - [`arbiter`]: press/hold classifier, display configuration, zoom math
//! - [`app`]: camera screen state, message handlers and the event loop
//! - [`backends`]: camera device/capture and permission collaborator traits,
//!   plus in-memory implementations
//! - [`navigation`]: route stack
//! - [`storage`]: saving captures into the media library
//! - [`config`]: persisted user settings
//!
//! # Example
//!
//! ```no_run
//! use shutter::arbiter::{ArbiterCommand, CaptureArbiter};
//! use std::time::{Duration, Instant};
//!
//! let mut arbiter = CaptureArbiter::default();
//! let t0 = Instant::now();
//! arbiter.on_press_start(t0);
//! let command = arbiter.on_press_end(t0 + Duration::from_millis(80));
//! assert_eq!(command, Some(ArbiterCommand::TakeSnapshot));
//! ```

pub mod app;
pub mod arbiter;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod navigation;
pub mod storage;

// Re-export commonly used types
pub use app::{CameraScreen, Collaborators, Effect, Message, Runtime};
pub use arbiter::{ArbiterCommand, CaptureArbiter, DisplayConfiguration, Presentation};
pub use config::Config;
pub use errors::{AppError, AppResult};
