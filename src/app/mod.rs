// SPDX-License-Identifier: GPL-3.0-only

//! Camera screen application module
//!
//! # Architecture
//!
//! - `state`: screen state types (CameraScreen, Message, Effect, ...)
//! - `update`: message dispatcher
//! - `handlers`: handler methods grouped by domain
//! - `runtime`: single-consumer event loop on tokio

mod handlers;
pub mod runtime;
mod state;
mod update;

pub use runtime::Runtime;
pub use state::{
    AppLifecycle, CameraScreen, Collaborators, Effect, MediaViewer, Message, Notice, SavingState,
};
