// SPDX-License-Identifier: GPL-3.0-only

//! Collaborator abstraction layer
//!
//! The camera screen depends on platform services it does not implement:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  App Layer                  │
//! └────────────────────┬────────────────────────┘
//!                      │
//! ┌────────────────────┴────────────────────────┐
//! │              Backend Layer                  │
//! │  ┌─────────────┐    ┌──────────────────┐    │
//! │  │ Permissions │    │     Camera       │    │
//! │  │  (traits)   │    │ devices+capture  │    │
//! │  └─────────────┘    └──────────────────┘    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`camera`]: Device provider and capture backend traits, simulated camera
//! - [`permissions`]: Permission provider trait and the permission gate

pub mod camera;
pub mod permissions;
