// SPDX-License-Identifier: GPL-3.0-only

//! Runtime permissions
//!
//! Denied permissions are never fatal: the gate redirects the user to the
//! system settings and leaves the screen responsive.

use crate::navigation::{Navigator, Route};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

/// Permission the camera screens depend on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionKind {
    Camera,
    Microphone,
    /// Write access to the photo library
    MediaLibrary,
}

impl std::fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PermissionKind::Camera => write!(f, "Camera"),
            PermissionKind::Microphone => write!(f, "Microphone"),
            PermissionKind::MediaLibrary => write!(f, "Media library"),
        }
    }
}

/// Authorization state reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionStatus {
    Authorized,
    Denied,
    #[default]
    NotDetermined,
}

impl PermissionStatus {
    pub fn is_authorized(self) -> bool {
        self == PermissionStatus::Authorized
    }
}

/// Platform permission collaborator
pub trait PermissionProvider: Send {
    /// Current status without prompting
    fn status(&self, kind: PermissionKind) -> PermissionStatus;

    /// Prompt the user (or return the remembered answer)
    fn request(&mut self, kind: PermissionKind) -> PermissionStatus;

    /// Open the system settings page for this app
    fn open_settings(&mut self);
}

/// Where the camera stack should start
///
/// The permissions screen is shown when the camera is not authorized, or when
/// the microphone has never been asked for. A denied microphone still allows
/// the camera screen (videos are recorded without audio).
pub fn initial_camera_route(camera: PermissionStatus, microphone: PermissionStatus) -> Route {
    if !camera.is_authorized() || microphone == PermissionStatus::NotDetermined {
        Route::Permissions
    } else {
        Route::Camera
    }
}

/// Drives the permissions screen
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionGate {
    pub camera: PermissionStatus,
    pub microphone: PermissionStatus,
}

impl PermissionGate {
    /// Snapshot current statuses from the provider
    pub fn load(provider: &dyn PermissionProvider) -> Self {
        let gate = Self {
            camera: provider.status(PermissionKind::Camera),
            microphone: provider.status(PermissionKind::Microphone),
        };
        info!(camera = ?gate.camera, microphone = ?gate.microphone, "Loaded permission statuses");
        gate
    }

    /// Permissions the screen still needs to show a "Grant" button for
    pub fn pending(&self) -> Vec<PermissionKind> {
        let mut pending = Vec::new();
        if !self.camera.is_authorized() {
            pending.push(PermissionKind::Camera);
        }
        if !self.microphone.is_authorized() {
            pending.push(PermissionKind::Microphone);
        }
        pending
    }

    pub fn all_granted(&self) -> bool {
        self.camera.is_authorized() && self.microphone.is_authorized()
    }

    /// Request one permission
    ///
    /// A denial opens the settings page. Once both camera and microphone are
    /// authorized the current route is replaced with the camera screen.
    pub fn request(
        &mut self,
        kind: PermissionKind,
        provider: &mut dyn PermissionProvider,
        navigator: &mut dyn Navigator,
    ) -> PermissionStatus {
        let status = request_or_redirect(kind, provider);

        match kind {
            PermissionKind::Camera => self.camera = status,
            PermissionKind::Microphone => self.microphone = status,
            PermissionKind::MediaLibrary => {}
        }

        if self.all_granted() && navigator.current() != Some(&Route::Camera) {
            navigator.replace(Route::Camera);
        }
        status
    }
}

/// Request `kind`, redirecting to settings when the answer is a denial
pub fn request_or_redirect(
    kind: PermissionKind,
    provider: &mut dyn PermissionProvider,
) -> PermissionStatus {
    let status = provider.request(kind);
    info!(%kind, ?status, "Permission requested");

    if status == PermissionStatus::Denied {
        warn!(%kind, "Permission denied, opening settings");
        provider.open_settings();
    }
    status
}

#[derive(Debug, Default)]
struct SimulatedState {
    statuses: std::collections::HashMap<PermissionKind, PermissionStatus>,
    answers: std::collections::HashMap<PermissionKind, PermissionStatus>,
    settings_opened: usize,
}

/// Scriptable permission provider
///
/// `status` reports the remembered status; `request` applies the scripted
/// answer for that kind (authorizing by default).
#[derive(Debug, Clone, Default)]
pub struct SimulatedPermissions {
    state: Arc<Mutex<SimulatedState>>,
}

impl SimulatedPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every permission already authorized
    pub fn all_authorized() -> Self {
        let permissions = Self::new();
        for kind in [
            PermissionKind::Camera,
            PermissionKind::Microphone,
            PermissionKind::MediaLibrary,
        ] {
            permissions.set_status(kind, PermissionStatus::Authorized);
        }
        permissions
    }

    pub fn set_status(&self, kind: PermissionKind, status: PermissionStatus) {
        self.lock().statuses.insert(kind, status);
    }

    /// Answer the next prompts for `kind` with `status`
    pub fn answer_with(&self, kind: PermissionKind, status: PermissionStatus) {
        self.lock().answers.insert(kind, status);
    }

    pub fn settings_opened(&self) -> usize {
        self.lock().settings_opened
    }

    fn lock(&self) -> MutexGuard<'_, SimulatedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PermissionProvider for SimulatedPermissions {
    fn status(&self, kind: PermissionKind) -> PermissionStatus {
        self.lock().statuses.get(&kind).copied().unwrap_or_default()
    }

    fn request(&mut self, kind: PermissionKind) -> PermissionStatus {
        let mut state = self.lock();
        let status = state
            .answers
            .get(&kind)
            .copied()
            .unwrap_or(PermissionStatus::Authorized);
        state.statuses.insert(kind, status);
        status
    }

    fn open_settings(&mut self) {
        self.lock().settings_opened += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::NavigationStack;

    #[test]
    fn test_initial_route() {
        use PermissionStatus::*;
        assert_eq!(initial_camera_route(Authorized, Authorized), Route::Camera);
        assert_eq!(initial_camera_route(Authorized, Denied), Route::Camera);
        assert_eq!(initial_camera_route(Authorized, NotDetermined), Route::Permissions);
        assert_eq!(initial_camera_route(Denied, Authorized), Route::Permissions);
        assert_eq!(initial_camera_route(NotDetermined, Authorized), Route::Permissions);
    }

    #[test]
    fn test_gate_replaces_route_once_all_granted() {
        let mut provider = SimulatedPermissions::new();
        let mut navigator = NavigationStack::new(Route::Permissions);
        let mut gate = PermissionGate::load(&provider);
        assert_eq!(gate.pending().len(), 2);

        gate.request(PermissionKind::Camera, &mut provider, &mut navigator);
        assert_eq!(navigator.current(), Some(&Route::Permissions));
        assert_eq!(gate.pending(), vec![PermissionKind::Microphone]);

        gate.request(PermissionKind::Microphone, &mut provider, &mut navigator);
        assert_eq!(navigator.current(), Some(&Route::Camera));
        // Replaced, not pushed
        assert_eq!(navigator.depth(), 1);
    }

    #[test]
    fn test_denial_redirects_to_settings() {
        let mut provider = SimulatedPermissions::new();
        provider.answer_with(PermissionKind::Camera, PermissionStatus::Denied);
        let mut navigator = NavigationStack::new(Route::Permissions);
        let mut gate = PermissionGate::default();

        let status = gate.request(PermissionKind::Camera, &mut provider, &mut navigator);
        assert_eq!(status, PermissionStatus::Denied);
        assert_eq!(provider.settings_opened(), 1);
        assert_eq!(navigator.current(), Some(&Route::Permissions));
    }
}
