// SPDX-License-Identifier: GPL-3.0-only

//! Permission and media screen handlers

use crate::app::state::{CameraScreen, Effect, Notice, SavingState};
use crate::backends::permissions::{PermissionKind, request_or_redirect};
use crate::errors::{AppError, AppResult, PermissionError};
use crate::navigation::Route;
use std::path::PathBuf;
use tracing::{debug, error, info};

impl CameraScreen {
    // =========================================================================
    // Permissions
    // =========================================================================

    pub(crate) fn handle_request_permission(&mut self, kind: PermissionKind) -> Effect {
        let provider = self.collaborators.permissions.as_mut();
        match kind {
            PermissionKind::Camera | PermissionKind::Microphone => {
                self.permissions
                    .request(kind, provider, self.collaborators.navigator.as_mut());
            }
            PermissionKind::MediaLibrary => {
                request_or_redirect(kind, provider);
            }
        }
        Effect::None
    }

    // =========================================================================
    // Media Screen
    // =========================================================================

    pub(crate) fn handle_media_loaded(&mut self) -> Effect {
        if let Some(viewer) = self.media.as_mut() {
            viewer.loaded = true;
        }
        Effect::None
    }

    /// Save the shown media into the library
    ///
    /// Asks for media library access first; a denial leaves the button usable.
    pub(crate) fn handle_save_media(&mut self) -> Effect {
        let Some(viewer) = self.media.as_mut() else {
            debug!("No media shown, nothing to save");
            return Effect::None;
        };
        if !viewer.can_save() {
            debug!(saving = ?viewer.saving, "Save already in progress or done");
            return Effect::None;
        }
        viewer.saving = SavingState::Saving;
        let media = viewer.media.clone();

        let provider = self.collaborators.permissions.as_mut();
        let authorized = provider.status(PermissionKind::MediaLibrary).is_authorized()
            || request_or_redirect(PermissionKind::MediaLibrary, provider).is_authorized();

        let result = if authorized {
            info!(path = %media.path.display(), kind = %media.kind, "Saving media...");
            self.collaborators.library.save(&media)
        } else {
            Err(AppError::Permission(PermissionError::Denied(
                PermissionKind::MediaLibrary,
            )))
        };
        self.handle_media_saved(result)
    }

    pub(crate) fn handle_media_saved(&mut self, result: AppResult<PathBuf>) -> Effect {
        let Some(viewer) = self.media.as_mut() else {
            return Effect::None;
        };
        match result {
            Ok(path) => {
                info!(path = %path.display(), "Media saved");
                viewer.saving = SavingState::Saved;
            }
            Err(AppError::Permission(e)) => {
                info!(error = %e, "Media library access denied");
                viewer.saving = SavingState::None;
                self.notice = Some(Notice::new(
                    "Permission denied!",
                    "Cannot save media without media library permission.",
                ));
            }
            Err(e) => {
                error!(error = %e, "Failed to save media");
                viewer.saving = SavingState::None;
                self.notice = Some(Notice::new("Failed to save!", e.to_string()));
            }
        }
        Effect::None
    }

    pub(crate) fn handle_navigate_back(&mut self) -> Effect {
        if !self.collaborators.navigator.go_back() {
            debug!("Already at the root route");
            return Effect::None;
        }
        if !matches!(self.current_route(), Some(Route::Media { .. })) {
            self.media = None;
        }
        Effect::None
    }
}
