// SPDX-License-Identifier: GPL-3.0-only

//! Screen navigation
//!
//! The native navigation stack is a collaborator; [`NavigationStack`] is the
//! in-memory implementation used by the CLI and tests.

use crate::backends::camera::MediaKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Screens reachable from the camera flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Home,
    Permissions,
    Camera,
    /// Preview of a just-captured photo or video
    Media { path: PathBuf, kind: MediaKind },
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::Home => write!(f, "Home"),
            Route::Permissions => write!(f, "Permissions"),
            Route::Camera => write!(f, "Camera"),
            Route::Media { path, kind } => write!(f, "Media({}, {})", kind, path.display()),
        }
    }
}

/// Navigation host collaborator
pub trait Navigator: Send {
    /// Push `route` on top of the stack
    fn navigate(&mut self, route: Route);

    /// Pop the top route; returns false if already at the root
    fn go_back(&mut self) -> bool;

    /// Replace the top route
    fn replace(&mut self, route: Route);

    /// The route currently shown
    fn current(&self) -> Option<&Route>;
}

/// Simple stack navigator
#[derive(Debug, Clone)]
pub struct NavigationStack {
    routes: Vec<Route>,
}

impl NavigationStack {
    pub fn new(initial: Route) -> Self {
        Self {
            routes: vec![initial],
        }
    }

    pub fn depth(&self) -> usize {
        self.routes.len()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

impl Navigator for NavigationStack {
    fn navigate(&mut self, route: Route) {
        debug!(%route, "Navigate");
        self.routes.push(route);
    }

    fn go_back(&mut self) -> bool {
        if self.routes.len() <= 1 {
            return false;
        }
        let popped = self.routes.pop();
        debug!(route = ?popped, "Go back");
        true
    }

    fn replace(&mut self, route: Route) {
        debug!(%route, "Replace");
        match self.routes.last_mut() {
            Some(top) => *top = route,
            None => self.routes.push(route),
        }
    }

    fn current(&self) -> Option<&Route> {
        self.routes.last()
    }
}
