// SPDX-License-Identifier: GPL-3.0-only

//! Camera screen state

use crate::arbiter::{
    CaptureArbiter, CaptureToggles, DisplayConfiguration, DragZoom, PinchZoom, Presentation,
    SessionId,
};
use crate::backends::camera::{
    BackendResult, CameraDeviceProvider, CaptureBackend, DeviceSet, MediaDescriptor,
};
use crate::backends::permissions::{PermissionGate, PermissionKind, PermissionProvider};
use crate::config::Config;
use crate::errors::AppResult;
use crate::navigation::{Navigator, Route};
use crate::storage::MediaLibrary;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Host application lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppLifecycle {
    #[default]
    Active,
    /// Visible but not receiving input (e.g. system dialog on top)
    Inactive,
    Background,
}

/// Save button state on the media screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SavingState {
    #[default]
    None,
    Saving,
    Saved,
}

/// Transient message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Preview of a just-captured photo or video
#[derive(Debug, Clone, PartialEq)]
pub struct MediaViewer {
    pub media: MediaDescriptor,
    pub saving: SavingState,
    /// Media finished loading (screen fades in)
    pub loaded: bool,
}

impl MediaViewer {
    pub fn new(media: MediaDescriptor) -> Self {
        Self {
            media,
            saving: SavingState::None,
            loaded: false,
        }
    }

    /// The save button accepts presses
    pub fn can_save(&self) -> bool {
        self.saving == SavingState::None
    }
}

/// Every event the camera screen reacts to
#[derive(Debug)]
pub enum Message {
    // ===== Lifecycle =====
    LifecycleChanged(AppLifecycle, Instant),
    /// Camera screen gained (true) or lost focus in the navigation stack
    FocusChanged(bool, Instant),

    // ===== Camera =====
    /// Device provider reported a change in available devices
    DevicesChanged,
    /// Native camera finished initializing
    CameraInitialized,
    /// Native camera reported a runtime error
    CameraError(String),

    // ===== Toggles =====
    Toggle60Fps,
    ToggleHdr,
    ToggleNightMode,
    ToggleFlash,
    FlipCamera,
    /// Double tap on the preview flips the camera
    DoubleTap,

    // ===== Zoom =====
    PinchBegan,
    PinchChanged(f64),
    /// Drag on the capture button started at this absolute y
    DragBegan(f64),
    DragChanged(f64),

    // ===== Capture =====
    CapturePressed(Instant),
    /// Release, failure or cancellation of the press gesture
    CaptureReleased(Instant),
    /// Deferred trigger scheduled at press start, stamped with its fire time
    HoldThresholdElapsed { session: SessionId, at: Instant },
    SnapshotFinished(BackendResult<MediaDescriptor>),
    /// Continuous capture started for `session` completed, observed at `at`
    RecordingFinished {
        session: SessionId,
        at: Instant,
        result: BackendResult<MediaDescriptor>,
    },
    PressAnimationFinished,

    // ===== Permissions =====
    RequestPermission(PermissionKind),

    // ===== Media =====
    MediaLoaded,
    SaveMedia,
    MediaSaved(AppResult<PathBuf>),
    NavigateBack,

    /// Stop the runtime loop
    Quit,
}

/// Follow-up work returned by [`CameraScreen::update`]
#[derive(Debug)]
pub enum Effect {
    None,
    /// Deliver `message` after `after`
    Delay { after: Duration, message: Message },
}

impl Effect {
    /// The delayed messages this effect schedules
    pub fn into_delays(self) -> Vec<(Duration, Message)> {
        match self {
            Effect::None => Vec::new(),
            Effect::Delay { after, message } => vec![(after, message)],
        }
    }
}

/// External services the screen calls into
pub struct Collaborators {
    pub devices: Box<dyn CameraDeviceProvider>,
    pub capture: Box<dyn CaptureBackend>,
    pub permissions: Box<dyn PermissionProvider>,
    pub navigator: Box<dyn Navigator>,
    pub library: Box<dyn MediaLibrary>,
}

/// The camera screen model
///
/// Owns every piece of state the screen used to keep in ambient variables.
/// Event handlers receive it by `&mut self`.
pub struct CameraScreen {
    /// Configuration data that persists between application runs
    pub config: Config,
    /// Where to persist the config (None disables saving)
    pub(crate) config_path: Option<PathBuf>,
    /// Current toggle values
    pub toggles: CaptureToggles,
    /// Devices last reported by the provider
    pub devices: DeviceSet,
    /// Derived presentation, recomputed on every input change
    pub presentation: Presentation,
    /// Current zoom factor
    pub zoom: f64,
    pub(crate) pinch: Option<PinchZoom>,
    pub(crate) drag: Option<DragZoom>,
    /// Photo/video arbitration
    pub arbiter: CaptureArbiter,
    pub lifecycle: AppLifecycle,
    pub focused: bool,
    pub camera_initialized: bool,
    /// Capture button shows its pressed animation
    pub is_pressing_button: bool,
    pub permissions: PermissionGate,
    /// Last transient message for the user
    pub notice: Option<Notice>,
    /// Media screen state, while it is shown
    pub media: Option<MediaViewer>,
    pub(crate) collaborators: Collaborators,
    pub(crate) events: UnboundedSender<Message>,
}

impl CameraScreen {
    /// Create the screen, returning it with the receiving end of its event channel
    pub fn new(config: Config, collaborators: Collaborators) -> (Self, UnboundedReceiver<Message>) {
        let (events, receiver) = tokio::sync::mpsc::unbounded_channel();
        let toggles = config.toggles();
        let arbiter = CaptureArbiter::new(config.hold_threshold());
        let permissions = PermissionGate::load(collaborators.permissions.as_ref());

        let mut screen = Self {
            config,
            config_path: None,
            toggles,
            devices: DeviceSet::default(),
            presentation: Presentation::NoActiveCapture(crate::arbiter::CapabilityGap::NoDevice),
            zoom: crate::constants::zoom::NEUTRAL_ZOOM,
            pinch: None,
            drag: None,
            arbiter,
            lifecycle: AppLifecycle::Active,
            focused: true,
            camera_initialized: false,
            is_pressing_button: false,
            permissions,
            notice: None,
            media: None,
            collaborators,
            events,
        };
        screen.refresh_devices();
        (screen, receiver)
    }

    /// Persist toggle changes to `path`
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Sender for input sources (gestures, lifecycle, device notifications)
    pub fn sender(&self) -> UnboundedSender<Message> {
        self.events.clone()
    }

    /// App is in the foreground and the camera screen is focused
    pub fn is_active(&self) -> bool {
        self.lifecycle == AppLifecycle::Active && self.focused
    }

    /// Capture button accepts presses
    pub fn capture_enabled(&self) -> bool {
        self.camera_initialized && self.is_active() && self.presentation.is_active()
    }

    /// Derived configuration, if a camera is active
    pub fn display(&self) -> Option<&DisplayConfiguration> {
        self.presentation.active()
    }

    /// Video playback on the media screen is paused
    pub fn media_playback_paused(&self) -> bool {
        !self.is_active()
    }

    /// Record audio with videos
    pub fn audio_enabled(&self) -> bool {
        self.permissions.microphone.is_authorized()
    }

    pub fn current_route(&self) -> Option<&Route> {
        self.collaborators.navigator.current()
    }

    /// Enter the camera flow from the home screen
    pub fn open_camera_flow(&mut self) {
        let route = crate::backends::permissions::initial_camera_route(
            self.permissions.camera,
            self.permissions.microphone,
        );
        self.collaborators.navigator.navigate(route);
    }
}
