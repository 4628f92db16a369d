// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the camera screen handlers and runtime

use shutter::app::{AppLifecycle, CameraScreen, Collaborators, Message, Runtime, SavingState};
use shutter::arbiter::{CapabilityGap, Presentation};
use shutter::backends::camera::{
    BackendError, CameraDevice, CameraDeviceFormat, CameraPosition, CaptureBackend,
    DeviceCapability, DeviceSet, FrameRateRange, MediaKind, VirtualCamera, sample_devices,
};
use shutter::backends::permissions::{PermissionKind, PermissionStatus, SimulatedPermissions};
use shutter::config::Config;
use shutter::navigation::{NavigationStack, Route};
use shutter::storage::DirectoryLibrary;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedReceiver;

struct Harness {
    screen: CameraScreen,
    receiver: UnboundedReceiver<Message>,
    camera: VirtualCamera,
    permissions: SimulatedPermissions,
}

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("shutter-screen-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn harness_with(name: &str, devices: DeviceSet, permissions: SimulatedPermissions) -> Harness {
    let dir = scratch(name);
    let camera = VirtualCamera::new(devices).with_output_dir(dir.join("captures"));
    let collaborators = Collaborators {
        devices: Box::new(camera.clone()),
        capture: Box::new(camera.clone()),
        permissions: Box::new(permissions.clone()),
        navigator: Box::new(NavigationStack::new(Route::Home)),
        library: Box::new(DirectoryLibrary::new(dir.join("photos"), dir.join("videos"))),
    };
    let (mut screen, receiver) = CameraScreen::new(Config::default(), collaborators);
    screen.open_camera_flow();
    screen.update(Message::CameraInitialized);
    Harness {
        screen,
        receiver,
        camera,
        permissions,
    }
}

fn harness(name: &str) -> Harness {
    harness_with(name, sample_devices(), SimulatedPermissions::all_authorized())
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Press at `t0` and release `release_ms` later, delivering the hold trigger
/// in the order a FIFO runtime would
fn press_and_release(h: &mut Harness, t0: Instant, release_ms: u64) {
    let delays = h.screen.update(Message::CapturePressed(t0)).into_delays();
    assert_eq!(delays.len(), 1, "Press schedules exactly one hold trigger");
    let (after, trigger) = delays.into_iter().next().unwrap();
    assert_eq!(after, ms(200));

    if release_ms >= 200 {
        h.screen.update(trigger);
        h.screen.update(Message::CaptureReleased(t0 + ms(release_ms)));
    } else {
        h.screen.update(Message::CaptureReleased(t0 + ms(release_ms)));
        h.screen.update(trigger);
    }
}

fn drain(h: &mut Harness) {
    while let Ok(message) = h.receiver.try_recv() {
        h.screen.update(message);
    }
}

#[test]
fn test_initial_state() {
    let h = harness("initial");
    assert_eq!(h.screen.current_route(), Some(&Route::Camera));
    assert!(h.screen.capture_enabled());
    let display = h.screen.display().expect("Back camera should be active");
    assert_eq!(display.frame_rate, 60);
    assert_eq!(display.zoom.max, 20.0, "Zoom is capped at 20x");
    assert_eq!(h.screen.zoom, 1.0);
}

#[test]
fn test_quick_tap_takes_photo() {
    let mut h = harness("tap");
    press_and_release(&mut h, Instant::now(), 90);

    let stats = h.camera.stats();
    assert_eq!(stats.snapshots, 1);
    assert_eq!(stats.recordings_started, 0);
    assert!(matches!(
        h.screen.current_route(),
        Some(Route::Media { kind: MediaKind::Photo, .. })
    ));
    let viewer = h.screen.media.as_ref().unwrap();
    assert_eq!(viewer.saving, SavingState::None);
}

#[test]
fn test_hold_records_video() {
    let mut h = harness("hold");
    press_and_release(&mut h, Instant::now(), 1500);

    let stats = h.camera.stats();
    assert_eq!(stats.recordings_started, 1);
    assert_eq!(stats.recordings_stopped, 1);
    assert_eq!(stats.snapshots, 0);
    assert_eq!(stats.last_recording.unwrap().fps, 60);
    assert!(stats.last_recording.unwrap().audio);

    drain(&mut h);
    assert!(matches!(
        h.screen.current_route(),
        Some(Route::Media { kind: MediaKind::Video, .. })
    ));
}

#[test]
fn test_release_schedules_press_animation_reset() {
    let mut h = harness("animation");
    let t0 = Instant::now();
    h.screen.update(Message::CapturePressed(t0));
    assert!(h.screen.is_pressing_button);

    let delays = h.screen.update(Message::CaptureReleased(t0 + ms(50))).into_delays();
    assert_eq!(delays.len(), 1);
    assert_eq!(delays[0].0, ms(500));
    assert!(matches!(delays[0].1, Message::PressAnimationFinished));

    h.screen.update(Message::PressAnimationFinished);
    assert!(!h.screen.is_pressing_button);
}

#[test]
fn test_press_ignored_when_disabled() {
    let mut h = harness("disabled");
    h.screen.update(Message::LifecycleChanged(AppLifecycle::Background, Instant::now()));
    assert!(!h.screen.capture_enabled());

    let t0 = Instant::now();
    assert!(h.screen.update(Message::CapturePressed(t0)).into_delays().is_empty());
    h.screen.update(Message::CaptureReleased(t0 + ms(50)));
    assert_eq!(h.camera.stats().snapshots, 0);
}

#[test]
fn test_losing_focus_while_recording_stops() {
    let mut h = harness("focus");
    let t0 = Instant::now();
    let delays = h.screen.update(Message::CapturePressed(t0)).into_delays();
    let (_, trigger) = delays.into_iter().next().unwrap();
    h.screen.update(trigger);
    assert!(h.screen.arbiter.is_recording());

    h.screen.update(Message::FocusChanged(false, t0 + ms(900)));
    assert!(h.screen.media_playback_paused());
    assert_eq!(h.camera.stats().recordings_stopped, 1);
    assert!(h.screen.arbiter.open_session().is_none());
    assert_eq!(h.screen.arbiter.last_session().unwrap().elapsed, ms(900));
}

#[test]
fn test_start_failure_aborts_session() {
    let mut h = harness("start-failure");
    h.camera.fail_next_start();
    press_and_release(&mut h, Instant::now(), 800);

    assert!(h.screen.notice.is_some());
    assert_eq!(h.camera.stats().snapshots, 0, "Release after failure takes nothing");
    assert_eq!(h.screen.current_route(), Some(&Route::Camera));
}

#[test]
fn test_recording_failure_while_holding() {
    let mut h = harness("recording-failure");
    let t0 = Instant::now();
    let delays = h.screen.update(Message::CapturePressed(t0)).into_delays();
    let (_, trigger) = delays.into_iter().next().unwrap();
    h.screen.update(trigger);

    assert!(h.camera.fail_active_recording("disk full"));
    drain(&mut h);
    let notice = h.screen.notice.clone().expect("Failure should be reported");
    assert!(notice.message.contains("disk full"));

    h.screen.update(Message::CaptureReleased(t0 + ms(2000)));
    let stats = h.camera.stats();
    assert_eq!(stats.recordings_stopped, 0);
    assert_eq!(stats.snapshots, 0);
}

#[test]
fn test_late_recording_failure_keeps_newer_press() {
    let mut h = harness("late-failure");
    let t0 = Instant::now();
    press_and_release(&mut h, t0, 1500);
    drain(&mut h);
    h.screen.update(Message::NavigateBack);
    let first = h.screen.arbiter.last_session().unwrap().id;

    let t1 = t0 + ms(3000);
    let delays = h.screen.update(Message::CapturePressed(t1)).into_delays();
    let (_, trigger) = delays.into_iter().next().unwrap();
    h.screen.update(trigger);
    assert!(h.screen.arbiter.is_recording());

    // The first recording's finalize error arrives while the second is running
    h.screen.update(Message::RecordingFinished {
        session: first,
        at: t1 + ms(500),
        result: Err(BackendError::CaptureFailed("finalize failed".into())),
    });
    assert!(h.screen.notice.is_some());
    assert!(h.screen.arbiter.is_recording(), "Newer press keeps its session");

    h.screen.update(Message::CaptureReleased(t1 + ms(1500)));
    let stats = h.camera.stats();
    assert_eq!(stats.recordings_started, 2);
    assert_eq!(stats.recordings_stopped, 2);
    assert!(!h.camera.is_recording());
}

#[test]
fn test_release_past_threshold_before_trigger_captures_nothing() {
    let mut h = harness("pending-trigger");
    let t0 = Instant::now();
    let delays = h.screen.update(Message::CapturePressed(t0)).into_delays();
    let (_, trigger) = delays.into_iter().next().unwrap();

    h.screen.update(Message::CaptureReleased(t0 + ms(350)));
    h.screen.update(trigger);

    let stats = h.camera.stats();
    assert_eq!(stats.snapshots, 0);
    assert_eq!(stats.recordings_started, 0);
    assert_eq!(h.screen.current_route(), Some(&Route::Camera));
}

#[test]
fn test_snapshot_failure_sets_notice() {
    let mut h = harness("snapshot-failure");
    h.camera.fail_next_snapshot();
    press_and_release(&mut h, Instant::now(), 40);
    assert!(h.screen.notice.is_some());
    assert!(h.screen.media.is_none());
    assert_eq!(h.screen.current_route(), Some(&Route::Camera));
}

#[test]
fn test_toggles_respect_capabilities() {
    let mut h = harness("toggles");

    h.screen.update(Message::ToggleNightMode);
    assert!(h.screen.toggles.night_mode_enabled);
    assert_eq!(
        h.screen.display().unwrap().frame_rate,
        30,
        "Night mode without low-light boost runs at 30 fps"
    );
    h.screen.update(Message::ToggleNightMode);

    h.screen.update(Message::ToggleHdr);
    let display = h.screen.display().unwrap();
    assert!(display.hdr);
    assert_eq!(display.frame_rate, 60);
    assert!(display.format.supports_hdr());

    // Front camera: no flash, no 60 fps
    h.screen.update(Message::FlipCamera);
    assert_eq!(h.screen.toggles.position, CameraPosition::Front);
    h.screen.update(Message::ToggleFlash);
    h.screen.update(Message::Toggle60Fps);
    assert!(h.screen.toggles.prefer_60fps, "Unavailable switch is ignored");
    assert_eq!(h.screen.display().unwrap().frame_rate, 30);
    assert_eq!(h.screen.display().unwrap().flash, shutter::backends::camera::FlashMode::Off);
}

fn sixty_only_devices() -> DeviceSet {
    let back = CameraDevice {
        id: "sixty-back".into(),
        name: "60 fps only".into(),
        position: CameraPosition::Back,
        capability: DeviceCapability {
            min_zoom: 1.0,
            max_zoom: 4.0,
            formats: vec![CameraDeviceFormat {
                photo_width: 1920,
                photo_height: 1080,
                video_width: 1920,
                video_height: 1080,
                frame_rate_ranges: vec![FrameRateRange::new(48.0, 60.0)],
                supports_video_hdr: false,
                supports_photo_hdr: false,
            }],
            supports_low_light_boost: false,
            has_flash: false,
        },
    };
    DeviceSet {
        back: Some(back),
        ..DeviceSet::default()
    }
}

#[test]
fn test_frame_rate_toggle_recovers_from_no_matching_format() {
    let mut h = harness_with(
        "sixty-only",
        sixty_only_devices(),
        SimulatedPermissions::all_authorized(),
    );
    assert_eq!(h.screen.display().unwrap().frame_rate, 60);

    h.screen.update(Message::Toggle60Fps);
    assert!(!h.screen.toggles.prefer_60fps);
    assert_eq!(
        h.screen.presentation,
        Presentation::NoActiveCapture(CapabilityGap::NoMatchingFormat)
    );
    assert!(!h.screen.capture_enabled());

    h.screen.update(Message::Toggle60Fps);
    assert!(h.screen.toggles.prefer_60fps);
    assert_eq!(h.screen.display().unwrap().frame_rate, 60);
    assert!(h.screen.capture_enabled());
}

#[test]
fn test_flip_resets_zoom_and_needs_two_cameras() {
    let mut h = harness("flip");
    h.screen.update(Message::PinchBegan);
    h.screen.update(Message::PinchChanged(3.0));
    assert_eq!(h.screen.zoom, 20.0);

    h.screen.update(Message::DoubleTap);
    assert_eq!(h.screen.toggles.position, CameraPosition::Front);
    assert_eq!(h.screen.zoom, 1.0);

    let mut devices = sample_devices();
    devices.front = None;
    let mut single = harness_with("flip-single", devices, SimulatedPermissions::all_authorized());
    single.screen.update(Message::FlipCamera);
    assert_eq!(single.screen.toggles.position, CameraPosition::Back);
    assert!(!single.screen.display().unwrap().controls.flip_camera);
}

#[test]
fn test_zoom_gestures_stay_in_bounds() {
    let mut h = harness("zoom");
    let bounds = h.screen.display().unwrap().zoom;

    h.screen.update(Message::PinchBegan);
    for scale in [0.1, 0.5, 0.9, 1.0, 1.5, 2.0, 3.0, 10.0] {
        h.screen.update(Message::PinchChanged(scale));
        assert!((bounds.min..=bounds.max).contains(&h.screen.zoom), "scale {}", scale);
    }

    h.screen.update(Message::DragBegan(800.0));
    for y in [900.0, 800.0, 700.0, 560.0, 100.0, -50.0] {
        h.screen.update(Message::DragChanged(y));
        assert!((bounds.min..=bounds.max).contains(&h.screen.zoom), "y {}", y);
    }
}

#[test]
fn test_unplugged_device_degrades() {
    let mut h = harness("unplug");
    h.camera.set_devices(DeviceSet::default());
    h.screen.update(Message::DevicesChanged);

    assert_eq!(
        h.screen.presentation,
        Presentation::NoActiveCapture(CapabilityGap::NoDevice)
    );
    assert!(!h.screen.capture_enabled());
}

#[test]
fn test_permission_flow() {
    let permissions = SimulatedPermissions::new();
    let mut h = harness_with("permissions", sample_devices(), permissions);
    assert_eq!(h.screen.current_route(), Some(&Route::Permissions));

    h.screen.update(Message::RequestPermission(PermissionKind::Camera));
    assert_eq!(h.screen.current_route(), Some(&Route::Permissions));
    h.screen.update(Message::RequestPermission(PermissionKind::Microphone));
    assert_eq!(h.screen.current_route(), Some(&Route::Camera));
    assert!(h.screen.audio_enabled());
}

#[test]
fn test_denied_microphone_records_without_audio() {
    let permissions = SimulatedPermissions::all_authorized();
    permissions.set_status(PermissionKind::Microphone, PermissionStatus::Denied);
    let mut h = harness_with("no-audio", sample_devices(), permissions);
    assert_eq!(h.screen.current_route(), Some(&Route::Camera));

    press_and_release(&mut h, Instant::now(), 400);
    assert!(!h.camera.stats().last_recording.unwrap().audio);
}

#[test]
fn test_save_media() {
    let mut h = harness("save");
    press_and_release(&mut h, Instant::now(), 30);
    h.screen.update(Message::MediaLoaded);
    assert!(h.screen.media.as_ref().unwrap().loaded);

    h.screen.update(Message::SaveMedia);
    assert_eq!(h.screen.media.as_ref().unwrap().saving, SavingState::Saved);

    // Saving twice is ignored
    h.screen.update(Message::SaveMedia);
    assert_eq!(h.screen.media.as_ref().unwrap().saving, SavingState::Saved);
}

#[test]
fn test_save_media_denied() {
    let permissions = SimulatedPermissions::all_authorized();
    permissions.set_status(PermissionKind::MediaLibrary, PermissionStatus::NotDetermined);
    permissions.answer_with(PermissionKind::MediaLibrary, PermissionStatus::Denied);
    let mut h = harness_with("save-denied", sample_devices(), permissions);

    press_and_release(&mut h, Instant::now(), 30);
    h.screen.update(Message::SaveMedia);

    assert_eq!(h.screen.media.as_ref().unwrap().saving, SavingState::None);
    assert_eq!(h.screen.notice.as_ref().unwrap().title, "Permission denied!");
    assert_eq!(h.permissions.settings_opened(), 1);
}

#[test]
fn test_navigate_back_from_media() {
    let mut h = harness("back");
    press_and_release(&mut h, Instant::now(), 30);
    h.screen.update(Message::NavigateBack);
    assert_eq!(h.screen.current_route(), Some(&Route::Camera));
    assert!(h.screen.media.is_none());
}

// =========================================================================
// Runtime
// =========================================================================

fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

async fn run_press(name: &str, hold: Duration) -> (CameraScreen, VirtualCamera) {
    let h = harness(name);
    let runtime = Runtime::new(h.screen, h.receiver);
    let input = runtime.sender();

    tokio::spawn(async move {
        input.send(Message::CapturePressed(now())).unwrap();
        tokio::time::sleep(hold).await;
        input.send(Message::CaptureReleased(now())).unwrap();
        tokio::time::sleep(ms(1000)).await;
        input.send(Message::Quit).unwrap();
    });

    (runtime.run().await, h.camera)
}

#[tokio::test(start_paused = true)]
async fn test_runtime_quick_tap() {
    let (screen, camera) = run_press("runtime-tap", ms(120)).await;
    let stats = camera.stats();
    assert_eq!(stats.snapshots, 1);
    assert_eq!(stats.recordings_started, 0);
    assert!(!screen.is_pressing_button, "Press animation was reset");
    assert!(matches!(
        screen.current_route(),
        Some(Route::Media { kind: MediaKind::Photo, .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_runtime_hold() {
    let (screen, camera) = run_press("runtime-hold", ms(1500)).await;
    let stats = camera.stats();
    assert_eq!(stats.snapshots, 0);
    assert_eq!(stats.recordings_started, 1);
    assert_eq!(stats.recordings_stopped, 1);
    assert!(matches!(
        screen.current_route(),
        Some(Route::Media { kind: MediaKind::Video, .. })
    ));
}

#[test]
fn test_toggles_are_persisted() {
    let h = harness("persist");
    let path = scratch("persist-config").join("config.json");
    let mut screen = h.screen.with_config_path(&path);

    screen.update(Message::ToggleHdr);
    let saved = Config::load_from(&path).unwrap();
    assert!(saved.hdr_enabled);
    assert_eq!(saved.camera_position, CameraPosition::Back);
}
