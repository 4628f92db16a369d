// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands
//!
//! This module provides command-line functionality for:
//! - Listing simulated cameras
//! - Inspecting the derived display configuration
//! - Simulating a press of the capture button

use serde::Serialize;
use shutter::app::{CameraScreen, Collaborators, Message, Runtime};
use shutter::arbiter::{CaptureToggles, DisplayConfiguration, sort_formats};
use shutter::backends::camera::{
    CameraDeviceProvider, DeviceSet, MediaDescriptor, VirtualCamera, sample_devices,
};
use shutter::backends::permissions::SimulatedPermissions;
use shutter::config::Config;
use shutter::constants::{app_info, get_resolution_label};
use shutter::errors::{AppResult, CameraError};
use shutter::navigation::{NavigationStack, Route};
use shutter::storage::DirectoryLibrary;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settle time after release so the press animation and recording callback land
const SETTLE_MS: u64 = 700;

pub fn load_config(path: Option<&Path>) -> Config {
    match path {
        Some(path) => Config::load_or_default(path),
        None => Config::load(),
    }
}

fn load_camera(profile: Option<&Path>) -> AppResult<VirtualCamera> {
    match profile {
        Some(path) => VirtualCamera::from_profile(path),
        None => Ok(VirtualCamera::new(sample_devices())),
    }
}

/// List all simulated cameras
pub fn list_devices(profile: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let camera = load_camera(profile)?;
    let devices = camera.list_devices();
    if devices.is_empty() {
        return Err(CameraError::NoCameraFound.into());
    }

    println!("Available cameras:");
    println!();
    for device in devices.iter() {
        let capability = &device.capability;
        println!("  [{}] {} ({})", device.position, device.name, device.id);
        println!(
            "      Zoom: {}x - {}x, flash: {}, low-light boost: {}",
            capability.min_zoom,
            capability.max_zoom,
            capability.has_flash,
            capability.supports_low_light_boost
        );
        let rates: Vec<String> = capability
            .supported_frame_rates()
            .iter()
            .map(|fps| format!("{}fps", fps))
            .collect();
        println!("      Frame rates: {}", rates.join(", "));

        let formats: Vec<String> = sort_formats(&capability.formats)
            .iter()
            .map(|format| {
                let label = get_resolution_label(format.video_width)
                    .map(|l| format!(" {}", l))
                    .unwrap_or_default();
                let hdr = if format.supports_hdr() { " HDR" } else { "" };
                format!(
                    "{}x{}@{}fps{}{}",
                    format.video_width,
                    format.video_height,
                    format.max_frame_rate(),
                    label,
                    hdr
                )
            })
            .collect();
        println!("      Formats: {}", formats.join(", "));
        println!();
    }

    Ok(())
}

/// Print the presentation derived for `toggles`
pub fn inspect(
    profile: Option<&Path>,
    config: &Config,
    toggles: CaptureToggles,
) -> Result<(), Box<dyn std::error::Error>> {
    let devices: DeviceSet = load_camera(profile)?.list_devices();
    let presentation =
        DisplayConfiguration::derive_with_zoom_cap(&devices, &toggles, config.max_zoom_cap);
    println!("{}", serde_json::to_string_pretty(&presentation)?);
    Ok(())
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    version: &'static str,
    held_ms: u64,
    route: Option<String>,
    snapshots: usize,
    recordings: usize,
    media: Option<MediaDescriptor>,
    saved: bool,
    notice: Option<String>,
}

/// Hold the capture button for `hold_ms` and report the outcome as JSON
pub fn simulate(
    config: Config,
    profile: Option<&Path>,
    hold_ms: u64,
    save: bool,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output.unwrap_or_else(|| std::env::temp_dir().join("shutter"));
    let camera = load_camera(profile)?.with_output_dir(&output);
    let library = if save {
        DirectoryLibrary::user_default()
    } else {
        DirectoryLibrary::new(output.join("photos"), output.join("videos"))
    };

    let collaborators = Collaborators {
        devices: Box::new(camera.clone()),
        capture: Box::new(camera.clone()),
        permissions: Box::new(SimulatedPermissions::all_authorized()),
        navigator: Box::new(NavigationStack::new(Route::Home)),
        library: Box::new(library),
    };

    let rt = tokio::runtime::Runtime::new()?;
    let screen = rt.block_on(async move {
        let (mut screen, receiver) = CameraScreen::new(config, collaborators);
        screen.open_camera_flow();
        let runtime = Runtime::new(screen, receiver);
        let input = runtime.sender();

        tokio::spawn(async move {
            let now = || tokio::time::Instant::now().into_std();
            let _ = input.send(Message::CameraInitialized);
            let _ = input.send(Message::CapturePressed(now()));
            tokio::time::sleep(Duration::from_millis(hold_ms)).await;
            let _ = input.send(Message::CaptureReleased(now()));
            tokio::time::sleep(Duration::from_millis(SETTLE_MS)).await;
            if save {
                let _ = input.send(Message::SaveMedia);
            }
            let _ = input.send(Message::Quit);
        });

        runtime.run().await
    });

    let stats = camera.stats();
    let report = SimulationReport {
        version: app_info::version(),
        held_ms: hold_ms,
        route: screen.current_route().map(ToString::to_string),
        snapshots: stats.snapshots,
        recordings: stats.recordings_started,
        media: screen.media.as_ref().map(|viewer| viewer.media.clone()),
        saved: screen
            .media
            .as_ref()
            .is_some_and(|viewer| viewer.saving == shutter::app::SavingState::Saved),
        notice: screen
            .notice
            .as_ref()
            .map(|n| format!("{}: {}", n.title, n.message)),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
