// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use shutter::backends::camera::{CameraPosition, FlashMode};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "shutter")]
#[command(about = "Capture-mode arbitration for touch camera screens")]
#[command(version = env!("GIT_VERSION"))]
#[command(subcommand_required = false)]
struct Cli {
    /// Config file (default: ~/.config/shutter/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List simulated cameras and their formats
    Devices {
        /// Device profile (JSON); built-in sample devices when omitted
        #[arg(short, long)]
        profile: Option<PathBuf>,
    },

    /// Print the derived display configuration as JSON
    Inspect {
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Camera position (front/back)
        #[arg(long)]
        position: Option<CameraPosition>,

        /// Do not prefer 60 fps
        #[arg(long)]
        no_60fps: bool,

        /// Enable HDR
        #[arg(long)]
        hdr: bool,

        /// Enable night mode
        #[arg(long)]
        night: bool,

        /// Enable flash
        #[arg(long)]
        flash: bool,
    },

    /// Press the capture button for a given time and report what happened
    Simulate {
        /// How long the button is held, in milliseconds
        #[arg(long, default_value = "100")]
        hold_ms: u64,

        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Save the result into the media library
        #[arg(long)]
        save: bool,

        /// Directory for captured files (default: temp dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=shutter=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli::load_config(cli.config.as_deref());

    match cli.command {
        Some(Commands::Devices { profile }) => cli::list_devices(profile.as_deref()),
        Some(Commands::Inspect {
            profile,
            position,
            no_60fps,
            hdr,
            night,
            flash,
        }) => {
            let mut toggles = config.toggles();
            toggles.prefer_60fps &= !no_60fps;
            toggles.hdr_enabled |= hdr;
            toggles.night_mode_enabled |= night;
            if flash {
                toggles.flash = FlashMode::On;
            }
            if let Some(position) = position {
                toggles.position = position;
            }
            cli::inspect(profile.as_deref(), &config, toggles)
        }
        Some(Commands::Simulate {
            hold_ms,
            profile,
            save,
            output,
        }) => cli::simulate(config, profile.as_deref(), hold_ms, save, output),
        None => cli::inspect(None, &config, config.toggles()),
    }
}
