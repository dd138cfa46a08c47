// SPDX-License-Identifier: GPL-3.0-only

use agribot::app::AppModel;
use agribot::i18n;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "agribot")]
#[command(about = "Field console for the AgriBot planting and weeding unit")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available cameras
    Cameras,

    /// Run weed detection on an image file
    Scan {
        /// Image to analyze (png, jpg, gif, bmp, webp)
        image: PathBuf,

        /// Write a JSON scan report into this directory
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Show the planting layout for a crop or interval
    Spacing {
        /// Crop preset name (Corn, Wheat, Soy, Potato)
        #[arg(short, long)]
        crop: Option<String>,

        /// Interval in centimetres (10-100, snapped to 5)
        #[arg(short, long, conflicts_with = "crop")]
        spacing: Option<u32>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG to control the log level
    // Examples: RUST_LOG=debug, RUST_LOG=agribot=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Cameras) => cli::list_cameras(),
        Some(Commands::Scan { image, report }) => cli::scan_image(image, report),
        Some(Commands::Spacing { crop, spacing }) => cli::print_spacing(crop, spacing),
        None => run_gui(),
    }
}

fn run_gui() -> Result<(), Box<dyn std::error::Error>> {
    // Get the system's preferred languages.
    let requested_languages = i18n_embed::DesktopLanguageRequester::requested_languages();

    // Enable localizations to be applied.
    i18n::init(&requested_languages);

    let settings = cosmic::app::Settings::default().size_limits(
        cosmic::iced::Limits::NONE
            .min_width(720.0)
            .min_height(480.0),
    );

    cosmic::app::run::<AppModel>(settings, ())?;

    Ok(())
}
