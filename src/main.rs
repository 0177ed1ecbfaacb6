use clap::Parser;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crop_editor::app::{CropEditorApp, APP_NAME};
use crop_editor::config::AppSettings;
use crop_editor::modules::image_editor::{CropMode, ImageSource};

#[derive(Parser, Debug)]
#[command(name = "crop_editor", version, about = "Crop, filter and upload images")]
struct Cli {
    /// File path or data: URL to open on startup
    #[arg(long)]
    image: Option<String>,

    #[arg(long, value_enum)]
    crop_mode: Option<CropMode>,

    /// Endpoint that receives multipart uploads
    #[arg(long)]
    upload_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli: Cli = Cli::parse();
    let mut settings: AppSettings = AppSettings::load();
    if let Some(mode) = cli.crop_mode { settings.crop_mode = mode; }
    if let Some(url) = cli.upload_url.filter(|u| !u.trim().is_empty()) { settings.upload_url = Some(url); }
    let initial: Option<ImageSource> = cli.image.as_deref().map(ImageSource::from_arg);

    tracing::info!(crop_mode = ?settings.crop_mode, upload = settings.upload_url.is_some(), "starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 420.0])
            .with_title(APP_NAME)
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        APP_NAME,
        options,
        Box::new(|cc| Ok(Box::new(CropEditorApp::new(cc, settings, initial)))),
    )
}
