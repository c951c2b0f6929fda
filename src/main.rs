use anyhow::{Context, Result};
use roko::integration::RokoConfig;
use roko::ui::RokoApp;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roko=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ROKO");

    let config = RokoConfig::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("ROKO")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "ROKO",
        options,
        Box::new(move |cc| Ok(Box::new(RokoApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("UI terminated with error: {}", e))
}
