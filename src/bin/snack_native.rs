use anyhow::Result;
use clap::Parser;
use eframe::egui::{IconData, ViewportBuilder};
use snack_menu::cli::{bootstrap, CommonArgs};
use snack_menu::native::SnackNativeApp;
use tracing::info;

/// Snack menu in a native window.
#[derive(Debug, Parser)]
#[command(name = "snack-menu-native", version)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
}

fn load_icon() -> Option<IconData> {
    let bytes = std::fs::read("icon.png").ok()?;
    let image = image::load_from_memory(&bytes).ok()?.into_rgba8();
    let (width, height) = image.dimensions();
    Some(IconData {
        rgba: image.into_raw(),
        width,
        height,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (_settings, controller) = bootstrap(&cli.common);

    let mut viewport = ViewportBuilder::default()
        .with_inner_size([1000.0, 860.0])
        .with_resizable(false)
        .with_title("🍕 Snack Menu");
    if let Some(icon) = load_icon() {
        viewport = viewport.with_icon(icon);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let result = eframe::run_native(
        "Snack Menu",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_zoom_factor(1.0);
            let mut app = SnackNativeApp::new(controller);
            app.attach_context(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow::anyhow!(err.to_string()));
    info!("window closed");
    result
}
