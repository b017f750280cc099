#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    if !folio_core::telemetry::init_default_tracing() {
        eprintln!("folio-desktop: logging disabled");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("folio")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([360.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "folio",
        options,
        Box::new(|cc| Ok(Box::new(folio_ui::PortfolioApp::new(cc)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start window: {e}"))
}

// The web build starts from `folio_ui::start` instead.
#[cfg(target_arch = "wasm32")]
fn main() {}
