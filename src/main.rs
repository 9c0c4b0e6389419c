//! Native preview window for the particle field
//!
//! Run with: cargo run --features preview --bin field-preview
//! Set LANDING_FX_CONFIG to a JSON config to try other settings.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    use landing_fx::app::PreviewApp;
    use landing_fx::config::{SiteConfig, CONFIG_ENV_VAR};
    use tracing::info;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,landing_fx=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let json = std::env::var(CONFIG_ENV_VAR).ok();
    let config = SiteConfig::from_json_or_default(json.as_deref());
    info!(
        points = config.field.point_count,
        color = %format!("#{:06X}", config.field.color),
        "Opening preview"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Particle field preview")
            .with_inner_size([1000.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "field-preview",
        options,
        Box::new(move |cc| Ok(Box::new(PreviewApp::new(cc, &config.field)?))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {}
