use anyhow::Result;
use clap::Parser;
use term_match::cli::Cli;
use term_match::config::Config;
use term_match::gui::{configure_fonts, DesktopApp};
use term_match::session::Side;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_level())),
        )
        .init();

    let mut config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(%err, "config load failed, using defaults");
        Config::default()
    });
    cli.apply_to(&mut config);

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([960.0, 760.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Term Match Extractor",
        options,
        Box::new(move |cc| {
            configure_fonts(&cc.egui_ctx);
            let mut app = DesktopApp::new(&config);
            if let Some(path) = cli.termbase {
                app.load_in_background(Side::Termbase, path);
            }
            if let Some(path) = cli.update {
                app.load_in_background(Side::Update, path);
            }
            Box::new(app)
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to start window: {err}"))
}
