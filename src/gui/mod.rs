mod app;
mod fonts;

pub use app::DesktopApp;
pub use fonts::configure_fonts;
