pub mod app;
pub mod settings_modal;
pub mod slide_panel;

pub use app::App;
pub use slide_panel::{SlidePanel, SlidePanelProps};
