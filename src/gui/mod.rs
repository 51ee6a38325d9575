pub mod about;
pub mod app;
pub mod card_grid;
pub mod nav_panel;
pub mod settings;
pub mod theme;
pub mod top_bar;

pub use app::TangochoApp;
