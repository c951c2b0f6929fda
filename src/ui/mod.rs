//! egui front end

pub mod app;
pub mod components;
pub mod state;
pub mod theme;

pub use app::RokoApp;
pub use state::{AppState, ConnectionStatus, SMS_PROTOCOL_NOTICE, SMS_TEMPLATE};
pub use theme::Theme;
