pub mod console;
pub mod control_panel;
pub mod input_bar;
pub mod status_bar;

pub use console::Console;
pub use control_panel::ControlPanel;
pub use input_bar::InputBar;
pub use status_bar::StatusBar;
