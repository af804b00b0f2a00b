//! User interface panes

pub mod settings_pane;

pub use settings_pane::SettingsPanePlugin;
