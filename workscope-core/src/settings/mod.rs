pub mod config;
pub mod manager;

#[cfg(test)]
mod tests;

pub use config::{IgnoreSettings, Settings, TreeSettings};
pub use manager::{default_settings_path, load_settings, settings_schema};
