//! Configuration for the finmap tools.
//!
//! One settings file: `~/.config/finmap/settings.json`. Missing or corrupt
//! files fall back to defaults; saving creates the directory.

mod settings;

pub use settings::{Settings, settings_file_path, DEFAULT_SERVER_URL, SERVER_URL_ENV};
