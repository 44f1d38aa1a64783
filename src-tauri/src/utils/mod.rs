pub mod config;

pub use config::{config_dir, load_shell_config, settings_path, shell_config_path};
