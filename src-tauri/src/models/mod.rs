pub mod config;

pub use config::{Branding, IconPaths, LogConfig, LogFormat, LogLevel, LogOutput, ShellConfig};
