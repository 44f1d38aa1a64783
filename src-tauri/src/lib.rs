// lib.rs - 暴露壳层核心逻辑给 GUI 入口和测试使用

pub mod core;
pub mod models;
pub mod presence;
pub mod services;
pub mod ui;
pub mod utils;

pub use models::*;

pub use core::{init_logger, AppError, AppResult};

pub use presence::{
    parse_unread_count, select_icon, CloseDecision, IconVariant, PresenceCapabilities,
    PresenceController, PresenceState, PresenceSurface, UnreadCount,
};

pub use services::{NotificationPayload, SettingKey, SettingsStore};

pub use ui::{
    create_main_window, quit_app, reveal_main_window, setup_system_tray, toggle_main_window,
    AppShellState, ShellState, TauriSurface, MAIN_WINDOW_LABEL,
};
