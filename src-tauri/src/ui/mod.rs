//! UI 管理层：托盘、主窗口与展示面适配

pub mod icons;
pub mod state;
pub mod surface;
pub mod tray;
pub mod window;

pub use icons::IconSet;
pub use state::{AppShellState, ShellState};
pub use surface::TauriSurface;
pub use tray::{create_tray_menu, setup_system_tray, TRAY_ID};
pub use window::{
    create_main_window, hide_window_to_tray, quit_app, reveal_main_window, show_window,
    toggle_main_window, MAIN_WINDOW_LABEL,
};
