use crate::core::AppResult;
use crate::presence::IconVariant;
use crate::services::{SettingKey, SettingsStore};
use tauri::{
    menu::{CheckMenuItem, Menu, MenuEvent, MenuItem, PredefinedMenuItem},
    tray::{MouseButton, TrayIcon, TrayIconBuilder, TrayIconEvent},
    AppHandle, Manager, Runtime,
};

use super::state::AppShellState;
use super::window::{quit_app, toggle_main_window, MAIN_WINDOW_LABEL};

pub const TRAY_ID: &str = "main-tray";

/// 托盘菜单项 ID（设置项直接使用设置键作为 ID）
pub mod menu_ids {
    pub const TOGGLE_WINDOW: &str = "toggle_window";
    pub const QUIT: &str = "quit";
}

/// 托盘菜单中设置项的显示顺序
const SETTING_ITEMS: [SettingKey; 4] = [
    SettingKey::ShowNotifications,
    SettingKey::CloseToTray,
    SettingKey::StartInTray,
    SettingKey::ShowDevTools,
];

fn setting_label(key: SettingKey) -> &'static str {
    match key {
        SettingKey::ShowNotifications => "Show notifications",
        SettingKey::CloseToTray => "Close to tray",
        SettingKey::StartInTray => "Start in tray",
        SettingKey::ShowDevTools => "Show development tools",
    }
}

/// 创建系统托盘菜单，勾选状态取自当前设置
pub fn create_tray_menu<R: Runtime>(
    app: &AppHandle<R>,
    settings: &SettingsStore,
) -> tauri::Result<Menu<R>> {
    let toggle_item = MenuItem::with_id(
        app,
        menu_ids::TOGGLE_WINDOW,
        "Toggle window show/hide",
        true,
        None::<&str>,
    )?;
    let quit_item = MenuItem::with_id(app, menu_ids::QUIT, "Quit", true, None::<&str>)?;

    let menu = Menu::with_items(
        app,
        &[&toggle_item, &PredefinedMenuItem::separator(app)?],
    )?;
    for key in SETTING_ITEMS {
        let item = CheckMenuItem::with_id(
            app,
            key.as_str(),
            setting_label(key),
            true,
            settings.get(key),
            None::<&str>,
        )?;
        menu.append(&item)?;
    }
    menu.append(&PredefinedMenuItem::separator(app)?)?;
    menu.append(&quit_item)?;

    Ok(menu)
}

/// 设置系统托盘（包含事件处理）
pub fn setup_system_tray<R: Runtime>(app: &AppHandle<R>) -> AppResult<TrayIcon<R>> {
    let state = app.state::<AppShellState<R>>();
    let menu = create_tray_menu(app, &state.settings)?;

    let tray = TrayIconBuilder::with_id(TRAY_ID)
        .icon(state.icons.image(IconVariant::Loading))
        .tooltip(&state.config.branding.tray_tooltip)
        .menu(&menu)
        .show_menu_on_left_click(false)
        .on_menu_event(|app, event| handle_menu_event(app, event))
        .on_tray_icon_event(|tray, event| handle_tray_event(tray, event))
        .build(app)?;

    tracing::info!(tooltip = %state.config.branding.tray_tooltip, "系统托盘已创建");
    Ok(tray)
}

fn handle_menu_event<R: Runtime>(app: &AppHandle<R>, event: MenuEvent) {
    let id = event.id().as_ref();
    tracing::debug!(event_id = id, "托盘菜单事件");

    match id {
        menu_ids::TOGGLE_WINDOW => toggle_main_window(app),
        menu_ids::QUIT => quit_app(app),
        other => match SettingKey::from_id(other) {
            Some(key) => toggle_setting(app, key),
            None => tracing::warn!(event_id = other, "未知的托盘菜单项"),
        },
    }
}

/// 切换设置项；勾选框由菜单自身翻转，这里只负责持久化和副作用
fn toggle_setting<R: Runtime>(app: &AppHandle<R>, key: SettingKey) {
    let state = app.state::<AppShellState<R>>();
    let enabled = match state.settings.toggle(key) {
        Ok(enabled) => enabled,
        Err(e) => {
            tracing::error!(key = key.as_str(), error = ?e, "保存设置失败");
            return;
        }
    };
    tracing::info!(key = key.as_str(), enabled, "设置已切换");

    if key == SettingKey::ShowDevTools {
        match app.get_webview_window(MAIN_WINDOW_LABEL) {
            Some(window) if enabled => window.open_devtools(),
            Some(window) => window.close_devtools(),
            None => tracing::debug!("主窗口不存在，开发者工具将在下次创建窗口时生效"),
        }
    }
}

fn handle_tray_event<R: Runtime>(tray: &TrayIcon<R>, event: TrayIconEvent) {
    tracing::trace!(event = ?event, "托盘图标事件");
    if let TrayIconEvent::DoubleClick {
        button: MouseButton::Left,
        ..
    } = event
    {
        tracing::info!("托盘图标双击");
        toggle_main_window(tray.app_handle());
    }
}
