// 远程页面桥接相关命令

use tauri::{State, Wry};
use wazapp::services::forward_notification;
use wazapp::{AppShellState, NotificationPayload, SettingKey};

/// 页面通知转发入口，返回是否放行原生通知
#[tauri::command]
pub fn notification_shim(
    state: State<'_, AppShellState<Wry>>,
    payload: NotificationPayload,
) -> bool {
    let allowed = state.settings.get(SettingKey::ShowNotifications);
    forward_notification(&payload, allowed)
}
