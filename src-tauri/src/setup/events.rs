use tauri::{AppHandle, RunEvent, Runtime};

/// 处理应用级运行事件
///
/// - macOS 上最后一个窗口关闭不退出应用（留在 Dock/托盘）
/// - macOS Dock 重新激活时唤起主窗口
#[cfg_attr(not(target_os = "macos"), allow(unused_variables))]
pub fn handle_run_event<R: Runtime>(app: &AppHandle<R>, event: RunEvent) {
    match event {
        RunEvent::ExitRequested { code, api, .. } => {
            if keeps_running_after_exit_request(code) {
                tracing::debug!("所有窗口已关闭，macOS 上保持应用运行");
                api.prevent_exit();
            } else {
                tracing::info!(code = ?code, "应用即将退出");
            }
        }
        #[cfg(target_os = "macos")]
        RunEvent::Reopen { .. } => {
            tracing::info!("macOS Reopen 事件");
            wazapp::reveal_main_window(app);
        }
        _ => {}
    }
}

/// code 为 None 表示由窗口全部关闭触发，而不是显式 exit
fn keeps_running_after_exit_request(code: Option<i32>) -> bool {
    code.is_none() && cfg!(target_os = "macos")
}
