// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use wazapp::{reveal_main_window, AppShellState};

mod commands;
mod setup;

use commands::*;

fn main() {
    let context = match setup::initialize_app() {
        Ok(context) => context,
        Err(e) => {
            eprintln!("ERROR: 启动初始化失败: {e}");
            tracing::error!(error = %e, "启动初始化失败");
            std::process::exit(1);
        }
    };

    let shell_state = AppShellState::<tauri::Wry>::new(
        context.config,
        context.settings,
        context.capabilities,
        context.icons,
    );

    tauri::Builder::default()
        // 单实例插件必须最先注册：抢锁失败的进程在这里直接退出
        .plugin(tauri_plugin_single_instance::init(|app, argv, cwd| {
            tracing::info!(args = ?argv, cwd = %cwd, "检测到第二个实例，唤起已有窗口");
            reveal_main_window(app);
        }))
        .manage(shell_state)
        .setup(|app| {
            wazapp::setup_system_tray(app.handle())?;
            wazapp::create_main_window(app.handle())?;
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![notification_shim])
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(setup::handle_run_event);
}
