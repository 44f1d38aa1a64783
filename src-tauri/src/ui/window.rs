use crate::core::{AppError, AppResult};
use crate::models::Branding;
use crate::presence::{CloseDecision, IconVariant, PresenceController};
use crate::services::{build_init_script, SettingKey};
use tauri::webview::PageLoadEvent;
use tauri::window::Color;
use tauri::{
    AppHandle, Manager, Runtime, Url, WebviewUrl, WebviewWindow, WebviewWindowBuilder, WindowEvent,
};

use super::state::AppShellState;
use super::surface::TauriSurface;

pub const MAIN_WINDOW_LABEL: &str = "main";

/// 主屏信息不可用时的窗口尺寸
const FALLBACK_SIZE: (f64, f64) = (1280.0, 800.0);

/// 创建主窗口并绑定新的展示控制器
///
/// 窗口可见性取决于 `start_in_tray`；开发者工具设置开启时同时打开 devtools。
pub fn create_main_window<R: Runtime>(app: &AppHandle<R>) -> AppResult<WebviewWindow<R>> {
    let state = app.state::<AppShellState<R>>();
    let branding = &state.config.branding;
    let settings = state.settings.snapshot();

    let url = Url::parse(&branding.url).map_err(|source| AppError::InvalidUrl {
        url: branding.url.clone(),
        source,
    })?;
    let (width, height) = initial_window_size(app, branding);
    let visible = !settings.start_in_tray;

    let mut builder =
        WebviewWindowBuilder::new(app, MAIN_WINDOW_LABEL, WebviewUrl::External(url))
            .title(&branding.app_title)
            .inner_size(width, height)
            .visible(visible)
            .user_agent(&branding.user_agent)
            .initialization_script(&build_init_script())
            .icon(state.icons.image(IconVariant::Loading))?
            .on_page_load(|window, payload| match payload.event() {
                PageLoadEvent::Started => {
                    tracing::debug!(url = %payload.url(), "页面开始加载");
                }
                PageLoadEvent::Finished => {
                    tracing::info!(url = %payload.url(), "页面加载完成");
                    let state = window.state::<AppShellState<R>>();
                    state.with_presence(|presence| presence.on_load_finished());
                }
            })
            .on_document_title_changed(|window, title| {
                let state = window.state::<AppShellState<R>>();
                state.with_presence(|presence| presence.on_title_changed(&title));
            });

    if let Some((r, g, b)) = branding.background_rgb() {
        builder = builder.background_color(Color(r, g, b, 255));
    }

    let window = builder.build()?;

    let handle = app.clone();
    window.on_window_event(move |event| handle_window_event(&handle, event));

    state.attach(PresenceController::new(
        TauriSurface::new(app.clone(), MAIN_WINDOW_LABEL),
        state.capabilities,
        visible,
    ));

    if settings.show_dev_tools {
        window.open_devtools();
    }

    tracing::info!(
        url = %branding.url,
        width,
        height,
        visible,
        title_badge = state.capabilities.title_badge,
        "主窗口已创建"
    );

    Ok(window)
}

fn handle_window_event<R: Runtime>(app: &AppHandle<R>, event: &WindowEvent) {
    match event {
        WindowEvent::CloseRequested { api, .. } => {
            let state = app.state::<AppShellState<R>>();
            let close_to_tray = state.settings.get(SettingKey::CloseToTray);
            let decision = state
                .with_presence(|presence| presence.on_close_requested(close_to_tray))
                .unwrap_or(CloseDecision::Proceed);

            if decision == CloseDecision::Suppressed {
                api.prevent_close();
            }
        }
        WindowEvent::Destroyed => {
            let state = app.state::<AppShellState<R>>();
            if state.detach() {
                tracing::info!("主窗口已销毁，展示状态已丢弃");
            }
        }
        _ => {}
    }
}

/// 按主屏工作区逻辑尺寸和品牌比例计算初始窗口大小
fn initial_window_size<R: Runtime>(app: &AppHandle<R>, branding: &Branding) -> (f64, f64) {
    let scale = branding.clamped_window_scale();
    match app.primary_monitor() {
        Ok(Some(monitor)) => {
            let size = monitor
                .work_area()
                .size
                .to_logical::<f64>(monitor.scale_factor());
            (size.width * scale, size.height * scale)
        }
        Ok(None) => FALLBACK_SIZE,
        Err(e) => {
            tracing::warn!(error = ?e, "获取主屏信息失败，使用默认窗口尺寸");
            FALLBACK_SIZE
        }
    }
}

/// 托盘切换显示/隐藏；窗口已被销毁时重新创建
pub fn toggle_main_window<R: Runtime>(app: &AppHandle<R>) {
    let state = app.state::<AppShellState<R>>();
    if state.with_presence(|presence| presence.toggle()).is_none() {
        recreate_main_window(app);
    }
}

/// 显示并聚焦主窗口（二次启动、Dock 重新激活）
pub fn reveal_main_window<R: Runtime>(app: &AppHandle<R>) {
    let state = app.state::<AppShellState<R>>();
    if state.with_presence(|presence| presence.reveal()).is_none() {
        recreate_main_window(app);
    }
}

/// 托盘退出
pub fn quit_app<R: Runtime>(app: &AppHandle<R>) {
    let state = app.state::<AppShellState<R>>();
    if state.with_presence(|presence| presence.quit()).is_none() {
        tracing::info!("主窗口不存在，直接退出");
        app.exit(0);
    }
}

fn recreate_main_window<R: Runtime>(app: &AppHandle<R>) {
    tracing::info!("主窗口不存在，重新创建");
    match create_main_window(app) {
        Ok(window) => {
            // start_in_tray 会让新窗口默认隐藏，这里是用户主动唤起，需要显示
            let state = window.state::<AppShellState<R>>();
            state.with_presence(|presence| presence.reveal());
        }
        Err(e) => tracing::error!(error = ?e, "重新创建主窗口失败"),
    }
}

/// 显示窗口并取消最小化（macOS 同时恢复 Dock 图标）
pub fn show_window<R: Runtime>(window: &WebviewWindow<R>) -> AppResult<()> {
    tracing::debug!(
        is_visible = ?window.is_visible(),
        is_minimized = ?window.is_minimized(),
        "显示窗口"
    );

    #[cfg(target_os = "macos")]
    set_dock_visible(true);

    window.show()?;
    if window.is_minimized().unwrap_or(false) {
        window.unminimize()?;
    }

    #[cfg(target_os = "macos")]
    #[allow(deprecated)]
    unsafe {
        use cocoa::appkit::NSApplication;
        use cocoa::base::nil;
        use objc::runtime::YES;

        NSApplication::sharedApplication(nil).activateIgnoringOtherApps_(YES);
    }

    Ok(())
}

/// 隐藏窗口到系统托盘（macOS 同时隐藏 Dock 图标）
pub fn hide_window_to_tray<R: Runtime>(window: &WebviewWindow<R>) -> AppResult<()> {
    tracing::info!("隐藏窗口到系统托盘");
    window.hide()?;

    #[cfg(target_os = "macos")]
    set_dock_visible(false);

    Ok(())
}

/// 切换 Dock 图标：Regular 显示，Accessory 只保留托盘
#[cfg(target_os = "macos")]
#[allow(deprecated)]
fn set_dock_visible(visible: bool) {
    use cocoa::appkit::{NSApplication, NSApplicationActivationPolicy};
    use cocoa::base::nil;
    use cocoa::foundation::NSAutoreleasePool;

    let policy = if visible {
        NSApplicationActivationPolicy::NSApplicationActivationPolicyRegular
    } else {
        NSApplicationActivationPolicy::NSApplicationActivationPolicyAccessory
    };

    unsafe {
        let _pool = NSAutoreleasePool::new(nil);
        NSApplication::sharedApplication(nil).setActivationPolicy_(policy);
    }
}
