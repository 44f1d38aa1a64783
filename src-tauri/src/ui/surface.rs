use crate::core::{AppError, AppResult};
use crate::presence::{IconVariant, PresenceSurface};
use tauri::{AppHandle, Manager, Runtime, WebviewWindow};

use super::state::AppShellState;
use super::tray::TRAY_ID;
use super::window::{hide_window_to_tray, show_window};

/// 基于 Tauri 窗口和托盘的展示面
pub struct TauriSurface<R: Runtime> {
    app: AppHandle<R>,
    label: String,
}

impl<R: Runtime> TauriSurface<R> {
    pub fn new(app: AppHandle<R>, label: impl Into<String>) -> Self {
        Self {
            app,
            label: label.into(),
        }
    }

    fn window(&self) -> AppResult<WebviewWindow<R>> {
        self.app
            .get_webview_window(&self.label)
            .ok_or_else(|| AppError::WindowNotFound(self.label.clone()))
    }
}

impl<R: Runtime> PresenceSurface for TauriSurface<R> {
    fn show(&self) -> AppResult<()> {
        show_window(&self.window()?)
    }

    fn hide(&self) -> AppResult<()> {
        hide_window_to_tray(&self.window()?)
    }

    fn focus(&self) -> AppResult<()> {
        self.window()?.set_focus()?;
        Ok(())
    }

    fn set_title(&self, title: &str) -> AppResult<()> {
        self.window()?.set_title(title)?;
        Ok(())
    }

    /// 托盘和窗口都会尝试设置，返回第一个失败
    fn apply_icon(&self, variant: IconVariant) -> AppResult<()> {
        let image = self.app.state::<AppShellState<R>>().icons.image(variant);

        let tray_result = match self.app.tray_by_id(TRAY_ID) {
            Some(tray) => tray.set_icon(Some(image.clone())).map_err(AppError::from),
            None => Err(AppError::Icon(format!("托盘 {TRAY_ID} 不存在"))),
        };
        let window_result = self
            .window()
            .and_then(|window| window.set_icon(image).map_err(AppError::from));

        tracing::trace!(icon = variant.as_str(), "同步托盘和窗口图标");
        tray_result.and(window_result)
    }

    fn request_exit(&self) {
        self.app.exit(0);
    }
}
