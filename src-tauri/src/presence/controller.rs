//! 托盘 / 窗口 / 角标同步状态机
//!
//! 控制器在主窗口创建时构造、窗口销毁时丢弃，不跨窗口重建保留任何状态。
//! 所有转换都是同步的本地状态更新，由宿主事件循环串行投递。

use super::capabilities::PresenceCapabilities;
use super::icon::{select_icon, IconVariant};
use super::title::{parse_unread_count, UnreadCount};
use crate::core::AppResult;

/// 控制器驱动的窗口与托盘操作
///
/// 由 `ui::TauriSurface` 在真实窗口上实现；测试中使用记录调用的假实现。
pub trait PresenceSurface {
    fn show(&self) -> AppResult<()>;
    fn hide(&self) -> AppResult<()>;
    fn focus(&self) -> AppResult<()>;
    /// 窗口标题跟随页面标题
    fn set_title(&self, title: &str) -> AppResult<()>;
    /// 同时设置托盘图标和窗口图标
    fn apply_icon(&self, variant: IconVariant) -> AppResult<()>;
    /// 请求整个应用退出
    fn request_exit(&self);
}

/// 关闭请求的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    /// 放行关闭，窗口将被销毁
    Proceed,
    /// 关闭被拦截，窗口已隐藏到托盘
    Suppressed,
}

/// 窗口生命周期内的展示状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresenceState {
    pub window_visible: bool,
    pub content_loaded: bool,
    pub unread: UnreadCount,
    pub quitting: bool,
}

impl PresenceState {
    pub fn icon(&self) -> IconVariant {
        select_icon(self.content_loaded, self.unread)
    }
}

pub struct PresenceController<S> {
    state: PresenceState,
    capabilities: PresenceCapabilities,
    surface: S,
}

impl<S: PresenceSurface> PresenceController<S> {
    /// 创建控制器并立即同步一次图标
    pub fn new(surface: S, capabilities: PresenceCapabilities, window_visible: bool) -> Self {
        let controller = Self {
            state: PresenceState {
                window_visible,
                content_loaded: false,
                unread: UnreadCount::Unknown,
                quitting: false,
            },
            capabilities,
            surface,
        };
        controller.sync_icon();
        controller
    }

    pub fn state(&self) -> PresenceState {
        self.state
    }

    /// 页面完成加载
    pub fn on_load_finished(&mut self) {
        self.state.content_loaded = true;
        tracing::debug!(unread = %self.state.unread, "页面加载完成");
        self.sync_icon();
    }

    /// 窗口标题变化
    ///
    /// 原生窗口标题总是跟随页面；未读数解析只在能力开启时进行。
    pub fn on_title_changed(&mut self, title: &str) {
        if let Err(e) = self.surface.set_title(title) {
            tracing::warn!(title, error = ?e, "更新窗口标题失败");
        }

        if !self.capabilities.title_badge {
            tracing::trace!(title, "标题未读数能力已关闭，忽略标题变化");
            return;
        }

        let unread = parse_unread_count(title);
        if unread != self.state.unread {
            tracing::debug!(previous = %self.state.unread, current = %unread, "未读数变化");
        }
        self.state.unread = unread;
        self.sync_icon();
    }

    /// 处理用户发起的关闭请求
    ///
    /// `close_to_tray` 每次都从设置中读取，不由状态持有。
    pub fn on_close_requested(&mut self, close_to_tray: bool) -> CloseDecision {
        if self.state.quitting {
            tracing::debug!("正在退出，放行窗口关闭");
            return CloseDecision::Proceed;
        }

        if !close_to_tray {
            tracing::info!("关闭到托盘未启用，窗口将被关闭");
            return CloseDecision::Proceed;
        }

        tracing::info!("拦截关闭请求，隐藏窗口到托盘");
        self.hide_window();
        CloseDecision::Suppressed
    }

    /// 托盘“显示/隐藏”切换
    pub fn toggle(&mut self) {
        if self.state.window_visible {
            self.hide_window();
        } else {
            self.reveal();
        }
    }

    /// 显示并聚焦窗口（二次启动、平台 activate 信号）
    pub fn reveal(&mut self) {
        match self.surface.show() {
            Ok(()) => self.state.window_visible = true,
            Err(e) => {
                tracing::error!(error = ?e, "显示窗口失败");
                return;
            }
        }
        if let Err(e) = self.surface.focus() {
            tracing::warn!(error = ?e, "设置窗口焦点失败");
        }
    }

    /// 退出：先置位 quitting，再请求退出，保证随后的关闭事件被放行
    pub fn quit(&mut self) {
        self.state.quitting = true;
        tracing::info!("用户请求退出应用");
        self.surface.request_exit();
    }

    fn hide_window(&mut self) {
        match self.surface.hide() {
            Ok(()) => self.state.window_visible = false,
            Err(e) => tracing::error!(error = ?e, "隐藏窗口失败"),
        }
    }

    fn sync_icon(&self) {
        let variant = self.state.icon();
        if let Err(e) = self.surface.apply_icon(variant) {
            // 图标更新尽力而为，失败不影响其他状态转换
            tracing::warn!(icon = variant.as_str(), error = ?e, "更新图标失败");
        }
    }
}
