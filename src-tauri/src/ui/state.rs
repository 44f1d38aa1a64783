use crate::models::ShellConfig;
use crate::presence::{PresenceCapabilities, PresenceController, PresenceSurface};
use crate::services::SettingsStore;
use std::sync::{Mutex, MutexGuard};

use super::icons::IconSet;
use super::surface::TauriSurface;

/// Tauri 托管的壳层状态
///
/// 控制器随主窗口创建 `attach`、随窗口销毁 `detach`；
/// 配置和设置在进程生命周期内共享。
pub struct ShellState<S> {
    pub config: ShellConfig,
    pub settings: SettingsStore,
    pub capabilities: PresenceCapabilities,
    pub icons: IconSet,
    presence: Mutex<Option<PresenceController<S>>>,
}

/// 真实运行时使用的状态类型
pub type AppShellState<R> = ShellState<TauriSurface<R>>;

impl<S: PresenceSurface> ShellState<S> {
    pub fn new(
        config: ShellConfig,
        settings: SettingsStore,
        capabilities: PresenceCapabilities,
        icons: IconSet,
    ) -> Self {
        Self {
            config,
            settings,
            capabilities,
            icons,
            presence: Mutex::new(None),
        }
    }

    /// 绑定新窗口的控制器，旧控制器（如果有）被丢弃
    pub fn attach(&self, controller: PresenceController<S>) {
        if self.lock().replace(controller).is_some() {
            tracing::warn!("替换了仍存活的展示控制器");
        }
    }

    /// 窗口销毁时丢弃控制器，返回之前是否存在
    pub fn detach(&self) -> bool {
        self.lock().take().is_some()
    }

    #[cfg(test)]
    pub fn is_attached(&self) -> bool {
        self.lock().is_some()
    }

    /// 在控制器上执行操作；窗口不存在时返回 None
    pub fn with_presence<T>(&self, f: impl FnOnce(&mut PresenceController<S>) -> T) -> Option<T> {
        self.lock().as_mut().map(f)
    }

    fn lock(&self) -> MutexGuard<'_, Option<PresenceController<S>>> {
        self.presence
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
