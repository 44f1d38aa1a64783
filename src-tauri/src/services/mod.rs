// 服务层模块
//
// - settings: 用户设置存储（key → bool）
// - page_bridge: 远程页面初始化脚本与通知转发

pub mod page_bridge;
pub mod settings;

pub use page_bridge::{build_init_script, forward_notification, NotificationPayload};
pub use settings::{AppSettings, SettingKey, SettingsStore};
