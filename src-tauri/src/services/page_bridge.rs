//! 远程页面桥接脚本
//!
//! 页面每次导航都会执行初始化脚本：立即包装 `window.Notification`，
//! 把通知转发给 `notification_shim` 命令；DOM 就绪后注入自定义样式。

use serde::{Deserialize, Serialize};

/// 页面通知转发使用的命令名
pub const NOTIFICATION_SHIM_COMMAND: &str = "notification_shim";

const SCRIPT_TEMPLATE: &str = include_str!("../../assets/init.js");
const STYLESHEET: &str = include_str!("../../assets/styles.css");

const STYLE_PLACEHOLDER: &str = "{MY_CUSTOM_STYLE}";
const COMMAND_PLACEHOLDER: &str = "{NOTIFICATION_COMMAND}";

/// 页面转发过来的通知
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
}

/// 使用内置样式生成初始化脚本
pub fn build_init_script() -> String {
    render_init_script(SCRIPT_TEMPLATE, STYLESHEET)
}

/// 把样式表以 JS 模板字符串的形式填进脚本模板
pub fn render_init_script(template: &str, stylesheet: &str) -> String {
    template
        .replace(STYLE_PLACEHOLDER, &to_template_literal(stylesheet))
        .replace(COMMAND_PLACEHOLDER, NOTIFICATION_SHIM_COMMAND)
}

fn to_template_literal(raw: &str) -> String {
    let escaped = raw
        .replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${");
    format!("`{escaped}`")
}

/// 记录页面通知并返回是否放行原生通知
pub fn forward_notification(payload: &NotificationPayload, show_notifications: bool) -> bool {
    tracing::info!(
        title = %payload.title,
        body = ?payload.body,
        tag = ?payload.tag,
        allowed = show_notifications,
        "收到页面通知"
    );
    show_notifications
}
