// 壳层配置结构：品牌信息、能力开关与日志配置
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// 日志输出目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Console,
    File,
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LogConfig {
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub output: LogOutput,
    /// 日志目录，None 时使用 `<config dir>/logs`
    #[serde(default)]
    pub file_path: Option<String>,
}

/// 品牌配置
///
/// 同一套壳层逻辑通过替换这份配置包装不同的网页客户端。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branding {
    /// 主窗口标题
    #[serde(default = "default_app_title")]
    pub app_title: String,
    /// 托盘图标悬停提示
    #[serde(default = "default_tray_tooltip")]
    pub tray_tooltip: String,
    /// 加载的远程页面地址
    #[serde(default = "default_url")]
    pub url: String,
    /// 远程页面要求桌面浏览器 UA，否则会拒绝服务
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// 初始窗口尺寸占主屏的比例
    #[serde(default = "default_window_scale")]
    pub window_scale: f64,
    /// 页面加载前的窗口背景色（`#rrggbb`）
    #[serde(default = "default_background_color")]
    pub background_color: String,
    /// 自定义图标；缺省项使用内置图标
    #[serde(default)]
    pub icons: IconPaths,
}

/// 托盘和窗口图标的 PNG 路径
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IconPaths {
    #[serde(default)]
    pub loading: Option<PathBuf>,
    #[serde(default)]
    pub idle: Option<PathBuf>,
    #[serde(default)]
    pub unread: Option<PathBuf>,
}

fn default_app_title() -> String {
    "WhatsApp".to_string()
}

fn default_tray_tooltip() -> String {
    "WazApp".to_string()
}

fn default_url() -> String {
    "https://web.whatsapp.com".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36".to_string()
}

fn default_window_scale() -> f64 {
    0.8
}

fn default_background_color() -> String {
    "#2c2c2c".to_string()
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            app_title: default_app_title(),
            tray_tooltip: default_tray_tooltip(),
            url: default_url(),
            user_agent: default_user_agent(),
            window_scale: default_window_scale(),
            background_color: default_background_color(),
            icons: IconPaths::default(),
        }
    }
}

impl Branding {
    /// 解析 `#rrggbb` 背景色，格式不对返回 None
    pub fn background_rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.background_color.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// 窗口比例限制在 (0.2, 1.0] 之间
    pub fn clamped_window_scale(&self) -> f64 {
        if self.window_scale.is_finite() {
            self.window_scale.clamp(0.2, 1.0)
        } else {
            default_window_scale()
        }
    }
}

/// 壳层全局配置（`config.json`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ShellConfig {
    #[serde(default)]
    pub branding: Branding,
    /// 标题未读数能力开关；None 表示按环境变量和平台默认值决定
    #[serde(default)]
    pub title_badge: Option<bool>,
    #[serde(default)]
    pub log_config: LogConfig,
}
