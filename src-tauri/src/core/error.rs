//! 统一错误类型定义
//!
//! 使用 `thiserror` 定义壳层所有可传播的错误，并通过 `AppResult` 与 `anyhow` 互通。

use std::path::PathBuf;
use thiserror::Error;

/// 应用统一错误类型
#[derive(Error, Debug)]
pub enum AppError {
    /// 文件 I/O 错误
    #[error("文件 I/O 错误: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON 序列化/反序列化错误
    #[error("JSON 序列化错误: {0}")]
    Json(#[from] serde_json::Error),

    /// Tauri 运行时错误
    #[error("Tauri 错误: {0}")]
    Tauri(#[from] tauri::Error),

    /// 远程页面地址无效
    #[error("无效的页面地址: {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// 图标资源加载或设置失败
    #[error("图标更新失败: {0}")]
    Icon(String),

    /// 窗口不存在（已被销毁或尚未创建）
    #[error("未找到窗口: {0}")]
    WindowNotFound(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

impl AppError {
    /// 从 `std::io::Error` 和路径创建 I/O 错误
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
