use wazapp::core::init_logger;
use wazapp::utils::config::{load_shell_config, settings_path};
use wazapp::ui::IconSet;
use wazapp::{PresenceCapabilities, SettingsStore, ShellConfig};

/// 启动初始化上下文
///
/// 包含创建托盘和主窗口前需要准备好的配置与设置
pub struct InitializationContext {
    pub config: ShellConfig,
    pub settings: SettingsStore,
    pub capabilities: PresenceCapabilities,
    pub icons: IconSet,
}

/// 读取壳层配置并初始化日志系统
///
/// 配置读取失败时使用默认配置继续启动
fn init_logging() -> ShellConfig {
    let (config, config_error) = match load_shell_config() {
        Ok(config) => (config, None),
        Err(e) => (ShellConfig::default(), Some(e)),
    };

    if let Err(e) = init_logger(&config.log_config) {
        // 日志系统初始化失败时使用 eprintln!（因为 tracing 还不可用）
        eprintln!("WARNING: Failed to initialize logging system: {}", e);
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "WazApp 应用启动");
    if let Some(e) = config_error {
        tracing::warn!(error = ?e, "读取壳层配置失败，使用默认配置");
    }

    config
}

/// 执行所有启动初始化任务
///
/// 按顺序执行：配置 + 日志 → 设置 → 能力解析 → 图标。
/// 配置、设置和自定义图标读取失败都回退到默认值；只有内置图标无法解码时才返回错误。
pub fn initialize_app() -> Result<InitializationContext, Box<dyn std::error::Error>> {
    let config = init_logging();

    let path = settings_path().unwrap_or_else(|e| {
        let fallback = std::env::temp_dir().join("wazapp").join("settings.json");
        tracing::warn!(error = ?e, fallback = ?fallback, "配置目录不可用，设置改存临时目录");
        fallback
    });
    let settings = SettingsStore::open(path);
    tracing::info!(settings = ?settings.snapshot(), path = ?settings.path(), "用户设置已加载");

    let capabilities = PresenceCapabilities::resolve(config.title_badge);
    tracing::info!(title_badge = capabilities.title_badge, "平台能力已解析");

    let icons = IconSet::load(&config.branding.icons)?;

    Ok(InitializationContext {
        config,
        settings,
        capabilities,
        icons,
    })
}
