use crate::core::{AppError, AppResult};
use crate::models::ShellConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// 覆盖配置目录的环境变量（测试和便携模式使用）
pub const CONFIG_DIR_ENV: &str = "WAZAPP_CONFIG_DIR";

const CONFIG_FILE: &str = "config.json";
const SETTINGS_FILE: &str = "settings.json";

/// WazApp 配置目录（默认 ~/.wazapp），若不存在则创建
pub fn config_dir() -> AppResult<PathBuf> {
    let dir = match std::env::var_os(CONFIG_DIR_ENV) {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => dirs::home_dir()
            .ok_or_else(|| AppError::Config("无法获取用户主目录".to_string()))?
            .join(".wazapp"),
    };
    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(|e| AppError::io(&dir, e))?;
    }
    Ok(dir)
}

/// 壳层配置文件路径
pub fn shell_config_path() -> AppResult<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// 用户设置文件路径
pub fn settings_path() -> AppResult<PathBuf> {
    Ok(config_dir()?.join(SETTINGS_FILE))
}

/// 读取壳层配置（若文件不存在返回 Ok(None)）
pub fn read_shell_config_from(path: &Path) -> AppResult<Option<ShellConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
    let config: ShellConfig = serde_json::from_str(&content)?;
    Ok(Some(config))
}

/// 读取默认位置的壳层配置，文件缺失时返回默认配置
pub fn load_shell_config() -> AppResult<ShellConfig> {
    let path = shell_config_path()?;
    Ok(read_shell_config_from(&path)?.unwrap_or_default())
}

/// 写入 JSON 并收紧权限（Unix 0o600）
pub fn write_json_file(path: &Path, value: &serde_json::Value) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
    }
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content).map_err(|e| AppError::io(path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)
            .map_err(|e| AppError::io(path, e))?
            .permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms).map_err(|e| AppError::io(path, e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tempfile::TempDir;

    struct ConfigDirGuard {
        previous: Option<std::ffi::OsString>,
    }

    impl ConfigDirGuard {
        fn new(dir: &Path) -> Self {
            let previous = env::var_os(CONFIG_DIR_ENV);
            env::set_var(CONFIG_DIR_ENV, dir);
            Self { previous }
        }
    }

    impl Drop for ConfigDirGuard {
        fn drop(&mut self) {
            match &self.previous {
                Some(val) => env::set_var(CONFIG_DIR_ENV, val),
                None => env::remove_var(CONFIG_DIR_ENV),
            }
        }
    }

    #[test]
    #[serial]
    fn config_dir_honors_env_override_and_creates_it() {
        let temp = TempDir::new().expect("create temp dir");
        let target = temp.path().join("portable");
        let _guard = ConfigDirGuard::new(&target);

        let dir = config_dir().expect("config dir");
        assert_eq!(dir, target);
        assert!(target.is_dir());
        assert_eq!(settings_path().unwrap(), target.join("settings.json"));
    }

    #[test]
    #[serial]
    fn load_shell_config_defaults_when_missing() {
        let temp = TempDir::new().expect("create temp dir");
        let _guard = ConfigDirGuard::new(temp.path());

        let config = load_shell_config().expect("load config");
        assert_eq!(config, ShellConfig::default());
    }

    #[test]
    fn read_shell_config_reports_broken_json() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_shell_config_from(&path).unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
    }

    #[test]
    fn write_json_file_creates_parent() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("a").join("b.json");
        write_json_file(&path, &serde_json::json!({"k": true})).unwrap();

        let back: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back["k"], true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }
}
