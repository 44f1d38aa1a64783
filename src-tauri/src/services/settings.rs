//! 用户设置存储
//!
//! 扁平的 key → bool JSON 文件。首次运行时为缺失的键写入默认值，
//! 之后每次修改立即落盘。

use crate::core::{AppError, AppResult};
use crate::utils::config::write_json_file;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// 设置键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SettingKey {
    ShowNotifications,
    CloseToTray,
    StartInTray,
    ShowDevTools,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::ShowNotifications,
        SettingKey::CloseToTray,
        SettingKey::StartInTray,
        SettingKey::ShowDevTools,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::ShowNotifications => "show_notifications",
            SettingKey::CloseToTray => "close_to_tray",
            SettingKey::StartInTray => "start_in_tray",
            SettingKey::ShowDevTools => "show_dev_tools",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == id)
    }

    /// 首次运行写入的默认值；开发者工具不写入，缺失即 false
    fn first_run_default(self) -> Option<bool> {
        match self {
            SettingKey::ShowDevTools => None,
            _ => Some(true),
        }
    }
}

/// 设置快照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppSettings {
    pub show_notifications: bool,
    pub close_to_tray: bool,
    pub start_in_tray: bool,
    pub show_dev_tools: bool,
}

pub struct SettingsStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, bool>>,
}

impl SettingsStore {
    /// 打开设置文件，补齐首次运行默认值
    ///
    /// 文件中的非布尔值会被忽略。文件损坏时备份为 `settings.json.bak`
    /// 并从默认值开始；默认值写盘失败只记录日志，本次运行仍使用内存中的值。
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut values = match read_values(&path) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(path = ?path, error = ?e, "设置文件无法解析，使用默认设置");
                backup_corrupt_file(&path);
                BTreeMap::new()
            }
        };

        let mut seeded = Vec::new();
        for key in SettingKey::ALL {
            if let Some(default) = key.first_run_default() {
                if !values.contains_key(key.as_str()) {
                    values.insert(key.as_str().to_string(), default);
                    seeded.push(key.as_str());
                }
            }
        }

        let store = Self {
            path,
            values: Mutex::new(values),
        };

        if !seeded.is_empty() {
            tracing::info!(keys = ?seeded, path = ?store.path, "写入首次运行默认设置");
            if let Err(e) = store.persist(&store.lock()) {
                tracing::warn!(path = ?store.path, error = ?e, "默认设置写盘失败");
            }
        }

        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: SettingKey) -> bool {
        self.lock().get(key.as_str()).copied().unwrap_or(false)
    }

    /// 修改并立即落盘；落盘失败时内存值回滚
    pub fn set(&self, key: SettingKey, value: bool) -> AppResult<()> {
        let mut values = self.lock();
        let previous = values.insert(key.as_str().to_string(), value);

        if let Err(e) = self.persist(&values) {
            match previous {
                Some(old) => values.insert(key.as_str().to_string(), old),
                None => values.remove(key.as_str()),
            };
            return Err(e);
        }

        tracing::debug!(key = key.as_str(), value, "设置已更新");
        Ok(())
    }

    /// 取反并返回新值
    pub fn toggle(&self, key: SettingKey) -> AppResult<bool> {
        let value = !self.get(key);
        self.set(key, value)?;
        Ok(value)
    }

    pub fn snapshot(&self) -> AppSettings {
        AppSettings {
            show_notifications: self.get(SettingKey::ShowNotifications),
            close_to_tray: self.get(SettingKey::CloseToTray),
            start_in_tray: self.get(SettingKey::StartInTray),
            show_dev_tools: self.get(SettingKey::ShowDevTools),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, bool>> {
        self.values.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn persist(&self, values: &BTreeMap<String, bool>) -> AppResult<()> {
        let object: Map<String, Value> = values
            .iter()
            .map(|(k, v)| (k.clone(), Value::Bool(*v)))
            .collect();
        write_json_file(&self.path, &Value::Object(object))
    }
}

fn backup_corrupt_file(path: &Path) {
    if !path.exists() {
        return;
    }
    let backup = path.with_extension("json.bak");
    match fs::rename(path, &backup) {
        Ok(()) => tracing::info!(backup = ?backup, "已备份损坏的设置文件"),
        Err(e) => tracing::warn!(path = ?path, error = ?e, "备份损坏的设置文件失败"),
    }
}

fn read_values(path: &Path) -> AppResult<BTreeMap<String, bool>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let content = fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let Value::Object(object) = serde_json::from_str::<Value>(&content)? else {
        return Err(AppError::Config(format!(
            "设置文件必须是 JSON 对象: {}",
            path.display()
        )));
    };

    let mut values = BTreeMap::new();
    for (key, value) in object {
        match value {
            Value::Bool(flag) => {
                values.insert(key, flag);
            }
            other => tracing::warn!(key = %key, value = %other, "忽略非布尔设置项"),
        }
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SettingsStore {
        SettingsStore::open(dir.path().join("settings.json"))
    }

    #[test]
    fn first_run_seeds_defaults() {
        let temp = TempDir::new().expect("create temp dir");
        let store = store_in(&temp);

        assert_eq!(
            store.snapshot(),
            AppSettings {
                show_notifications: true,
                close_to_tray: true,
                start_in_tray: true,
                show_dev_tools: false,
            }
        );
        let raw: Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["close_to_tray"], true);
        assert!(raw.get("show_dev_tools").is_none());
    }

    #[test]
    fn existing_values_are_not_overwritten() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("settings.json");
        fs::write(&path, r#"{"close_to_tray": false, "show_dev_tools": true}"#).unwrap();

        let store = SettingsStore::open(&path);
        assert!(!store.get(SettingKey::CloseToTray));
        assert!(store.get(SettingKey::ShowDevTools));
        assert!(store.get(SettingKey::StartInTray));
    }

    #[test]
    fn set_persists_across_reopen() {
        let temp = TempDir::new().expect("create temp dir");
        let store = store_in(&temp);
        store.set(SettingKey::StartInTray, false).unwrap();
        assert!(store.toggle(SettingKey::ShowDevTools).unwrap());
        drop(store);

        let reopened = store_in(&temp);
        assert!(!reopened.get(SettingKey::StartInTray));
        assert!(reopened.get(SettingKey::ShowDevTools));
    }

    #[test]
    fn non_bool_entries_are_ignored() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("settings.json");
        fs::write(&path, r#"{"close_to_tray": "yes"}"#).unwrap();

        let store = SettingsStore::open(&path);
        // 非布尔值被当作缺失，补上默认值
        assert!(store.get(SettingKey::CloseToTray));
    }

    #[test]
    fn non_object_file_falls_back_to_defaults() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("settings.json");
        fs::write(&path, "[true, false]").unwrap();

        let store = SettingsStore::open(&path);
        assert!(store.get(SettingKey::CloseToTray));
        assert!(!store.get(SettingKey::ShowDevTools));
        assert!(matches!(read_values(&path), Ok(values) if values.len() == 3));
    }

    #[test]
    fn truncated_file_is_backed_up_and_replaced() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("settings.json");
        fs::write(&path, "{ truncated").unwrap();

        let store = SettingsStore::open(&path);
        assert_eq!(
            store.snapshot(),
            AppSettings {
                show_notifications: true,
                close_to_tray: true,
                start_in_tray: true,
                show_dev_tools: false,
            }
        );

        let backup = temp.path().join("settings.json.bak");
        assert_eq!(fs::read_to_string(backup).unwrap(), "{ truncated");
        assert!(read_values(&path).is_ok());
    }

    #[test]
    fn unwritable_location_keeps_defaults_in_memory() {
        let temp = TempDir::new().expect("create temp dir");
        let blocker = temp.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        let store = SettingsStore::open(blocker.join("settings.json"));
        assert!(store.get(SettingKey::ShowNotifications));
        assert!(store.set(SettingKey::CloseToTray, false).is_err());
        assert!(store.get(SettingKey::CloseToTray));
    }

    #[test]
    fn key_ids_round_trip() {
        for key in SettingKey::ALL {
            assert_eq!(SettingKey::from_id(key.as_str()), Some(key));
        }
        assert_eq!(SettingKey::from_id("quit"), None);
    }
}
