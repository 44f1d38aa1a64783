/// 覆盖标题未读数能力的环境变量（`1/true/on` 或 `0/false/off`）
pub const TITLE_BADGE_ENV: &str = "WAZAPP_TITLE_BADGE";

/// 启动时解析一次的平台能力
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresenceCapabilities {
    /// 是否信任窗口标题里的未读数
    pub title_badge: bool,
}

impl PresenceCapabilities {
    /// 解析顺序：配置文件 → 环境变量 → 平台默认值
    pub fn resolve(configured: Option<bool>) -> Self {
        let title_badge = configured
            .or_else(|| {
                std::env::var(TITLE_BADGE_ENV)
                    .ok()
                    .and_then(|raw| parse_flag(&raw))
            })
            .unwrap_or_else(platform_title_badge_default);

        Self { title_badge }
    }
}

impl Default for PresenceCapabilities {
    fn default() -> Self {
        Self {
            title_badge: platform_title_badge_default(),
        }
    }
}

/// 只有 Linux 上标题未读数是可靠的
fn platform_title_badge_default() -> bool {
    cfg!(target_os = "linux")
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    struct EnvGuard(Option<String>);

    impl EnvGuard {
        fn set(value: Option<&str>) -> Self {
            let previous = env::var(TITLE_BADGE_ENV).ok();
            match value {
                Some(v) => env::set_var(TITLE_BADGE_ENV, v),
                None => env::remove_var(TITLE_BADGE_ENV),
            }
            Self(previous)
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.0 {
                Some(v) => env::set_var(TITLE_BADGE_ENV, v),
                None => env::remove_var(TITLE_BADGE_ENV),
            }
        }
    }

    #[test]
    #[serial]
    fn configured_value_wins_over_env() {
        let _guard = EnvGuard::set(Some("0"));
        assert!(PresenceCapabilities::resolve(Some(true)).title_badge);
    }

    #[test]
    #[serial]
    fn env_override_applies_without_config() {
        let _guard = EnvGuard::set(Some("off"));
        assert!(!PresenceCapabilities::resolve(None).title_badge);

        env::set_var(TITLE_BADGE_ENV, "TRUE");
        assert!(PresenceCapabilities::resolve(None).title_badge);
    }

    #[test]
    #[serial]
    fn garbage_env_falls_back_to_platform() {
        let _guard = EnvGuard::set(Some("maybe"));
        assert_eq!(
            PresenceCapabilities::resolve(None).title_badge,
            cfg!(target_os = "linux")
        );
    }

    #[test]
    #[serial]
    fn default_matches_platform() {
        let _guard = EnvGuard::set(None);
        assert_eq!(
            PresenceCapabilities::resolve(None),
            PresenceCapabilities::default()
        );
    }
}
