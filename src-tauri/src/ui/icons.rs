use crate::core::{AppError, AppResult};
use crate::models::IconPaths;
use crate::presence::IconVariant;
use std::fs;
use std::path::Path;
use tauri::image::Image;

const ICON_LOADING: &[u8] = include_bytes!("../../icons/icon-load.png");
const ICON_IDLE: &[u8] = include_bytes!("../../icons/icon.png");
const ICON_UNREAD: &[u8] = include_bytes!("../../icons/icon-msg.png");

/// 内置图标资源（编译期嵌入）
pub fn icon_bytes(variant: IconVariant) -> &'static [u8] {
    match variant {
        IconVariant::Loading => ICON_LOADING,
        IconVariant::Idle => ICON_IDLE,
        IconVariant::Unread => ICON_UNREAD,
    }
}

fn decode(variant: IconVariant, bytes: &[u8]) -> AppResult<Image<'static>> {
    Image::from_bytes(bytes)
        .map_err(|e| AppError::Icon(format!("{} 图标解码失败: {e}", variant.as_str())))
}

fn read_custom(variant: IconVariant, path: &Path) -> AppResult<Image<'static>> {
    let bytes = fs::read(path).map_err(|e| AppError::io(path, e))?;
    decode(variant, &bytes)
}

/// 启动时解码好的图标集合，托盘和窗口共用
///
/// 品牌配置里的自定义图标读取或解码失败时回退到内置图标。
#[derive(Clone)]
pub struct IconSet {
    loading: Image<'static>,
    idle: Image<'static>,
    unread: Image<'static>,
}

impl IconSet {
    pub fn load(paths: &IconPaths) -> AppResult<Self> {
        Ok(Self {
            loading: load_variant(IconVariant::Loading, paths.loading.as_deref())?,
            idle: load_variant(IconVariant::Idle, paths.idle.as_deref())?,
            unread: load_variant(IconVariant::Unread, paths.unread.as_deref())?,
        })
    }

    pub fn image(&self, variant: IconVariant) -> Image<'static> {
        match variant {
            IconVariant::Loading => self.loading.clone(),
            IconVariant::Idle => self.idle.clone(),
            IconVariant::Unread => self.unread.clone(),
        }
    }
}

fn load_variant(variant: IconVariant, custom: Option<&Path>) -> AppResult<Image<'static>> {
    if let Some(path) = custom {
        match read_custom(variant, path) {
            Ok(image) => {
                tracing::debug!(icon = variant.as_str(), path = ?path, "使用自定义图标");
                return Ok(image);
            }
            Err(e) => {
                tracing::warn!(
                    icon = variant.as_str(),
                    path = ?path,
                    error = ?e,
                    "自定义图标不可用，使用内置图标"
                );
            }
        }
    }
    decode(variant, icon_bytes(variant))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn embedded(variant: IconVariant) -> Image<'static> {
        decode(variant, icon_bytes(variant)).expect("embedded icon must decode")
    }

    fn same_pixels(a: &Image<'_>, b: &Image<'_>) -> bool {
        a.width() == b.width() && a.height() == b.height() && a.rgba() == b.rgba()
    }

    #[test]
    fn test_every_variant_decodes() {
        let icons = IconSet::load(&IconPaths::default()).expect("load icons");
        for variant in IconVariant::ALL {
            let image = icons.image(variant);
            assert!(image.width() > 0 && image.height() > 0);
            assert!(same_pixels(&image, &embedded(variant)));
        }
    }

    #[test]
    fn test_variants_use_distinct_assets() {
        assert_ne!(icon_bytes(IconVariant::Loading), icon_bytes(IconVariant::Idle));
        assert_ne!(icon_bytes(IconVariant::Idle), icon_bytes(IconVariant::Unread));
    }

    #[test]
    fn test_custom_icon_overrides_embedded() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("brand-idle.png");
        fs::write(&path, ICON_UNREAD).unwrap();

        let icons = IconSet::load(&IconPaths {
            idle: Some(path),
            ..IconPaths::default()
        })
        .expect("load icons");

        assert!(same_pixels(
            &icons.image(IconVariant::Idle),
            &embedded(IconVariant::Unread)
        ));
        assert!(same_pixels(
            &icons.image(IconVariant::Loading),
            &embedded(IconVariant::Loading)
        ));
    }

    #[test]
    fn test_broken_custom_icons_fall_back() {
        let temp = TempDir::new().expect("create temp dir");
        let garbage = temp.path().join("garbage.png");
        fs::write(&garbage, b"not a png").unwrap();

        let icons = IconSet::load(&IconPaths {
            loading: Some(temp.path().join("missing.png")),
            unread: Some(garbage),
            ..IconPaths::default()
        })
        .expect("load icons");

        assert!(same_pixels(
            &icons.image(IconVariant::Loading),
            &embedded(IconVariant::Loading)
        ));
        assert!(same_pixels(
            &icons.image(IconVariant::Unread),
            &embedded(IconVariant::Unread)
        ));
    }
}
