use super::title::UnreadCount;

/// 托盘图标和窗口图标共用的三种状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconVariant {
    /// 页面尚未完成首次加载
    Loading,
    /// 已加载，无未读
    Idle,
    /// 已加载，有未读
    Unread,
}

impl IconVariant {
    pub const ALL: [IconVariant; 3] = [IconVariant::Loading, IconVariant::Idle, IconVariant::Unread];

    pub fn as_str(self) -> &'static str {
        match self {
            IconVariant::Loading => "loading",
            IconVariant::Idle => "idle",
            IconVariant::Unread => "unread",
        }
    }
}

/// 根据加载状态和未读数选择图标
pub fn select_icon(content_loaded: bool, unread: UnreadCount) -> IconVariant {
    if !content_loaded {
        IconVariant::Loading
    } else if unread.has_unread() {
        IconVariant::Unread
    } else {
        IconVariant::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTS: [UnreadCount; 4] = [
        UnreadCount::Unknown,
        UnreadCount::Known(0),
        UnreadCount::Known(1),
        UnreadCount::Known(5),
    ];

    #[test]
    fn test_not_loaded_is_always_loading() {
        for count in COUNTS {
            assert_eq!(select_icon(false, count), IconVariant::Loading, "{count}");
        }
    }

    #[test]
    fn test_loaded_table() {
        assert_eq!(select_icon(true, UnreadCount::Unknown), IconVariant::Idle);
        assert_eq!(select_icon(true, UnreadCount::Known(0)), IconVariant::Idle);
        assert_eq!(select_icon(true, UnreadCount::Known(1)), IconVariant::Unread);
        assert_eq!(select_icon(true, UnreadCount::Known(5)), IconVariant::Unread);
    }

    #[test]
    fn test_selection_is_deterministic() {
        for loaded in [false, true] {
            for count in COUNTS {
                assert_eq!(select_icon(loaded, count), select_icon(loaded, count));
            }
        }
    }
}
