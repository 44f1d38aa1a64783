//! 从窗口标题提取未读消息数
//!
//! 网页客户端会把未读数写进标题，例如 `"(3) WhatsApp"`。

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static UNREAD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([0-9]+)\)").expect("invalid unread count regex"));

/// 最近一次解析到的未读数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnreadCount {
    /// 尚未观察到标题，或标题里没有数字
    #[default]
    Unknown,
    Known(u32),
}

impl UnreadCount {
    /// 是否存在未读消息（Unknown 按 0 处理）
    pub fn has_unread(self) -> bool {
        matches!(self, UnreadCount::Known(n) if n > 0)
    }
}

impl fmt::Display for UnreadCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnreadCount::Unknown => write!(f, "unknown"),
            UnreadCount::Known(n) => write!(f, "{n}"),
        }
    }
}

/// 解析标题中的第一个括号整数
///
/// 只认 ASCII 纯数字括号，`"(a) (12)"` 取 12；超出 u32 的数字饱和到 `u32::MAX`。
pub fn parse_unread_count(title: &str) -> UnreadCount {
    let Some(digits) = UNREAD_PATTERN
        .captures(title)
        .and_then(|captures| captures.get(1))
    else {
        return UnreadCount::Unknown;
    };

    match digits.as_str().parse::<u32>() {
        Ok(count) => UnreadCount::Known(count),
        Err(_) => UnreadCount::Known(u32::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_count() {
        assert_eq!(parse_unread_count("(3) Inbox"), UnreadCount::Known(3));
    }

    #[test]
    fn test_no_count_is_unknown() {
        assert_eq!(parse_unread_count("Inbox"), UnreadCount::Unknown);
        assert_eq!(parse_unread_count(""), UnreadCount::Unknown);
        assert_eq!(parse_unread_count("() Inbox"), UnreadCount::Unknown);
    }

    #[test]
    fn test_zero_count() {
        assert_eq!(parse_unread_count("(0) Inbox"), UnreadCount::Known(0));
    }

    #[test]
    fn test_first_numeric_group_wins() {
        assert_eq!(
            parse_unread_count("Has (a) and (12) numbers"),
            UnreadCount::Known(12)
        );
        assert_eq!(parse_unread_count("(4) chat (9)"), UnreadCount::Known(4));
    }

    #[test]
    fn test_count_anywhere_in_title() {
        assert_eq!(parse_unread_count("WhatsApp (27)"), UnreadCount::Known(27));
    }

    #[test]
    fn test_negative_like_input_is_ignored() {
        assert_eq!(parse_unread_count("(-2) Inbox"), UnreadCount::Unknown);
    }

    #[test]
    fn test_overflow_saturates() {
        assert_eq!(
            parse_unread_count("(99999999999999999999) Inbox"),
            UnreadCount::Known(u32::MAX)
        );
    }

    #[test]
    fn test_non_ascii_digits_are_not_counts() {
        assert_eq!(parse_unread_count("(٣) WhatsApp"), UnreadCount::Unknown);
        assert_eq!(parse_unread_count("(１２) WhatsApp"), UnreadCount::Unknown);
        assert_eq!(parse_unread_count("(٣) WhatsApp (2)"), UnreadCount::Known(2));
    }

    #[test]
    fn test_has_unread() {
        assert!(!UnreadCount::Unknown.has_unread());
        assert!(!UnreadCount::Known(0).has_unread());
        assert!(UnreadCount::Known(1).has_unread());
    }
}
