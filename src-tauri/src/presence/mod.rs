//! 展示状态控制：窗口可见性、托盘/窗口图标与未读数

pub mod capabilities;
pub mod controller;
pub mod icon;
pub mod title;

pub use capabilities::{PresenceCapabilities, TITLE_BADGE_ENV};
pub use controller::{CloseDecision, PresenceController, PresenceState, PresenceSurface};
pub use icon::{select_icon, IconVariant};
pub use title::{parse_unread_count, UnreadCount};
