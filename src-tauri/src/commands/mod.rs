pub mod bridge_commands;

// 重新导出所有命令函数
pub use bridge_commands::*;
