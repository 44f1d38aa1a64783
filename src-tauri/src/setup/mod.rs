// 启动初始化逻辑
pub mod initialization;

// 应用级运行事件
pub mod events;

// 重新导出常用函数供 main.rs 使用
pub use events::handle_run_event;
pub use initialization::initialize_app;
