//! # 产品服务
//!
//! 基于 SQLite 产品表的纯文本 HTTP 前端：
//! - `/select`、`/insert`、`/update`、`/delete`、`/deleteAll` 五个路由
//! - 参数全部来自 URL 查询字符串
//! - 数据库连接池在启动时创建，通过路由状态显式传递

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::{create_router, AppState};
pub use config::{Config, ConfigError};
