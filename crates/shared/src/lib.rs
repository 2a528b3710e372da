//! 共享库
//!
//! 包含社区服务共用的配置、错误处理、数据库连接、缓存、重试等基础设施代码。

pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod observability;
pub mod retry;
