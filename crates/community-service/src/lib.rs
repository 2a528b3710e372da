//! 校友社区服务
//!
//! 提供校友社区平台的 REST API：认证、课程与选课、论坛、活动报名，
//! 以及积分/徽章/排行榜等游戏化功能。徽章授予规则由 award-engine 提供，
//! 本服务负责快照聚合、原子落库和缓存管理。

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

pub use error::{ApiError, Result};
pub use state::AppState;
