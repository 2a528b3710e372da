//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use sqlx::PgPool;

use alumni_shared::cache::Cache;

use crate::auth::{JwtConfig, JwtManager};
use crate::service::AwardService;

/// Axum 应用共享状态
///
/// 包含数据库连接池、缓存客户端、JWT 管理器和徽章授予服务，
/// 通过 Arc 在 handler 间共享
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL 连接池
    pub pool: PgPool,
    /// Redis 缓存客户端
    pub cache: Arc<Cache>,
    /// JWT 管理器
    pub jwt_manager: Arc<JwtManager>,
    /// 徽章授予服务
    pub award_service: Arc<AwardService>,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(
        pool: PgPool,
        cache: Arc<Cache>,
        jwt_config: JwtConfig,
        award_service: Arc<AwardService>,
    ) -> Self {
        Self {
            pool,
            cache,
            jwt_manager: Arc::new(JwtManager::new(jwt_config)),
            award_service,
        }
    }
}
