//! 统一错误处理模块
//!
//! 定义基础设施层共享的错误类型，使用 thiserror 提供良好的错误信息。

use thiserror::Error;

/// 基础设施与通用业务错误类型
#[derive(Debug, Error)]
pub enum CommunityError {
    // ==================== 数据库错误 ====================
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("记录未找到: {entity} id={id}")]
    NotFound { entity: String, id: String },

    #[error("记录已存在: {entity} {field}={value}")]
    AlreadyExists {
        entity: String,
        field: String,
        value: String,
    },

    // ==================== 缓存错误 ====================
    #[error("Redis 错误: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("缓存未命中: {key}")]
    CacheMiss { key: String },

    // ==================== 业务逻辑错误 ====================
    #[error("活动已满员: event_id={event_id}")]
    EventFull { event_id: String },

    #[error("徽章目录中不存在: {badge_id}")]
    UnknownBadge { badge_id: String },

    // ==================== 验证错误 ====================
    #[error("参数验证失败: {0}")]
    Validation(String),

    // ==================== 权限错误 ====================
    #[error("未授权访问")]
    Unauthorized,

    // ==================== 通用错误 ====================
    #[error("内部错误: {0}")]
    Internal(String),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, CommunityError>;

impl CommunityError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Database(_) => "DATABASE_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::AlreadyExists { .. } => "ALREADY_EXISTS",
            Self::Redis(_) => "REDIS_ERROR",
            Self::CacheMiss { .. } => "CACHE_MISS",
            Self::EventFull { .. } => "EVENT_FULL",
            Self::UnknownBadge { .. } => "UNKNOWN_BADGE",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 是否为可重试错误
    ///
    /// 仅基础设施层的瞬时故障可重试，业务逻辑错误重试没有意义。
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Redis(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        let err = CommunityError::NotFound {
            entity: "User".to_string(),
            id: "abc".to_string(),
        };
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn test_is_retryable() {
        let db_err = CommunityError::Database(sqlx::Error::PoolTimedOut);
        assert!(db_err.is_retryable());

        let full = CommunityError::EventFull {
            event_id: "evt-1".to_string(),
        };
        assert!(!full.is_retryable());

        let validation = CommunityError::Validation("bad input".to_string());
        assert!(!validation.is_retryable());
    }
}
