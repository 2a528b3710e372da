//! 论坛模型

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// 论坛主贴
#[derive(Debug, Clone, FromRow)]
pub struct Thread {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub body: String,
    pub category: String,
    /// 冗余计数，随回复追加同事务维护
    pub reply_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 论坛回复
#[derive(Debug, Clone, FromRow)]
pub struct Reply {
    pub id: Uuid,
    pub thread_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}
