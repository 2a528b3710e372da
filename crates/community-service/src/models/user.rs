//! 用户模型

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// 用户记录
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    /// 累计积分，只通过带账本流水的原子更新修改
    pub points: i64,
    pub last_daily_login_at: Option<DateTime<Utc>>,
    pub failed_login_attempts: i32,
    pub locked_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// 显示名称
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// 用户持有的徽章记录
///
/// (user_id, badge_id) 唯一约束是防止重复授予的最终防线
#[derive(Debug, Clone, FromRow)]
pub struct UserBadge {
    pub id: i64,
    pub user_id: Uuid,
    pub badge_id: String,
    pub granted_at: DateTime<Utc>,
}
