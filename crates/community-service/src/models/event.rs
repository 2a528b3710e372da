//! 活动与报名模型

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// 活动记录
#[derive(Debug, Clone, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    /// 容量上限，NULL 表示不限
    pub capacity: Option<i32>,
    /// 冗余计数，报名/取消在同一事务内维护
    pub attendee_count: i32,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// 是否已满员
    pub fn is_full(&self) -> bool {
        match self.capacity {
            Some(cap) => self.attendee_count >= cap,
            None => false,
        }
    }
}

/// 报名记录
#[derive(Debug, Clone, FromRow)]
pub struct EventAttendee {
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub rsvp_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_full() {
        let mut event = Event {
            id: Uuid::new_v4(),
            title: "校友年会".to_string(),
            description: None,
            location: None,
            starts_at: Utc::now(),
            capacity: Some(2),
            attendee_count: 1,
            created_at: Utc::now(),
        };
        assert!(!event.is_full());

        event.attendee_count = 2;
        assert!(event.is_full());

        // 无容量限制永不满员
        event.capacity = None;
        assert!(!event.is_full());
    }
}
