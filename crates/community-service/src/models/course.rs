//! 课程与选课模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

/// 课时定义
///
/// 课时作为 JSONB 数组内嵌在课程记录中，课时 ID 在课程内唯一
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub title: String,
    /// 时长（分钟）
    pub duration_minutes: i32,
    pub video_url: Option<String>,
}

/// 课程记录
#[derive(Debug, Clone, FromRow)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub instructor_id: Uuid,
    pub lessons: Json<Vec<Lesson>>,
    pub enrolled_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// 课程总课时数
    pub fn lesson_count(&self) -> usize {
        self.lessons.0.len()
    }

    /// 课程内是否存在指定课时
    pub fn has_lesson(&self, lesson_id: &str) -> bool {
        self.lessons.0.iter().any(|l| l.id == lesson_id)
    }
}

/// 选课记录
///
/// progress 由已完成课时数与课程总课时数推导，达到 100 即视为完课
#[derive(Debug, Clone, FromRow)]
pub struct Enrollment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    /// 已完成的课时 ID 列表
    pub completed_lessons: Vec<String>,
    pub progress: i32,
    pub current_lesson: Option<String>,
    pub enrolled_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Enrollment {
    pub fn is_completed(&self) -> bool {
        self.progress >= 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_lesson() {
        let course = Course {
            id: Uuid::new_v4(),
            title: "Rust 入门".to_string(),
            description: None,
            category: "engineering".to_string(),
            instructor_id: Uuid::new_v4(),
            lessons: Json(vec![Lesson {
                id: "l1".to_string(),
                title: "所有权".to_string(),
                duration_minutes: 30,
                video_url: None,
            }]),
            enrolled_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(course.has_lesson("l1"));
        assert!(!course.has_lesson("l2"));
        assert_eq!(course.lesson_count(), 1);
    }
}
