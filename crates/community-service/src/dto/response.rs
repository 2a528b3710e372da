//! 响应 DTO 定义
//!
//! 所有 REST API 的响应体结构

use award_engine::BadgeDefinition;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Course, Enrollment, Event, Lesson, Reply, Thread, User};

/// API 统一响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: "操作成功".to_string(),
            data: Some(data),
        }
    }

    /// 创建成功响应（无数据）
    pub fn success_empty() -> ApiResponse<()> {
        ApiResponse {
            success: true,
            code: "SUCCESS".to_string(),
            message: "操作成功".to_string(),
            data: None,
        }
    }

    /// 创建成功响应（自定义消息）
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: message.into(),
            data: Some(data),
        }
    }
}

/// 分页响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl<T> PageResponse<T> {
    /// 创建分页响应
    pub fn new(items: Vec<T>, total: i64, page: i64, page_size: i64) -> Self {
        let total_pages = if page_size > 0 {
            (total + page_size - 1) / page_size
        } else {
            0
        };

        Self {
            items,
            total,
            page,
            page_size,
            total_pages,
        }
    }
}

// ============================================
// 用户与认证
// ============================================

/// 用户信息 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub points: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            bio: user.bio.clone(),
            avatar_url: user.avatar_url.clone(),
            points: user.points,
            created_at: user.created_at,
        }
    }
}

/// 登录/注册响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: UserDto,
    pub expires_at: i64,
}

/// Token 校验响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub valid: bool,
    pub user_id: Uuid,
    pub email: String,
}

// ============================================
// 游戏化
// ============================================

/// 徽章 DTO（目录条目 + 持有状态）
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeDto {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub category: &'static str,
    pub points: i64,
    pub requirement: &'static str,
    pub rarity: &'static str,
    pub earned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granted_at: Option<DateTime<Utc>>,
}

impl BadgeDto {
    pub fn from_definition(def: &'static BadgeDefinition, granted_at: Option<DateTime<Utc>>) -> Self {
        Self {
            id: def.id,
            name: def.name,
            description: def.description,
            icon: def.icon,
            color: def.color,
            category: def.category.as_str(),
            points: def.points,
            requirement: def.requirement,
            rarity: def.rarity.as_str(),
            earned: granted_at.is_some(),
            granted_at,
        }
    }
}

/// 徽章评估结果响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantResultDto {
    /// 本次新授予的徽章
    pub granted: Vec<BadgeDto>,
    /// 本次授予获得的积分
    pub points_awarded: i64,
    /// 授予后的累计积分
    pub total_points: i64,
}

/// 积分响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsDto {
    pub points: i64,
    pub recent_entries: Vec<PointLedgerDto>,
}

/// 积分流水 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointLedgerDto {
    pub delta: i64,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

/// 每日登录奖励响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLoginDto {
    /// 本次是否发放了奖励（同一 UTC 日重复调用为 false）
    pub granted: bool,
    pub points_awarded: i64,
    pub total_points: i64,
}

/// 排行榜条目 DTO
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryDto {
    pub rank: i64,
    pub user_id: Uuid,
    pub name: String,
    pub badge_count: i64,
    pub points: i64,
}

/// 活动参与度计数 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementsDto {
    pub completed_lessons: i64,
    pub completed_courses: i64,
    pub authored_courses: i64,
    pub forum_posts: i64,
    pub forum_replies: i64,
    pub events_attended: i64,
}

/// 看板汇总 DTO
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummaryDto {
    pub user: UserDto,
    pub badge_count: i64,
    pub engagements: EngagementsDto,
    pub enrolled_courses: i64,
    /// 排行榜名次（徽章数降序、积分降序）
    pub leaderboard_rank: Option<i64>,
    pub upcoming_events: Vec<EventDto>,
}

// ============================================
// 课程
// ============================================

/// 课程 DTO
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub instructor_id: Uuid,
    pub lessons: Vec<Lesson>,
    pub lesson_count: usize,
    pub enrolled_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<&Course> for CourseDto {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            title: course.title.clone(),
            description: course.description.clone(),
            category: course.category.clone(),
            instructor_id: course.instructor_id,
            lessons: course.lessons.0.clone(),
            lesson_count: course.lesson_count(),
            enrolled_count: course.enrolled_count,
            created_at: course.created_at,
        }
    }
}

/// 选课记录 DTO
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDto {
    pub id: Uuid,
    pub course_id: Uuid,
    pub completed_lessons: Vec<String>,
    pub progress: i32,
    pub current_lesson: Option<String>,
    pub enrolled_at: DateTime<Utc>,
}

impl From<&Enrollment> for EnrollmentDto {
    fn from(enrollment: &Enrollment) -> Self {
        Self {
            id: enrollment.id,
            course_id: enrollment.course_id,
            completed_lessons: enrollment.completed_lessons.clone(),
            progress: enrollment.progress,
            current_lesson: enrollment.current_lesson.clone(),
            enrolled_at: enrollment.enrolled_at,
        }
    }
}

/// 课时完成响应
///
/// 完成课时可能连带触发徽章授予，一并返回方便前端弹提示
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonCompleteDto {
    pub enrollment: EnrollmentDto,
    pub newly_granted: Vec<BadgeDto>,
    pub points_awarded: i64,
}

// ============================================
// 论坛
// ============================================

/// 主贴 DTO
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadDto {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub title: String,
    pub body: String,
    pub category: String,
    pub reply_count: i32,
    pub created_at: DateTime<Utc>,
}

impl ThreadDto {
    pub fn from_thread(thread: &Thread, author_name: String) -> Self {
        Self {
            id: thread.id,
            author_id: thread.author_id,
            author_name,
            title: thread.title.clone(),
            body: thread.body.clone(),
            category: thread.category.clone(),
            reply_count: thread.reply_count,
            created_at: thread.created_at,
        }
    }
}

/// 回复 DTO
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyDto {
    pub id: Uuid,
    pub thread_id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl ReplyDto {
    pub fn from_reply(reply: &Reply, author_name: String) -> Self {
        Self {
            id: reply.id,
            thread_id: reply.thread_id,
            author_id: reply.author_id,
            author_name,
            body: reply.body.clone(),
            created_at: reply.created_at,
        }
    }
}

// ============================================
// 活动
// ============================================

/// 活动 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub capacity: Option<i32>,
    pub attendee_count: i32,
    pub is_full: bool,
    /// 当前用户是否已报名
    pub attending: bool,
    pub created_at: DateTime<Utc>,
}

impl EventDto {
    pub fn from_event(event: &Event, attending: bool) -> Self {
        Self {
            id: event.id,
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            starts_at: event.starts_at,
            capacity: event.capacity,
            attendee_count: event.attendee_count,
            is_full: event.is_full(),
            attending,
            created_at: event.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use award_engine::find_badge;

    #[test]
    fn test_api_response_success() {
        let response = ApiResponse::success("test data");
        assert!(response.success);
        assert_eq!(response.code, "SUCCESS");
        assert_eq!(response.data, Some("test data"));
    }

    #[test]
    fn test_page_response_total_pages_calculation() {
        // 恰好整除
        let response = PageResponse::<i32>::new(vec![], 100, 1, 10);
        assert_eq!(response.total_pages, 10);

        // 有余数
        let response = PageResponse::<i32>::new(vec![], 101, 1, 10);
        assert_eq!(response.total_pages, 11);
    }

    #[test]
    fn test_badge_dto_from_definition() {
        let def = find_badge("first-lesson").unwrap();

        let locked = BadgeDto::from_definition(def, None);
        assert!(!locked.earned);
        assert_eq!(locked.rarity, "common");
        assert_eq!(locked.category, "learning");

        let earned = BadgeDto::from_definition(def, Some(Utc::now()));
        assert!(earned.earned);
        assert!(earned.granted_at.is_some());
    }

    #[test]
    fn test_badge_dto_serialization_camel_case() {
        let def = find_badge("point-collector").unwrap();
        let dto = BadgeDto::from_definition(def, None);
        let json = serde_json::to_string(&dto).unwrap();
        assert!(json.contains("\"earned\":false"));
        // 未授予时不序列化 grantedAt 字段
        assert!(!json.contains("grantedAt"));
    }
}
