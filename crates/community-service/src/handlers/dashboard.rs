//! 看板处理器
//!
//! 汇总用户资料、徽章数、参与度计数、选课数与即将参加的活动。
//! 聚合开销较大，结果短时缓存，授予或资料变更时失效。

use axum::{Extension, Json, extract::State};
use std::time::Duration;

use alumni_shared::cache::CacheKey;
use alumni_shared::error::CommunityError;

use crate::auth::Claims;
use crate::dto::{ApiResponse, DashboardSummaryDto, EngagementsDto, EventDto, UserDto};
use crate::error::Result;
use crate::repository::{ActivityRepository, CourseRepository, EventRepository, UserRepository};
use crate::state::AppState;

/// 看板缓存时长
const DASHBOARD_CACHE_TTL: Duration = Duration::from_secs(60);

/// 看板汇总
///
/// GET /api/dashboard/summary
pub async fn summary(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<DashboardSummaryDto>>> {
    let user_id = claims.user_id()?;
    let key = CacheKey::dashboard(&user_id.to_string());

    let dto = state
        .cache
        .get_or_set(&key, DASHBOARD_CACHE_TTL, || async {
            build_summary(&state, user_id)
                .await
                .map_err(|e| CommunityError::Internal(e.to_string()))
        })
        .await?;

    Ok(Json(ApiResponse::success(dto)))
}

async fn build_summary(state: &AppState, user_id: uuid::Uuid) -> Result<DashboardSummaryDto> {
    let users = UserRepository::new(state.pool.clone());
    let activities = ActivityRepository::new(state.pool.clone());
    let courses = CourseRepository::new(state.pool.clone());
    let events = EventRepository::new(state.pool.clone());

    let user = users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| crate::error::ApiError::UserNotFound(user_id.to_string()))?;

    let snapshot = activities.snapshot(user_id).await?;
    let held = activities.held_badges(user_id).await?;
    let enrollments = courses.list_user_enrollments(user_id).await?;
    let upcoming = events.upcoming_for_user(user_id).await?;
    let rank = users.leaderboard_rank(user_id).await?;

    Ok(DashboardSummaryDto {
        user: UserDto::from(&user),
        badge_count: held.len() as i64,
        engagements: EngagementsDto {
            completed_lessons: snapshot.completed_lessons,
            completed_courses: snapshot.completed_courses,
            authored_courses: snapshot.authored_courses,
            forum_posts: snapshot.forum_posts,
            forum_replies: snapshot.forum_replies,
            events_attended: snapshot.events_attended,
        },
        enrolled_courses: enrollments.len() as i64,
        leaderboard_rank: rank,
        upcoming_events: upcoming
            .iter()
            .map(|e| EventDto::from_event(e, true))
            .collect(),
    })
}
