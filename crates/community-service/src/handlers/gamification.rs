//! 游戏化处理器
//!
//! 徽章目录、成就、参与度、积分、每日登录与排行榜。
//! 目录接口允许匿名访问，登录后附带持有状态。

use std::collections::HashMap;
use std::time::Duration;

use axum::{Extension, Json, extract::State};
use award_engine::{BADGES, find_badge};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use alumni_shared::cache::CacheKey;
use alumni_shared::error::CommunityError;

use crate::auth::Claims;
use crate::dto::{
    ApiResponse, BadgeDto, DailyLoginDto, EngagementsDto, GrantResultDto, LeaderboardEntryDto,
    PointLedgerDto, PointsDto,
};
use crate::error::Result;
use crate::repository::{ActivityRepository, UserRepository};
use crate::state::AppState;

/// 参与度缓存时长
const ENGAGEMENTS_CACHE_TTL: Duration = Duration::from_secs(60);
/// 排行榜缓存时长
const LEADERBOARD_CACHE_TTL: Duration = Duration::from_secs(30);
/// 排行榜长度
const LEADERBOARD_SIZE: i64 = 10;
/// 积分流水返回条数
const LEDGER_PAGE_SIZE: i64 = 20;

/// 用户的徽章授予时间表
async fn granted_at_map(
    state: &AppState,
    user_id: Uuid,
) -> Result<HashMap<String, DateTime<Utc>>> {
    let activities = ActivityRepository::new(state.pool.clone());
    let badges = activities.list_user_badges(user_id).await?;
    Ok(badges
        .into_iter()
        .map(|b| (b.badge_id, b.granted_at))
        .collect())
}

/// 徽章目录
///
/// GET /api/badges
///
/// 匿名可访问；携带有效 Token 时附带每个徽章的持有状态
pub async fn list_badges(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
) -> Result<Json<ApiResponse<Vec<BadgeDto>>>> {
    let granted = match claims {
        Some(Extension(claims)) => granted_at_map(&state, claims.user_id()?).await?,
        None => HashMap::new(),
    };

    let items = BADGES
        .iter()
        .map(|def| BadgeDto::from_definition(def, granted.get(def.id).copied()))
        .collect();

    Ok(Json(ApiResponse::success(items)))
}

/// 我的成就（已获徽章）
///
/// GET /api/achievements
pub async fn list_achievements(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<Vec<BadgeDto>>>> {
    let user_id = claims.user_id()?;
    let activities = ActivityRepository::new(state.pool.clone());

    let badges = activities.list_user_badges(user_id).await?;
    let items = badges
        .iter()
        // 目录中不存在的历史徽章 ID 直接跳过
        .filter_map(|b| find_badge(&b.badge_id).map(|def| (def, b.granted_at)))
        .map(|(def, at)| BadgeDto::from_definition(def, Some(at)))
        .collect();

    Ok(Json(ApiResponse::success(items)))
}

/// 参与度计数
///
/// GET /api/engagements
pub async fn engagements(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<EngagementsDto>>> {
    let user_id = claims.user_id()?;
    let key = CacheKey::user_engagements(&user_id.to_string());

    let dto = state
        .cache
        .get_or_set(&key, ENGAGEMENTS_CACHE_TTL, || async {
            let activities = ActivityRepository::new(state.pool.clone());
            let snapshot = activities
                .snapshot(user_id)
                .await
                .map_err(|e| CommunityError::Internal(e.to_string()))?;
            Ok(EngagementsDto {
                completed_lessons: snapshot.completed_lessons,
                completed_courses: snapshot.completed_courses,
                authored_courses: snapshot.authored_courses,
                forum_posts: snapshot.forum_posts,
                forum_replies: snapshot.forum_replies,
                events_attended: snapshot.events_attended,
            })
        })
        .await?;

    Ok(Json(ApiResponse::success(dto)))
}

/// 积分与最近流水
///
/// GET /api/gamification/points
pub async fn points(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<PointsDto>>> {
    let user_id = claims.user_id()?;
    let users = UserRepository::new(state.pool.clone());
    let activities = ActivityRepository::new(state.pool.clone());

    let user = users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| crate::error::ApiError::UserNotFound(user_id.to_string()))?;
    let entries = activities.recent_ledger(user_id, LEDGER_PAGE_SIZE).await?;

    Ok(Json(ApiResponse::success(PointsDto {
        points: user.points,
        recent_entries: entries
            .into_iter()
            .map(|e| PointLedgerDto {
                delta: e.delta,
                reason: e.reason,
                created_at: e.created_at,
            })
            .collect(),
    })))
}

/// 每日登录奖励
///
/// POST /api/gamification/daily-login
///
/// 同一 UTC 日重复调用幂等，granted 为 false
pub async fn daily_login(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<DailyLoginDto>>> {
    let user_id = claims.user_id()?;

    let outcome = state.award_service.daily_login(user_id).await?;

    Ok(Json(ApiResponse::success(DailyLoginDto {
        granted: outcome.granted,
        points_awarded: outcome.points_awarded,
        total_points: outcome.total_points,
    })))
}

/// 触发授予评估
///
/// POST /api/gamification/badges
///
/// 对当前用户重跑全量规则评估，可安全重复调用
pub async fn evaluate_badges(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<GrantResultDto>>> {
    let user_id = claims.user_id()?;

    let outcome = state.award_service.evaluate_and_grant(user_id).await?;
    let granted_at = Utc::now();

    Ok(Json(ApiResponse::success(GrantResultDto {
        granted: outcome
            .granted
            .iter()
            .map(|b| BadgeDto::from_definition(*b, Some(granted_at)))
            .collect(),
        points_awarded: outcome.points_awarded,
        total_points: outcome.total_points,
    })))
}

/// 排行榜
///
/// GET /api/gamification/leaderboard
///
/// 排序：徽章数降序，积分降序，取前 10
pub async fn leaderboard(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<LeaderboardEntryDto>>>> {
    let key = CacheKey::leaderboard();

    let rows: Vec<(Uuid, String, i64, i64)> = state
        .cache
        .get_or_set(&key, LEADERBOARD_CACHE_TTL, || async {
            let users = UserRepository::new(state.pool.clone());
            let rows = users
                .leaderboard(LEADERBOARD_SIZE)
                .await
                .map_err(|e| CommunityError::Internal(e.to_string()))?;
            Ok(rows
                .into_iter()
                .map(|r| (r.user_id, r.name, r.badge_count, r.points))
                .collect())
        })
        .await?;

    let items = rows
        .into_iter()
        .enumerate()
        .map(|(i, (user_id, name, badge_count, points))| LeaderboardEntryDto {
            rank: (i + 1) as i64,
            user_id,
            name,
            badge_count,
            points,
        })
        .collect();

    Ok(Json(ApiResponse::success(items)))
}
