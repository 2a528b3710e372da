//! 活动处理器
//!
//! 活动浏览、创建与报名。报名在仓储事务内做容量检查，
//! 满员返回 409。报名成功后触发授予评估（活动出席类徽章）。

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::auth::Claims;
use crate::dto::{ApiResponse, CreateEventRequest, EventDto};
use crate::error::{ApiError, Result};
use crate::repository::EventRepository;
use crate::state::AppState;

/// 活动列表
///
/// GET /api/events
///
/// 带当前用户的报名状态
pub async fn list_events(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<Vec<EventDto>>>> {
    let user_id = claims.user_id()?;
    let repo = EventRepository::new(state.pool.clone());

    let events = repo.list().await?;
    let attending: std::collections::HashSet<Uuid> =
        repo.attending_event_ids(user_id).await?.into_iter().collect();

    let items = events
        .iter()
        .map(|e| EventDto::from_event(e, attending.contains(&e.id)))
        .collect();

    Ok(Json(ApiResponse::success(items)))
}

/// 活动详情
///
/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<EventDto>>> {
    let user_id = claims.user_id()?;
    let repo = EventRepository::new(state.pool.clone());

    let event = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::EventNotFound(id.to_string()))?;
    let attending = repo
        .attending_event_ids(user_id)
        .await?
        .contains(&event.id);

    Ok(Json(ApiResponse::success(EventDto::from_event(
        &event, attending,
    ))))
}

/// 创建活动
///
/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> Result<Json<ApiResponse<EventDto>>> {
    req.validate()?;

    let repo = EventRepository::new(state.pool.clone());
    let event = repo
        .create(
            &req.title,
            req.description.as_deref(),
            req.location.as_deref(),
            req.starts_at,
            req.capacity,
        )
        .await?;

    info!(event_id = %event.id, "活动创建成功");

    Ok(Json(ApiResponse::success(EventDto::from_event(
        &event, false,
    ))))
}

/// 切换报名状态
///
/// POST /api/events/{id}/rsvp
///
/// 已报名则取消，未报名则加入（满员返回 409）。
/// 加入成功后触发授予评估（活动出席类徽章）。
pub async fn rsvp(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<ApiResponse<EventDto>>> {
    let user_id = claims.user_id()?;
    let repo = EventRepository::new(state.pool.clone());

    repo.find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::EventNotFound(event_id.to_string()))?;

    // 先尝试取消；没取消到说明当前未报名，走加入路径
    let attending = if repo.leave(event_id, user_id).await? {
        info!(event_id = %event_id, user_id = %user_id, "取消活动报名");
        false
    } else {
        repo.join(event_id, user_id).await?;
        info!(event_id = %event_id, user_id = %user_id, "活动报名成功");
        state.award_service.evaluate_and_grant(user_id).await?;
        true
    };

    let event = repo
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::EventNotFound(event_id.to_string()))?;

    Ok(Json(ApiResponse::success(EventDto::from_event(
        &event, attending,
    ))))
}
