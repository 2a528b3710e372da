//! 论坛处理器
//!
//! 主贴与回复的浏览和发布，回复只追加不删改。发帖与回复
//! 都会触发授予评估，社区类徽章（首帖、社区领袖）在这里产生。

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::auth::Claims;
use crate::dto::{
    ApiResponse, CreateReplyRequest, CreateThreadRequest, PageQuery, PageResponse, ReplyDto,
    ThreadDto,
};
use crate::error::{ApiError, Result};
use crate::repository::ForumRepository;
use crate::state::AppState;

/// 主贴列表
///
/// GET /threads
pub async fn list_threads(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<PageResponse<ThreadDto>>>> {
    query.validate()?;

    let repo = ForumRepository::new(state.pool.clone());
    let (threads, total) = repo.list_threads(query.offset(), query.page_size()).await?;

    let items = threads
        .into_iter()
        .map(|t| ThreadDto::from_thread(&t.thread, t.author_name))
        .collect();

    Ok(Json(ApiResponse::success(PageResponse::new(
        items,
        total,
        query.page(),
        query.page_size(),
    ))))
}

/// 主贴详情
///
/// GET /threads/{id}
pub async fn get_thread(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ThreadDto>>> {
    let repo = ForumRepository::new(state.pool.clone());
    let thread = repo
        .find_thread(id)
        .await?
        .ok_or_else(|| ApiError::ThreadNotFound(id.to_string()))?;

    Ok(Json(ApiResponse::success(ThreadDto::from_thread(
        &thread.thread,
        thread.author_name,
    ))))
}

/// 发帖
///
/// POST /threads
pub async fn create_thread(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateThreadRequest>,
) -> Result<Json<ApiResponse<ThreadDto>>> {
    req.validate()?;

    let user_id = claims.user_id()?;
    let repo = ForumRepository::new(state.pool.clone());

    let thread = repo
        .create_thread(user_id, &req.title, &req.body, &req.category)
        .await?;

    info!(thread_id = %thread.id, author_id = %user_id, "发帖成功");

    state.award_service.evaluate_and_grant(user_id).await?;

    Ok(Json(ApiResponse::success(ThreadDto::from_thread(
        &thread,
        claims.name,
    ))))
}

/// 回复列表
///
/// GET /threads/{id}/posts
pub async fn list_replies(
    State(state): State<AppState>,
    Path(thread_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<ReplyDto>>>> {
    let repo = ForumRepository::new(state.pool.clone());

    repo.find_thread(thread_id)
        .await?
        .ok_or_else(|| ApiError::ThreadNotFound(thread_id.to_string()))?;

    let replies = repo.list_replies(thread_id).await?;
    let items = replies
        .into_iter()
        .map(|r| ReplyDto::from_reply(&r.reply, r.author_name))
        .collect();

    Ok(Json(ApiResponse::success(items)))
}

/// 回复主贴
///
/// POST /threads/{id}/posts
pub async fn create_reply(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(thread_id): Path<Uuid>,
    Json(req): Json<CreateReplyRequest>,
) -> Result<Json<ApiResponse<ReplyDto>>> {
    req.validate()?;

    let user_id = claims.user_id()?;
    let repo = ForumRepository::new(state.pool.clone());

    repo.find_thread(thread_id)
        .await?
        .ok_or_else(|| ApiError::ThreadNotFound(thread_id.to_string()))?;

    let reply = repo.create_reply(thread_id, user_id, &req.body).await?;

    state.award_service.evaluate_and_grant(user_id).await?;

    Ok(Json(ApiResponse::success(ReplyDto::from_reply(
        &reply,
        claims.name,
    ))))
}

/// 单条回复详情
///
/// GET /posts/{id}
pub async fn get_reply(
    State(state): State<AppState>,
    Path(reply_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReplyDto>>> {
    let repo = ForumRepository::new(state.pool.clone());

    let reply = repo
        .find_reply(reply_id)
        .await?
        .ok_or_else(|| ApiError::PostNotFound(reply_id.to_string()))?;

    Ok(Json(ApiResponse::success(ReplyDto::from_reply(
        &reply.reply,
        reply.author_name,
    ))))
}
