//! 个人资料处理器

use axum::{Extension, Json, extract::State};
use std::time::Duration;
use validator::Validate;

use alumni_shared::cache::CacheKey;

use crate::auth::Claims;
use crate::dto::{ApiResponse, UpdateProfileRequest, UserDto};
use crate::error::{ApiError, Result};
use crate::repository::UserRepository;
use crate::state::AppState;

/// 资料缓存时长
const PROFILE_CACHE_TTL: Duration = Duration::from_secs(300);

/// 获取个人资料
///
/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<UserDto>>> {
    let user_id = claims.user_id()?;
    let key = CacheKey::user_profile(&user_id.to_string());

    let dto = state
        .cache
        .get_or_set(&key, PROFILE_CACHE_TTL, || async {
            let users = UserRepository::new(state.pool.clone());
            let user = users
                .find_by_id(user_id)
                .await
                .map_err(|e| alumni_shared::error::CommunityError::Internal(e.to_string()))?
                .ok_or_else(|| alumni_shared::error::CommunityError::NotFound {
                    entity: "User".to_string(),
                    id: user_id.to_string(),
                })?;
            Ok(UserDto::from(&user))
        })
        .await?;

    Ok(Json(ApiResponse::success(dto)))
}

/// 更新个人资料
///
/// PUT /api/profile
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserDto>>> {
    req.validate()?;

    let user_id = claims.user_id()?;
    let users = UserRepository::new(state.pool.clone());

    let user = users
        .update_profile(
            user_id,
            req.first_name.as_deref(),
            req.last_name.as_deref(),
            req.bio.as_deref(),
            req.avatar_url.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::UserNotFound(user_id.to_string()))?;

    // 资料变更后失效缓存
    let id = user_id.to_string();
    state.cache.delete(&CacheKey::user_profile(&id)).await.ok();
    state.cache.delete(&CacheKey::dashboard(&id)).await.ok();

    Ok(Json(ApiResponse::success(UserDto::from(&user))))
}
