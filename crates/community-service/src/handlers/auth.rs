//! 认证处理器
//!
//! 注册、登录、登出与 Token 校验。登录带失败锁定：
//! 连续失败 5 次锁定 30 分钟，登录成功清零计数。

use axum::{Extension, Json, extract::State};
use chrono::{Duration, Utc};
use tracing::{info, warn};
use validator::Validate;

use crate::auth::{Claims, hash_password, verify_password};
use crate::dto::{
    ApiResponse, LoginRequest, LoginResponse, RegisterRequest, UserDto, ValidateResponse,
};
use crate::error::{ApiError, Result};
use crate::repository::UserRepository;
use crate::state::AppState;

/// 触发锁定的连续失败次数
const MAX_LOGIN_ATTEMPTS: i32 = 5;
/// 锁定时长（分钟）
const LOCK_DURATION_MINUTES: i64 = 30;

/// 用户注册
///
/// POST /auth/register
///
/// 注册成功即跑一次授予评估，无条件的欢迎徽章（以及满足
/// 注册时间条件的早期徽章）在这里发出
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>> {
    req.validate()?;

    let users = UserRepository::new(state.pool.clone());

    if users.find_by_email(&req.email).await?.is_some() {
        return Err(ApiError::EmailTaken(req.email));
    }

    let password_hash = hash_password(&req.password)?;
    let user = users
        .create(&req.email, &password_hash, &req.first_name, &req.last_name)
        .await?;

    info!(user_id = %user.id, email = %user.email, "用户注册成功");

    let outcome = state.award_service.evaluate_and_grant(user.id).await?;
    info!(
        user_id = %user.id,
        badges = outcome.granted.len(),
        "注册后授予评估完成"
    );

    // 重新读取，拿到授予后的积分
    let user = users
        .find_by_id(user.id)
        .await?
        .ok_or_else(|| ApiError::UserNotFound(user.id.to_string()))?;

    let (token, expires_at) =
        state
            .jwt_manager
            .generate_token(user.id, &user.email, &user.display_name())?;

    Ok(Json(ApiResponse::success_with_message(
        LoginResponse {
            token,
            user: UserDto::from(&user),
            expires_at,
        },
        "注册成功",
    )))
}

/// 用户登录
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>> {
    req.validate()?;

    let users = UserRepository::new(state.pool.clone());

    // 邮箱不存在与密码错误返回同一错误，避免账号枚举
    let user = users
        .find_by_email(&req.email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if let Some(locked_until) = user.locked_until
        && locked_until > Utc::now()
    {
        warn!(user_id = %user.id, "锁定期内的登录尝试");
        return Err(ApiError::UserLocked);
    }

    if !verify_password(&req.password, &user.password_hash)? {
        let attempts = user.failed_login_attempts + 1;
        let locked_until = if attempts >= MAX_LOGIN_ATTEMPTS {
            warn!(user_id = %user.id, attempts, "连续登录失败，账号锁定");
            Some(Utc::now() + Duration::minutes(LOCK_DURATION_MINUTES))
        } else {
            None
        };
        users
            .record_login_failure(user.id, attempts, locked_until)
            .await?;
        return Err(ApiError::InvalidCredentials);
    }

    if user.failed_login_attempts > 0 || user.locked_until.is_some() {
        users.reset_login_failures(user.id).await?;
    }

    let (token, expires_at) =
        state
            .jwt_manager
            .generate_token(user.id, &user.email, &user.display_name())?;

    info!(user_id = %user.id, "用户登录成功");

    Ok(Json(ApiResponse::success_with_message(
        LoginResponse {
            token,
            user: UserDto::from(&user),
            expires_at,
        },
        "登录成功",
    )))
}

/// 用户登出
///
/// POST /auth/logout
///
/// Token 无状态，登出由客户端丢弃 Token 完成，服务端只记录日志
pub async fn logout(Extension(claims): Extension<Claims>) -> Result<Json<ApiResponse<()>>> {
    info!(user_id = %claims.sub, "用户登出");
    Ok(Json(ApiResponse::<()>::success_empty()))
}

/// Token 校验
///
/// GET /auth/validate
pub async fn validate(
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<ValidateResponse>>> {
    let user_id = claims.user_id()?;

    Ok(Json(ApiResponse::success(ValidateResponse {
        valid: true,
        user_id,
        email: claims.email,
    })))
}
