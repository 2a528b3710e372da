//! JWT 认证中间件
//!
//! 验证请求中的 Bearer Token 并将用户信息注入请求扩展

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::state::AppState;

/// 认证中间件
///
/// 从 Authorization header 中提取 Bearer Token，验证后将 Claims 注入请求扩展。
/// 公开路由（登录注册、徽章目录、探针）不强制认证，Token 有效时同样注入。
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path();

    // 公开路由列表（不需要认证）
    // /api/badges 是公开的徽章目录页，匿名用户也能浏览
    let public_paths = [
        "/auth/login",
        "/auth/register",
        "/api/badges",
        "/health",
        "/ready",
    ];

    if public_paths.iter().any(|p| path.starts_with(p)) {
        // 公开路由不强制认证，但带了有效 Token 仍注入身份，
        // 徽章目录据此附带持有状态；无效 Token 按匿名处理
        let claims = bearer_token(&request)
            .and_then(|token| state.jwt_manager.verify_token(token).ok());
        if let Some(claims) = claims {
            request.extensions_mut().insert(claims);
        }
        return next.run(request).await;
    }

    let token = match bearer_token(&request) {
        Some(token) => token,
        None => return unauthorized_response("缺少认证 Token"),
    };

    // 验证 Token
    match state.jwt_manager.verify_token(token) {
        Ok(claims) => {
            // 将 Claims 注入请求扩展，供后续处理器使用
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => unauthorized_response(&e.to_string()),
    }
}

/// 从 Authorization header 提取 Bearer Token
fn bearer_token(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// 生成 401 未授权响应
fn unauthorized_response(message: &str) -> Response {
    let body = json!({
        "success": false,
        "code": "UNAUTHORIZED",
        "message": message,
        "data": null
    });

    (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
}
