//! 路由定义
//!
//! 除探针与公开目录外的所有路由都挂在认证中间件之后

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use crate::handlers::{auth, course, dashboard, event, forum, gamification, profile};
use crate::middleware::auth_middleware;
use crate::state::AppState;

/// 构建应用路由
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // ==================== 认证 ====================
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/validate", get(auth::validate))
        // ==================== 资料与看板 ====================
        .route(
            "/api/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        .route("/api/dashboard/summary", get(dashboard::summary))
        // ==================== 课程 ====================
        .route(
            "/api/courses",
            get(course::list_courses).post(course::create_course),
        )
        .route("/api/courses/enrollments", get(course::list_enrollments))
        .route("/api/courses/{id}", get(course::get_course))
        .route("/api/courses/{id}/enroll", post(course::enroll))
        .route(
            "/api/courses/{id}/lessons/{lesson_id}/complete",
            post(course::complete_lesson),
        )
        // ==================== 论坛 ====================
        // 历史原因论坛路由不带 /api 前缀，前端按根路径调用
        .route(
            "/threads",
            get(forum::list_threads).post(forum::create_thread),
        )
        .route("/threads/{id}", get(forum::get_thread))
        .route(
            "/threads/{id}/posts",
            get(forum::list_replies).post(forum::create_reply),
        )
        .route("/posts/{id}", get(forum::get_reply))
        // ==================== 活动 ====================
        .route(
            "/api/events",
            get(event::list_events).post(event::create_event),
        )
        .route("/api/events/{id}", get(event::get_event))
        .route("/api/events/{id}/rsvp", post(event::rsvp))
        // ==================== 游戏化 ====================
        .route("/api/badges", get(gamification::list_badges))
        .route("/api/achievements", get(gamification::list_achievements))
        .route("/api/engagements", get(gamification::engagements))
        .route("/api/gamification/points", get(gamification::points))
        .route(
            "/api/gamification/daily-login",
            post(gamification::daily_login),
        )
        .route(
            "/api/gamification/badges",
            get(gamification::list_badges).post(gamification::evaluate_badges),
        )
        .route(
            "/api/gamification/leaderboard",
            get(gamification::leaderboard),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        // ==================== 探针 ====================
        .route("/health", get(health))
        .route("/ready", get(ready))
        .with_state(state)
}

/// 存活探针
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// 就绪探针
///
/// 数据库或 Redis 不可达时返回 503
async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let db_ok = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();
    let cache_ok = state.cache.health_check().await.is_ok();

    let status = if db_ok && cache_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if status == StatusCode::OK { "ready" } else { "not_ready" },
            "database": db_ok,
            "cache": cache_ok,
        })),
    )
}
