//! 校友社区服务
//!
//! 提供认证、课程、论坛、活动与徽章游戏化的 REST API。

use std::sync::Arc;

use axum::{extract::Request, http::HeaderValue, middleware, middleware::Next, response::Response};
use community_service::auth::JwtConfig;
use community_service::routes::create_router;
use community_service::service::{AwardService, TracingObserver};
use community_service::state::AppState;

use alumni_shared::{
    cache::Cache,
    config::{AppConfig, AuthConfig},
    database::Database,
    observability,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 统一加载配置：config/*.toml 叠加 ALUMNI_ 前缀环境变量
    let config = AppConfig::load("community-service").unwrap_or_default();

    observability::init_tracing(&config.observability)?;

    info!("Starting community-service on {}", config.server_addr());

    // 初始化基础设施
    let db = Database::connect(&config.database).await?;
    let cache = Arc::new(Cache::new(&config.redis)?);

    // JWT 密钥：生产环境必须通过 ALUMNI_AUTH_JWT_SECRET 注入
    if config.auth.jwt_secret == AuthConfig::default().jwt_secret {
        if config.is_production() {
            panic!("ALUMNI_AUTH_JWT_SECRET must be set in production environment");
        }
        warn!("Using default JWT secret - set ALUMNI_AUTH_JWT_SECRET for production");
    }

    let jwt_config = JwtConfig {
        secret: config.auth.jwt_secret.clone(),
        expires_in_secs: config.auth.jwt_expires_in_secs,
        issuer: config.service_name.clone(),
    };

    // 授予服务：默认注册日志观察者
    let mut award_service = AwardService::new(db.pool().clone(), cache.clone());
    award_service.register_observer(Arc::new(TracingObserver));
    let award_service = Arc::new(award_service);

    let state = AppState::new(
        db.pool().clone(),
        cache.clone(),
        jwt_config,
        award_service,
    );

    // CORS 配置：通过 ALUMNI_CORS_ORIGINS 环境变量控制允许的来源
    let allowed_origins = std::env::var("ALUMNI_CORS_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string());

    let cors = if allowed_origins == "*" {
        if config.is_production() {
            warn!("ALUMNI_CORS_ORIGINS=\"*\" 在生产环境中不安全，请设置为具体域名");
        }
        info!("CORS allowed_origins: * (all origins)");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        info!("CORS allowed_origins: {}", allowed_origins);
        let origins: Vec<_> = allowed_origins
            .split(',')
            .filter_map(|s| s.trim().parse::<HeaderValue>().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let app = create_router(state)
        .layer(middleware::from_fn(security_headers))
        .layer(cors);

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Listening on {}", config.server_addr());

    // 优雅关闭：收到 SIGTERM 或 Ctrl+C 后停止接收新连接，
    // 等待已有请求处理完毕
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// 为所有响应注入 HTTP 安全头
async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    // 禁止浏览器猜测 Content-Type
    headers.insert("x-content-type-options", "nosniff".parse().unwrap());
    // 禁止页面被嵌入 iframe
    headers.insert("x-frame-options", "DENY".parse().unwrap());
    // 强制后续访问只使用 HTTPS
    headers.insert(
        "strict-transport-security",
        "max-age=31536000; includeSubDomains".parse().unwrap(),
    );
    headers.insert("x-xss-protection", "0".parse().unwrap());
    response
}

/// 监听关闭信号
///
/// K8s 通过 SIGTERM 通知 Pod 停止；本地开发通过 Ctrl+C
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("注册 Ctrl+C 处理器失败");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("注册 SIGTERM 处理器失败")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}
