//! 社区服务错误类型定义
//!
//! 所有 REST API 的错误出口，统一映射到 HTTP 状态码和四字段响应体。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use alumni_shared::error::CommunityError;

/// 社区服务错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // 认证错误
    #[error("未授权: {0}")]
    Unauthorized(String),
    #[error("邮箱或密码错误")]
    InvalidCredentials,
    #[error("账号已被锁定，请稍后重试")]
    UserLocked,
    #[error("邮箱已被注册: {0}")]
    EmailTaken(String),

    // 验证错误
    #[error("参数验证失败: {0}")]
    Validation(String),

    // 资源不存在
    #[error("用户不存在: {0}")]
    UserNotFound(String),
    #[error("课程不存在: {0}")]
    CourseNotFound(String),
    #[error("课时不存在: {0}")]
    LessonNotFound(String),
    #[error("选课记录不存在: {0}")]
    EnrollmentNotFound(String),
    #[error("帖子不存在: {0}")]
    ThreadNotFound(String),
    #[error("回复不存在: {0}")]
    PostNotFound(String),
    #[error("活动不存在: {0}")]
    EventNotFound(String),
    #[error("徽章不存在: {0}")]
    BadgeNotFound(String),

    // 业务冲突
    #[error("已报名该课程")]
    AlreadyEnrolled,
    #[error("活动已满员")]
    EventFull,

    // 系统错误
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Redis错误: {0}")]
    Redis(String),
    #[error("内部错误: {0}")]
    Internal(String),
}

impl ApiError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::UserLocked => StatusCode::FORBIDDEN,

            Self::Validation(_) => StatusCode::BAD_REQUEST,

            Self::UserNotFound(_)
            | Self::CourseNotFound(_)
            | Self::LessonNotFound(_)
            | Self::EnrollmentNotFound(_)
            | Self::ThreadNotFound(_)
            | Self::PostNotFound(_)
            | Self::EventNotFound(_)
            | Self::BadgeNotFound(_) => StatusCode::NOT_FOUND,

            Self::EmailTaken(_) | Self::AlreadyEnrolled | Self::EventFull => StatusCode::CONFLICT,

            Self::Database(_) | Self::Redis(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::UserLocked => "USER_LOCKED",
            Self::EmailTaken(_) => "EMAIL_TAKEN",

            Self::Validation(_) => "VALIDATION_ERROR",

            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::CourseNotFound(_) => "COURSE_NOT_FOUND",
            Self::LessonNotFound(_) => "LESSON_NOT_FOUND",
            Self::EnrollmentNotFound(_) => "ENROLLMENT_NOT_FOUND",
            Self::ThreadNotFound(_) => "THREAD_NOT_FOUND",
            Self::PostNotFound(_) => "POST_NOT_FOUND",
            Self::EventNotFound(_) => "EVENT_NOT_FOUND",
            Self::BadgeNotFound(_) => "BADGE_NOT_FOUND",

            Self::AlreadyEnrolled => "ALREADY_ENROLLED",
            Self::EventFull => "EVENT_FULL",

            Self::Database(_) => "DATABASE_ERROR",
            Self::Redis(_) => "REDIS_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志，防止信息泄露
        let message = match &self {
            Self::Database(e) => {
                tracing::error!(error = %e, "数据库操作失败");
                "服务内部错误，请稍后重试".to_string()
            }
            Self::Redis(e) => {
                tracing::error!(error = %e, "Redis 操作失败");
                "服务内部错误，请稍后重试".to_string()
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "服务内部错误，请稍后重试".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message,
            "data": serde_json::Value::Null
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// 从 JSON 序列化错误转换
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON 处理错误: {}", err))
    }
}

/// 从共享基础设施错误转换
impl From<CommunityError> for ApiError {
    fn from(err: CommunityError) -> Self {
        match err {
            CommunityError::Database(e) => Self::Database(e),
            CommunityError::Redis(e) => Self::Redis(e.to_string()),
            CommunityError::NotFound { entity, id } => match entity.as_str() {
                "User" => Self::UserNotFound(id),
                "Course" => Self::CourseNotFound(id),
                "Event" => Self::EventNotFound(id),
                _ => Self::Internal(format!("{} 不存在: {}", entity, id)),
            },
            CommunityError::EventFull { .. } => Self::EventFull,
            CommunityError::UnknownBadge { badge_id } => Self::BadgeNotFound(badge_id),
            CommunityError::Validation(msg) => Self::Validation(msg),
            CommunityError::Unauthorized => Self::Unauthorized("未授权访问".to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    /// 构造所有可简单构造的错误变体及其期望的 (StatusCode, error_code) 映射。
    /// 使用表驱动方式避免逐个变体写重复断言，新增变体时只需在一处维护。
    fn all_error_variants() -> Vec<(ApiError, StatusCode, &'static str)> {
        vec![
            // 认证类：状态码直接决定前端是否强制登出
            (ApiError::Unauthorized("token expired".into()), StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            (ApiError::InvalidCredentials, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            (ApiError::UserLocked, StatusCode::FORBIDDEN, "USER_LOCKED"),
            (ApiError::EmailTaken("a@b.com".into()), StatusCode::CONFLICT, "EMAIL_TAKEN"),
            // 参数校验
            (ApiError::Validation("email invalid".into()), StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            // 资源不存在类
            (ApiError::UserNotFound("u1".into()), StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
            (ApiError::CourseNotFound("c1".into()), StatusCode::NOT_FOUND, "COURSE_NOT_FOUND"),
            (ApiError::LessonNotFound("l1".into()), StatusCode::NOT_FOUND, "LESSON_NOT_FOUND"),
            (ApiError::EnrollmentNotFound("e1".into()), StatusCode::NOT_FOUND, "ENROLLMENT_NOT_FOUND"),
            (ApiError::ThreadNotFound("t1".into()), StatusCode::NOT_FOUND, "THREAD_NOT_FOUND"),
            (ApiError::PostNotFound("p1".into()), StatusCode::NOT_FOUND, "POST_NOT_FOUND"),
            (ApiError::EventNotFound("ev1".into()), StatusCode::NOT_FOUND, "EVENT_NOT_FOUND"),
            (ApiError::BadgeNotFound("b1".into()), StatusCode::NOT_FOUND, "BADGE_NOT_FOUND"),
            // 业务冲突类：409 表示请求合法但与当前状态冲突
            (ApiError::AlreadyEnrolled, StatusCode::CONFLICT, "ALREADY_ENROLLED"),
            (ApiError::EventFull, StatusCode::CONFLICT, "EVENT_FULL"),
            // 系统级错误：统一 500，防止内部实现细节泄露
            (ApiError::Redis("connection refused".into()), StatusCode::INTERNAL_SERVER_ERROR, "REDIS_ERROR"),
            (ApiError::Internal("unexpected state".into()), StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        ]
    }

    /// 确保每个错误变体都映射到正确的 HTTP 状态码。
    /// 状态码错误会导致前端误判请求结果（如把 403 当 500 处理）。
    #[test]
    fn test_all_variants_status_code() {
        for (error, expected_status, label) in all_error_variants() {
            assert_eq!(
                error.status_code(),
                expected_status,
                "状态码不匹配: variant={label}"
            );
        }
    }

    /// 错误码是 API 契约的一部分，客户端用它做条件分支。
    /// 任何错误码变更都是破坏性变更，必须逐一锁定。
    #[test]
    fn test_all_variants_error_code() {
        for (error, _status, expected_code) in all_error_variants() {
            assert_eq!(
                error.error_code(),
                expected_code,
                "错误码不匹配: expected={expected_code}"
            );
        }
    }

    /// 携带参数的变体必须把上下文带进 Display 输出，否则用户无法定位问题
    #[test]
    fn test_display_contains_context() {
        assert!(ApiError::Unauthorized("expired".into()).to_string().contains("expired"));
        assert!(ApiError::EmailTaken("a@b.com".into()).to_string().contains("a@b.com"));
        assert!(ApiError::CourseNotFound("rust-101".into()).to_string().contains("rust-101"));
        assert!(ApiError::ThreadNotFound("t-42".into()).to_string().contains("t-42"));
        assert!(ApiError::Validation("bad email".into()).to_string().contains("bad email"));
    }

    /// IntoResponse 是错误到 HTTP 响应的最终出口。
    /// 必须验证状态码正确、响应体结构完整（success/code/message/data 四字段）。
    #[tokio::test]
    async fn test_into_response_body_structure() {
        for (error, expected_status, expected_code) in all_error_variants() {
            let label = format!("{:?}", error);
            let response = error.into_response();

            assert_eq!(response.status(), expected_status, "响应状态码不匹配: {label}");

            let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .expect("读取响应体失败");
            let body: serde_json::Value =
                serde_json::from_slice(&body_bytes).expect("响应体不是合法 JSON");

            assert_eq!(body["success"], json!(false), "success 字段应为 false: {label}");
            assert_eq!(body["code"], json!(expected_code), "code 字段不匹配: {label}");
            assert!(!body["message"].as_str().unwrap_or("").is_empty(), "message 不应为空: {label}");
            assert!(body["data"].is_null(), "data 字段应为 null: {label}");
        }
    }

    /// 系统级错误的响应消息不应泄露内部细节，只返回通用提示。
    /// 防止攻击者通过错误消息探测系统架构。
    #[tokio::test]
    async fn test_system_errors_hide_internal_details() {
        let system_errors: Vec<(ApiError, &str)> = vec![
            (ApiError::Redis("redis://10.0.0.1:6379 connection refused".into()), "redis://10.0.0.1:6379"),
            (ApiError::Internal("stack overflow at module X".into()), "stack overflow"),
        ];

        for (error, leaked_detail) in system_errors {
            let response = error.into_response();
            let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .expect("读取响应体失败");
            let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
            let message = body["message"].as_str().unwrap();

            assert!(
                !message.contains(leaked_detail),
                "系统错误消息泄露了内部细节: message={message}"
            );
            assert!(message.contains("服务内部错误"));
        }
    }

    /// validator 转换必须把字段级错误信息带入 ApiError
    #[test]
    fn test_from_validation_errors() {
        use validator::{ValidationError, ValidationErrors};

        let mut errors = ValidationErrors::new();
        let mut field_error = ValidationError::new("email");
        field_error.message = Some("邮箱格式不正确".into());
        errors.add("email", field_error);

        let api_error: ApiError = errors.into();
        match &api_error {
            ApiError::Validation(msg) => {
                assert!(msg.contains("email"), "转换后应保留字段名: {msg}");
            }
            other => panic!("期望 Validation 变体，实际: {:?}", other),
        }
        assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);
    }

    /// 共享层错误转换：NotFound 按实体名路由到具体变体，未知实体回退 Internal
    #[test]
    fn test_from_community_error() {
        let err: ApiError = CommunityError::NotFound {
            entity: "User".into(),
            id: "u-1".into(),
        }
        .into();
        assert!(matches!(err, ApiError::UserNotFound(ref id) if id == "u-1"));

        let err: ApiError = CommunityError::EventFull {
            event_id: "ev-1".into(),
        }
        .into();
        assert!(matches!(err, ApiError::EventFull));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err: ApiError = CommunityError::UnknownBadge {
            badge_id: "ghost".into(),
        }
        .into();
        assert!(matches!(err, ApiError::BadgeNotFound(ref id) if id == "ghost"));

        let err: ApiError = CommunityError::Database(sqlx::Error::RowNotFound).into();
        assert!(matches!(err, ApiError::Database(_)));
        assert_eq!(err.error_code(), "DATABASE_ERROR");
    }

    /// sqlx::Error 通过 #[from] 自动派生 From，验证状态码正确
    #[test]
    fn test_from_sqlx_error() {
        let api_err = ApiError::from(sqlx::Error::RowNotFound);
        assert!(matches!(api_err, ApiError::Database(_)));
        assert_eq!(api_err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
