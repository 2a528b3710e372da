//! 请求 DTO 定义
//!
//! 所有 REST API 的请求体结构，带 validator 校验规则

use serde::Deserialize;
use validator::Validate;

/// 注册请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "邮箱格式不正确"))]
    pub email: String,
    #[validate(length(min = 8, max = 100, message = "密码长度必须在 8-100 之间"))]
    pub password: String,
    #[validate(length(min = 1, max = 50, message = "名字长度必须在 1-50 之间"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "姓氏长度必须在 1-50 之间"))]
    pub last_name: String,
}

/// 登录请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "邮箱格式不正确"))]
    pub email: String,
    #[validate(length(min = 1, max = 100, message = "密码不能为空"))]
    pub password: String,
}

/// 更新个人资料请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 50, message = "名字长度必须在 1-50 之间"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "姓氏长度必须在 1-50 之间"))]
    pub last_name: Option<String>,
    #[validate(length(max = 500, message = "简介不能超过 500 字"))]
    pub bio: Option<String>,
    #[validate(url(message = "头像地址必须是合法 URL"))]
    pub avatar_url: Option<String>,
}

/// 创建课程请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 200, message = "标题长度必须在 1-200 之间"))]
    pub title: String,
    #[validate(length(max = 2000, message = "描述不能超过 2000 字"))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 50, message = "分类长度必须在 1-50 之间"))]
    pub category: String,
    pub lessons: Vec<CreateLessonRequest>,
}

/// 课时定义（创建课程时内嵌）
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLessonRequest {
    #[validate(length(min = 1, max = 100, message = "课时 ID 长度必须在 1-100 之间"))]
    pub id: String,
    #[validate(length(min = 1, max = 200, message = "课时标题长度必须在 1-200 之间"))]
    pub title: String,
    #[validate(range(min = 1, max = 600, message = "课时时长必须在 1-600 分钟之间"))]
    pub duration_minutes: i32,
    #[validate(url(message = "视频地址必须是合法 URL"))]
    pub video_url: Option<String>,
}

/// 发帖请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateThreadRequest {
    #[validate(length(min = 1, max = 200, message = "标题长度必须在 1-200 之间"))]
    pub title: String,
    #[validate(length(min = 1, max = 10000, message = "正文长度必须在 1-10000 之间"))]
    pub body: String,
    #[validate(length(min = 1, max = 50, message = "分类长度必须在 1-50 之间"))]
    pub category: String,
}

/// 回复请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReplyRequest {
    #[validate(length(min = 1, max = 10000, message = "回复长度必须在 1-10000 之间"))]
    pub body: String,
}

/// 创建活动请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200, message = "标题长度必须在 1-200 之间"))]
    pub title: String,
    #[validate(length(max = 2000, message = "描述不能超过 2000 字"))]
    pub description: Option<String>,
    #[validate(length(max = 200, message = "地点不能超过 200 字"))]
    pub location: Option<String>,
    pub starts_at: chrono::DateTime<chrono::Utc>,
    #[validate(range(min = 1, message = "容量必须为正数"))]
    pub capacity: Option<i32>,
}

/// 分页查询参数
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    #[validate(range(min = 1, message = "页码从 1 开始"))]
    pub page: Option<i64>,
    #[validate(range(min = 1, max = 100, message = "每页数量必须在 1-100 之间"))]
    pub page_size: Option<i64>,
}

impl PageQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1)
    }

    pub fn page_size(&self) -> i64 {
        self.page_size.unwrap_or(20)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.page_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let req = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Chen".to_string(),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));

        let req = RegisterRequest {
            email: "alice@example.com".to_string(),
            password: "long-enough-password".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Chen".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_page_query_defaults() {
        let query = PageQuery {
            page: None,
            page_size: None,
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.page_size(), 20);
        assert_eq!(query.offset(), 0);

        let query = PageQuery {
            page: Some(3),
            page_size: Some(10),
        };
        assert_eq!(query.offset(), 20);
    }
}
