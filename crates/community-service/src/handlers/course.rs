//! 课程处理器
//!
//! 课程浏览、创建、报名与课时完成。创建课程与完成课时
//! 都会触发一次授予评估，新授予的徽章随响应一并返回。

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::auth::Claims;
use crate::dto::{
    ApiResponse, BadgeDto, CourseDto, CreateCourseRequest, EnrollmentDto, LessonCompleteDto,
    PageQuery, PageResponse,
};
use crate::error::{ApiError, Result};
use crate::repository::CourseRepository;
use crate::state::AppState;

/// 课程列表
///
/// GET /api/courses
pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<PageResponse<CourseDto>>>> {
    query.validate()?;

    let repo = CourseRepository::new(state.pool.clone());
    let (courses, total) = repo.list(query.offset(), query.page_size()).await?;

    let items = courses.iter().map(CourseDto::from).collect();
    Ok(Json(ApiResponse::success(PageResponse::new(
        items,
        total,
        query.page(),
        query.page_size(),
    ))))
}

/// 课程详情
///
/// GET /api/courses/{id}
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CourseDto>>> {
    let repo = CourseRepository::new(state.pool.clone());
    let course = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::CourseNotFound(id.to_string()))?;

    Ok(Json(ApiResponse::success(CourseDto::from(&course))))
}

/// 创建课程
///
/// POST /api/courses
pub async fn create_course(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateCourseRequest>,
) -> Result<Json<ApiResponse<CourseDto>>> {
    req.validate()?;
    for lesson in &req.lessons {
        lesson.validate()?;
    }

    let user_id = claims.user_id()?;
    let repo = CourseRepository::new(state.pool.clone());

    let course = repo
        .create(
            user_id,
            &req.title,
            req.description.as_deref(),
            &req.category,
            req.lessons,
        )
        .await?;

    info!(course_id = %course.id, instructor_id = %user_id, "课程创建成功");

    // 授课类徽章在这里触发
    state.award_service.evaluate_and_grant(user_id).await?;

    Ok(Json(ApiResponse::success(CourseDto::from(&course))))
}

/// 报名课程
///
/// POST /api/courses/{id}/enroll
pub async fn enroll(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<ApiResponse<EnrollmentDto>>> {
    let user_id = claims.user_id()?;
    let repo = CourseRepository::new(state.pool.clone());

    repo.find_by_id(course_id)
        .await?
        .ok_or_else(|| ApiError::CourseNotFound(course_id.to_string()))?;

    let enrollment = repo
        .enroll(user_id, course_id)
        .await?
        .ok_or(ApiError::AlreadyEnrolled)?;

    info!(user_id = %user_id, course_id = %course_id, "课程报名成功");

    Ok(Json(ApiResponse::success(EnrollmentDto::from(&enrollment))))
}

/// 我的选课列表
///
/// GET /api/courses/enrollments
pub async fn list_enrollments(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<Vec<EnrollmentDto>>>> {
    let user_id = claims.user_id()?;
    let repo = CourseRepository::new(state.pool.clone());

    let enrollments = repo.list_user_enrollments(user_id).await?;
    let items = enrollments.iter().map(EnrollmentDto::from).collect();

    Ok(Json(ApiResponse::success(items)))
}

/// 标记课时完成
///
/// POST /api/courses/{id}/lessons/{lesson_id}/complete
///
/// 课时追加是条件更新，重复提交幂等。完成后立即评估授予，
/// 完课/学习类徽章随响应返回。
pub async fn complete_lesson(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((course_id, lesson_id)): Path<(Uuid, String)>,
) -> Result<Json<ApiResponse<LessonCompleteDto>>> {
    let user_id = claims.user_id()?;
    let repo = CourseRepository::new(state.pool.clone());

    let course = repo
        .find_by_id(course_id)
        .await?
        .ok_or_else(|| ApiError::CourseNotFound(course_id.to_string()))?;

    if !course.has_lesson(&lesson_id) {
        return Err(ApiError::LessonNotFound(lesson_id));
    }

    let enrollment = match repo
        .complete_lesson(user_id, course_id, &lesson_id, course.lesson_count() as i32)
        .await?
    {
        Some(enrollment) => enrollment,
        // 条件更新未命中：要么未选课，要么课时已完成（幂等返回现状）
        None => repo
            .find_enrollment(user_id, course_id)
            .await?
            .ok_or_else(|| ApiError::EnrollmentNotFound(course_id.to_string()))?,
    };

    let outcome = state.award_service.evaluate_and_grant(user_id).await?;

    Ok(Json(ApiResponse::success(LessonCompleteDto {
        enrollment: EnrollmentDto::from(&enrollment),
        newly_granted: outcome
            .granted
            .iter()
            .map(|b| BadgeDto::from_definition(*b, Some(chrono::Utc::now())))
            .collect(),
        points_awarded: outcome.points_awarded,
    })))
}
