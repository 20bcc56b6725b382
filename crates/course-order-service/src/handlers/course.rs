//! 课程查询 API 处理器
//!
//! 只暴露原始计数（报名人数、小组人数、名义容量），
//! 派生指标由报表系统计算

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    error::Result,
    service::dto::{ApiResponse, CourseDetailDto, CourseSummaryDto},
    state::AppState,
};

/// 列出开放购买的课程
///
/// GET /api/v1/courses
pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CourseSummaryDto>>>> {
    let courses = state.query.list_courses().await?;
    Ok(Json(ApiResponse::success(courses)))
}

/// 课程详情
///
/// GET /api/v1/courses/{course_id}
pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Result<Json<ApiResponse<CourseDetailDto>>> {
    let detail = state.query.course_detail(course_id).await?;
    Ok(Json(ApiResponse::success(detail)))
}
