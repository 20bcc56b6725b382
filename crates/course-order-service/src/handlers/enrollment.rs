//! 报名记录查询 API 处理器

use axum::{
    Json,
    extract::{Extension, Query, State},
};
use serde::Deserialize;

use crate::{
    error::{OrderError, Result},
    middleware::Caller,
    models::Enrollment,
    service::dto::ApiResponse,
    state::AppState,
};

/// 报名记录查询参数
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentQuery {
    /// 目标用户，缺省为调用方本人；查询他人需要教务及以上
    pub user_id: Option<String>,
}

/// 查询报名记录
///
/// GET /api/v1/enrollments?userId=...
pub async fn list_enrollments(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Query(query): Query<EnrollmentQuery>,
) -> Result<Json<ApiResponse<Vec<Enrollment>>>> {
    let target = query.user_id.unwrap_or_else(|| caller.user_id.clone());

    if !caller.may_act_for(&target) {
        return Err(OrderError::Forbidden(
            "只能查询本人的报名记录".to_string(),
        ));
    }

    let enrollments = state.query.user_enrollments(&target).await?;
    Ok(Json(ApiResponse::success(enrollments)))
}
