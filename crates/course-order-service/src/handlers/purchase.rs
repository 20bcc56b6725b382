//! 购买 API 处理器
//!
//! 购买核心对外的唯一写操作

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
};

use crate::{
    error::Result,
    middleware::Caller,
    service::dto::{ApiResponse, PurchaseRequest, PurchaseResponse},
    state::AppState,
};

/// 购买课程访问权限
///
/// POST /api/v1/courses/{course_id}/pay
///
/// 调用方只能为自己购买；成功返回 201 与报名记录。
/// 分组安置异步执行，响应不等待也不反映其结果。
pub async fn pay(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(course_id): Path<i64>,
) -> Result<(StatusCode, Json<ApiResponse<PurchaseResponse>>)> {
    let request = PurchaseRequest::new(caller.user_id, course_id);
    let response = state.purchase.purchase(request).await?;

    let message = response.message.clone();
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(response, message)),
    ))
}
