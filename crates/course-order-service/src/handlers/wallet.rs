//! 钱包 API 处理器

use axum::{
    Json,
    extract::{Extension, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    error::{OrderError, Result},
    middleware::Caller,
    service::dto::{ApiResponse, CreditRequest, CreditResponse, WalletDto},
    state::AppState,
};

/// 钱包查询参数
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletQuery {
    /// 目标用户，缺省为调用方本人；查询他人需要教务及以上
    pub user_id: Option<String>,
}

/// 查询钱包（余额 + 最近流水）
///
/// GET /api/v1/wallet?userId=...
pub async fn get_wallet(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Query(query): Query<WalletQuery>,
) -> Result<Json<ApiResponse<WalletDto>>> {
    let target = query.user_id.unwrap_or_else(|| caller.user_id.clone());

    if !caller.may_act_for(&target) {
        return Err(OrderError::Forbidden("只能查询本人的钱包".to_string()));
    }

    let wallet = state.wallet.wallet(&target).await?;
    Ok(Json(ApiResponse::success(wallet)))
}

/// 运营充值
///
/// POST /api/v1/wallet/credit
///
/// 路由级 AdminOnly 策略保护，操作人记入账本流水
pub async fn credit(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(req): Json<CreditRequest>,
) -> Result<Json<ApiResponse<CreditResponse>>> {
    req.validate()?;

    let balance = state
        .wallet
        .credit(&req.user_id, req.amount, &caller.user_id)
        .await?;

    Ok(Json(ApiResponse::success(CreditResponse {
        user_id: req.user_id,
        balance,
    })))
}
