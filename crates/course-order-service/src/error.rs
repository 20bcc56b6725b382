//! 订单服务错误类型
//!
//! 定义购买核心的业务错误和系统错误，并提供到 HTTP 响应的映射。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// 订单服务错误类型
#[derive(Debug, Error)]
pub enum OrderError {
    // === 课程相关错误 ===
    #[error("课程不存在: {0}")]
    CourseNotFound(i64),

    #[error("课程未开放购买: {0}")]
    CourseUnavailable(i64),

    // === 钱包相关错误 ===
    #[error("积分账户不存在: user_id={0}")]
    AccountNotFound(String),

    #[error("积分余额不足: 需要 {required}, 实际 {available}")]
    InsufficientBalance { required: i64, available: i64 },

    // === 报名相关错误 ===
    #[error("已报名该课程: user_id={user_id}, course_id={course_id}")]
    AlreadyEnrolled { user_id: String, course_id: i64 },

    // === 分组相关错误 ===
    // 分组失败不会作为请求错误返回给购买方，仅在 worker 中记录
    #[error("课程暂无学习小组: course_id={0}")]
    NoGroups(i64),

    // === 权限错误 ===
    // 身份认证由上游网关完成，这里只处理资源归属与角色不符的情况
    #[error("禁止访问: {0}")]
    Forbidden(String),

    // === 系统错误 ===
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("参数校验失败: {0}")]
    Validation(String),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 订单服务 Result 类型别名
pub type Result<T> = std::result::Result<T, OrderError>;

impl OrderError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::CourseNotFound(_) | Self::AccountNotFound(_) => StatusCode::NOT_FOUND,

            // 余额不足沿用上游网关约定的 400 分类
            Self::InsufficientBalance { .. } | Self::Validation(_) => StatusCode::BAD_REQUEST,

            // 重复购买 / 课程下架属于与当前状态的冲突
            Self::AlreadyEnrolled { .. } | Self::CourseUnavailable(_) => StatusCode::CONFLICT,

            Self::Forbidden(_) => StatusCode::FORBIDDEN,

            Self::NoGroups(_) | Self::Database(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::CourseNotFound(_) => "COURSE_NOT_FOUND",
            Self::CourseUnavailable(_) => "COURSE_UNAVAILABLE",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::AlreadyEnrolled { .. } => "ALREADY_ENROLLED",
            Self::NoGroups(_) => "NO_GROUPS",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 检查是否为业务错误（非系统错误）
    pub fn is_business_error(&self) -> bool {
        !matches!(self, Self::Database(_) | Self::Internal(_))
    }

    /// 购买指标的 outcome 标签
    pub fn purchase_outcome(&self) -> &'static str {
        match self {
            Self::CourseNotFound(_) => "course_not_found",
            Self::CourseUnavailable(_) => "course_unavailable",
            Self::InsufficientBalance { .. } => "insufficient_balance",
            Self::AlreadyEnrolled { .. } => "already_enrolled",
            _ => "storage_error",
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志，防止信息泄露
        let message = match &self {
            Self::Database(e) => {
                tracing::error!(error = %e, "数据库操作失败");
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
impl From<validator::ValidationErrors> for OrderError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// 从基础设施错误转换
impl From<course_shared::error::SharedError> for OrderError {
    fn from(err: course_shared::error::SharedError) -> Self {
        match err {
            course_shared::error::SharedError::Database(e) => Self::Database(e),
            other => Self::Internal(other.to_string()),
        }
    }
}
