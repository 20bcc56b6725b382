//! 调用方身份中间件
//!
//! 上游网关完成认证后注入 `x-user-id` 与 `x-user-role` 头，
//! 本中间件将其转换为 `Caller` 扩展供策略检查与 handler 使用。
//! 头缺失或非法视为未认证请求。

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// 调用方角色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// 学生 - 普通用户
    Student,
    /// 教务 - 可查看他人数据
    Staff,
    /// 管理员 - 拥有全部权限
    Admin,
}

impl Role {
    /// 从网关注入的角色头解析
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "student" => Some(Self::Student),
            "staff" => Some(Self::Staff),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// 教务及以上
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Staff | Self::Admin)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// 已认证的调用方
#[derive(Debug, Clone)]
pub struct Caller {
    pub user_id: String,
    pub role: Role,
}

impl Caller {
    /// 是否可以代表目标用户操作（本人或教务及以上）
    pub fn may_act_for(&self, user_id: &str) -> bool {
        self.user_id == user_id || self.role.is_staff()
    }
}

/// 身份中间件
///
/// 从网关注入的头解析调用方身份，写入请求扩展
pub async fn identity_middleware(mut request: Request<Body>, next: Next) -> Response {
    let user_id = request
        .headers()
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(String::from);

    let role = request
        .headers()
        .get("x-user-role")
        .and_then(|v| v.to_str().ok())
        .and_then(Role::parse);

    let (Some(user_id), Some(role)) = (user_id, role) else {
        return unauthorized_response("缺少有效的调用方身份");
    };

    request.extensions_mut().insert(Caller { user_id, role });

    next.run(request).await
}

/// 生成 401 未授权响应
fn unauthorized_response(message: &str) -> Response {
    let body = json!({
        "success": false,
        "code": "UNAUTHORIZED",
        "message": message,
        "data": null
    });

    (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
}
