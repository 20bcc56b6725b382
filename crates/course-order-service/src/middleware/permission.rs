//! 访问策略中间件
//!
//! 路由级访问策略，在任何 handler / 编排逻辑之前评估。
//! 三档策略对应读写分离与角色边界：
//!
//! - `ReadOnly`: 安全方法放行，写方法要求教务及以上
//! - `OwnerOrStaff`: 任何已认证调用方可进入，资源归属由 handler
//!   用 `Caller::may_act_for` 复核
//! - `AdminOnly`: 仅管理员

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::future::Future;
use std::pin::Pin;

use super::identity::{Caller, Role};

/// 不产生副作用的 HTTP 方法
const SAFE_METHODS: [Method; 3] = [Method::GET, Method::HEAD, Method::OPTIONS];

/// 路由访问策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    /// 读接口：任何人可读，写操作要求教务及以上
    ReadOnly,
    /// 本人或教务：已认证即可进入，归属由 handler 复核
    OwnerOrStaff,
    /// 仅管理员
    AdminOnly,
}

impl AccessPolicy {
    /// 评估调用方角色与请求方法是否满足策略
    pub fn permits(&self, role: Role, method: &Method) -> bool {
        match self {
            Self::ReadOnly => SAFE_METHODS.contains(method) || role.is_staff(),
            Self::OwnerOrStaff => true,
            Self::AdminOnly => role.is_admin(),
        }
    }
}

/// 访问策略中间件工厂
///
/// 创建一个按指定策略检查的中间件函数
///
/// # 示例
/// ```ignore
/// .route_layer(axum::middleware::from_fn(require_policy(AccessPolicy::AdminOnly)))
/// ```
pub fn require_policy(
    policy: AccessPolicy,
) -> impl Fn(Request<Body>, Next) -> Pin<Box<dyn Future<Output = Response> + Send>> + Clone + Send
{
    move |request: Request<Body>, next: Next| {
        Box::pin(async move { check_policy(request, next, policy).await })
    }
}

/// 执行策略检查
async fn check_policy(request: Request<Body>, next: Next, policy: AccessPolicy) -> Response {
    // 从请求扩展中获取 Caller（由 identity_middleware 注入）
    let caller = match request.extensions().get::<Caller>() {
        Some(caller) => caller.clone(),
        None => {
            return unauthorized_response("未认证");
        }
    };

    if policy.permits(caller.role, request.method()) {
        return next.run(request).await;
    }

    forbidden_response("当前角色无权执行此操作")
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

/// 生成 403 禁止访问响应
fn forbidden_response(message: &str) -> Response {
    let body = json!({
        "success": false,
        "code": "FORBIDDEN",
        "message": message,
        "data": null
    });

    (StatusCode::FORBIDDEN, axum::Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_only_policy() {
        let policy = AccessPolicy::ReadOnly;

        // 安全方法人人可用
        assert!(policy.permits(Role::Student, &Method::GET));
        assert!(policy.permits(Role::Student, &Method::HEAD));
        assert!(policy.permits(Role::Student, &Method::OPTIONS));

        // 写方法要求教务及以上
        assert!(!policy.permits(Role::Student, &Method::POST));
        assert!(policy.permits(Role::Staff, &Method::POST));
        assert!(policy.permits(Role::Admin, &Method::DELETE));
    }

    #[test]
    fn test_owner_or_staff_policy() {
        let policy = AccessPolicy::OwnerOrStaff;

        // 已认证即可进入，归属由 handler 复核
        assert!(policy.permits(Role::Student, &Method::POST));
        assert!(policy.permits(Role::Staff, &Method::POST));
        assert!(policy.permits(Role::Admin, &Method::GET));
    }

    #[test]
    fn test_admin_only_policy() {
        let policy = AccessPolicy::AdminOnly;

        assert!(!policy.permits(Role::Student, &Method::GET));
        assert!(!policy.permits(Role::Staff, &Method::POST));
        assert!(policy.permits(Role::Admin, &Method::POST));
        assert!(policy.permits(Role::Admin, &Method::GET));
    }
}
