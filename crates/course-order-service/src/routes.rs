//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射，并绑定路由级访问策略。
//! 身份中间件由 main 在外层统一挂载，这里的策略检查依赖其注入的 Caller。

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::{
    handlers,
    middleware::{AccessPolicy, require_policy},
    state::AppState,
};

/// 构建 API 路由
pub fn api_routes() -> Router<AppState> {
    // 读接口：人人可读
    let read_routes = Router::new()
        .route("/courses", get(handlers::course::list_courses))
        .route("/courses/{course_id}", get(handlers::course::get_course))
        .route("/enrollments", get(handlers::enrollment::list_enrollments))
        .route("/wallet", get(handlers::wallet::get_wallet))
        .route_layer(middleware::from_fn(require_policy(AccessPolicy::ReadOnly)));

    // 购买：调用方为自己购买，已认证即可进入
    let purchase_routes = Router::new()
        .route("/courses/{course_id}/pay", post(handlers::purchase::pay))
        .route_layer(middleware::from_fn(require_policy(
            AccessPolicy::OwnerOrStaff,
        )));

    // 运营接口：仅管理员
    let admin_routes = Router::new()
        .route("/wallet/credit", post(handlers::wallet::credit))
        .route_layer(middleware::from_fn(require_policy(AccessPolicy::AdminOnly)));

    Router::new()
        .merge(read_routes)
        .merge(purchase_routes)
        .merge(admin_routes)
}
