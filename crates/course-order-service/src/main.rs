//! 课程订单服务入口
//!
//! 提供课程购买、钱包与报名查询的 REST API。

use std::sync::Arc;

use axum::{Json, Router, http::HeaderValue, middleware, routing::get};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use course_order::{
    middleware::identity_middleware,
    repository::{
        AccountRepository, CourseRepository, EnrollmentRepository, GroupRepository,
        WalletLedgerRepository,
    },
    routes,
    service::{PlacementService, PurchaseService, QueryService, WalletService},
    state::AppState,
    worker::{PlacementHandler, PlacementWorker, placement_channel},
};
use course_shared::{
    config::AppConfig,
    database::Database,
    observability::{self, middleware as obs_middleware},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 统一加载配置：从 config/{service_name}.toml 加载，包含可观测性配置
    let config = AppConfig::load("course-order-service").unwrap_or_default();

    // 从 AppConfig 中提取可观测性配置并注入服务名
    let obs_config = config
        .observability
        .clone()
        .with_service_name("course-order-service");
    let _guard = observability::init(&obs_config).await?;

    info!("Starting course-order-service on {}", config.server_addr());

    // 初始化基础设施
    let db = Database::connect(&config.database).await?;
    let pool = db.pool().clone();

    // 仓储层
    let account_repo = Arc::new(AccountRepository::new(pool.clone()));
    let ledger_repo = Arc::new(WalletLedgerRepository::new(pool.clone()));
    let course_repo = Arc::new(CourseRepository::new(pool.clone()));
    let enrollment_repo = Arc::new(EnrollmentRepository::new(pool.clone()));
    let group_repo = Arc::new(GroupRepository::new(pool.clone()));

    // 报名事件通道：购买编排发布，分组 worker 消费
    let (placement_sender, placement_rx) = placement_channel();

    // 服务层
    let purchase = Arc::new(PurchaseService::new(
        pool.clone(),
        course_repo.clone(),
        enrollment_repo.clone(),
        placement_sender,
    ));
    let wallet = Arc::new(WalletService::new(pool.clone(), account_repo, ledger_repo));
    let query = Arc::new(QueryService::new(
        course_repo,
        enrollment_repo,
        group_repo.clone(),
    ));

    // 启动分组安置 Worker：消费报名事件并执行分组策略
    let placement_handler = Arc::new(PlacementHandler::new(PlacementService::new(group_repo)));
    tokio::spawn(async move {
        PlacementWorker::new(placement_rx, placement_handler)
            .run()
            .await;
    });

    let state = AppState::new(purchase, wallet, query);

    // CORS 配置：通过 COURSE_CORS_ORIGINS 环境变量控制允许的来源
    let allowed_origins = std::env::var("COURSE_CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());

    let cors = if allowed_origins == "*" {
        if config.is_production() {
            warn!("COURSE_CORS_ORIGINS=\"*\" 在生产环境中不安全，请设置为具体域名");
        }
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        info!("CORS allowed_origins: {}", allowed_origins);
        let origins: Vec<_> = allowed_origins
            .split(',')
            .filter_map(|s| s.trim().parse::<HeaderValue>().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // 业务路由在身份中间件之内；健康检查对外公开
    let api = routes::api_routes().layer(middleware::from_fn(identity_middleware));

    let app = Router::new()
        .nest("/api/v1", api)
        .route("/health", get(health_check))
        .route(
            "/ready",
            get({
                let db_for_ready = db;
                move || readiness_check(db_for_ready.clone())
            }),
        )
        .layer(cors)
        // 可观测性中间件：请求追踪和指标收集
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id))
        .with_state(state);

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Listening on {}", config.server_addr());

    // 优雅关闭：收到 SIGTERM（K8s 停止 Pod）或 Ctrl+C 时，
    // 停止接收新连接并等待已有请求处理完毕
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// 监听关闭信号
///
/// K8s 通过 SIGTERM 通知 Pod 停止；本地开发通过 Ctrl+C。
/// 收到任一信号后返回，触发 axum 的优雅关闭流程。
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("注册 Ctrl+C 处理器失败");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("注册 SIGTERM 处理器失败")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}

/// 存活探针：服务进程正常即返回 ok
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "course-order-service"
    }))
}

/// 就绪探针：检查数据库连接是否可用
///
/// K8s 就绪探针失败时会将 Pod 从 Service 端点移除，
/// 避免将流量路由到无法正常处理请求的实例。
async fn readiness_check(db: Database) -> Json<serde_json::Value> {
    let db_ok = db.health_check().await.is_ok();

    Json(serde_json::json!({
        "status": if db_ok { "ok" } else { "degraded" },
        "service": "course-order-service",
        "checks": {
            "database": if db_ok { "ok" } else { "fail" }
        }
    }))
}
