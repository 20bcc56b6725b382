//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use crate::service::{PgPurchaseService, QueryService, WalletService};

/// Axum 应用共享状态
///
/// 服务实例通过 Arc 在 handler 间共享；数据库连接池由各服务持有
#[derive(Clone)]
pub struct AppState {
    /// 购买编排服务
    pub purchase: Arc<PgPurchaseService>,
    /// 钱包服务
    pub wallet: Arc<WalletService>,
    /// 报表查询服务
    pub query: Arc<QueryService>,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(
        purchase: Arc<PgPurchaseService>,
        wallet: Arc<WalletService>,
        query: Arc<QueryService>,
    ) -> Self {
        Self {
            purchase,
            wallet,
            query,
        }
    }
}
