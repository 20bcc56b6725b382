//! 业务服务层
//!
//! 实现购买核心的业务逻辑，协调仓储层与事件发布。
//!
//! ## 模块结构
//!
//! - `dto`: 数据传输对象定义
//! - `purchase_service`: 购买编排（扣款 + 报名的事务组合）
//! - `placement_service`: 分组策略（人数最少优先）
//! - `wallet_service`: 钱包（余额查询 / 运营充值）
//! - `query_service`: 课程与报名的报表查询（只读操作）

pub mod dto;
pub mod placement_service;
pub mod purchase_service;
pub mod query_service;
pub mod wallet_service;

pub use dto::*;
pub use placement_service::{Placement, PlacementService, choose_group};
pub use purchase_service::{PgPurchaseService, PurchaseService};
pub use query_service::QueryService;
pub use wallet_service::WalletService;
