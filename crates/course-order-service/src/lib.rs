//! 课程订单服务
//!
//! 课程市场的购买核心：学生用内部积分购买课程访问权限，
//! 购买成功后自动分配到课程的学习小组。
//!
//! ## 核心保证
//!
//! - **余额不为负**：扣款在行锁保护下检查并扣减，余额永不透支
//! - **恰好扣款一次**：扣款与报名在同一事务中提交，重复请求以
//!   `AlreadyEnrolled` 干净失败而不会二次扣款
//! - **报名唯一**：(用户, 课程) 唯一约束下并发请求只有一个赢家
//! - **分组均衡**：新学员进入人数最少的小组（同数取最小组 ID），
//!   尽力而为，不阻塞购买主流程
//!
//! ## 模块结构
//!
//! - `models`: 领域模型定义
//! - `error`: 错误类型定义
//! - `repository`: 数据库仓储层
//! - `service`: 业务服务层（购买编排、分组策略、钱包、查询）
//! - `worker`: 报名事件消费（异步分组安置）
//! - `middleware`: 调用方身份与访问策略
//! - `handlers`: HTTP 处理器
//! - `routes` / `state`: 路由与共享状态

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;
pub mod worker;

pub use error::{OrderError, Result};
pub use models::*;
pub use repository::{
    AccountRepository, CourseRepository, EnrollmentRepository, GroupRepository,
    WalletLedgerRepository,
};
pub use service::{PlacementService, PurchaseService, QueryService, WalletService, dto};
pub use worker::{PlacementHandler, PlacementSender, PlacementWorker, placement_channel};
