//! 数据库仓储层
//!
//! 提供所有实体的数据访问接口，封装 SQL 操作细节。
//!
//! ## 设计原则
//!
//! - 仓储只负责数据持久化，不包含业务逻辑
//! - 使用 SQLx 进行类型安全的数据库操作
//! - 事务控制由调用方（服务层）决定，`*_in_tx` 方法在调用方的事务上执行
//! - 定义 trait 接口以支持 mock 测试

mod account_repo;
mod course_repo;
mod enrollment_repo;
mod group_repo;
mod traits;
mod wallet_ledger_repo;

pub use account_repo::AccountRepository;
pub use course_repo::CourseRepository;
pub use enrollment_repo::EnrollmentRepository;
pub use group_repo::GroupRepository;
pub use traits::*;
pub use wallet_ledger_repo::WalletLedgerRepository;
