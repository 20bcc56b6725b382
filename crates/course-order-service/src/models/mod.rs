//! 订单服务领域模型
//!
//! 包含购买核心的所有实体定义

pub mod account;
pub mod course;
pub mod enrollment;
pub mod enums;
pub mod group;

// 重新导出常用类型
pub use account::{Account, WalletEntry};
pub use course::Course;
pub use enrollment::Enrollment;
pub use enums::ChangeType;
pub use group::GroupFill;
