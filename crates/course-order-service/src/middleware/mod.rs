//! 调用方身份与访问策略
//!
//! 认证由上游网关完成，这里只消费网关注入的身份头并执行
//! 路由级访问策略检查。

mod identity;
mod permission;

pub use identity::{Caller, Role, identity_middleware};
pub use permission::{AccessPolicy, require_policy};
