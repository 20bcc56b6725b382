//! HTTP 处理器
//!
//! 薄封装：解析请求、复核资源归属、调用服务层、包装统一响应

pub mod course;
pub mod enrollment;
pub mod purchase;
pub mod wallet;
