//! 课程实体定义
//!
//! 课程内容管理属于目录服务，本服务对课程只读

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 课程
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    /// 作者
    pub author: String,
    /// 名称
    pub title: String,
    /// 开课时间
    pub start_at: DateTime<Utc>,
    /// 价格（积分）
    pub price: i64,
    /// 是否开放购买
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// 检查课程是否可购买
    pub fn is_purchasable(&self) -> bool {
        self.available
    }
}
