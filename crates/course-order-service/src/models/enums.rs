//! 订单服务枚举类型定义
//!
//! 枚举同时支持数据库（sqlx）和 JSON（serde）序列化

use serde::{Deserialize, Serialize};

/// 积分账本变动类型
///
/// 账本采用复式记账思想，每条流水记录变动类型、数量和变动后余额
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
pub enum ChangeType {
    /// 扣减（-）- 购买课程
    Debit,
    /// 充值（+）- 运营后台加点
    Credit,
}

impl ChangeType {
    /// 返回该变动类型的数量符号
    /// 正数表示增加，负数表示减少
    pub fn sign(&self) -> i64 {
        match self {
            Self::Credit => 1,
            Self::Debit => -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_type_sign() {
        assert_eq!(ChangeType::Debit.sign(), -1);
        assert_eq!(ChangeType::Credit.sign(), 1);
    }

    #[test]
    fn test_change_type_json_format() {
        assert_eq!(
            serde_json::to_string(&ChangeType::Debit).unwrap(),
            "\"DEBIT\""
        );
        assert_eq!(
            serde_json::to_string(&ChangeType::Credit).unwrap(),
            "\"CREDIT\""
        );
    }
}
