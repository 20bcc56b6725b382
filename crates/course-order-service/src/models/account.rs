//! 积分账户相关实体定义
//!
//! 包含用户积分账户与账本流水

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::ChangeType;

/// 用户积分账户
///
/// 余额只能通过钱包账本的扣减/充值操作变动，任何时刻 `balance >= 0`
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// 用户 ID（外部身份系统签发的不透明标识）
    pub user_id: String,
    /// 当前积分余额
    pub balance: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// 检查余额是否足以支付指定金额
    pub fn can_afford(&self, amount: i64) -> bool {
        self.balance >= amount
    }
}

/// 积分账本流水
///
/// 仅追加，记录余额的每一次变动以及变动后余额，确保资金变动可追溯。
/// 与其记录的余额变动在同一事务中写入。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WalletEntry {
    pub id: i64,
    /// 用户 ID
    pub user_id: String,
    /// 变动类型
    pub change_type: ChangeType,
    /// 变动数量（始终为正数，符号由 change_type 决定）
    pub amount: i64,
    /// 变动后的余额
    pub balance_after: i64,
    /// 关联的业务 ID（如报名记录 ID）
    #[sqlx(default)]
    pub ref_id: Option<String>,
    /// 备注
    #[sqlx(default)]
    pub remark: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl WalletEntry {
    /// 计算实际变动值（带符号）
    pub fn signed_amount(&self) -> i64 {
        self.amount * self.change_type.sign()
    }

    /// 创建购买扣减流水
    pub fn debit(
        user_id: String,
        amount: i64,
        balance_after: i64,
        enrollment_id: i64,
        course_title: &str,
    ) -> Self {
        Self {
            id: 0,
            user_id,
            change_type: ChangeType::Debit,
            amount,
            balance_after,
            ref_id: Some(enrollment_id.to_string()),
            remark: Some(format!("购买课程: {}", course_title)),
            created_at: Utc::now(),
        }
    }

    /// 创建充值流水
    pub fn credit(user_id: String, amount: i64, balance_after: i64, operator: &str) -> Self {
        Self {
            id: 0,
            user_id,
            change_type: ChangeType::Credit,
            amount,
            balance_after,
            ref_id: None,
            remark: Some(format!("运营充值, 操作人: {}", operator)),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_can_afford() {
        let account = Account {
            user_id: "user-123".to_string(),
            balance: 1000,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(account.can_afford(100));
        assert!(account.can_afford(1000));
        assert!(!account.can_afford(1001));
    }

    #[test]
    fn test_wallet_entry_signed_amount() {
        let entry = WalletEntry::debit("user-1".to_string(), 100, 900, 42, "Rust 入门");
        assert_eq!(entry.signed_amount(), -100);

        let entry = WalletEntry::credit("user-1".to_string(), 500, 1400, "admin-1");
        assert_eq!(entry.signed_amount(), 500);
    }

    #[test]
    fn test_wallet_entry_builders() {
        let entry = WalletEntry::debit("user-1".to_string(), 100, 900, 42, "Rust 入门");
        assert_eq!(entry.change_type, ChangeType::Debit);
        assert_eq!(entry.amount, 100);
        assert_eq!(entry.balance_after, 900);
        assert_eq!(entry.ref_id, Some("42".to_string()));
        assert!(entry.remark.unwrap().contains("Rust 入门"));

        let entry = WalletEntry::credit("user-1".to_string(), 500, 1400, "admin-1");
        assert_eq!(entry.change_type, ChangeType::Credit);
        assert!(entry.ref_id.is_none());
        assert!(entry.remark.unwrap().contains("admin-1"));
    }
}
