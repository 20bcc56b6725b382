//! 积分账本仓储
//!
//! 账本仅追加，与其记录的余额变动在同一事务中写入

use sqlx::{PgConnection, PgPool, Row};

use crate::error::Result;
use crate::models::WalletEntry;

/// 积分账本仓储
pub struct WalletLedgerRepository {
    pool: PgPool,
}

impl WalletLedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 查询用户最近的账本流水
    pub async fn list_by_user(&self, user_id: &str, limit: i64) -> Result<Vec<WalletEntry>> {
        let entries = sqlx::query_as::<_, WalletEntry>(
            r#"
            SELECT id, user_id, change_type, amount, balance_after, ref_id, remark, created_at
            FROM wallet_ledger
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// 在事务中写入账本流水
    ///
    /// 返回新记录的 ID
    pub async fn create_in_tx(tx: &mut PgConnection, entry: &WalletEntry) -> Result<i64> {
        let row = sqlx::query(
            r#"
            INSERT INTO wallet_ledger (user_id, change_type, amount, balance_after, ref_id, remark, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&entry.user_id)
        .bind(entry.change_type)
        .bind(entry.amount)
        .bind(entry.balance_after)
        .bind(&entry.ref_id)
        .bind(&entry.remark)
        .bind(entry.created_at)
        .fetch_one(tx)
        .await?;

        Ok(row.get("id"))
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_repository_methods_exist() {
        // 类型检查：确保方法签名正确
        // 实际测试需要配合测试数据库
    }
}
