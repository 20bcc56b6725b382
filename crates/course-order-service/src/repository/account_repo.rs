//! 积分账户仓储
//!
//! 提供账户余额的数据访问，扣减/充值在行级锁保护下执行

use sqlx::{PgConnection, PgPool};

use crate::error::{OrderError, Result};
use crate::models::Account;

/// 积分账户仓储
///
/// 余额是购买核心唯一的共享可变资金状态，所有变动都走
/// `FOR UPDATE` 行锁 + 同事务写账本的路径
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== 查询操作 ====================

    /// 获取用户账户
    pub async fn get_account(&self, user_id: &str) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT user_id, balance, created_at, updated_at
            FROM accounts
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    // ==================== 事务操作 ====================

    /// 在事务中获取账户（带行级锁）
    ///
    /// 使用 FOR UPDATE 锁定行，同一账户的并发扣减被串行化
    pub async fn get_account_for_update(
        tx: &mut PgConnection,
        user_id: &str,
    ) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT user_id, balance, created_at, updated_at
            FROM accounts
            WHERE user_id = $1
            FOR UPDATE
            "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        Ok(account)
    }

    /// 在事务中扣减余额
    ///
    /// 先锁行再校验余额，保证：
    /// - 余额不足时不产生任何变动，返回 `InsufficientBalance`
    /// - N 个并发扣减的成功/失败边界与某个串行顺序一致
    ///
    /// 返回扣减后的余额。`amount` 必须大于 0，由服务层保证。
    pub async fn debit_in_tx(tx: &mut PgConnection, user_id: &str, amount: i64) -> Result<i64> {
        let account = Self::get_account_for_update(tx, user_id)
            .await?
            .ok_or_else(|| OrderError::AccountNotFound(user_id.to_string()))?;

        if !account.can_afford(amount) {
            return Err(OrderError::InsufficientBalance {
                required: amount,
                available: account.balance,
            });
        }

        let balance_after: i64 = sqlx::query_scalar(
            r#"
            UPDATE accounts
            SET balance = balance - $2, updated_at = NOW()
            WHERE user_id = $1
            RETURNING balance
            "#,
        )
        .bind(user_id)
        .bind(amount)
        .fetch_one(&mut *tx)
        .await?;

        Ok(balance_after)
    }

    /// 在事务中充值余额
    ///
    /// 返回充值后的余额
    pub async fn credit_in_tx(tx: &mut PgConnection, user_id: &str, amount: i64) -> Result<i64> {
        // 充值同样先锁行，保证 balance_after 写入账本时的读数一致
        Self::get_account_for_update(tx, user_id)
            .await?
            .ok_or_else(|| OrderError::AccountNotFound(user_id.to_string()))?;

        let balance_after: i64 = sqlx::query_scalar(
            r#"
            UPDATE accounts
            SET balance = balance + $2, updated_at = NOW()
            WHERE user_id = $1
            RETURNING balance
            "#,
        )
        .bind(user_id)
        .bind(amount)
        .fetch_one(&mut *tx)
        .await?;

        Ok(balance_after)
    }
}
