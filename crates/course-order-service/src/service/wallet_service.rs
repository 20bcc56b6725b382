//! 钱包服务
//!
//! 提供余额查询与运营充值。购买扣款不走这里，而是在购买事务内
//! 由 `AccountRepository::debit_in_tx` 完成。

use std::sync::Arc;

use sqlx::PgPool;
use tracing::{info, instrument};

use crate::error::{OrderError, Result};
use crate::models::WalletEntry;
use crate::repository::{AccountRepository, WalletLedgerRepository};
use crate::service::dto::WalletDto;

/// 默认返回的最近流水条数
const DEFAULT_ENTRY_LIMIT: i64 = 20;

/// 钱包服务
pub struct WalletService {
    pool: PgPool,
    account_repo: Arc<AccountRepository>,
    ledger_repo: Arc<WalletLedgerRepository>,
}

impl WalletService {
    pub fn new(
        pool: PgPool,
        account_repo: Arc<AccountRepository>,
        ledger_repo: Arc<WalletLedgerRepository>,
    ) -> Self {
        Self {
            pool,
            account_repo,
            ledger_repo,
        }
    }

    /// 查询钱包视图：余额 + 最近流水
    #[instrument(skip(self))]
    pub async fn wallet(&self, user_id: &str) -> Result<WalletDto> {
        let account = self
            .account_repo
            .get_account(user_id)
            .await?
            .ok_or_else(|| OrderError::AccountNotFound(user_id.to_string()))?;

        let entries = self
            .ledger_repo
            .list_by_user(user_id, DEFAULT_ENTRY_LIMIT)
            .await?;

        Ok(WalletDto {
            user_id: account.user_id,
            balance: account.balance,
            entries,
        })
    }

    /// 运营充值
    ///
    /// 行锁下加余额并在同一事务写入 CREDIT 账本流水。
    /// 返回充值后的余额。
    #[instrument(skip(self), fields(user_id = %user_id, amount = amount))]
    pub async fn credit(&self, user_id: &str, amount: i64, operator: &str) -> Result<i64> {
        if amount <= 0 {
            return Err(OrderError::Validation("充值金额必须大于 0".to_string()));
        }

        let mut tx = self.pool.begin().await?;

        let balance_after = AccountRepository::credit_in_tx(&mut tx, user_id, amount).await?;

        let entry = WalletEntry::credit(user_id.to_string(), amount, balance_after, operator);
        WalletLedgerRepository::create_in_tx(&mut tx, &entry).await?;

        tx.commit().await?;

        metrics::counter!("wallet_credits_total").increment(1);

        info!(
            user_id = %user_id,
            amount = amount,
            balance_after = balance_after,
            operator = %operator,
            "积分充值成功"
        );

        Ok(balance_after)
    }
}
