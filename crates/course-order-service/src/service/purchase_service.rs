//! 购买编排服务
//!
//! 课程购买的唯一入口，组合钱包扣款、报名登记与分组安置：
//!
//! 1. 课程解析（不存在 / 未开放则拒绝）
//! 2. 幂等快速路径（已报名的重试请求直接拒绝，不开写事务）
//! 3. 扣款 + 报名在单个数据库事务内提交（要么都生效要么都不生效）
//! 4. 提交后发布报名事件，分组安置异步执行，不阻塞购买响应
//!
//! ## 并发语义
//!
//! - 同一账户的并发扣款被 FOR UPDATE 行锁串行化，余额永不为负
//! - 同一 (用户, 课程) 的并发购买由唯一约束裁决，恰好一个提交，
//!   其余在事务内回滚（扣款一并撤销）并返回 `AlreadyEnrolled`
//! - 任何失败路径都不留下部分状态

use std::sync::Arc;
use std::time::Instant;

use sqlx::PgPool;
use tracing::{info, instrument};

use course_shared::events::EnrollmentCreated;
use course_shared::observability::metrics as obs_metrics;

use crate::error::{OrderError, Result};
use crate::models::{Course, Enrollment, WalletEntry};
use crate::repository::{
    AccountRepository, CourseRepository, CourseRepositoryTrait, EnrollmentRepository,
    EnrollmentRepositoryTrait, WalletLedgerRepository,
};
use crate::service::dto::{PurchaseRequest, PurchaseResponse};
use crate::worker::PlacementSender;

/// 购买编排服务
///
/// 不持有跨请求状态；每次购买的共享可变状态（余额、报名）都在
/// 数据库事务边界内变更。
pub struct PurchaseService<CR, ER>
where
    CR: CourseRepositoryTrait,
    ER: EnrollmentRepositoryTrait,
{
    pool: PgPool,
    course_repo: Arc<CR>,
    enrollment_repo: Arc<ER>,
    events: PlacementSender,
}

/// 生产环境使用的具体类型
pub type PgPurchaseService = PurchaseService<CourseRepository, EnrollmentRepository>;

impl<CR, ER> PurchaseService<CR, ER>
where
    CR: CourseRepositoryTrait,
    ER: EnrollmentRepositoryTrait,
{
    pub fn new(
        pool: PgPool,
        course_repo: Arc<CR>,
        enrollment_repo: Arc<ER>,
        events: PlacementSender,
    ) -> Self {
        Self {
            pool,
            course_repo,
            enrollment_repo,
            events,
        }
    }

    /// 购买课程
    ///
    /// 状态机：`Started -> {Rejected(CourseNotFound) | Rejected(CourseUnavailable)
    /// | Rejected(InsufficientBalance) | Rejected(AlreadyEnrolled) | Committed}`。
    /// 所有 Rejected 都是零变动终态；Committed 触发尽力而为的分组副作用。
    #[instrument(skip(self, request), fields(user_id = %request.user_id, course_id = request.course_id))]
    pub async fn purchase(&self, request: PurchaseRequest) -> Result<PurchaseResponse> {
        let start = Instant::now();
        let result = self.purchase_inner(&request).await;

        let outcome = match &result {
            Ok(_) => "committed",
            Err(e) => e.purchase_outcome(),
        };
        obs_metrics::record_purchase(outcome, start.elapsed().as_secs_f64());

        result
    }

    async fn purchase_inner(&self, request: &PurchaseRequest) -> Result<PurchaseResponse> {
        // 1. 课程解析
        let course = self
            .course_repo
            .get_course(request.course_id)
            .await?
            .ok_or(OrderError::CourseNotFound(request.course_id))?;

        if !course.is_purchasable() {
            return Err(OrderError::CourseUnavailable(course.id));
        }

        // 2. 幂等快速路径：重试请求不开写事务、不碰余额
        if self
            .enrollment_repo
            .exists(&request.user_id, course.id)
            .await?
        {
            return Err(OrderError::AlreadyEnrolled {
                user_id: request.user_id.clone(),
                course_id: course.id,
            });
        }

        // 3. 扣款 + 报名作为一个事务提交
        let (enrollment, balance_after) = self.execute_purchase(&request.user_id, &course).await?;

        info!(
            user_id = %enrollment.user_id,
            course_id = enrollment.course_id,
            enrollment_id = enrollment.id,
            price = course.price,
            balance_after = balance_after,
            "课程购买成功"
        );

        // 4. 事务提交之后才发布报名事件，分组安置不会看到未提交的报名
        self.events.send(EnrollmentCreated::new(
            enrollment.id,
            enrollment.user_id.clone(),
            enrollment.course_id,
            enrollment.created_at,
        ));

        Ok(PurchaseResponse::committed(&enrollment))
    }

    /// 执行购买事务
    ///
    /// 在单个事务内完成：
    /// - 行锁下检查并扣减余额
    /// - 原子检查并创建报名记录
    /// - 写入账本流水（引用报名记录 ID）
    ///
    /// 任一步骤失败则整个事务回滚，不存在"扣了款但没报名"
    /// 或"报了名但没扣款"的可观察状态。
    async fn execute_purchase(&self, user_id: &str, course: &Course) -> Result<(Enrollment, i64)> {
        let mut tx = self.pool.begin().await?;

        // 3.1 扣减余额（免费课程不动钱包）
        let balance_after = if course.price > 0 {
            Some(AccountRepository::debit_in_tx(&mut tx, user_id, course.price).await?)
        } else {
            None
        };

        // 3.2 原子检查并创建报名记录；并发输家在此回滚，扣款一并撤销
        let enrollment =
            match EnrollmentRepository::create_in_tx(&mut tx, user_id, course.id).await? {
                Some(enrollment) => enrollment,
                None => {
                    tx.rollback().await?;
                    return Err(OrderError::AlreadyEnrolled {
                        user_id: user_id.to_string(),
                        course_id: course.id,
                    });
                }
            };

        // 3.3 写入账本流水
        if let Some(balance_after) = balance_after {
            let entry = WalletEntry::debit(
                user_id.to_string(),
                course.price,
                balance_after,
                enrollment.id,
                &course.title,
            );
            WalletLedgerRepository::create_in_tx(&mut tx, &entry).await?;
        }

        tx.commit().await?;

        Ok((enrollment, balance_after.unwrap_or(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockCourseRepositoryTrait, MockEnrollmentRepositoryTrait};
    use crate::worker::placement_channel;
    use chrono::Utc;
    use sqlx::postgres::PgPoolOptions;

    fn lazy_pool() -> PgPool {
        // connect_lazy 不建立连接；以下测试只覆盖不触达数据库的拒绝路径
        PgPoolOptions::new()
            .connect_lazy("postgres://localhost:1/unused")
            .unwrap()
    }

    fn create_test_course(id: i64, available: bool) -> Course {
        Course {
            id,
            author: "张老师".to_string(),
            title: "Rust 入门".to_string(),
            start_at: Utc::now(),
            price: 100,
            available,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_purchase_course_not_found() {
        let mut course_repo = MockCourseRepositoryTrait::new();
        course_repo.expect_get_course().returning(|_| Ok(None));

        let enrollment_repo = MockEnrollmentRepositoryTrait::new();
        let (sender, mut rx) = placement_channel();

        let service = PurchaseService::new(
            lazy_pool(),
            Arc::new(course_repo),
            Arc::new(enrollment_repo),
            sender,
        );

        let err = service
            .purchase(PurchaseRequest::new("user-001", 42))
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::CourseNotFound(42)));
        // 拒绝路径不发布任何事件
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_purchase_course_unavailable() {
        let mut course_repo = MockCourseRepositoryTrait::new();
        course_repo
            .expect_get_course()
            .returning(|id| Ok(Some(create_test_course(id, false))));

        let enrollment_repo = MockEnrollmentRepositoryTrait::new();
        let (sender, mut rx) = placement_channel();

        let service = PurchaseService::new(
            lazy_pool(),
            Arc::new(course_repo),
            Arc::new(enrollment_repo),
            sender,
        );

        let err = service
            .purchase(PurchaseRequest::new("user-001", 7))
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::CourseUnavailable(7)));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_purchase_retry_fails_cleanly_with_already_enrolled() {
        let mut course_repo = MockCourseRepositoryTrait::new();
        course_repo
            .expect_get_course()
            .returning(|id| Ok(Some(create_test_course(id, true))));

        // 重试请求：报名记录已存在
        let mut enrollment_repo = MockEnrollmentRepositoryTrait::new();
        enrollment_repo
            .expect_exists()
            .withf(|user_id, course_id| user_id == "user-001" && *course_id == 7)
            .returning(|_, _| Ok(true));

        let (sender, mut rx) = placement_channel();

        let service = PurchaseService::new(
            lazy_pool(),
            Arc::new(course_repo),
            Arc::new(enrollment_repo),
            sender,
        );

        let err = service
            .purchase(PurchaseRequest::new("user-001", 7))
            .await
            .unwrap_err();

        // 干净失败：不扣款、不开事务、不发事件
        assert!(matches!(
            err,
            OrderError::AlreadyEnrolled { ref user_id, course_id: 7 } if user_id == "user-001"
        ));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    #[ignore] // 需要数据库连接（已应用 migrations）
    async fn test_purchase_debits_once_and_enrolls() {
        use course_shared::config::DatabaseConfig;
        use course_shared::database::Database;

        let db = Database::connect(&DatabaseConfig::default()).await.unwrap();
        let pool = db.pool().clone();

        sqlx::query(
            "INSERT INTO accounts (user_id, balance) VALUES ('buy-test-1', 1000)
             ON CONFLICT (user_id) DO UPDATE SET balance = 1000",
        )
        .execute(&pool)
        .await
        .unwrap();

        let course_id: i64 = sqlx::query_scalar(
            "INSERT INTO courses (author, title, start_at, price)
             VALUES ('张老师', 'buy-test-course', NOW(), 100)
             RETURNING id",
        )
        .fetch_one(&pool)
        .await
        .unwrap();

        let (sender, _rx) = placement_channel();
        let service = PurchaseService::new(
            pool.clone(),
            Arc::new(CourseRepository::new(pool.clone())),
            Arc::new(EnrollmentRepository::new(pool.clone())),
            sender,
        );

        // 余额 1000、价格 100：购买成功，余额变为 900
        let response = service
            .purchase(PurchaseRequest::new("buy-test-1", course_id))
            .await
            .unwrap();
        assert_eq!(response.course_id, course_id);

        let balance: i64 =
            sqlx::query_scalar("SELECT balance FROM accounts WHERE user_id = 'buy-test-1'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(balance, 900);

        // 立即重试：以 AlreadyEnrolled 干净失败，余额不再变动
        let err = service
            .purchase(PurchaseRequest::new("buy-test-1", course_id))
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::AlreadyEnrolled { .. }));

        let balance: i64 =
            sqlx::query_scalar("SELECT balance FROM accounts WHERE user_id = 'buy-test-1'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(balance, 900);

        let enrollment_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM enrollments WHERE user_id = 'buy-test-1' AND course_id = $1",
        )
        .bind(course_id)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(enrollment_count, 1);
    }
}
