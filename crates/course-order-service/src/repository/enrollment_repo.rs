//! 报名记录仓储
//!
//! 提供报名记录的原子写入与查询，(user_id, course_id) 唯一

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use super::traits::EnrollmentRepositoryTrait;
use crate::error::Result;
use crate::models::Enrollment;

/// 报名记录仓储
pub struct EnrollmentRepository {
    pool: PgPool,
}

impl EnrollmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== 查询操作 ====================

    /// 检查用户是否已报名课程
    pub async fn exists(&self, user_id: &str, course_id: i64) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM enrollments
                WHERE user_id = $1 AND course_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// 列出用户的所有报名记录
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<Enrollment>> {
        let enrollments = sqlx::query_as::<_, Enrollment>(
            r#"
            SELECT id, user_id, course_id, created_at
            FROM enrollments
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(enrollments)
    }

    /// 统计课程的报名人数（报表用原始计数）
    pub async fn count_by_course(&self, course_id: i64) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM enrollments WHERE course_id = $1
            "#,
        )
        .bind(course_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    // ==================== 事务操作 ====================

    /// 在事务中原子地检查并创建报名记录
    ///
    /// 依赖 (user_id, course_id) 唯一约束做检查-插入的原子化：
    /// `ON CONFLICT DO NOTHING` 未返回行即表示已有（并发或更早的）赢家，
    /// 返回 `None`，由调用方映射为 `AlreadyEnrolled` 并回滚事务。
    pub async fn create_in_tx(
        tx: &mut PgConnection,
        user_id: &str,
        course_id: i64,
    ) -> Result<Option<Enrollment>> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            INSERT INTO enrollments (user_id, course_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, course_id) DO NOTHING
            RETURNING id, user_id, course_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(tx)
        .await?;

        Ok(enrollment)
    }
}

#[async_trait]
impl EnrollmentRepositoryTrait for EnrollmentRepository {
    async fn exists(&self, user_id: &str, course_id: i64) -> Result<bool> {
        self.exists(user_id, course_id).await
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Enrollment>> {
        self.list_by_user(user_id).await
    }

    async fn count_by_course(&self, course_id: i64) -> Result<i64> {
        self.count_by_course(course_id).await
    }
}
