//! 课程仓储
//!
//! 本服务对课程只读，内容管理由目录服务负责

use async_trait::async_trait;
use sqlx::PgPool;

use super::traits::CourseRepositoryTrait;
use crate::error::Result;
use crate::models::Course;

/// 课程仓储
pub struct CourseRepository {
    pool: PgPool,
}

impl CourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 按 ID 获取课程
    pub async fn get_course(&self, id: i64) -> Result<Option<Course>> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, author, title, start_at, price, available, created_at, updated_at
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(course)
    }

    /// 列出开放购买的课程
    pub async fn list_available(&self) -> Result<Vec<Course>> {
        let courses = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, author, title, start_at, price, available, created_at, updated_at
            FROM courses
            WHERE available = TRUE
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(courses)
    }
}

#[async_trait]
impl CourseRepositoryTrait for CourseRepository {
    async fn get_course(&self, id: i64) -> Result<Option<Course>> {
        self.get_course(id).await
    }

    async fn list_available(&self) -> Result<Vec<Course>> {
        self.list_available().await
    }
}
