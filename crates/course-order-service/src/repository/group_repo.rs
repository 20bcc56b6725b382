//! 学习小组仓储
//!
//! 提供小组人数查询与成员追加。成员集合只由分组策略写入。

use async_trait::async_trait;
use sqlx::PgPool;

use super::traits::GroupRepositoryTrait;
use crate::error::Result;
use crate::models::GroupFill;

/// 学习小组仓储
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 列出课程的所有小组及当前人数
    ///
    /// 排序即分组策略的选择顺序：人数最少优先，同数取最小小组 ID，
    /// 保证选择结果确定可复现
    pub async fn list_group_fill(&self, course_id: i64) -> Result<Vec<GroupFill>> {
        let fills = sqlx::query_as::<_, GroupFill>(
            r#"
            SELECT g.id AS group_id,
                   g.title,
                   COUNT(m.user_id) AS member_count,
                   g.capacity_hint
            FROM study_groups g
            LEFT JOIN group_members m ON m.group_id = g.id
            WHERE g.course_id = $1
            GROUP BY g.id, g.title, g.capacity_hint
            ORDER BY member_count ASC, g.id ASC
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(fills)
    }

    /// 向小组追加一名成员
    ///
    /// 同一用户重复进入同一小组时静默幂等（主键冲突忽略），
    /// 分组是尽力而为的副作用，重复安置不算错误
    pub async fn add_member(&self, group_id: i64, user_id: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO group_members (group_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (group_id, user_id) DO NOTHING
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl GroupRepositoryTrait for GroupRepository {
    async fn list_group_fill(&self, course_id: i64) -> Result<Vec<GroupFill>> {
        self.list_group_fill(course_id).await
    }

    async fn add_member(&self, group_id: i64, user_id: &str) -> Result<()> {
        self.add_member(group_id, user_id).await
    }
}
