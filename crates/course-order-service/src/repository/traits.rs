//! 仓储 Trait 定义
//!
//! 定义仓储接口，便于服务层依赖抽象而非具体实现，支持 mock 测试

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Course, Enrollment, GroupFill};

/// 课程仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepositoryTrait: Send + Sync {
    async fn get_course(&self, id: i64) -> Result<Option<Course>>;
    async fn list_available(&self) -> Result<Vec<Course>>;
}

/// 报名仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepositoryTrait: Send + Sync {
    async fn exists(&self, user_id: &str, course_id: i64) -> Result<bool>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Enrollment>>;
    async fn count_by_course(&self, course_id: i64) -> Result<i64>;
}

/// 小组仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRepositoryTrait: Send + Sync {
    /// 列出课程的所有小组及当前人数，按 (人数 ASC, 小组 ID ASC) 排序
    async fn list_group_fill(&self, course_id: i64) -> Result<Vec<GroupFill>>;

    /// 向小组追加一名成员
    async fn add_member(&self, group_id: i64, user_id: &str) -> Result<()>;
}
