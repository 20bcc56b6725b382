//! 报表查询服务（只读操作）
//!
//! 暴露课程与报名的原始计数：报名人数、各小组人数、名义容量。
//! 填充率 / 需求率等派生指标由上层报表系统自行计算，不在这里实现。

use std::sync::Arc;

use tracing::instrument;

use crate::error::{OrderError, Result};
use crate::models::Enrollment;
use crate::repository::{CourseRepository, EnrollmentRepository, GroupRepository};
use crate::service::dto::{CourseDetailDto, CourseSummaryDto};

/// 报表查询服务
pub struct QueryService {
    course_repo: Arc<CourseRepository>,
    enrollment_repo: Arc<EnrollmentRepository>,
    group_repo: Arc<GroupRepository>,
}

impl QueryService {
    pub fn new(
        course_repo: Arc<CourseRepository>,
        enrollment_repo: Arc<EnrollmentRepository>,
        group_repo: Arc<GroupRepository>,
    ) -> Self {
        Self {
            course_repo,
            enrollment_repo,
            group_repo,
        }
    }

    /// 列出开放购买的课程及报名人数
    #[instrument(skip(self))]
    pub async fn list_courses(&self) -> Result<Vec<CourseSummaryDto>> {
        let courses = self.course_repo.list_available().await?;

        let mut result = Vec::with_capacity(courses.len());
        for course in courses {
            let enrollment_count = self.enrollment_repo.count_by_course(course.id).await?;
            result.push(CourseSummaryDto::from_course(&course, enrollment_count));
        }

        Ok(result)
    }

    /// 课程详情：基础信息 + 报名人数 + 各小组人数
    #[instrument(skip(self))]
    pub async fn course_detail(&self, course_id: i64) -> Result<CourseDetailDto> {
        let course = self
            .course_repo
            .get_course(course_id)
            .await?
            .ok_or(OrderError::CourseNotFound(course_id))?;

        let enrollment_count = self.enrollment_repo.count_by_course(course_id).await?;
        let groups = self.group_repo.list_group_fill(course_id).await?;

        Ok(CourseDetailDto {
            id: course.id,
            author: course.author,
            title: course.title,
            start_at: course.start_at,
            price: course.price,
            available: course.available,
            enrollment_count,
            groups,
        })
    }

    /// 用户的报名记录
    #[instrument(skip(self))]
    pub async fn user_enrollments(&self, user_id: &str) -> Result<Vec<Enrollment>> {
        self.enrollment_repo.list_by_user(user_id).await
    }
}
