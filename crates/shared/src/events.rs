//! 领域事件模型
//!
//! 定义购买核心对外发布的事件及其消费抽象。报名成功事件由订单服务在
//! 事务提交之后发布，分组策略作为消费方异步处理，保证：
//! - 事件一定在报名记录持久化之后才可见
//! - 消费失败不影响购买主流程

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 报名成功事件
///
/// 购买事务（扣款 + 报名）提交后发布。`event_id` 使用 UUID v7，
/// 时间有序便于日志排查与幂等校验。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentCreated {
    /// 事件唯一标识（UUID v7）
    pub event_id: String,
    /// 报名记录 ID
    pub enrollment_id: i64,
    /// 用户 ID
    pub user_id: String,
    /// 课程 ID
    pub course_id: i64,
    /// 报名时间（以数据库提交的时间为准）
    pub enrolled_at: DateTime<Utc>,
}

impl EnrollmentCreated {
    pub fn new(
        enrollment_id: i64,
        user_id: impl Into<String>,
        course_id: i64,
        enrolled_at: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id: Uuid::now_v7().to_string(),
            enrollment_id,
            user_id: user_id.into(),
            course_id,
            enrolled_at,
        }
    }
}

/// 报名事件消费抽象
///
/// 分组策略实现此 trait 来响应报名成功事件。
/// 实现方自行处理失败（记录日志 / 计数），不得让错误传播回发布方。
#[async_trait]
pub trait EnrollmentListener: Send + Sync {
    /// 处理单个报名成功事件
    async fn on_enrollment_created(&self, event: EnrollmentCreated);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrollment_created_serialization() {
        let event = EnrollmentCreated::new(42, "user-001", 7, Utc::now());

        let json = serde_json::to_string(&event).unwrap();

        // 验证 camelCase 序列化格式
        assert!(json.contains("eventId"));
        assert!(json.contains("enrollmentId"));
        assert!(json.contains("userId"));
        assert!(json.contains("courseId"));
        assert!(json.contains("enrolledAt"));

        // 验证反序列化能还原
        let deserialized: EnrollmentCreated = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.enrollment_id, 42);
        assert_eq!(deserialized.user_id, "user-001");
        assert_eq!(deserialized.course_id, 7);
        assert_eq!(deserialized.event_id, event.event_id);
    }

    #[test]
    fn test_event_ids_are_unique() {
        let now = Utc::now();
        let a = EnrollmentCreated::new(1, "user-001", 1, now);
        let b = EnrollmentCreated::new(1, "user-001", 1, now);
        assert_ne!(a.event_id, b.event_id);
    }
}
