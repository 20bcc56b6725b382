//! 报名记录实体定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 课程报名记录
///
/// 每次成功购买恰好创建一条，(user_id, course_id) 全局唯一。
/// 本服务不更新、不删除报名记录。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: i64,
    /// 用户 ID
    pub user_id: String,
    /// 课程 ID
    pub course_id: i64,
    /// 报名时间
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrollment_serialization() {
        let enrollment = Enrollment {
            id: 42,
            user_id: "user-001".to_string(),
            course_id: 7,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&enrollment).unwrap();
        assert_eq!(json["id"], 42);
        assert_eq!(json["userId"], "user-001");
        assert_eq!(json["courseId"], 7);
        assert!(json["createdAt"].is_string());
    }
}
