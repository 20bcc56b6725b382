//! 数据传输对象定义
//!
//! HTTP 层的请求 / 响应结构与统一响应信封

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Course, Enrollment, GroupFill, WalletEntry};

/// API 统一响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: "操作成功".to_string(),
            data: Some(data),
        }
    }

    /// 创建成功响应（自定义消息）
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: message.into(),
            data: Some(data),
        }
    }
}

/// 购买请求
///
/// `user_id` 来自网关注入的调用方身份，不由请求体提供
#[derive(Debug, Clone)]
pub struct PurchaseRequest {
    pub user_id: String,
    pub course_id: i64,
}

impl PurchaseRequest {
    pub fn new(user_id: impl Into<String>, course_id: i64) -> Self {
        Self {
            user_id: user_id.into(),
            course_id,
        }
    }
}

/// 购买成功响应
///
/// 分组安置是异步副作用，不出现在购买响应里
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponse {
    pub enrollment_id: i64,
    pub user_id: String,
    pub course_id: i64,
    pub enrolled_at: DateTime<Utc>,
    pub message: String,
}

impl PurchaseResponse {
    /// 从已提交的报名记录构建响应
    pub fn committed(enrollment: &Enrollment) -> Self {
        Self {
            enrollment_id: enrollment.id,
            user_id: enrollment.user_id.clone(),
            course_id: enrollment.course_id,
            enrolled_at: enrollment.created_at,
            message: "购买成功，已获得课程访问权限".to_string(),
        }
    }
}

/// 课程摘要（列表用），附带报名人数原始计数
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummaryDto {
    pub id: i64,
    pub author: String,
    pub title: String,
    pub start_at: DateTime<Utc>,
    pub price: i64,
    pub enrollment_count: i64,
}

impl CourseSummaryDto {
    pub fn from_course(course: &Course, enrollment_count: i64) -> Self {
        Self {
            id: course.id,
            author: course.author.clone(),
            title: course.title.clone(),
            start_at: course.start_at,
            price: course.price,
            enrollment_count,
        }
    }
}

/// 课程详情，附带各小组人数原始计数
///
/// 填充率 / 需求率等派生指标由上层报表系统自行计算
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetailDto {
    pub id: i64,
    pub author: String,
    pub title: String,
    pub start_at: DateTime<Utc>,
    pub price: i64,
    pub available: bool,
    pub enrollment_count: i64,
    pub groups: Vec<GroupFill>,
}

/// 钱包视图：余额 + 最近流水
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletDto {
    pub user_id: String,
    pub balance: i64,
    pub entries: Vec<WalletEntry>,
}

/// 运营充值请求
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreditRequest {
    #[validate(length(min = 1, message = "user_id 不能为空"))]
    pub user_id: String,
    /// 充值积分数，必须为正
    #[validate(range(min = 1, message = "充值金额必须大于 0"))]
    pub amount: i64,
}

/// 充值响应
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditResponse {
    pub user_id: String,
    pub balance: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_success() {
        let response = ApiResponse::success(42);
        assert!(response.success);
        assert_eq!(response.code, "SUCCESS");
        assert_eq!(response.message, "操作成功");
        assert_eq!(response.data, Some(42));
    }

    #[test]
    fn test_api_response_custom_message() {
        let response = ApiResponse::success_with_message((), "购买成功");
        assert!(response.success);
        assert_eq!(response.message, "购买成功");
    }

    #[test]
    fn test_purchase_response_from_enrollment() {
        let enrollment = Enrollment {
            id: 42,
            user_id: "user-001".to_string(),
            course_id: 7,
            created_at: Utc::now(),
        };

        let response = PurchaseResponse::committed(&enrollment);
        assert_eq!(response.enrollment_id, 42);
        assert_eq!(response.user_id, "user-001");
        assert_eq!(response.course_id, 7);
        assert_eq!(response.enrolled_at, enrollment.created_at);
        assert!(response.message.contains("购买成功"));
    }

    #[test]
    fn test_purchase_response_serialization() {
        let enrollment = Enrollment {
            id: 42,
            user_id: "user-001".to_string(),
            course_id: 7,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(PurchaseResponse::committed(&enrollment)).unwrap();
        assert_eq!(json["enrollmentId"], 42);
        assert_eq!(json["userId"], "user-001");
        assert_eq!(json["courseId"], 7);
        assert!(json["enrolledAt"].is_string());
        assert!(json["message"].is_string());
    }

    #[test]
    fn test_credit_request_validation() {
        let valid = CreditRequest {
            user_id: "user-001".to_string(),
            amount: 500,
        };
        assert!(valid.validate().is_ok());

        let zero_amount = CreditRequest {
            user_id: "user-001".to_string(),
            amount: 0,
        };
        assert!(zero_amount.validate().is_err());

        let empty_user = CreditRequest {
            user_id: String::new(),
            amount: 500,
        };
        assert!(empty_user.validate().is_err());
    }
}
