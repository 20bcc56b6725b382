//! 学习小组相关实体定义
//!
//! 小组的创建与内容管理属于目录服务；购买核心只关心
//! "每个小组当前有多少人"这一个投影。

use serde::{Deserialize, Serialize};

/// 小组及其当前人数
///
/// 分组策略的输入：按 (member_count ASC, group_id ASC) 取第一个。
/// `capacity_hint` 是名义容量（默认 30），仅用于报表展示，
/// 安置时不做强制，小组人数可以超过该值。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GroupFill {
    pub group_id: i64,
    pub title: String,
    /// 当前成员数
    pub member_count: i64,
    /// 名义容量（仅展示）
    pub capacity_hint: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_fill_serialization() {
        let fill = GroupFill {
            group_id: 3,
            title: "一组".to_string(),
            member_count: 12,
            capacity_hint: 30,
        };

        let json = serde_json::to_value(&fill).unwrap();
        assert_eq!(json["groupId"], 3);
        assert_eq!(json["memberCount"], 12);
        assert_eq!(json["capacityHint"], 30);
    }
}
