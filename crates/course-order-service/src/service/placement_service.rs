//! 分组策略服务
//!
//! 购买成功后把新学员安置到课程的学习小组：
//! 取当前人数最少的小组，同数时取最小小组 ID，保证选择确定可复现。
//!
//! ## 语义边界
//!
//! - 这是贪心的负载均衡启发式，不是硬容量调度器：安置前不检查
//!   `capacity_hint`，小组人数可以超过名义容量
//! - 读人数与写成员之间没有互斥，并发安置可能同时选中同一个最小组，
//!   负载均衡在竞争下是近似的（顺序安置时精确，差值 ≤ 1）
//! - 安置失败只记录，永远不回滚已提交的报名

use std::sync::Arc;

use tracing::instrument;

use crate::error::Result;
use crate::models::GroupFill;
use crate::repository::GroupRepositoryTrait;

/// 单次安置的结局
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// 已安置到指定小组，`member_count` 为安置前的人数
    Placed { group_id: i64, member_count: i64 },
    /// 课程没有小组，跳过（购买仍然成功）
    Skipped,
}

/// 从候选小组中选出安置目标
///
/// 人数最少优先，同数取最小小组 ID；空集返回 `None`。
/// 独立成纯函数，便于在无数据库环境下验证决胜规则。
pub fn choose_group(fills: &[GroupFill]) -> Option<i64> {
    fills
        .iter()
        .min_by_key(|f| (f.member_count, f.group_id))
        .map(|f| f.group_id)
}

/// 分组策略服务
pub struct PlacementService<GR>
where
    GR: GroupRepositoryTrait,
{
    group_repo: Arc<GR>,
}

impl<GR> PlacementService<GR>
where
    GR: GroupRepositoryTrait,
{
    pub fn new(group_repo: Arc<GR>) -> Self {
        Self { group_repo }
    }

    /// 安置新学员
    ///
    /// 课程无小组时返回 `Skipped`，不改动任何状态
    #[instrument(skip(self), fields(course_id = course_id, user_id = %user_id))]
    pub async fn place(&self, course_id: i64, user_id: &str) -> Result<Placement> {
        let fills = self.group_repo.list_group_fill(course_id).await?;

        let Some(group_id) = choose_group(&fills) else {
            return Ok(Placement::Skipped);
        };

        // choose_group 返回的 ID 一定来自 fills
        let member_count = fills
            .iter()
            .find(|f| f.group_id == group_id)
            .map(|f| f.member_count)
            .unwrap_or(0);

        self.group_repo.add_member(group_id, user_id).await?;

        Ok(Placement::Placed {
            group_id,
            member_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockGroupRepositoryTrait;

    fn fill(group_id: i64, member_count: i64) -> GroupFill {
        GroupFill {
            group_id,
            title: format!("小组 {}", group_id),
            member_count,
            capacity_hint: 30,
        }
    }

    #[test]
    fn test_choose_group_empty() {
        assert_eq!(choose_group(&[]), None);
    }

    #[test]
    fn test_choose_group_prefers_fewest_members() {
        let fills = vec![fill(1, 5), fill(2, 3), fill(3, 8)];
        assert_eq!(choose_group(&fills), Some(2));
    }

    #[test]
    fn test_choose_group_tie_breaks_by_lowest_id() {
        // 输入顺序不影响结果
        let fills = vec![fill(3, 0), fill(1, 0), fill(2, 0)];
        assert_eq!(choose_group(&fills), Some(1));
    }

    /// 顺序安置三人到两个空小组应依次落在 A, B, A
    #[test]
    fn test_choose_group_sequential_distribution() {
        let mut counts = vec![(1i64, 0i64), (2, 0)];
        let mut landed = Vec::new();

        for _ in 0..3 {
            let fills: Vec<GroupFill> = counts.iter().map(|&(id, n)| fill(id, n)).collect();
            let chosen = choose_group(&fills).unwrap();
            landed.push(chosen);
            counts.iter_mut().find(|(id, _)| *id == chosen).unwrap().1 += 1;
        }

        assert_eq!(landed, vec![1, 2, 1]);
        // 人数差不超过 1
        let max = counts.iter().map(|&(_, n)| n).max().unwrap();
        let min = counts.iter().map(|&(_, n)| n).min().unwrap();
        assert!(max - min <= 1);
    }

    #[tokio::test]
    async fn test_place_skips_when_course_has_no_groups() {
        let mut group_repo = MockGroupRepositoryTrait::new();
        group_repo
            .expect_list_group_fill()
            .returning(|_| Ok(Vec::new()));
        // 无小组时不得写任何成员
        group_repo.expect_add_member().never();

        let service = PlacementService::new(Arc::new(group_repo));
        let placement = service.place(7, "user-001").await.unwrap();

        assert_eq!(placement, Placement::Skipped);
    }

    #[tokio::test]
    async fn test_place_adds_member_to_least_filled_group() {
        let mut group_repo = MockGroupRepositoryTrait::new();
        group_repo
            .expect_list_group_fill()
            .returning(|_| Ok(vec![fill(1, 4), fill(2, 2), fill(3, 4)]));
        group_repo
            .expect_add_member()
            .withf(|group_id, user_id| *group_id == 2 && user_id == "user-001")
            .times(1)
            .returning(|_, _| Ok(()));

        let service = PlacementService::new(Arc::new(group_repo));
        let placement = service.place(7, "user-001").await.unwrap();

        assert_eq!(
            placement,
            Placement::Placed {
                group_id: 2,
                member_count: 2
            }
        );
    }
}
