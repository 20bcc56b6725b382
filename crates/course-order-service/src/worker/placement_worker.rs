//! 分组安置 Worker
//!
//! 消费报名事件并执行分组策略。每个事件独立处理：
//! 安置失败记录日志与指标后继续消费下一个事件，
//! 永远不回滚已提交的报名。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{error, info, warn};

use course_shared::events::{EnrollmentCreated, EnrollmentListener};
use course_shared::observability::metrics as obs_metrics;

use crate::repository::GroupRepositoryTrait;
use crate::service::{Placement, PlacementService};

/// 报名事件的分组处理器
///
/// `EnrollmentListener` 的分组策略实现：所有失败在这里消化，
/// 只向外暴露日志与指标。
pub struct PlacementHandler<GR>
where
    GR: GroupRepositoryTrait,
{
    placement: PlacementService<GR>,
}

impl<GR> PlacementHandler<GR>
where
    GR: GroupRepositoryTrait,
{
    pub fn new(placement: PlacementService<GR>) -> Self {
        Self { placement }
    }
}

#[async_trait]
impl<GR> EnrollmentListener for PlacementHandler<GR>
where
    GR: GroupRepositoryTrait + 'static,
{
    async fn on_enrollment_created(&self, event: EnrollmentCreated) {
        match self.placement.place(event.course_id, &event.user_id).await {
            Ok(Placement::Placed {
                group_id,
                member_count,
            }) => {
                obs_metrics::record_placement("placed");
                info!(
                    event_id = %event.event_id,
                    user_id = %event.user_id,
                    course_id = event.course_id,
                    group_id = group_id,
                    member_count_before = member_count,
                    "学员已安置到学习小组"
                );
            }
            Ok(Placement::Skipped) => {
                obs_metrics::record_placement("skipped_no_groups");
                warn!(
                    event_id = %event.event_id,
                    user_id = %event.user_id,
                    course_id = event.course_id,
                    "课程暂无学习小组，跳过安置"
                );
            }
            Err(e) => {
                obs_metrics::record_placement("error");
                error!(
                    event_id = %event.event_id,
                    user_id = %event.user_id,
                    course_id = event.course_id,
                    error = %e,
                    "分组安置失败，但不影响已提交的报名"
                );
            }
        }
    }
}

/// 分组安置 Worker
///
/// 持有事件通道消费端，顺序消费直到所有发布端关闭。
pub struct PlacementWorker {
    rx: UnboundedReceiver<EnrollmentCreated>,
    listener: Arc<dyn EnrollmentListener>,
}

impl PlacementWorker {
    pub fn new(
        rx: UnboundedReceiver<EnrollmentCreated>,
        listener: Arc<dyn EnrollmentListener>,
    ) -> Self {
        Self { rx, listener }
    }

    /// 主循环：持续消费报名事件直到通道关闭
    pub async fn run(mut self) {
        info!("PlacementWorker 已启动");

        while let Some(event) = self.rx.recv().await {
            self.listener.on_enrollment_created(event).await;
        }

        info!("报名事件通道已关闭，PlacementWorker 退出");
    }
}
