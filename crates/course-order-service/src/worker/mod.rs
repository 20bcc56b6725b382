//! 报名事件消费模块
//!
//! 购买编排在事务提交后通过进程内通道发布 `EnrollmentCreated` 事件，
//! `PlacementWorker` 消费事件并执行分组安置。发布方 fire-and-forget，
//! 消费失败不影响购买主流程。

mod placement_worker;

pub use placement_worker::{PlacementHandler, PlacementWorker};

use course_shared::events::EnrollmentCreated;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::warn;

/// 创建报名事件通道
///
/// 返回 (发布端, 消费端)。消费端交给 `PlacementWorker`。
pub fn placement_channel() -> (PlacementSender, UnboundedReceiver<EnrollmentCreated>) {
    let (tx, rx) = unbounded_channel();
    (PlacementSender { tx }, rx)
}

/// 报名事件发布端
///
/// 发送失败（消费端已退出）只记录警告：分组是尽力而为的副作用，
/// 不能反过来影响已提交的购买。
#[derive(Clone)]
pub struct PlacementSender {
    tx: UnboundedSender<EnrollmentCreated>,
}

impl PlacementSender {
    pub fn send(&self, event: EnrollmentCreated) {
        if let Err(e) = self.tx.send(event) {
            warn!(
                enrollment_id = e.0.enrollment_id,
                user_id = %e.0.user_id,
                course_id = e.0.course_id,
                "分组 worker 已退出，报名事件被丢弃"
            );
        }
    }
}
