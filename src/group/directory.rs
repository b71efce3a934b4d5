use super::RiderType;
use crate::completion::Completion;

/// 加入小组的回调结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    pub completed: bool,
    pub group_name: Option<String>,
}

/// 远端小组服务。
///
/// 带 `Completion` 的方法必须恰好回调一次；其余方法为“发出即忘”的写入。
pub trait GroupDirectory: Send + Sync {
    /// 按数字小组码加入；`check_existing_ids` 为真时服务端先确认小组存在。
    fn join_group(&self, code: u32, check_existing_ids: bool, done: Completion<JoinOutcome>);

    /// 生成新的小组 ID。
    fn generate_group_number(&self, done: Completion<String>);

    fn upload_group_name(&self, name: &str, group_id: &str);

    fn upload_ride_type(&self, rider_type: RiderType, group_id: &str);
}
