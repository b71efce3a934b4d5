//! # 小组入口模块（group）
//!
//! ## 设计思路
//!
//! “加入或创建小组”页面的状态与流程：
//! - `form`：加入/创建切换、6 位小组码输入、小组名称输入、身份（骑手/观众）
//! - `directory`：远端小组服务抽象（`GroupDirectory`）
//! - `flow`：点击“出发”后的加入/创建流程，产出 `RideSession`

mod directory;
mod flow;
mod form;

pub use directory::{GroupDirectory, JoinOutcome};
pub use flow::{GroupFlow, RideSession};
pub use form::{CodeEdit, GroupForm, GroupSelection, RiderType, GROUP_CODE_LEN};

/// 小组流程错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GroupError {
    #[error("尚未选择加入或创建小组")]
    NoSelection,

    #[error("小组码无效：{0}")]
    InvalidCode(String),

    #[error("小组名称为空")]
    EmptyName,

    #[error("小组不存在：{0}")]
    GroupNotFound(String),

    #[error("小组服务无响应：{0}")]
    ServiceUnavailable(String),
}
