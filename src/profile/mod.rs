//! # 个人资料模块（profile）
//!
//! ## 设计思路
//!
//! 首次登录后的“补充信息”表单：昵称、电话、紧急联系人电话与头像。
//! - `form`：表单状态与提交前校验
//! - `backend`：远端资料服务的抽象（`ProfileBackend`），回调式单次完成
//! - `submit`：校验 → 保存头像 → 提交资料 → 上传电话
//!
//! ```text
//! AdditionalInfoForm ──validate──▶ ProfileSubmitter::submit
//!                                     ├─ storage::store_avatar
//!                                     ├─ ProfileBackend::commit_profile
//!                                     └─ ProfileBackend::upload_phone_number
//! ```

mod backend;
mod form;
mod submit;

pub use backend::{GroupUser, ProfileBackend, ProfileChange, UserId};
pub use form::{AdditionalInfoForm, FormField, ValidatedProfile};
pub use submit::{ProfileSubmitter, SubmittedProfile};

/// 资料流程错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("未选择头像")]
    NoPhoto,

    #[error("输入框为空：{0}")]
    EmptyField(&'static str),

    #[error("头像保存失败：{0}")]
    Storage(String),

    #[error("上传失败：{0}")]
    UploadFailed(String),

    #[error("资料服务无响应：{0}")]
    ServiceUnavailable(String),
}
