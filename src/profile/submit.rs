//! 资料提交流程
//!
//! 1. 表单校验
//! 2. 头像写入本地目录
//! 3. 提交昵称与头像（失败只记录日志，继续后续步骤）
//! 4. 上传电话与紧急联系人电话（失败即整体失败）

use std::path::PathBuf;
use std::sync::Arc;

use super::{AdditionalInfoForm, GroupUser, ProfileBackend, ProfileChange, ProfileError, UserId};
use crate::completion::Completion;
use crate::storage;

/// 提交成功后的资料。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedProfile {
    pub display_name: String,
    pub phone_number: String,
    pub photo_path: PathBuf,
}

pub struct ProfileSubmitter<B: ProfileBackend> {
    backend: Arc<B>,
    avatar_dir: PathBuf,
}

impl<B: ProfileBackend> ProfileSubmitter<B> {
    pub fn new(backend: Arc<B>, avatar_dir: PathBuf) -> Self {
        Self {
            backend,
            avatar_dir,
        }
    }

    /// 提交补充信息表单。
    pub async fn submit(
        &self,
        user: &UserId,
        form: &AdditionalInfoForm,
    ) -> Result<SubmittedProfile, ProfileError> {
        let profile = form.validate()?;

        let photo_path = storage::store_avatar(&self.avatar_dir, profile.avatar)
            .map_err(|e| ProfileError::Storage(e.to_string()))?;

        let (done, pending) = Completion::channel();
        self.backend.commit_profile(
            user,
            ProfileChange {
                display_name: profile.display_name.to_string(),
                photo_path: photo_path.clone(),
            },
            done,
        );
        match pending.wait().await {
            Some(Ok(())) => log::info!("👤 资料已提交 - {}", user.email),
            Some(Err(err)) => log::warn!("资料提交失败，继续上传电话：{}", err),
            None => log::warn!("资料提交未回调，继续上传电话"),
        }

        let (done, pending) = Completion::channel();
        self.backend
            .upload_phone_number(profile.phone_number, user, done);
        if pending.wait().await != Some(true) {
            return Err(ProfileError::UploadFailed("电话号码".to_string()));
        }

        if let Some(emergency) = profile.emergency_phone_number {
            let (done, pending) = Completion::channel();
            self.backend
                .upload_emergency_phone_number(emergency, user, done);
            if pending.wait().await != Some(true) {
                return Err(ProfileError::UploadFailed("紧急联系人电话".to_string()));
            }
        }

        log::info!("✅ 补充信息提交完成 - {}", user.email);

        Ok(SubmittedProfile {
            display_name: profile.display_name.to_string(),
            phone_number: profile.phone_number.to_string(),
            photo_path,
        })
    }

    /// 查询成员资料摘要（小组页顶部的资料卡片）。
    pub async fn load_summary(&self, email: &str) -> Result<Option<GroupUser>, ProfileError> {
        let (done, pending) = Completion::channel();
        self.backend.fetch_group_user(email, done);

        let user = pending
            .wait()
            .await
            .ok_or_else(|| ProfileError::ServiceUnavailable("查询成员资料".to_string()))?;

        if user.is_none() {
            log::warn!("未找到成员资料 - {}", email);
        }
        Ok(user)
    }
}
