use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::completion::Completion;

/// 已登录用户标识。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId {
    pub uid: String,
    pub email: String,
}

/// 提交给认证服务的资料变更。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileChange {
    pub display_name: String,
    pub photo_path: PathBuf,
}

/// 远端保存的小组成员资料。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupUser {
    pub display_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(default)]
    pub emergency_phone_number: Option<String>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
}

/// 远端资料服务。
///
/// 每个方法都必须对传入的 `Completion` 回调恰好一次；
/// 未回调即丢弃等同于失败。
pub trait ProfileBackend: Send + Sync {
    /// 提交昵称与头像；失败时回调错误描述。
    fn commit_profile(
        &self,
        user: &UserId,
        change: ProfileChange,
        done: Completion<Result<(), String>>,
    );

    fn upload_phone_number(&self, phone: &str, user: &UserId, done: Completion<bool>);

    fn upload_emergency_phone_number(&self, phone: &str, user: &UserId, done: Completion<bool>);

    /// 按邮箱查询成员资料，不存在时回调 `None`。
    fn fetch_group_user(&self, email: &str, done: Completion<Option<GroupUser>>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_user_json_shape() {
        let json = r#"{
            "displayName": "Ana",
            "email": "ana@example.com",
            "phoneNumber": "(555) 123-4567"
        }"#;

        let user: GroupUser = serde_json::from_str(json).expect("valid json");

        assert_eq!(user.display_name, "Ana");
        assert_eq!(user.emergency_phone_number, None);
        assert!(serde_json::to_string(&user)
            .expect("serialize")
            .contains("\"phoneNumber\""));
    }
}
