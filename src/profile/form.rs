//! 补充信息表单
//!
//! 提交前依次检查：已选择头像 → 昵称与电话非空。

use super::{GroupUser, ProfileError};
use crate::phone::{MaskPattern, PhoneEdit, PhoneField};
use crate::photo::PreparedAvatar;

/// 表单输入框。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Phone,
    EmergencyPhone,
}

impl FormField {
    /// 回车后的下一个焦点；`None` 表示结束编辑。
    ///
    /// 电话框回车跳到紧急联系人电话框，只有紧急联系人电话框回车才结束编辑。
    pub fn next_focus(self) -> Option<FormField> {
        match self {
            Self::Name => Some(Self::Phone),
            Self::Phone => Some(Self::EmergencyPhone),
            Self::EmergencyPhone => None,
        }
    }
}

/// 通过校验的资料快照。
#[derive(Debug, Clone)]
pub struct ValidatedProfile<'a> {
    pub display_name: &'a str,
    pub phone_number: &'a str,
    pub emergency_phone_number: Option<&'a str>,
    pub avatar: &'a PreparedAvatar,
}

#[derive(Debug, Clone, Default)]
pub struct AdditionalInfoForm {
    name: String,
    phone: PhoneField,
    emergency_phone: PhoneField,
    avatar: Option<PreparedAvatar>,
}

impl AdditionalInfoForm {
    pub fn new(mask: MaskPattern) -> Self {
        Self {
            name: String::new(),
            phone: PhoneField::new(mask.clone()),
            emergency_phone: PhoneField::new(mask),
            avatar: None,
        }
    }

    /// 用已有资料预填（从小组页进入“编辑资料”时）。
    pub fn prefill(&mut self, user: &GroupUser) {
        self.name = user.display_name.clone();
        self.phone = PhoneField::with_text(self.phone.mask().clone(), &user.phone_number);
        self.emergency_phone = PhoneField::with_text(
            self.emergency_phone.mask().clone(),
            user.emergency_phone_number.as_deref().unwrap_or_default(),
        );
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn phone(&self) -> &PhoneField {
        &self.phone
    }

    pub fn emergency_phone(&self) -> &PhoneField {
        &self.emergency_phone
    }

    pub fn phone_changed(&mut self, raw: &str) -> PhoneEdit {
        self.phone.on_text_changed(raw)
    }

    pub fn emergency_phone_changed(&mut self, raw: &str) -> PhoneEdit {
        self.emergency_phone.on_text_changed(raw)
    }

    pub fn avatar(&self) -> Option<&PreparedAvatar> {
        self.avatar.as_ref()
    }

    pub fn set_avatar(&mut self, avatar: PreparedAvatar) {
        self.avatar = Some(avatar);
    }

    pub fn validate(&self) -> Result<ValidatedProfile<'_>, ProfileError> {
        let avatar = self.avatar.as_ref().ok_or(ProfileError::NoPhoto)?;

        if self.name.trim().is_empty() {
            return Err(ProfileError::EmptyField("name"));
        }
        if self.phone.is_empty() {
            return Err(ProfileError::EmptyField("phone"));
        }

        let emergency = self.emergency_phone.text();

        Ok(ValidatedProfile {
            display_name: &self.name,
            phone_number: self.phone.text(),
            emergency_phone_number: (!emergency.is_empty()).then_some(emergency),
            avatar,
        })
    }
}
