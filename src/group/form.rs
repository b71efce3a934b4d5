//! 加入/创建小组表单
//!
//! “出发”按钮可用条件：
//! - 加入：小组码恰好 6 个字符
//! - 创建：小组名称非空
//!
//! 小组码超过 6 个字符时删除最后一个字符并结束编辑。

use serde::{Deserialize, Serialize};

/// 小组码长度。
pub const GROUP_CODE_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupSelection {
    Join,
    Create,
}

/// 加入小组时的身份。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiderType {
    #[default]
    Rider,
    Spectator,
}

impl RiderType {
    /// 身份切换按钮上的文案。
    pub fn caption(self) -> &'static str {
        match self {
            Self::Rider => "You are joining as a Rider. Change.",
            Self::Spectator => "You are joining as a Non-Rider. Change.",
        }
    }
}

/// 小组码输入框单次变化的处理结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEdit {
    pub text: String,
    pub end_editing: bool,
    pub go_enabled: bool,
}

#[derive(Debug, Clone, Default)]
pub struct GroupForm {
    selection: Option<GroupSelection>,
    code: String,
    name: String,
    group_id: Option<String>,
    rider_type: RiderType,
}

impl GroupForm {
    /// 页面初始状态：默认选中“加入”。
    pub fn new() -> Self {
        let mut form = Self::default();
        form.select_join();
        form
    }

    pub fn selection(&self) -> Option<GroupSelection> {
        self.selection
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref()
    }

    pub fn rider_type(&self) -> RiderType {
        self.rider_type
    }

    /// 切换到“加入”，返回“出发”按钮是否可用。
    pub fn select_join(&mut self) -> bool {
        self.selection = Some(GroupSelection::Join);
        self.go_enabled()
    }

    /// 切换到“创建”，返回“出发”按钮是否可用。
    pub fn select_create(&mut self) -> bool {
        self.selection = Some(GroupSelection::Create);
        self.go_enabled()
    }

    pub fn go_enabled(&self) -> bool {
        match self.selection {
            Some(GroupSelection::Join) => self.code.chars().count() == GROUP_CODE_LEN,
            Some(GroupSelection::Create) => !self.name.is_empty(),
            None => false,
        }
    }

    /// 处理小组码输入变化。
    pub fn on_code_changed(&mut self, text: &str) -> CodeEdit {
        let mut code = text.to_string();
        let mut end_editing = false;

        let len = code.chars().count();
        if len > GROUP_CODE_LEN {
            code.pop();
            end_editing = true;
        } else if len == GROUP_CODE_LEN {
            end_editing = true;
        }

        if code.chars().count() == GROUP_CODE_LEN {
            self.group_id = Some(code.clone());
        }
        self.code = code;

        CodeEdit {
            text: self.code.clone(),
            end_editing,
            go_enabled: self.go_enabled(),
        }
    }

    /// 处理小组名称输入变化，返回“出发”按钮是否可用。
    pub fn on_name_changed(&mut self, text: &str) -> bool {
        self.name = text.to_string();
        self.go_enabled()
    }

    /// 从“已保存的骑行”列表选择小组。
    pub fn saved_ride_chosen(&mut self, id: &str) {
        self.select_join();
        self.code = id.to_string();
        self.group_id = Some(id.to_string());
    }

    /// 切换身份，返回新的按钮文案。
    pub fn set_rider_type(&mut self, rider_type: RiderType) -> &'static str {
        self.rider_type = rider_type;
        log::debug!("🚲 身份切换为 {:?}", rider_type);
        rider_type.caption()
    }
}
