//! # 电话输入框状态
//!
//! 每次文本变化都重新格式化；掩码填满时通知调用方结束编辑（收起键盘）。

use super::mask::{extract_digits, MaskPattern};

/// 单次文本变化的处理结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneEdit {
    /// 应回写到输入框的文本。
    pub text: String,
    /// 掩码已填满，调用方应结束编辑。
    pub end_editing: bool,
}

/// 电话号码输入框。
#[derive(Debug, Clone, Default)]
pub struct PhoneField {
    mask: MaskPattern,
    text: String,
}

impl PhoneField {
    pub fn new(mask: MaskPattern) -> Self {
        Self {
            mask,
            text: String::new(),
        }
    }

    /// 预填已有号码（例如从资料页返回时）。
    pub fn with_text(mask: MaskPattern, text: &str) -> Self {
        let text = mask.apply(text);
        Self { mask, text }
    }

    pub fn mask(&self) -> &MaskPattern {
        &self.mask
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// 当前已输入的数字。
    pub fn digits(&self) -> String {
        extract_digits(&self.text).into_owned()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// 掩码是否已填满。
    pub fn is_complete(&self) -> bool {
        self.text.chars().count() == self.mask.char_len()
    }

    /// 处理输入框文本变化。
    pub fn on_text_changed(&mut self, raw: &str) -> PhoneEdit {
        self.text = self.mask.apply(raw);
        let end_editing = self.is_complete();
        if end_editing {
            log::debug!("📱 电话号码已填满：{}", self.text);
        }
        PhoneEdit {
            text: self.text.clone(),
            end_editing,
        }
    }
}
