//! # 掩码格式化
//!
//! ## 实现思路
//!
//! 1. 用正则 `[^0-9]` 删除所有非数字字符，得到数字流
//! 2. 从左到右遍历掩码，数字流耗尽后立即停止
//! 3. 占位符 `X` 取下一位数字，其余字符原样输出
//!
//! 数字耗尽后不会补全剩余的分隔符（例如不会显示尾部的 `-`），
//! 逐键输入时只展示已经“走到”的部分。

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

/// 数字占位符。
pub const PLACEHOLDER: char = 'X';

/// 美国电话号码掩码，填满后为 14 个字符。
pub const DEFAULT_PHONE_MASK: &str = "(XXX) XXX-XXXX";

static NON_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]").unwrap());

/// 掩码模式。
///
/// `X` 为数字槽位，其他字符一律视为分隔符，不做合法性校验。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskPattern(String);

impl MaskPattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 数字槽位数量。
    pub fn slot_count(&self) -> usize {
        self.0.chars().filter(|ch| *ch == PLACEHOLDER).count()
    }

    /// 掩码长度（字符数）。填满时格式化结果恰好等于该长度。
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// 按掩码格式化原始输入，见 [`format_with_mask`]。
    pub fn apply(&self, raw_input: &str) -> String {
        format_with_mask(&self.0, raw_input)
    }
}

impl Default for MaskPattern {
    fn default() -> Self {
        Self::new(DEFAULT_PHONE_MASK)
    }
}

impl From<&str> for MaskPattern {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}

/// 提取输入中的十进制数字（保持原有顺序）。
pub fn extract_digits(raw_input: &str) -> Cow<'_, str> {
    NON_DIGITS.replace_all(raw_input, "")
}

/// 将原始输入按掩码格式化。
///
/// # 参数
/// * `mask` - 掩码，例如 `+X (XXX) XXX-XXXX`
/// * `raw_input` - 输入框当前文本，可以包含上一次格式化插入的分隔符
///
/// # 返回
/// 格式化后的字符串，长度不超过掩码长度。对自身输出再次调用结果不变。
///
/// # 示例
/// ```
/// use group_ride::phone::format_with_mask;
///
/// assert_eq!(format_with_mask("(XXX) XXX-XXXX", "5551234567"), "(555) 123-4567");
/// assert_eq!(format_with_mask("(XXX) XXX-XXXX", "1"), "(1");
/// ```
pub fn format_with_mask(mask: &str, raw_input: &str) -> String {
    let numbers = extract_digits(raw_input);
    let mut digits = numbers.chars().peekable();
    let mut result = String::with_capacity(mask.len());

    for ch in mask.chars() {
        if digits.peek().is_none() {
            break;
        }
        if ch == PLACEHOLDER {
            if let Some(digit) = digits.next() {
                result.push(digit);
            }
        } else {
            result.push(ch);
        }
    }

    result
}
