//! # 电话号码输入模块
//!
//! ## 设计思路
//!
//! 输入框每次变化都会把整段文本重新格式化一遍：
//! - `mask`：纯函数 `format_with_mask`，提取数字后按掩码逐位填充
//! - `field`：输入框状态，判断掩码是否已填满（填满后结束编辑）
//!
//! 两者均无 I/O、无共享状态，可在任意线程调用。

mod field;
mod mask;

pub use field::{PhoneEdit, PhoneField};
pub use mask::{extract_digits, format_with_mask, MaskPattern, DEFAULT_PHONE_MASK, PLACEHOLDER};
