//! # 头像图片模块（photo）
//!
//! ## 设计思路
//!
//! 将“来源识别 → 加载校验 → 解码 → 方形裁剪 → 降采样编码”按职责拆分：
//!
//! ```text
//! PhotoHandler::prepare_avatar_from_source
//!    ├─ loader.rs（URL / Base64 / 文件加载 + 安全与体积校验）
//!    ├─ pipeline.rs（解码 + 像素限制 + 裁剪 + 降采样 + PNG 编码）
//!    └─ crate::crop（裁剪矩形计算）
//! ```
//!
//! - 配置与策略变更优先改 `config.rs`
//! - 流程顺序变更优先改 `handler.rs`

mod config;
mod error;
mod handler;
mod loader;
mod pipeline;
mod source;

pub use config::{AvatarQualityProfile, PhotoConfig};
pub use error::PhotoError;
pub use handler::PhotoHandler;
pub use source::{PhotoSource, PreparedAvatar, RawPhotoData};
