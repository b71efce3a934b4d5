//! # 错误模型模块
//!
//! 使用单一错误枚举承载头像链路中的所有错误来源。
//! `code()` 输出稳定的机器可读标识，供 CLI / 上层调用方分支处理。

use crate::crop::CropError;

/// 头像处理统一错误类型。
#[derive(Debug, thiserror::Error)]
pub enum PhotoError {
    #[error("网络错误：{0}")]
    Network(String),

    #[error("超时错误：{0}")]
    Timeout(String),

    #[error("格式错误：{0}")]
    InvalidFormat(String),

    #[error("解码错误：{0}")]
    Decode(String),

    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),

    #[error("裁剪失败：{0}")]
    Crop(#[from] CropError),

    #[error("编码错误：{0}")]
    Encode(String),
}

impl PhotoError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Timeout(_) => "timeout",
            Self::InvalidFormat(_) => "invalid_format",
            Self::Decode(_) => "decode",
            Self::FileSystem(_) => "file_system",
            Self::ResourceLimit(_) => "resource_limit",
            Self::Crop(_) => "crop",
            Self::Encode(_) => "encode",
        }
    }
}
