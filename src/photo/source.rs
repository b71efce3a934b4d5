//! # 数据源与中间模型
//!
//! - `PhotoSource` 表示外部来源语义
//! - `RawPhotoData` 表示已加载但未解码的字节
//! - `PreparedAvatar` 表示可直接上传的 PNG 头像

use crate::crop::ImageOrientation;

/// 头像图片来源。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSource {
    /// 网络地址（例如账号已有的头像 URL）。
    Url(String),
    /// Base64（支持 Data URL 与纯 Base64 字符串）。
    Base64(String),
    /// 本地文件路径（相机/相册导出）。
    FilePath(String),
}

impl PhotoSource {
    /// 根据字符串外观推断来源类型。
    pub fn detect(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else if trimmed.starts_with("data:image/") {
            Self::Base64(trimmed.to_string())
        } else {
            Self::FilePath(value.to_string())
        }
    }
}

/// 加载阶段输出：原始字节与来源标识。
#[derive(Debug)]
pub struct RawPhotoData {
    /// 原始图片字节。
    pub bytes: Vec<u8>,
    /// 来源提示（用于日志）。
    pub source_hint: &'static str,
}

/// 编码完成的方形头像。
#[derive(Debug, Clone)]
pub struct PreparedAvatar {
    /// PNG 字节。
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// 原图的方向标记；PNG 像素已按此转正。
    pub orientation: ImageOrientation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_source_kind() {
        assert_eq!(
            PhotoSource::detect("https://cdn.example.com/a.png"),
            PhotoSource::Url("https://cdn.example.com/a.png".to_string())
        );
        assert_eq!(
            PhotoSource::detect("data:image/png;base64,AAAA"),
            PhotoSource::Base64("data:image/png;base64,AAAA".to_string())
        );
        assert_eq!(
            PhotoSource::detect("/tmp/photo.jpg"),
            PhotoSource::FilePath("/tmp/photo.jpg".to_string())
        );
    }
}
