//! # 配置模块
//!
//! ## 设计思路
//!
//! 将头像链路的“可调策略”集中到 `PhotoConfig`：加载阶段的体积与超时、
//! 解码阶段的像素上限、以及输出头像的最大边长与缩放滤镜。
//! 质量档位（quality / balanced / speed）作为高层语义，映射到底层参数组合。

use image::imageops::FilterType;

use super::PhotoError;

/// 头像处理配置。
#[derive(Debug, Clone)]
pub struct PhotoConfig {
    /// 读取原始字节时允许的最大文件体积（字节）。
    pub max_file_size: u64,
    /// 网络下载总超时（秒）。
    pub download_timeout: u64,
    /// 建立连接超时（秒）。
    pub connect_timeout: u64,
    /// 最大重定向次数。
    pub max_redirects: usize,
    /// 是否允许访问内网或本地地址（默认关闭）。
    pub allow_private_network: bool,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 输出头像的单边最大值，超过则降采样。
    pub avatar_max_dimension: u32,
    /// 降采样滤镜。
    pub resize_filter: FilterType,
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            max_file_size: 20 * 1024 * 1024,
            download_timeout: 30,
            connect_timeout: 8,
            max_redirects: 5,
            allow_private_network: false,
            max_decoded_pixels: 40_000_000,
            avatar_max_dimension: 1024,
            resize_filter: FilterType::Triangle,
        }
    }
}

/// 头像质量档位。
///
/// - `Quality`：保留较大尺寸
/// - `Balanced`：默认
/// - `Speed`：小尺寸，上传更快
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarQualityProfile {
    Quality,
    Balanced,
    Speed,
}

impl AvatarQualityProfile {
    /// 从外部字符串解析档位。
    pub fn from_str(profile: &str) -> Result<Self, PhotoError> {
        match profile.trim().to_lowercase().as_str() {
            "quality" => Ok(Self::Quality),
            "balanced" => Ok(Self::Balanced),
            "speed" => Ok(Self::Speed),
            other => Err(PhotoError::InvalidFormat(format!(
                "未知头像质量档位：{}（可选：quality / balanced / speed）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Balanced => "balanced",
            Self::Speed => "speed",
        }
    }
}

impl PhotoConfig {
    /// 应用质量档位到实际参数。
    pub fn apply_quality_profile(&mut self, profile: AvatarQualityProfile) {
        match profile {
            AvatarQualityProfile::Quality => {
                self.avatar_max_dimension = 2048;
                self.resize_filter = FilterType::CatmullRom;
            }
            AvatarQualityProfile::Balanced => {
                self.avatar_max_dimension = 1024;
                self.resize_filter = FilterType::Triangle;
            }
            AvatarQualityProfile::Speed => {
                self.avatar_max_dimension = 512;
                self.resize_filter = FilterType::Nearest;
            }
        }
    }

    /// 基于当前参数反推质量档位。
    pub fn infer_quality_profile(&self) -> AvatarQualityProfile {
        if self.avatar_max_dimension >= 2048 {
            AvatarQualityProfile::Quality
        } else if self.avatar_max_dimension <= 512 {
            AvatarQualityProfile::Speed
        } else {
            AvatarQualityProfile::Balanced
        }
    }
}
