//! 应用设置
//!
//! 设置保存为 JSON 文件。文件不存在时使用默认值，缺失字段逐项回退默认值。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::AppError;
use crate::phone::DEFAULT_PHONE_MASK;
use crate::photo::{AvatarQualityProfile, PhotoConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppSettings {
    /// 电话号码掩码，`X` 为数字占位符。
    pub phone_mask: String,
    pub photo: PhotoSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            phone_mask: DEFAULT_PHONE_MASK.to_string(),
            photo: PhotoSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhotoSettings {
    pub max_file_size_mb: u64,
    pub download_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub max_decoded_pixels: u64,
    /// quality / balanced / speed
    pub quality_profile: String,
    pub allow_private_network: bool,
    /// 头像存储目录，未设置时使用系统临时目录。
    pub avatar_dir: Option<String>,
}

impl Default for PhotoSettings {
    fn default() -> Self {
        let config = PhotoConfig::default();
        Self {
            max_file_size_mb: config.max_file_size / (1024 * 1024),
            download_timeout_secs: config.download_timeout,
            connect_timeout_secs: config.connect_timeout,
            max_decoded_pixels: config.max_decoded_pixels,
            quality_profile: config.infer_quality_profile().as_str().to_string(),
            allow_private_network: config.allow_private_network,
            avatar_dir: None,
        }
    }
}

impl AppSettings {
    /// 转换为头像处理配置，校验取值范围。
    pub fn to_photo_config(&self) -> Result<PhotoConfig, AppError> {
        let photo = &self.photo;
        if photo.max_file_size_mb == 0 {
            return Err(AppError::Settings("maxFileSizeMb 必须大于 0".into()));
        }
        if photo.download_timeout_secs == 0 || photo.connect_timeout_secs == 0 {
            return Err(AppError::Settings("超时时间必须大于 0 秒".into()));
        }
        if photo.max_decoded_pixels == 0 {
            return Err(AppError::Settings("maxDecodedPixels 必须大于 0".into()));
        }

        let max_file_size = photo
            .max_file_size_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| {
                AppError::Settings(format!("maxFileSizeMb 过大：{}", photo.max_file_size_mb))
            })?;

        let mut config = PhotoConfig {
            max_file_size,
            download_timeout: photo.download_timeout_secs,
            connect_timeout: photo.connect_timeout_secs,
            max_decoded_pixels: photo.max_decoded_pixels,
            allow_private_network: photo.allow_private_network,
            ..PhotoConfig::default()
        };
        config.apply_quality_profile(AvatarQualityProfile::from_str(&photo.quality_profile)?);
        Ok(config)
    }
}

/// 读取设置文件；文件不存在时返回默认设置。
pub fn load_settings(path: &Path) -> Result<AppSettings, AppError> {
    if !path.exists() {
        log::debug!("设置文件不存在，使用默认设置 - {}", path.display());
        return Ok(AppSettings::default());
    }

    let content = fs::read_to_string(path)?;
    let settings = serde_json::from_str::<AppSettings>(&content)
        .map_err(|e| AppError::Settings(format!("解析设置文件失败: {}", e)))?;

    log::info!("⚙️ 已加载设置 - {}", path.display());
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &AppSettings) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let content = serde_json::to_string_pretty(settings)
        .map_err(|e| AppError::Settings(format!("序列化设置失败: {}", e)))?;

    fs::write(path, content)?;
    Ok(())
}
