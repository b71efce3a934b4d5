//! 头像临时存储模块
//!
//! # 设计思路
//!
//! 提交资料前需要把头像 PNG 写到本地，再把文件路径交给资料服务上传。
//!
//! # 实现思路
//!
//! - 优先使用设置中的自定义目录，未设置时回退到系统临时目录下的 `group-ride`。
//! - 目录不存在时自动 `create_dir_all`，避免上层判断。
//! - 固定文件名 `TempImage.png`，重复提交会覆盖上一次的头像。

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::photo::PreparedAvatar;

/// 头像文件名。
pub const AVATAR_FILE_NAME: &str = "TempImage.png";

const DEFAULT_DIR_NAME: &str = "group-ride";

/// 存储目录信息
#[derive(Debug, Clone, Serialize)]
pub struct StorageInfo {
    pub path: String,
    pub total_size: u64,
    pub file_count: u64,
}

/// 获取头像存储目录
///
/// # 参数
/// * `custom_dir` - 用户自定义目录（可选，空字符串视为未设置）
///
/// # 返回
/// - `Ok(PathBuf)`：可用的目录
/// - `Err(AppError::Storage)`：无法创建目录
pub fn avatar_dir(custom_dir: Option<&str>) -> Result<PathBuf, AppError> {
    let dir = match custom_dir {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => std::env::temp_dir().join(DEFAULT_DIR_NAME),
    };

    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(|e| {
            AppError::Storage(format!("创建头像目录 '{}' 失败: {}", dir.display(), e))
        })?;
    }
    Ok(dir)
}

/// 将头像写入目录，返回文件路径。
pub fn store_avatar(dir: &Path, avatar: &PreparedAvatar) -> Result<PathBuf, AppError> {
    let path = dir.join(AVATAR_FILE_NAME);
    fs::write(&path, &avatar.png)
        .map_err(|e| AppError::Storage(format!("写入头像 '{}' 失败: {}", path.display(), e)))?;
    log::info!("💾 头像已保存 - {}（{} bytes）", path.display(), avatar.png.len());
    Ok(path)
}

/// 获取目录信息（路径 + 占用大小 + 文件数）
pub fn dir_info(dir: &Path) -> StorageInfo {
    let mut total_size: u64 = 0;
    let mut file_count: u64 = 0;

    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            if let Ok(metadata) = entry.metadata() {
                if metadata.is_file() {
                    total_size += metadata.len();
                    file_count += 1;
                }
            }
        }
    }

    StorageInfo {
        path: dir.to_string_lossy().to_string(),
        total_size,
        file_count,
    }
}
