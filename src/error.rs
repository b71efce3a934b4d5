//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 各子模块保留自己的错误枚举（`PhotoError`、`CropError`、`ProfileError`、`GroupError`），
//! 命令行入口与存储/设置层统一返回 `AppError`。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 子模块错误通过 `#[from]` 自动转换，调用方直接 `?`。
//! - 实现 `Serialize` 将错误序列化为字符串，便于输出 JSON 报告。

use serde::Serialize;

use crate::crop::CropError;
use crate::group::GroupError;
use crate::photo::PhotoError;
use crate::profile::ProfileError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 头像加载 / 解码 / 编码失败
    #[error("{0}")]
    Photo(#[from] PhotoError),

    /// 正方形裁剪失败
    #[error("{0}")]
    Crop(#[from] CropError),

    /// 资料提交失败
    #[error("资料提交失败: {0}")]
    Profile(#[from] ProfileError),

    /// 加入 / 创建小组失败
    #[error("小组操作失败: {0}")]
    Group(#[from] GroupError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 存储目录不可用
    #[error("存储目录不可用: {0}")]
    Storage(String),

    /// 设置文件读写或解析失败
    #[error("设置错误: {0}")]
    Settings(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_message() {
        let err = AppError::Storage("磁盘已满".into());
        assert_eq!(
            serde_json::to_string(&err).unwrap(),
            "\"存储目录不可用: 磁盘已满\""
        );
    }

    #[test]
    fn test_group_error_converts() {
        let err: AppError = GroupError::EmptyName.into();
        assert!(matches!(err, AppError::Group(GroupError::EmptyName)));
        assert_eq!(err.to_string(), "小组操作失败: 小组名称为空");
    }
}
