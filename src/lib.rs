//! # 骑行小组：资料与入组核心库
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 界面层（表单 / 命令行）                   │
//! │                                                          │
//! │  AdditionalInfoForm ── PhoneField ── GroupForm           │
//! │          │                               │               │
//! │   ProfileSubmitter                   GroupFlow           │
//! │          │  Completion<T>（单次回调）     │               │
//! │   ProfileBackend                   GroupDirectory        │
//! └──────────┼───────────────────────────────┼───────────────┘
//!            ↕                               ↕
//! ┌──────────┼───────────────────────────────┼───────────────┐
//! │  ┌─ error ────── AppError (统一错误类型)                  │
//! │  ├─ phone ────── 电话号码掩码格式化                        │
//! │  ├─ crop ─────── 按设备方向裁剪正方形                      │
//! │  ├─ photo ────── 加载·解码·裁剪·缩放·PNG 编码              │
//! │  ├─ storage ──── 头像临时文件 TempImage.png                │
//! │  └─ settings ─── JSON 设置                                 │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError` |
//! | [`completion`] | 远端服务的单次回调 `Completion<T>` |
//! | [`phone`] | 掩码格式化 `format_with_mask`、电话输入框状态 |
//! | [`crop`] | 正方形裁剪 `crop_to_square` 与方向类型 |
//! | [`photo`] | 从 URL/Base64/文件加载头像并生成 PNG |
//! | [`storage`] | 头像存储目录与写入 |
//! | [`profile`] | 补充资料表单校验与提交 |
//! | [`group`] | 加入 / 创建小组 |
//! | [`settings`] | 设置文件读写 |

pub mod completion;
pub mod crop;
pub mod error;
pub mod group;
pub mod phone;
pub mod photo;
pub mod profile;
pub mod settings;
pub mod storage;
