//! # 头像方形裁剪模块
//!
//! ## 设计思路
//!
//! 拍照/相册选图后，需要把任意尺寸的图片裁成正方形作为头像。
//! - `orientation`：设备方向与图片自身方向标记
//! - `square`：裁剪矩形计算 + 像素提取
//!
//! 裁剪矩形越界时返回 `CropError`，不会 panic。

mod orientation;
mod square;

pub use orientation::{DeviceOrientation, ImageOrientation};
pub use square::{crop_to_square, square_crop_rect, CropError, CropRect, OrientedImage};
