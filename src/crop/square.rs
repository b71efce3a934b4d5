//! ## 裁剪矩形
//!
//! 尺寸取 *显示尺寸*：方向标记为 `Left` / `Right` 时存储宽高互换。
//! 横屏设备再互换一次（只用于计算，不旋转像素）：
//!
//! ```text
//! center_y = eff_h / 2
//! rect     = (x: center_y - eff_w / 2, y: 0, w: eff_w, h: eff_w)
//! ```
//!
//! 矩形在未旋转的存储缓冲上截取。竖拍照片通常以横向缓冲 + `Right` 标记存储，
//! 显示纵向中心正好对应存储缓冲的横向中心，因此 X 偏移取自 `center_y`。
//! 任何部分越界都视为失败；半像素原点向下取整。

use image::{DynamicImage, GenericImageView};

use super::{DeviceOrientation, ImageOrientation};

/// 带方向标记与缩放比例的位图。
#[derive(Debug, Clone)]
pub struct OrientedImage {
    pub pixels: DynamicImage,
    pub orientation: ImageOrientation,
    pub scale: f32,
}

impl OrientedImage {
    pub fn new(pixels: DynamicImage, orientation: ImageOrientation) -> Self {
        Self {
            pixels,
            orientation,
            scale: 1.0,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// 按方向标记转正后的宽高。
    pub fn display_size(&self) -> (u32, u32) {
        let (width, height) = self.pixels.dimensions();
        if self.orientation.is_quarter_turn() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

/// 裁剪矩形（原点可能为负，用于越界诊断）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// 矩形是否完整落在 `width x height` 的缓冲内。
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.x >= 0
            && self.y >= 0
            && self.x + i64::from(self.width) <= i64::from(width)
            && self.y + i64::from(self.height) <= i64::from(height)
    }
}

/// 裁剪失败。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CropError {
    #[error("图片尺寸为空：{width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("裁剪区域越界：({}, {}, {}x{}) 超出 {width}x{height}", .rect.x, .rect.y, .rect.width, .rect.height)]
    OutOfBounds { rect: CropRect, width: u32, height: u32 },
}

/// 计算方形裁剪矩形。
///
/// # 参数
/// * `width` / `height` - 显示尺寸（见 [`OrientedImage::display_size`]）
/// * `device` - 裁剪时的设备方向
///
/// # 示例
/// ```
/// use group_ride::crop::{square_crop_rect, CropRect, DeviceOrientation};
///
/// let rect = square_crop_rect(200, 100, DeviceOrientation::LandscapeLeft);
/// assert_eq!(rect, CropRect { x: 50, y: 0, width: 100, height: 100 });
/// ```
pub fn square_crop_rect(width: u32, height: u32, device: DeviceOrientation) -> CropRect {
    let (eff_w, eff_h) = if device.is_landscape() {
        (height, width)
    } else {
        (width, height)
    };

    let x = (i64::from(eff_h) - i64::from(eff_w)).div_euclid(2);

    CropRect {
        x,
        y: 0,
        width: eff_w,
        height: eff_w,
    }
}

/// 将图片裁剪为正方形。
///
/// 输出缩放比例固定为 1.0，方向标记沿用输入。
pub fn crop_to_square(
    image: &OrientedImage,
    device: DeviceOrientation,
) -> Result<OrientedImage, CropError> {
    let (width, height) = image.pixels.dimensions();
    if width == 0 || height == 0 {
        return Err(CropError::EmptyImage { width, height });
    }

    let (display_width, display_height) = image.display_size();
    let rect = square_crop_rect(display_width, display_height, device);
    if !rect.fits_within(width, height) {
        log::warn!(
            "✂️ 裁剪区域越界 - 存储 {}x{} 方向 {:?} 设备方向 {} 矩形 ({}, {}, {}x{})",
            width,
            height,
            image.orientation,
            device,
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );
        return Err(CropError::OutOfBounds {
            rect,
            width,
            height,
        });
    }

    // fits_within 已保证原点非负且不超过 u32 范围
    let x = u32::try_from(rect.x).map_err(|_| CropError::OutOfBounds { rect, width, height })?;
    let y = u32::try_from(rect.y).map_err(|_| CropError::OutOfBounds { rect, width, height })?;
    let pixels = image.pixels.crop_imm(x, y, rect.width, rect.height);

    log::debug!(
        "✂️ 方形裁剪完成 - {}x{} -> {}x{}（设备方向 {}）",
        width,
        height,
        rect.width,
        rect.height,
        device
    );

    Ok(OrientedImage {
        pixels,
        orientation: image.orientation,
        scale: 1.0,
    })
}
