//! # 解码与变换流水线模块
//!
//! 1. 读取 header 尺寸，按像素上限快速拒绝
//! 2. 读取 EXIF 方向，完整解码（像素保持存储方向）
//! 3. 方形裁剪（方向标记与设备方向参与计算）
//! 4. 按方向标记转正，超过头像最大边长时降采样
//! 5. 编码 PNG

use fast_image_resize as fr;
use image::metadata::Orientation;
use image::{
    DynamicImage, GenericImageView, ImageBuffer, ImageDecoder, ImageFormat, ImageReader, Rgba,
};
use std::io::Cursor;

use super::source::{PreparedAvatar, RawPhotoData};
use super::{PhotoConfig, PhotoError, PhotoHandler};
use crate::crop::{crop_to_square, DeviceOrientation, ImageOrientation, OrientedImage};

impl PhotoHandler {
    /// 将原始字节解码为位图。
    ///
    /// 像素保持存储方向，EXIF 方向写入 `OrientedImage::orientation`。
    pub fn decode(&self, raw: &RawPhotoData) -> Result<OrientedImage, PhotoError> {
        let mut decoder = ImageReader::new(Cursor::new(raw.bytes.as_slice()))
            .with_guessed_format()
            .map_err(|e| PhotoError::InvalidFormat(format!("无法识别图片格式：{}", e)))?
            .into_decoder()
            .map_err(|e| PhotoError::InvalidFormat(format!("无法读取图片头：{}", e)))?;

        let (header_width, header_height) = decoder.dimensions();
        Self::validate_pixel_limits(&self.config, header_width, header_height)?;

        let orientation = match decoder.orientation() {
            Ok(exif) => from_exif_orientation(exif),
            Err(e) => {
                log::warn!("读取 EXIF 方向失败，按 Up 处理：{}", e);
                ImageOrientation::Up
            }
        };

        let decoded = DynamicImage::from_decoder(decoder)
            .map_err(|e| PhotoError::Decode(format!("图片解码失败：{}", e)))?;

        let (width, height) = decoded.dimensions();
        Self::validate_pixel_limits(&self.config, width, height)?;

        log::info!(
            "✅ 图片解码成功 - 来源: {} 尺寸: {}x{} 方向: {:?}",
            raw.source_hint,
            width,
            height,
            orientation
        );

        Ok(OrientedImage::new(decoded, orientation))
    }

    /// 裁剪、降采样并编码为 PNG 头像。
    pub fn prepare_avatar(
        &self,
        image: &OrientedImage,
        device: DeviceOrientation,
    ) -> Result<PreparedAvatar, PhotoError> {
        let square = crop_to_square(image, device)?;
        // PNG 不携带方向标记，编码前转正
        let mut upright = square.pixels;
        upright.apply_orientation(to_exif_orientation(square.orientation));
        let resized = self.maybe_downscale_avatar(upright)?;
        let (width, height) = resized.dimensions();

        let mut cursor = Cursor::new(Vec::new());
        resized
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|e| PhotoError::Encode(format!("PNG 编码失败：{}", e)))?;
        let png = cursor.into_inner();

        log::info!(
            "🖼️ 头像已生成 - {}x{} -> {}x{}（{} KB）",
            image.width(),
            image.height(),
            width,
            height,
            png.len() / 1024
        );

        Ok(PreparedAvatar {
            png,
            width,
            height,
            orientation: square.orientation,
        })
    }

    fn validate_pixel_limits(config: &PhotoConfig, width: u32, height: u32) -> Result<(), PhotoError> {
        let pixels = u64::from(width) * u64::from(height);

        if pixels > config.max_decoded_pixels {
            return Err(PhotoError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, config.max_decoded_pixels
            )));
        }

        Ok(())
    }

    /// 方形图边长超过 `avatar_max_dimension` 时等比缩小。
    fn maybe_downscale_avatar(&self, image: DynamicImage) -> Result<DynamicImage, PhotoError> {
        let (width, height) = image.dimensions();
        let max_dimension = self.config.avatar_max_dimension;

        if max_dimension == 0 || (width <= max_dimension && height <= max_dimension) {
            return Ok(image);
        }

        let scale = (f64::from(max_dimension) / f64::from(width))
            .min(f64::from(max_dimension) / f64::from(height));
        let target_width = ((f64::from(width) * scale).floor() as u32).max(1);
        let target_height = ((f64::from(height) * scale).floor() as u32).max(1);

        log::info!(
            "🧩 头像降采样：{}x{} -> {}x{}（filter={:?}）",
            width,
            height,
            target_width,
            target_height,
            self.config.resize_filter
        );

        match Self::resize_with_fast_image_resize(
            &image,
            target_width,
            target_height,
            self.config.resize_filter,
        ) {
            Ok(resized) => Ok(resized),
            Err(err) => {
                log::warn!(
                    "⚠️ fast_image_resize 降采样失败，回退 image::resize_exact：{}",
                    err
                );
                Ok(image.resize_exact(target_width, target_height, self.config.resize_filter))
            }
        }
    }

    fn resize_with_fast_image_resize(
        image: &DynamicImage,
        target_width: u32,
        target_height: u32,
        filter: image::imageops::FilterType,
    ) -> Result<DynamicImage, PhotoError> {
        let src = image.to_rgba8();
        let (src_width, src_height) = src.dimensions();

        let src_image = fr::images::Image::from_vec_u8(
            src_width,
            src_height,
            src.into_raw(),
            fr::PixelType::U8x4,
        )
        .map_err(|e| PhotoError::Decode(format!("构建源图像缓冲失败：{}", e)))?;

        let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

        let mut resizer = fr::Resizer::new();
        let options = fr::ResizeOptions::new()
            .resize_alg(fr::ResizeAlg::Convolution(Self::to_fast_filter(filter)));

        resizer
            .resize(&src_image, &mut dst_image, Some(&options))
            .map_err(|e| PhotoError::Decode(format!("fast_image_resize 执行失败：{}", e)))?;

        let rgba = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(
            target_width,
            target_height,
            dst_image.into_vec(),
        )
        .ok_or_else(|| PhotoError::Decode("fast_image_resize 输出缓冲长度异常".to_string()))?;

        Ok(DynamicImage::ImageRgba8(rgba))
    }

    fn to_fast_filter(filter: image::imageops::FilterType) -> fr::FilterType {
        match filter {
            image::imageops::FilterType::Nearest => fr::FilterType::Box,
            image::imageops::FilterType::Triangle => fr::FilterType::Bilinear,
            image::imageops::FilterType::CatmullRom => fr::FilterType::CatmullRom,
            image::imageops::FilterType::Gaussian => fr::FilterType::Mitchell,
            image::imageops::FilterType::Lanczos3 => fr::FilterType::Lanczos3,
        }
    }
}

/// 镜像方向按其旋转分量归类。
fn from_exif_orientation(exif: Orientation) -> ImageOrientation {
    match exif {
        Orientation::NoTransforms | Orientation::FlipHorizontal => ImageOrientation::Up,
        Orientation::Rotate180 | Orientation::FlipVertical => ImageOrientation::Down,
        Orientation::Rotate90 | Orientation::Rotate270FlipH => ImageOrientation::Right,
        Orientation::Rotate270 | Orientation::Rotate90FlipH => ImageOrientation::Left,
    }
}

fn to_exif_orientation(orientation: ImageOrientation) -> Orientation {
    match orientation {
        ImageOrientation::Up => Orientation::NoTransforms,
        ImageOrientation::Down => Orientation::Rotate180,
        ImageOrientation::Right => Orientation::Rotate90,
        ImageOrientation::Left => Orientation::Rotate270,
    }
}
