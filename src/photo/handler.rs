//! # 核心编排模块
//!
//! `PhotoHandler` 负责流程编排，处理链路固定为：
//! 1. 按来源加载原始字节
//! 2. 解码（含像素上限检查）
//! 3. 方形裁剪
//! 4. 降采样并编码 PNG
//!
//! 记录 `load/decode/prepare/total` 阶段耗时，便于性能诊断。

use std::time::{Duration, Instant};

use super::source::{PreparedAvatar, RawPhotoData};
use super::{PhotoConfig, PhotoError, PhotoSource};
use crate::crop::{DeviceOrientation, OrientedImage};

/// 头像处理器。
///
/// 持有配置与复用型 HTTP 客户端。
pub struct PhotoHandler {
    pub(super) config: PhotoConfig,
    pub(super) http_client: reqwest::Client,
}

impl PhotoHandler {
    /// 根据配置创建处理器。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use group_ride::photo::{PhotoConfig, PhotoHandler};
    ///
    /// let handler = PhotoHandler::new(PhotoConfig::default())?;
    /// # Ok::<(), group_ride::photo::PhotoError>(())
    /// ```
    pub fn new(config: PhotoConfig) -> Result<Self, PhotoError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.download_timeout))
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| PhotoError::Network(format!("无法创建 HTTP 客户端：{}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &PhotoConfig {
        &self.config
    }

    /// 按来源加载原始字节。
    pub async fn load(&self, source: &PhotoSource) -> Result<RawPhotoData, PhotoError> {
        match source {
            PhotoSource::Url(url) => self.load_from_url(url).await,
            PhotoSource::Base64(data) => self.load_from_base64(data),
            PhotoSource::FilePath(path) => self.load_from_file(path),
        }
    }

    /// 加载并解码，不做裁剪。
    pub async fn load_image(&self, source: &PhotoSource) -> Result<OrientedImage, PhotoError> {
        let raw = self.load(source).await?;
        self.decode(&raw)
    }

    /// 处理主入口：从任意来源生成方形 PNG 头像。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use group_ride::crop::DeviceOrientation;
    /// use group_ride::photo::{PhotoConfig, PhotoHandler, PhotoSource};
    ///
    /// # async fn demo() -> Result<(), group_ride::photo::PhotoError> {
    /// let handler = PhotoHandler::new(PhotoConfig::default())?;
    /// let avatar = handler
    ///     .prepare_avatar_from_source(
    ///         &PhotoSource::FilePath("/tmp/capture.jpg".into()),
    ///         DeviceOrientation::Portrait,
    ///     )
    ///     .await?;
    /// assert_eq!(avatar.width, avatar.height);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn prepare_avatar_from_source(
        &self,
        source: &PhotoSource,
        device: DeviceOrientation,
    ) -> Result<PreparedAvatar, PhotoError> {
        let total_start = Instant::now();

        let load_start = Instant::now();
        let raw = self.load(source).await?;
        let load_elapsed = load_start.elapsed();

        let decode_start = Instant::now();
        let image = self.decode(&raw)?;
        let decode_elapsed = decode_start.elapsed();

        let prepare_start = Instant::now();
        let avatar = self.prepare_avatar(&image, device)?;
        let prepare_elapsed = prepare_start.elapsed();

        log::info!(
            "✅ 头像处理完成 - load={}ms decode={}ms prepare={}ms total={}ms",
            load_elapsed.as_millis(),
            decode_elapsed.as_millis(),
            prepare_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        Ok(avatar)
    }
}
