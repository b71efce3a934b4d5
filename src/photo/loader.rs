//! # 加载与校验模块
//!
//! 三种来源统一产出 `RawPhotoData`，在解码之前完成全部廉价校验：
//!
//! | 来源 | 校验 |
//! |------|------|
//! | URL | 协议、目标主机（含重定向后地址）、状态码、`Content-Type`、体积 |
//! | Base64 | Data URL 前缀、按字符数预估的解码体积 |
//! | 文件 | 存在性、metadata 体积 |
//!
//! 最后统一检查文件签名，确认字节确实是图片。

use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::Url;
use std::net::IpAddr;
use std::path::Path;

use super::source::RawPhotoData;
use super::{PhotoError, PhotoHandler};

const INITIAL_BODY_CAPACITY: usize = 64 * 1024;

impl PhotoHandler {
    /// 下载网络头像。
    pub(super) async fn load_from_url(&self, url: &str) -> Result<RawPhotoData, PhotoError> {
        let target = Url::parse(url)
            .map_err(|e| PhotoError::InvalidFormat(format!("URL 格式错误：{}", e)))?;
        let shown = redact(&target);
        log::info!("🌐 下载头像 - {}", shown);

        self.ensure_allowed_target(&target)?;

        let mut response = self
            .http_client
            .get(target)
            .send()
            .await
            .map_err(|e| self.network_error(e, url, &shown))?;

        // 重定向后的地址
        self.ensure_allowed_target(response.url())?;

        let status = response.status();
        if !status.is_success() {
            return Err(PhotoError::Network(format!(
                "HTTP {}（{}）",
                status.as_u16(),
                status.canonical_reason().unwrap_or("未知状态")
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());
        if let Some(content_type) = content_type {
            if !content_type.trim_start().to_ascii_lowercase().starts_with("image/") {
                return Err(PhotoError::InvalidFormat(format!(
                    "响应不是图片：{}",
                    content_type
                )));
            }
        }

        if let Some(declared) = response.content_length() {
            self.ensure_within_limit(declared, "声明的响应体积")?;
        }

        // 未声明长度（chunked）时边读边累计，超限立即中止
        let capacity = response
            .content_length()
            .and_then(|len| usize::try_from(len).ok())
            .unwrap_or(INITIAL_BODY_CAPACITY);
        let mut body = Vec::with_capacity(capacity);
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| self.network_error(e, url, &shown))?
        {
            let received = (body.len() as u64).saturating_add(chunk.len() as u64);
            self.ensure_within_limit(received, "实际下载体积")?;
            body.extend_from_slice(&chunk);
        }
        ensure_image_bytes(&body)?;

        log::debug!("✅ 下载完成 - {} bytes", body.len());
        Ok(RawPhotoData {
            bytes: body,
            source_hint: "url",
        })
    }

    /// 解析 Base64 头像（Data URL 或纯 Base64）。
    pub(super) fn load_from_base64(&self, data: &str) -> Result<RawPhotoData, PhotoError> {
        let payload = base64_payload(data)?;
        log::info!("📝 解析 base64 头像 - {} 字符", payload.len());

        self.ensure_within_limit(decoded_len_upper_bound(payload), "Base64 预估解码体积")?;
        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| PhotoError::Decode(format!("Base64 解码失败：{}", e)))?;
        self.ensure_within_limit(bytes.len() as u64, "Base64 解码体积")?;
        ensure_image_bytes(&bytes)?;

        Ok(RawPhotoData {
            bytes,
            source_hint: "base64",
        })
    }

    /// 读取本地头像文件。
    pub(super) fn load_from_file(&self, path: &str) -> Result<RawPhotoData, PhotoError> {
        log::info!("📁 读取本地头像 - {}", path);

        let file = Path::new(path);
        let metadata = std::fs::metadata(file).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                PhotoError::FileSystem(format!("文件不存在：{}", path))
            }
            _ => PhotoError::FileSystem(format!("无法读取文件信息 {}：{}", path, e)),
        })?;
        if !metadata.is_file() {
            return Err(PhotoError::FileSystem(format!("不是普通文件：{}", path)));
        }
        self.ensure_within_limit(metadata.len(), "文件体积")?;

        let bytes = std::fs::read(file)
            .map_err(|e| PhotoError::FileSystem(format!("读取 {} 失败：{}", path, e)))?;
        ensure_image_bytes(&bytes)?;

        Ok(RawPhotoData {
            bytes,
            source_hint: "file",
        })
    }

    fn ensure_within_limit(&self, size: u64, what: &str) -> Result<(), PhotoError> {
        let limit = self.config.max_file_size;
        if size <= limit {
            return Ok(());
        }
        Err(PhotoError::ResourceLimit(format!(
            "{}超出限制：{:.2} MB > {:.2} MB",
            what,
            megabytes(size),
            megabytes(limit)
        )))
    }

    /// 只允许 http(s)；未开启 `allow_private_network` 时拒绝本地与内网目标。
    pub(super) fn ensure_allowed_target(&self, url: &Url) -> Result<(), PhotoError> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(PhotoError::InvalidFormat(format!(
                "不支持的协议：{}",
                url.scheme()
            )));
        }
        if self.config.allow_private_network {
            return Ok(());
        }

        let host = url
            .host_str()
            .ok_or_else(|| PhotoError::InvalidFormat("URL 缺少主机地址".to_string()))?;
        match restricted_host(host) {
            Some(reason) => Err(PhotoError::InvalidFormat(format!(
                "禁止访问{}：{}",
                reason, host
            ))),
            None => Ok(()),
        }
    }

    fn network_error(&self, e: reqwest::Error, url: &str, shown: &str) -> PhotoError {
        if e.is_timeout() {
            return PhotoError::Timeout(format!(
                "{} 秒内未完成下载",
                self.config.download_timeout
            ));
        }

        let detail = e.to_string().replace(url, shown);
        if e.is_redirect() {
            PhotoError::Network(format!(
                "重定向超过 {} 次：{}",
                self.config.max_redirects, detail
            ))
        } else if e.is_connect() {
            PhotoError::Network(format!("连接失败：{}", detail))
        } else {
            PhotoError::Network(detail)
        }
    }
}

/// 受限主机返回原因，公网主机返回 `None`。
fn restricted_host(host: &str) -> Option<&'static str> {
    let lower = host.to_ascii_lowercase();
    if lower.trim_end_matches('.') == "localhost" || lower.ends_with(".local") {
        return Some("本地主机");
    }

    // IPv6 字面量带方括号
    let literal = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')).unwrap_or(host);
    match literal.parse::<IpAddr>() {
        Ok(ip) if is_restricted_ip(ip) => Some("内网地址"),
        _ => None,
    }
}

fn is_restricted_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            let [first, second, ..] = v4.octets();
            // 100.64.0.0/10 运营商级 NAT
            let shared = first == 100 && (64..128).contains(&second);
            first == 0
                || shared
                || v4.is_private()
                || v4.is_loopback()
                || v4.is_link_local()
                || v4.is_broadcast()
                || v4.is_multicast()
        }
        IpAddr::V6(v6) => {
            if let Some(mapped) = v6.to_ipv4_mapped() {
                return is_restricted_ip(IpAddr::V4(mapped));
            }
            v6.is_unspecified()
                || v6.is_loopback()
                || v6.is_multicast()
                || v6.is_unique_local()
                || v6.is_unicast_link_local()
        }
    }
}

/// 去掉用户信息、query 与 fragment 后用于日志。
fn redact(url: &Url) -> String {
    let mut shown = url.clone();
    let _ = shown.set_username("");
    let _ = shown.set_password(None);
    shown.set_query(None);
    shown.set_fragment(None);
    shown.to_string()
}

fn base64_payload(data: &str) -> Result<&str, PhotoError> {
    let data = data.trim();
    if !data.starts_with("data:") {
        return Ok(data);
    }
    if !data.starts_with("data:image/") {
        return Err(PhotoError::InvalidFormat("Data URL 不是图片类型".to_string()));
    }
    data.split_once(";base64,")
        .map(|(_, payload)| payload)
        .ok_or_else(|| PhotoError::InvalidFormat("Data URL 缺少 ;base64, 标记".to_string()))
}

/// 每 4 个字符最多解码出 3 个字节。
fn decoded_len_upper_bound(payload: &str) -> u64 {
    (payload.len() as u64).div_ceil(4) * 3
}

fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

/// 按文件签名确认字节是图片。
fn ensure_image_bytes(bytes: &[u8]) -> Result<(), PhotoError> {
    if bytes.is_empty() {
        return Err(PhotoError::InvalidFormat("图片内容为空".to_string()));
    }
    match infer::get(bytes) {
        Some(kind) if kind.matcher_type() == infer::MatcherType::Image => Ok(()),
        Some(kind) => Err(PhotoError::InvalidFormat(format!(
            "文件签名不是图片：{}",
            kind.mime_type()
        ))),
        None => Err(PhotoError::InvalidFormat("无法识别文件签名".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photo::{PhotoConfig, PhotoSource};
    use image::{DynamicImage, ImageFormat, RgbaImage};
    use std::io::{Cursor, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    fn private_ok() -> PhotoHandler {
        PhotoHandler::new(PhotoConfig {
            allow_private_network: true,
            ..PhotoConfig::default()
        })
        .expect("handler")
    }

    fn small_png() -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(RgbaImage::new(3, 5))
            .write_to(&mut out, ImageFormat::Png)
            .expect("encode png");
        out.into_inner()
    }

    /// 本地 HTTP 服务：原样写出一次应答后退出。
    fn one_shot_server(response: Vec<u8>) -> (String, JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let base = format!("http://{}", listener.local_addr().expect("addr"));

        let handle = thread::spawn(move || {
            let Ok((mut conn, _)) = listener.accept() else {
                return;
            };
            let _ = conn.read(&mut [0u8; 2048]);
            // 客户端可能提前断开
            let _ = conn.write_all(&response);
        });

        (base, handle)
    }

    fn sized_response(content_type: &str, body: &[u8]) -> Vec<u8> {
        let mut response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            content_type,
            body.len()
        )
        .into_bytes();
        response.extend_from_slice(body);
        response
    }

    /// 不带 Content-Length 的分块应答。
    fn chunked_response(content_type: &str, chunks: &[&[u8]]) -> Vec<u8> {
        let mut response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n",
            content_type
        )
        .into_bytes();
        for chunk in chunks {
            response.extend_from_slice(format!("{:x}\r\n", chunk.len()).as_bytes());
            response.extend_from_slice(chunk);
            response.extend_from_slice(b"\r\n");
        }
        response.extend_from_slice(b"0\r\n\r\n");
        response
    }

    #[test]
    fn test_restricted_hosts() {
        for host in [
            "localhost",
            "LOCALHOST.",
            "printer.local",
            "127.0.0.1",
            "10.1.2.3",
            "192.168.0.9",
            "169.254.1.1",
            "100.100.0.1",
            "0.0.0.0",
            "[::1]",
            "[fd00::1]",
            "[::ffff:127.0.0.1]",
        ] {
            assert!(restricted_host(host).is_some(), "{host} should be restricted");
        }
        for host in ["example.com", "8.8.8.8", "[2606:4700::1111]"] {
            assert!(restricted_host(host).is_none(), "{host} should be allowed");
        }
    }

    #[test]
    fn test_target_checks_respect_config() {
        let strict = PhotoHandler::new(PhotoConfig::default()).expect("handler");
        let local = Url::parse("http://127.0.0.1/a.png").unwrap();
        let ftp = Url::parse("ftp://example.com/a.png").unwrap();

        assert!(matches!(
            strict.ensure_allowed_target(&local),
            Err(PhotoError::InvalidFormat(_))
        ));
        assert!(strict.ensure_allowed_target(&ftp).is_err());
        assert!(private_ok().ensure_allowed_target(&local).is_ok());
        assert!(private_ok().ensure_allowed_target(&ftp).is_err());
    }

    #[test]
    fn test_redact_strips_secrets() {
        let url = Url::parse("https://user:pw@example.com:8443/u/me.jpg?sig=abc#frag").unwrap();
        assert_eq!(redact(&url), "https://example.com:8443/u/me.jpg");
    }

    #[test]
    fn test_base64_payload_forms() {
        assert_eq!(base64_payload(" QUJD ").unwrap(), "QUJD");
        assert_eq!(base64_payload("data:image/png;base64,QUJD").unwrap(), "QUJD");
        assert!(base64_payload("data:text/plain;base64,QUJD").is_err());
        assert!(base64_payload("data:image/png,QUJD").is_err());
    }

    #[test]
    fn test_base64_estimate_rejects_before_decoding() {
        let handler = PhotoHandler::new(PhotoConfig {
            max_file_size: 16,
            ..PhotoConfig::default()
        })
        .expect("handler");

        // 非法字符：若先解码会得到 Decode 错误
        let result = handler.load_from_base64(&"!".repeat(64));
        assert!(matches!(result, Err(PhotoError::ResourceLimit(_))));
    }

    #[test]
    fn test_base64_image_loads() {
        let png = small_png();
        let data = format!("data:image/png;base64,{}", STANDARD.encode(&png));

        let raw = private_ok().load_from_base64(&data).expect("load");

        assert_eq!(raw.source_hint, "base64");
        assert_eq!(raw.bytes, png);
    }

    #[test]
    fn test_base64_text_is_not_an_image() {
        let result = private_ok().load_from_base64("SGVsbG8=");
        assert!(matches!(result, Err(PhotoError::InvalidFormat(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = private_ok().load_from_file("/no/such/dir/avatar.png");
        assert!(matches!(result, Err(PhotoError::FileSystem(_))));
    }

    #[tokio::test]
    async fn test_download_png() {
        let png = small_png();
        let (base, server) = one_shot_server(sized_response("image/png", &png));

        let raw = private_ok()
            .load(&PhotoSource::Url(format!("{}/me.png", base)))
            .await;
        server.join().expect("server thread");

        let raw = raw.expect("download");
        assert_eq!(raw.source_hint, "url");
        assert_eq!(raw.bytes, png);
    }

    #[tokio::test]
    async fn test_download_checks_signature_not_just_header() {
        let (base, server) = one_shot_server(sized_response("image/png", b"not a png"));

        let result = private_ok().load_from_url(&format!("{}/me.png", base)).await;
        server.join().expect("server thread");

        assert!(matches!(result, Err(PhotoError::InvalidFormat(_))));
    }

    #[tokio::test]
    async fn test_download_rejects_html() {
        let (base, server) =
            one_shot_server(sized_response("text/html; charset=utf-8", b"<html></html>"));

        let result = private_ok().load_from_url(&format!("{}/", base)).await;
        server.join().expect("server thread");

        assert!(matches!(result, Err(PhotoError::InvalidFormat(_))));
    }

    #[tokio::test]
    async fn test_chunked_download_stops_at_size_limit() {
        let block = [0x42u8; 16];
        let chunks = [&block[..]; 4];
        let (base, server) = one_shot_server(chunked_response("image/png", &chunks));
        let handler = PhotoHandler::new(PhotoConfig {
            max_file_size: 8,
            allow_private_network: true,
            ..PhotoConfig::default()
        })
        .expect("handler");

        let result = handler.load_from_url(&format!("{}/me.png", base)).await;
        server.join().expect("server thread");

        assert!(matches!(result, Err(PhotoError::ResourceLimit(_))));
    }

    #[tokio::test]
    async fn test_chunked_download_within_limit() {
        let png = small_png();
        let (head, tail) = png.split_at(png.len() / 2);
        let (base, server) = one_shot_server(chunked_response("image/png", &[head, tail]));

        let raw = private_ok().load_from_url(&format!("{}/me.png", base)).await;
        server.join().expect("server thread");

        assert_eq!(raw.expect("download").bytes, png);
    }

    #[tokio::test]
    async fn test_download_blocked_for_localhost_by_default() {
        let strict = PhotoHandler::new(PhotoConfig::default()).expect("handler");
        let result = strict.load_from_url("http://localhost:9/me.png").await;
        assert!(matches!(result, Err(PhotoError::InvalidFormat(_))));
    }
}
