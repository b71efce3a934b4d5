//! # 骑行小组：命令行入口
//!
//! 本文件仅负责参数解析、日志与设置初始化，业务逻辑见 `lib.rs`。

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use group_ride::crop::{crop_to_square, DeviceOrientation};
use group_ride::error::AppError;
use group_ride::phone::MaskPattern;
use group_ride::photo::{PhotoHandler, PhotoSource};
use group_ride::settings::{self, AppSettings};
use group_ride::storage;

#[derive(Debug, Parser)]
#[command(name = "group-ride", version, about = "骑行小组资料工具")]
struct Cli {
    /// 设置文件路径（JSON）
    #[arg(long, global = true, default_value = "settings.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 按掩码格式化电话号码
    FormatPhone {
        input: String,
        /// 覆盖设置中的掩码
        #[arg(long)]
        mask: Option<String>,
    },
    /// 将图片裁剪为正方形
    Crop {
        input: String,
        output: PathBuf,
        #[arg(long, default_value = "portrait")]
        orientation: DeviceOrientation,
    },
    /// 生成头像并写入 TempImage.png
    Avatar {
        /// URL、Data URL 或本地文件路径
        source: String,
        /// 覆盖设置中的头像目录
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long, default_value = "portrait")]
        orientation: DeviceOrientation,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AvatarReport {
    path: PathBuf,
    width: u32,
    height: u32,
    bytes: usize,
    storage: storage::StorageInfo,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("❌ {}", err);
            eprintln!("错误: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let settings = settings::load_settings(&cli.config)?;

    match cli.command {
        Command::FormatPhone { input, mask } => {
            let mask = MaskPattern::new(mask.unwrap_or(settings.phone_mask));
            println!("{}", mask.apply(&input));
        }
        Command::Crop {
            input,
            output,
            orientation,
        } => {
            let handler = PhotoHandler::new(settings.to_photo_config()?)?;
            let image = handler
                .load_image(&PhotoSource::FilePath(input))
                .await?;
            let square = crop_to_square(&image, orientation)?;
            save_image(&square.pixels, &output)?;
            println!("{}x{} -> {}", square.width(), square.height(), output.display());
        }
        Command::Avatar {
            source,
            out,
            orientation,
        } => {
            let report = make_avatar(&settings, &source, out, orientation).await?;
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| AppError::Settings(format!("序列化报告失败: {}", e)))?;
            println!("{}", json);
        }
    }
    Ok(())
}

async fn make_avatar(
    settings: &AppSettings,
    source: &str,
    out: Option<PathBuf>,
    orientation: DeviceOrientation,
) -> Result<AvatarReport, AppError> {
    let handler = PhotoHandler::new(settings.to_photo_config()?)?;
    let avatar = handler
        .prepare_avatar_from_source(&PhotoSource::detect(source), orientation)
        .await?;

    let dir = match out {
        Some(dir) => storage::avatar_dir(dir.to_str())?,
        None => storage::avatar_dir(settings.photo.avatar_dir.as_deref())?,
    };
    let path = storage::store_avatar(&dir, &avatar)?;

    Ok(AvatarReport {
        path,
        width: avatar.width,
        height: avatar.height,
        bytes: avatar.png.len(),
        storage: storage::dir_info(&dir),
    })
}

fn save_image(pixels: &image::DynamicImage, output: &Path) -> Result<(), AppError> {
    pixels
        .save(output)
        .map_err(|e| AppError::Storage(format!("写入图片 '{}' 失败: {}", output.display(), e)))
}
