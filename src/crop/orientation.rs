use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 裁剪时刻的设备方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceOrientation {
    #[default]
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
}

impl DeviceOrientation {
    /// 横屏时宽高需要逻辑互换。
    pub fn is_landscape(self) -> bool {
        matches!(self, Self::LandscapeLeft | Self::LandscapeRight)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::PortraitUpsideDown => "portrait-upside-down",
            Self::LandscapeLeft => "landscape-left",
            Self::LandscapeRight => "landscape-right",
        }
    }
}

impl fmt::Display for DeviceOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceOrientation {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "portrait" => Ok(Self::Portrait),
            "portrait-upside-down" | "upside-down" => Ok(Self::PortraitUpsideDown),
            "landscape-left" => Ok(Self::LandscapeLeft),
            "landscape-right" => Ok(Self::LandscapeRight),
            other => Err(format!(
                "未知设备方向：{}（可选：portrait / portrait-upside-down / landscape-left / landscape-right）",
                other
            )),
        }
    }
}

/// 图片像素自身的方向标记，裁剪后原样保留。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageOrientation {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl ImageOrientation {
    /// 显示时需旋转 90° 或 270°，显示宽高与存储宽高互换。
    pub fn is_quarter_turn(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_detection() {
        assert!(DeviceOrientation::LandscapeLeft.is_landscape());
        assert!(DeviceOrientation::LandscapeRight.is_landscape());
        assert!(!DeviceOrientation::Portrait.is_landscape());
        assert!(!DeviceOrientation::PortraitUpsideDown.is_landscape());
    }

    #[test]
    fn test_parse_round_trip_names() {
        for orientation in [
            DeviceOrientation::Portrait,
            DeviceOrientation::PortraitUpsideDown,
            DeviceOrientation::LandscapeLeft,
            DeviceOrientation::LandscapeRight,
        ] {
            assert_eq!(orientation.as_str().parse::<DeviceOrientation>(), Ok(orientation));
        }
        assert_eq!(" Landscape-Left ".parse(), Ok(DeviceOrientation::LandscapeLeft));
        assert!("sideways".parse::<DeviceOrientation>().is_err());
    }

    #[test]
    fn test_quarter_turn_tags() {
        assert!(ImageOrientation::Left.is_quarter_turn());
        assert!(ImageOrientation::Right.is_quarter_turn());
        assert!(!ImageOrientation::Up.is_quarter_turn());
        assert!(!ImageOrientation::Down.is_quarter_turn());
    }
}
