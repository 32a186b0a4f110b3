//! 音频编码标识

use serde::{Deserialize, Serialize};

/// 恢复出的码流格式
///
/// 标志位：MP3 = 0（默认，有损），FLAC = 1（无损）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MusicFormat {
    #[default]
    Mp3,
    Flac,
}

impl MusicFormat {
    /// 由元数据中的 `format` 字段取值，只有 `flac` 视为无损
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("flac") {
            Self::Flac
        } else {
            Self::Mp3
        }
    }

    /// 由码流开头嗅探（`fLaC` 为 FLAC，其余按 MP3）
    #[must_use]
    pub fn sniff(audio: &[u8]) -> Self {
        if audio.starts_with(b"fLaC") {
            Self::Flac
        } else {
            Self::Mp3
        }
    }

    /// 格式标志位
    #[must_use]
    pub const fn flag(self) -> u8 {
        match self {
            Self::Mp3 => 0,
            Self::Flac => 1,
        }
    }

    /// 输出文件扩展名
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Flac => "flac",
        }
    }
}

impl std::fmt::Display for MusicFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(MusicFormat::from_name("flac"), MusicFormat::Flac);
        assert_eq!(MusicFormat::from_name("FLAC"), MusicFormat::Flac);
        assert_eq!(MusicFormat::from_name("mp3"), MusicFormat::Mp3);
        assert_eq!(MusicFormat::from_name("ogg"), MusicFormat::Mp3);
        assert_eq!(MusicFormat::from_name(""), MusicFormat::Mp3);
    }

    #[test]
    fn test_flag_and_extension() {
        assert_eq!(MusicFormat::Mp3.flag(), 0);
        assert_eq!(MusicFormat::Flac.flag(), 1);
        assert_eq!(MusicFormat::default(), MusicFormat::Mp3);
        assert_eq!(MusicFormat::Flac.to_string(), "flac");
    }

    #[test]
    fn test_sniff() {
        assert_eq!(MusicFormat::sniff(b"fLaC\0\0\0\x22"), MusicFormat::Flac);
        assert_eq!(MusicFormat::sniff(b"ID3\x03"), MusicFormat::Mp3);
        assert_eq!(MusicFormat::sniff(b""), MusicFormat::Mp3);
    }
}
