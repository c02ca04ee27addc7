//! Project Context - Value Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::ProjectError;

/// 项目唯一标识
///
/// 不变量:
/// - 非空，最长 64 字符
/// - 仅允许字母、数字、`-`、`_`（项目 ID 会成为磁盘目录名和 URL 路径段）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Result<Self, ProjectError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ProjectError::InvalidProjectId(
                "project id cannot be empty".to_string(),
            ));
        }
        if id.len() > 64 {
            return Err(ProjectError::InvalidProjectId(
                "project id cannot exceed 64 characters".to_string(),
            ));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ProjectError::InvalidProjectId(format!(
                "project id contains invalid characters: {}",
                id
            )));
        }
        Ok(Self(id))
    }

    /// 生成新的项目 ID（UUID v4）
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string().replace('-', ""))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 音频格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Wav,
    Mp3,
    Ogg,
    Flac,
}

impl AudioFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "wav" => Some(Self::Wav),
            "mp3" => Some(Self::Mp3),
            "ogg" => Some(Self::Ogg),
            "flac" => Some(Self::Flac),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Ogg => "ogg",
            Self::Flac => "flac",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::Ogg => "audio/ogg",
            Self::Flac => "audio/flac",
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for AudioFormat {
    type Err = ProjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s).ok_or_else(|| ProjectError::UnsupportedFormat(s.to_string()))
    }
}

/// 分段文件命名: `{order:03}_{project_id}.{ext}`
///
/// 序号补零到三位，保证按文件名排序与按序号排序一致
pub fn segment_filename(order: u32, project_id: &ProjectId, format: AudioFormat) -> String {
    format!("{:03}_{}.{}", order, project_id, format.extension())
}

/// 从文件名解析前导序号
///
/// 返回 `None` 表示文件名不符合 `{order}_{...}` 约定（人工放置的文件等），
/// 由调用方决定跳过还是回退到 order=0
pub fn parse_order(filename: &str) -> Option<u32> {
    let stem = filename.split('.').next()?;
    let prefix = stem.split('_').next()?;
    prefix.parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_id_valid() {
        let id = ProjectId::new("my-project_01").unwrap();
        assert_eq!(id.as_str(), "my-project_01");
    }

    #[test]
    fn test_project_id_rejects_empty() {
        assert!(ProjectId::new("").is_err());
    }

    #[test]
    fn test_project_id_rejects_path_separators() {
        assert!(ProjectId::new("a/b").is_err());
        assert!(ProjectId::new("a\\b").is_err());
        assert!(ProjectId::new("..").is_err());
    }

    #[test]
    fn test_project_id_generate_is_valid() {
        let id = ProjectId::generate();
        assert!(ProjectId::new(id.as_str()).is_ok());
    }

    #[test]
    fn test_segment_filename_zero_padded() {
        let id = ProjectId::new("p1").unwrap();
        assert_eq!(segment_filename(7, &id, AudioFormat::Wav), "007_p1.wav");
        assert_eq!(segment_filename(123, &id, AudioFormat::Mp3), "123_p1.mp3");
    }

    #[test]
    fn test_parse_order_roundtrip() {
        let id = ProjectId::new("p1").unwrap();
        let name = segment_filename(42, &id, AudioFormat::Wav);
        assert_eq!(parse_order(&name), Some(42));
    }

    #[test]
    fn test_parse_order_rejects_unprefixed() {
        assert_eq!(parse_order("intro.wav"), None);
        assert_eq!(parse_order("_p1.wav"), None);
        assert_eq!(parse_order(""), None);
    }

    #[test]
    fn test_audio_format_extension_roundtrip() {
        assert_eq!(AudioFormat::from_extension("WAV"), Some(AudioFormat::Wav));
        assert_eq!(AudioFormat::from_extension("txt"), None);
        assert_eq!(AudioFormat::Mp3.content_type(), "audio/mpeg");
    }
}
