//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::project::AudioFormat;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// TTS 引擎配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 音频配置
    #[serde(default)]
    pub audio: AudioConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 公开访问的 Base URL（写入播放列表的分段 URL 前缀）
    /// 如果未设置，播放列表使用相对路径 /audio/...
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5070
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 分段 URL 前缀：`{base_url}/audio`，未配置 base_url 时为相对的 `/audio`
    pub fn audio_base_url(&self) -> String {
        match &self.base_url {
            Some(base) => format!("{}/audio", base.trim_end_matches('/')),
            None => "/audio".to_string(),
        }
    }
}

/// TTS 引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// TTS 服务基础 URL
    #[serde(default = "default_tts_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,

    /// 最大重试次数
    #[serde(default)]
    pub max_retries: u32,
}

fn default_tts_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_tts_timeout() -> u64 {
    120
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            url: default_tts_url(),
            timeout_secs: default_tts_timeout(),
            max_retries: 0,
        }
    }
}

/// 音频配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudioConfig {
    /// 默认输出格式
    /// 可选: wav, mp3, ogg, flac
    #[serde(default)]
    pub output_format: AudioFormat,
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 生成音频的存储根目录
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,

    /// 提示音频最大大小（字节），默认 1MB
    #[serde(default = "default_max_prompt_size")]
    pub max_prompt_size: u64,
}

fn default_audio_dir() -> PathBuf {
    PathBuf::from("data/audio")
}

fn default_max_prompt_size() -> u64 {
    1024 * 1024 // 1 MB
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            audio_dir: default_audio_dir(),
            max_prompt_size: default_max_prompt_size(),
        }
    }
}

impl StorageConfig {
    /// 临时文件目录（提示音频上传、转码中间文件）
    pub fn temp_dir(&self) -> PathBuf {
        self.audio_dir.join("temp")
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5070);
        assert_eq!(config.tts.url, "http://localhost:8000");
        assert_eq!(config.storage.audio_dir, PathBuf::from("data/audio"));
        assert_eq!(config.audio.output_format, AudioFormat::Wav);
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5070");
    }

    #[test]
    fn test_audio_base_url_relative_by_default() {
        let config = ServerConfig::default();
        assert_eq!(config.audio_base_url(), "/audio");
    }

    #[test]
    fn test_audio_base_url_with_public_base() {
        let config = ServerConfig {
            base_url: Some("https://tts.example.com/".to_string()),
            ..Default::default()
        };
        assert_eq!(config.audio_base_url(), "https://tts.example.com/audio");
    }

    #[test]
    fn test_temp_dir_under_audio_dir() {
        let config = StorageConfig::default();
        assert_eq!(config.temp_dir(), PathBuf::from("data/audio/temp"));
    }
}
