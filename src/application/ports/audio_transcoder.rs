//! Audio Transcoder Port - 音频格式转换抽象
//!
//! 格式转换（编解码）不在本系统范围内，这里只保留接口缝：
//! 输入一个磁盘路径，输出目标格式的磁盘路径。

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::project::AudioFormat;

/// 转码错误
#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Input file not found: {0}")]
    InputNotFound(String),

    #[error("Conversion failed: {0}")]
    ConversionFailed(String),
}

/// Audio Transcoder Port
#[async_trait]
pub trait AudioTranscoderPort: Send + Sync {
    /// 将输入文件转换为目标格式，返回转换后文件的路径
    async fn convert(
        &self,
        input_path: &Path,
        target_format: AudioFormat,
    ) -> Result<PathBuf, TranscodeError>;

    /// 检查是否支持目标格式
    fn supports_format(&self, format: AudioFormat) -> bool;
}
