//! Passthrough Transcoder - 不转码的占位实现
//!
//! 编解码不在本系统范围内。该实现只接受 WAV 目标格式并原样返回
//! 输入路径；其他格式报告不支持，由调用方在入口处拒绝请求。
//! 真正的转码器通过 AudioTranscoderPort 接入。

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{AudioTranscoderPort, TranscodeError};
use crate::domain::project::AudioFormat;

/// 直通转码器
#[derive(Debug, Default)]
pub struct PassthroughTranscoder;

impl PassthroughTranscoder {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AudioTranscoderPort for PassthroughTranscoder {
    async fn convert(
        &self,
        input_path: &Path,
        target_format: AudioFormat,
    ) -> Result<PathBuf, TranscodeError> {
        if !self.supports_format(target_format) {
            return Err(TranscodeError::UnsupportedFormat(
                target_format.to_string(),
            ));
        }

        if !fs::try_exists(input_path)
            .await
            .map_err(|e| TranscodeError::ConversionFailed(e.to_string()))?
        {
            return Err(TranscodeError::InputNotFound(
                input_path.display().to_string(),
            ));
        }

        Ok(input_path.to_path_buf())
    }

    fn supports_format(&self, format: AudioFormat) -> bool {
        format == AudioFormat::Wav
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_wav_passes_through() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("in.wav");
        std::fs::write(&input, b"wav").unwrap();

        let transcoder = PassthroughTranscoder::new();
        let output = transcoder.convert(&input, AudioFormat::Wav).await.unwrap();
        assert_eq!(output, input);
    }

    #[tokio::test]
    async fn test_other_formats_unsupported() {
        let transcoder = PassthroughTranscoder::new();
        assert!(!transcoder.supports_format(AudioFormat::Mp3));

        let err = transcoder
            .convert(Path::new("in.wav"), AudioFormat::Mp3)
            .await
            .unwrap_err();
        assert!(matches!(err, TranscodeError::UnsupportedFormat(_)));
    }
}
