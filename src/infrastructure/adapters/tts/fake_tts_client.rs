//! Fake TTS Client - 用于测试的 TTS 客户端
//!
//! 不调用外部服务，直接在内存中生成一段静音 WAV，
//! 时长与输入文本长度成正比，测试无需音频素材文件。

use async_trait::async_trait;

use crate::application::ports::{SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError};

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 采样率
    pub sample_rate: u32,
    /// 每个字符折算的毫秒数
    pub millis_per_char: u64,
}

impl Default for FakeTtsClientConfig {
    fn default() -> Self {
        Self {
            sample_rate: 22050,
            millis_per_char: 50,
        }
    }
}

/// Fake TTS Client
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
}

impl FakeTtsClient {
    /// 创建新的 FakeTtsClient
    pub fn new(config: FakeTtsClientConfig) -> Self {
        Self { config }
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Self {
        Self::new(FakeTtsClientConfig::default())
    }

    /// 生成 16bit 单声道静音 WAV
    fn silent_wav(&self, duration_ms: u64) -> Vec<u8> {
        let sample_rate = self.config.sample_rate;
        let sample_count = (u64::from(sample_rate) * duration_ms / 1000) as u32;
        let data_len = sample_count * 2; // 16bit = 2 字节/采样
        let byte_rate = sample_rate * 2;

        let mut wav = Vec::with_capacity(44 + data_len as usize);
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&(36 + data_len).to_le_bytes());
        wav.extend_from_slice(b"WAVE");
        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&16u32.to_le_bytes()); // fmt chunk 大小
        wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
        wav.extend_from_slice(&1u16.to_le_bytes()); // 单声道
        wav.extend_from_slice(&sample_rate.to_le_bytes());
        wav.extend_from_slice(&byte_rate.to_le_bytes());
        wav.extend_from_slice(&2u16.to_le_bytes()); // block align
        wav.extend_from_slice(&16u16.to_le_bytes()); // 位深
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&data_len.to_le_bytes());
        wav.resize(44 + data_len as usize, 0);
        wav
    }
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, TtsError> {
        let char_count = request.text.chars().count() as u64;
        let duration_ms = (char_count * self.config.millis_per_char).max(200);

        tracing::debug!(
            text_len = request.text.len(),
            duration_ms,
            "FakeTtsClient: generating silent audio"
        );

        Ok(SynthesisResponse {
            audio_data: self.silent_wav(duration_ms),
            duration_ms: Some(duration_ms),
            sample_rate: Some(self.config.sample_rate),
        })
    }

    async fn health_check(&self) -> bool {
        true
    }
}
