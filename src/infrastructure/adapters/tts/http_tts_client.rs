//! HTTP TTS Client - 调用外部 TTS HTTP 服务
//!
//! 实现 TtsEnginePort trait，通过 HTTP 调用外部合成服务
//!
//! 外部 TTS API:
//! POST {base_url}/synthesize
//! - 无提示音频: {"text": "...", "prompt_text": null}  (JSON)
//! - 带提示音频: multipart/form-data (text, prompt_text, prompt_speech 文件)
//! Response: audio/wav binary, metadata in headers

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError};

/// 合成请求体 (JSON，无提示音频时)
#[derive(Debug, Serialize)]
struct TtsHttpRequest<'a> {
    text: &'a str,
    prompt_text: Option<&'a str>,
}

/// HTTP TTS 客户端配置
#[derive(Debug, Clone)]
pub struct HttpTtsClientConfig {
    /// TTS 服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 重试次数
    pub max_retries: u32,
}

impl Default for HttpTtsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 120,
            max_retries: 0,
        }
    }
}

impl HttpTtsClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP TTS 客户端
pub struct HttpTtsClient {
    client: Client,
    config: HttpTtsClientConfig,
}

impl HttpTtsClient {
    /// 创建新的 HTTP TTS 客户端
    pub fn new(config: HttpTtsClientConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取合成 URL
    fn synthesize_url(&self) -> String {
        format!("{}/synthesize", self.config.base_url)
    }

    /// 获取健康检查 URL
    fn health_url(&self) -> String {
        format!("{}/health", self.config.base_url)
    }

    fn map_send_error(e: reqwest::Error) -> TtsError {
        if e.is_timeout() {
            TtsError::Timeout
        } else if e.is_connect() {
            TtsError::NetworkError(format!("Cannot connect to TTS service: {}", e))
        } else {
            TtsError::NetworkError(e.to_string())
        }
    }

    /// 发送一次合成请求（提示音频走 multipart，否则用 JSON）
    async fn send_once(
        &self,
        request: &SynthesisRequest,
        prompt_bytes: Option<&[u8]>,
    ) -> Result<reqwest::Response, TtsError> {
        let builder = self.client.post(self.synthesize_url());

        let result = if let Some(bytes) = prompt_bytes {
            let mut form = Form::new().text("text", request.text.clone()).part(
                "prompt_speech",
                Part::bytes(bytes.to_vec()).file_name("prompt.wav"),
            );
            if let Some(prompt_text) = &request.prompt_text {
                form = form.text("prompt_text", prompt_text.clone());
            }

            builder.multipart(form).send().await
        } else {
            let body = TtsHttpRequest {
                text: &request.text,
                prompt_text: request.prompt_text.as_deref(),
            };
            builder.json(&body).send().await
        };

        result.map_err(Self::map_send_error)
    }
}

#[async_trait]
impl TtsEnginePort for HttpTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, TtsError> {
        tracing::debug!(
            url = %self.synthesize_url(),
            text_len = request.text.len(),
            has_prompt = request.prompt_speech_path.is_some(),
            "Sending TTS synthesis request"
        );

        let prompt_bytes = match &request.prompt_speech_path {
            Some(path) => Some(tokio::fs::read(path).await.map_err(|e| {
                TtsError::ServiceError(format!("Cannot read prompt audio: {}", e))
            })?),
            None => None,
        };

        // 网络层错误按配置重试；服务端 4xx/5xx 不重试
        let mut attempt = 0u32;
        let response = loop {
            match self.send_once(&request, prompt_bytes.as_deref()).await {
                Ok(response) => break response,
                Err(e @ (TtsError::Timeout | TtsError::NetworkError(_)))
                    if attempt < self.config.max_retries =>
                {
                    attempt += 1;
                    tracing::warn!(
                        attempt,
                        max_retries = self.config.max_retries,
                        error = %e,
                        "TTS request failed, retrying"
                    );
                }
                Err(e) => return Err(e),
            }
        };

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TtsError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        // 从 headers 提取元数据
        let headers = response.headers();
        let duration_ms = headers
            .get("X-TTS-Duration-Ms")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let sample_rate = headers
            .get("X-TTS-Sample-Rate")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        if audio_data.is_empty() {
            return Err(TtsError::InvalidResponse(
                "TTS service returned empty audio".to_string(),
            ));
        }

        tracing::info!(
            duration_ms = ?duration_ms,
            sample_rate = ?sample_rate,
            audio_size = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(SynthesisResponse {
            audio_data,
            duration_ms,
            sample_rate,
        })
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
