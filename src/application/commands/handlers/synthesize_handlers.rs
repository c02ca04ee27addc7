//! Synthesize Command Handler

use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use uuid::Uuid;

use crate::application::commands::SynthesizeCommand;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AudioTranscoderPort, ProjectStoreError, ProjectStorePort, StoredSegment, SynthesisRequest,
    TtsEnginePort,
};
use crate::domain::project::{AudioFormat, ProjectId};
use crate::domain::split_sentences;

/// 合成响应
#[derive(Debug, Clone)]
pub struct SynthesizeResult {
    pub project_id: ProjectId,
    pub segments: Vec<StoredSegment>,
}

/// Synthesize Handler - 文本合成并按序落盘
///
/// 流程：校验 → 解析/生成项目 ID → 可选分句 → 逐句调用 TTS →
/// 非 WAV 输出经转码端口 → 项目写锁内分配序号并写入
pub struct SynthesizeHandler {
    project_store: Arc<dyn ProjectStorePort>,
    tts_engine: Arc<dyn TtsEnginePort>,
    transcoder: Arc<dyn AudioTranscoderPort>,
    /// 转码中间文件的暂存目录
    scratch_dir: PathBuf,
}

impl SynthesizeHandler {
    pub fn new(
        project_store: Arc<dyn ProjectStorePort>,
        tts_engine: Arc<dyn TtsEnginePort>,
        transcoder: Arc<dyn AudioTranscoderPort>,
        scratch_dir: PathBuf,
    ) -> Self {
        Self {
            project_store,
            tts_engine,
            transcoder,
            scratch_dir,
        }
    }

    pub async fn handle(
        &self,
        command: SynthesizeCommand,
    ) -> Result<SynthesizeResult, ApplicationError> {
        if command.text.trim().is_empty() {
            return Err(ApplicationError::validation("Text is required"));
        }

        let project_id = match &command.project_id {
            Some(id) => ProjectId::new(id.clone())?,
            None => ProjectId::generate(),
        };

        // 转码能力在发起任何合成前校验，避免做一半才失败
        if command.output_format != AudioFormat::Wav
            && !self.transcoder.supports_format(command.output_format)
        {
            return Err(ApplicationError::validation(format!(
                "Output format not available: {}",
                command.output_format
            )));
        }

        let chunks: Vec<String> = if command.split_sentences {
            split_sentences(&command.text)
        } else {
            vec![command.text.trim().to_string()]
        };
        if chunks.is_empty() {
            return Err(ApplicationError::validation(
                "Text contains no synthesizable content",
            ));
        }

        let mut segments = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            let response = self
                .tts_engine
                .synthesize(SynthesisRequest {
                    text: chunk.clone(),
                    prompt_speech_path: command.prompt_speech_path.clone(),
                    prompt_text: command.prompt_text.clone(),
                })
                .await?;

            let data = if command.output_format == AudioFormat::Wav {
                response.audio_data
            } else {
                self.transcode(&response.audio_data, command.output_format)
                    .await?
            };

            let stored = self
                .store_with_retry(&project_id, &data, command.output_format)
                .await?;
            segments.push(stored);
        }

        tracing::info!(
            project_id = %project_id,
            segment_count = segments.len(),
            "Synthesis completed"
        );

        Ok(SynthesizeResult {
            project_id,
            segments,
        })
    }

    /// 写入分段，序号碰撞时重试一次
    ///
    /// 进程内写入者在项目写锁上串行化，碰撞只可能来自进程外写入者
    async fn store_with_retry(
        &self,
        project_id: &ProjectId,
        data: &[u8],
        format: AudioFormat,
    ) -> Result<StoredSegment, ApplicationError> {
        match self
            .project_store
            .save_next_segment(project_id, data, format)
            .await
        {
            Ok(stored) => Ok(stored),
            Err(ProjectStoreError::OrderCollision { order, .. }) => {
                tracing::warn!(
                    project_id = %project_id,
                    order,
                    "Order collision from external writer, retrying allocation"
                );
                self.project_store
                    .save_next_segment(project_id, data, format)
                    .await
                    .map_err(Into::into)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 经转码端口转换格式：WAV 落暂存盘 → convert → 读回目标字节
    async fn transcode(
        &self,
        wav_data: &[u8],
        target_format: AudioFormat,
    ) -> Result<Vec<u8>, ApplicationError> {
        fs::create_dir_all(&self.scratch_dir)
            .await
            .map_err(|e| ApplicationError::StorageError(e.to_string()))?;

        let tmp_in = self
            .scratch_dir
            .join(format!("synth_{}.wav", Uuid::new_v4()));
        fs::write(&tmp_in, wav_data)
            .await
            .map_err(|e| ApplicationError::StorageError(e.to_string()))?;

        let result = async {
            let out_path = self.transcoder.convert(&tmp_in, target_format).await?;
            let bytes = fs::read(&out_path)
                .await
                .map_err(|e| ApplicationError::StorageError(e.to_string()))?;
            if out_path != tmp_in {
                let _ = fs::remove_file(&out_path).await;
            }
            Ok::<Vec<u8>, ApplicationError>(bytes)
        }
        .await;

        let _ = fs::remove_file(&tmp_in).await;
        result
    }
}
