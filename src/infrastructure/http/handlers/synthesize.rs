//! Synthesize HTTP Handler
//!
//! multipart/form-data 字段:
//! - text            必填，要合成的文本
//! - project_id      可选，缺省时生成新项目
//! - prompt_text     可选，提示音频对应文本
//! - output_format   可选，默认 wav
//! - split_sentences 可选，"true" 时按句切分
//! - prompt_speech   可选文件，声音克隆提示音频

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use uuid::Uuid;

use crate::application::SynthesizeCommand;
use crate::domain::project::AudioFormat;
use crate::infrastructure::http::dto::{ApiResponse, StoredSegmentDto, SynthesizeResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 合成语音并追加到项目
pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<SynthesizeResponse>>, ApiError> {
    let mut text: Option<String> = None;
    let mut project_id: Option<String> = None;
    let mut prompt_text: Option<String> = None;
    let mut output_format: Option<String> = None;
    let mut split_sentences = false;
    let mut prompt_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "text" => {
                text = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read text: {}", e)))?,
                );
            }
            "project_id" => {
                let value = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read project_id: {}", e))
                })?;
                if !value.is_empty() {
                    project_id = Some(value);
                }
            }
            "prompt_text" => {
                let value = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read prompt_text: {}", e))
                })?;
                if !value.is_empty() {
                    prompt_text = Some(value);
                }
            }
            "output_format" => {
                output_format = Some(field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read output_format: {}", e))
                })?);
            }
            "split_sentences" => {
                let value = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read split_sentences: {}", e))
                })?;
                split_sentences = matches!(value.as_str(), "true" | "1");
            }
            "prompt_speech" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| {
                        ApiError::BadRequest(format!("Failed to read prompt_speech: {}", e))
                    })?
                    .to_vec();

                if data.len() as u64 > state.max_prompt_size {
                    return Err(ApiError::BadRequest(format!(
                        "Prompt speech file too large, max size: {} bytes",
                        state.max_prompt_size
                    )));
                }
                prompt_data = Some(data);
            }
            _ => {}
        }
    }

    let text = text.ok_or_else(|| ApiError::BadRequest("Text is required".to_string()))?;

    let output_format = match output_format.as_deref() {
        Some(value) => value
            .parse::<AudioFormat>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => state.default_output_format,
    };

    // 提示音频必须配套提示文本
    if prompt_data.is_some() && prompt_text.is_none() {
        return Err(ApiError::BadRequest(
            "Prompt text is required when prompt speech is provided".to_string(),
        ));
    }

    // 提示音频落盘到暂存目录，交给 TTS 端口后删除
    let prompt_speech_path: Option<PathBuf> = match prompt_data {
        Some(data) => {
            fs::create_dir_all(&state.temp_dir)
                .await
                .map_err(|e| ApiError::Internal(format!("Failed to create temp dir: {}", e)))?;

            let path = state.temp_dir.join(format!("prompt_{}.wav", Uuid::new_v4()));
            fs::write(&path, &data)
                .await
                .map_err(|e| ApiError::Internal(format!("Failed to save prompt speech: {}", e)))?;
            Some(path)
        }
        None => None,
    };

    let command = SynthesizeCommand {
        text,
        project_id,
        prompt_speech_path: prompt_speech_path.clone(),
        prompt_text,
        output_format,
        split_sentences,
    };

    let result = state.synthesize_handler.handle(command).await;

    // 无论成败都清理提示音频临时文件
    if let Some(path) = prompt_speech_path {
        if let Err(e) = fs::remove_file(&path).await {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove prompt temp file");
        }
    }

    let result = result?;

    tracing::info!(
        project_id = %result.project_id,
        segment_count = result.segments.len(),
        "Synthesize request completed"
    );

    let stream_url = format!("/stream/{}", result.project_id);
    Ok(Json(ApiResponse::success(SynthesizeResponse {
        project_id: result.project_id.to_string(),
        segments: result
            .segments
            .into_iter()
            .map(|s| StoredSegmentDto {
                order: s.order,
                filename: s.filename,
            })
            .collect(),
        stream_url,
    })))
}
