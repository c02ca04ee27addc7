//! Audio HTTP Handler
//!
//! 下载单个分段文件（流式返回）

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::application::GetAudioFile;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 下载项目下的单个分段
pub async fn get_audio_file(
    State(state): State<Arc<AppState>>,
    Path((project_id, filename)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let info = state
        .get_audio_file_handler
        .handle(GetAudioFile {
            project_id,
            filename: filename.clone(),
        })
        .await?;

    let file = tokio::fs::File::open(&info.path)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to open audio file: {}", e)))?;

    let stream = ReaderStream::new(file);
    let body = Body::from_stream(stream);

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, info.content_type)
        .header(header::CONTENT_LENGTH, info.size_bytes)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(body)
        .unwrap())
}
