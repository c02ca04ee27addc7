//! Stream HTTP Handler
//!
//! 返回项目的 M3U8 播放列表，标准播放器按列表顺序逐段播放

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;

use crate::application::GetPlaylist;
use crate::domain::playlist::PLAYLIST_CONTENT_TYPE;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 获取项目播放列表 (M3U8)
pub async fn stream_project(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
) -> Result<Response, ApiError> {
    let playlist = state
        .get_playlist_handler
        .handle(GetPlaylist {
            project_id,
            base_url: state.audio_base_url.clone(),
        })
        .await?;

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, PLAYLIST_CONTENT_TYPE)
        .body(Body::from(playlist))
        .unwrap())
}
