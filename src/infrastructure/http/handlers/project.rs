//! Project HTTP Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::ListProjectFiles;
use crate::infrastructure::http::dto::{ApiResponse, ProjectFilesResponse, SegmentFileDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 获取项目文件列表
pub async fn get_project_files(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
) -> Result<Json<ApiResponse<ProjectFilesResponse>>, ApiError> {
    let files = state
        .list_project_files_handler
        .handle(ListProjectFiles {
            project_id: project_id.clone(),
        })
        .await?;

    Ok(Json(ApiResponse::success(ProjectFilesResponse {
        project_id,
        files: files
            .into_iter()
            .map(|f| SegmentFileDto {
                order: f.order,
                filename: f.filename,
                download_url: f.download_url,
                duration_secs: f.duration_secs,
            })
            .collect(),
    })))
}
