//! Data Transfer Objects

use serde::Serialize;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Synthesize DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct StoredSegmentDto {
    pub order: u32,
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct SynthesizeResponse {
    pub project_id: String,
    pub segments: Vec<StoredSegmentDto>,
    pub stream_url: String,
}

// ============================================================================
// Project DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SegmentFileDto {
    pub order: u32,
    pub filename: String,
    pub download_url: String,
    pub duration_secs: f64,
}

#[derive(Debug, Serialize)]
pub struct ProjectFilesResponse {
    pub project_id: String,
    pub files: Vec<SegmentFileDto>,
}
