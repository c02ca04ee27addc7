//! Project Context - Domain Errors

use thiserror::Error;

/// 项目领域错误
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Invalid project id: {0}")]
    InvalidProjectId(String),

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),
}
