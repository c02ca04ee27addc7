//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{ProjectStoreError, TranscodeError, TtsError};
use crate::domain::project::ProjectError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 写入竞争（序号碰撞等），调用方可重试一次
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<ProjectStoreError> for ApplicationError {
    fn from(err: ProjectStoreError) -> Self {
        match err {
            ProjectStoreError::ProjectNotFound(id) => Self::not_found("Project", id),
            ProjectStoreError::FileNotFound(name) => Self::not_found("Audio file", name),
            e @ ProjectStoreError::OrderCollision { .. } => Self::Conflict(e.to_string()),
            e @ ProjectStoreError::InvalidFilename(_) => Self::ValidationError(e.to_string()),
            ProjectStoreError::Io(msg) => Self::StorageError(msg),
        }
    }
}

impl From<ProjectError> for ApplicationError {
    fn from(err: ProjectError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<TtsError> for ApplicationError {
    fn from(err: TtsError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}

impl From<TranscodeError> for ApplicationError {
    fn from(err: TranscodeError) -> Self {
        match err {
            TranscodeError::UnsupportedFormat(fmt) => {
                Self::ValidationError(format!("Unsupported output format: {}", fmt))
            }
            _ => Self::InternalError(err.to_string()),
        }
    }
}
