//! Project Store Port - 出站端口
//!
//! 项目音频分段存储的抽象接口。磁盘目录是唯一事实来源：
//! 分段顺序从文件名重建，没有持久化索引或内存计数器。

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::project::{AudioFormat, AudioSegment, ProjectId};

/// 分段存储错误
#[derive(Debug, Error)]
pub enum ProjectStoreError {
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Audio file not found: {0}")]
    FileNotFound(String),

    #[error("Segment order {order} already exists in project {project_id}")]
    OrderCollision { project_id: String, order: u32 },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// 写入完成的分段
#[derive(Debug, Clone)]
pub struct StoredSegment {
    pub order: u32,
    pub filename: String,
    pub path: PathBuf,
}

/// Project Store Port - 出站端口
///
/// 管理项目目录与其中按序命名的音频分段
#[async_trait]
pub trait ProjectStorePort: Send + Sync {
    /// 项目目录路径（纯路径计算，不触盘）
    fn project_dir(&self, project_id: &ProjectId) -> PathBuf;

    /// 解析并确保项目目录存在
    ///
    /// 幂等：目录已存在时是 no-op，并发创建同一目录不报错
    async fn ensure_project_dir(
        &self,
        project_id: &ProjectId,
    ) -> Result<PathBuf, ProjectStoreError>;

    /// 按指定序号写入分段，文件名为 `{order:03}_{project_id}.{format}`
    ///
    /// 目标路径已存在说明调用方序号分配有误，返回 `OrderCollision`，
    /// 绝不静默覆盖已有分段
    async fn save_segment(
        &self,
        project_id: &ProjectId,
        order: u32,
        data: &[u8],
        format: AudioFormat,
    ) -> Result<PathBuf, ProjectStoreError>;

    /// 在项目写锁内完成「分配下一序号 + 写入」
    ///
    /// 这是并发写入者唯一能保证序号不碰撞的入口（见 next_order 的竞态说明）
    async fn save_next_segment(
        &self,
        project_id: &ProjectId,
        data: &[u8],
        format: AudioFormat,
    ) -> Result<StoredSegment, ProjectStoreError>;

    /// 扫描现有分段文件名得出下一个空闲序号（max+1，空项目返回 1）
    ///
    /// 无状态扫描分配器：单独调用不提供互斥保证，两个并发调用者可能
    /// 拿到相同序号；需要严格顺序时使用 save_next_segment
    async fn next_order(&self, project_id: &ProjectId) -> Result<u32, ProjectStoreError>;

    /// 列出项目全部分段
    ///
    /// 每次调用重新扫描磁盘，不做缓存；目录不存在返回空列表，
    /// 「从未创建」与「存在但为空」的区分留给边界层
    async fn list_segments(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<AudioSegment>, ProjectStoreError>;

    /// 解析单个分段文件的磁盘路径
    ///
    /// 拒绝 filename 中的路径穿越（`..`、绝对路径、路径分隔符）；
    /// 文件不存在返回 `FileNotFound`
    async fn audio_path(
        &self,
        project_id: &ProjectId,
        filename: &str,
    ) -> Result<PathBuf, ProjectStoreError>;

    /// 项目目录是否存在
    async fn project_exists(&self, project_id: &ProjectId) -> bool;
}
