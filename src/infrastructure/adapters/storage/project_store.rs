//! File Project Store - 文件系统项目存储实现
//!
//! 实现 ProjectStorePort trait。项目即目录：根目录下以项目 ID 命名的
//! 子目录就是项目的全部状态，目录存在项目即存在，没有元数据文件。
//!
//! 并发模型：`save_next_segment` 对每个项目 ID 持有一把写锁，
//! 「扫描分配序号 + 写入文件」在锁内作为一个临界区完成——这是
//! 项目内序号唯一性在并发写入下成立的唯一保证。读路径（列表、
//! 播放列表生成）不加锁，容忍撕裂视图。

use async_trait::async_trait;
use dashmap::DashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

use crate::application::ports::{ProjectStoreError, ProjectStorePort, StoredSegment};
use crate::domain::project::{segment_filename, AudioFormat, AudioSegment, ProjectId};

use super::{catalog, sequence};

/// 文件系统项目存储
pub struct FileProjectStore {
    /// 存储根目录
    base_dir: PathBuf,
    /// 项目级写锁表
    write_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl FileProjectStore {
    /// 创建新的文件存储
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, ProjectStoreError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| ProjectStoreError::Io(e.to_string()))?;

        Ok(Self {
            base_dir,
            write_locks: DashMap::new(),
        })
    }

    /// 获取存储根目录
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// 取出（或创建）项目写锁
    ///
    /// 先 clone Arc 再返回，不跨 await 持有 DashMap 引用
    fn write_lock(&self, project_id: &ProjectId) -> Arc<Mutex<()>> {
        self.write_locks
            .entry(project_id.as_str().to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// 校验分段文件名：拒绝路径穿越
    fn validate_filename(filename: &str) -> Result<(), ProjectStoreError> {
        if filename.is_empty()
            || filename.contains('\0')
            || filename.contains("..")
            || filename.contains('/')
            || filename.contains('\\')
        {
            return Err(ProjectStoreError::InvalidFilename(filename.to_string()));
        }

        // 仅允许单层普通文件名
        let path = Path::new(filename);
        let mut components = path.components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) if !path.is_absolute() => Ok(()),
            _ => Err(ProjectStoreError::InvalidFilename(filename.to_string())),
        }
    }
}

#[async_trait]
impl ProjectStorePort for FileProjectStore {
    fn project_dir(&self, project_id: &ProjectId) -> PathBuf {
        self.base_dir.join(project_id.as_str())
    }

    async fn ensure_project_dir(
        &self,
        project_id: &ProjectId,
    ) -> Result<PathBuf, ProjectStoreError> {
        let dir = self.project_dir(project_id);

        // create_dir_all 对已存在的目录是 no-op，并发创建不报错
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| ProjectStoreError::Io(e.to_string()))?;

        Ok(dir)
    }

    async fn save_segment(
        &self,
        project_id: &ProjectId,
        order: u32,
        data: &[u8],
        format: AudioFormat,
    ) -> Result<PathBuf, ProjectStoreError> {
        let dir = self.ensure_project_dir(project_id).await?;
        let filename = segment_filename(order, project_id, format);
        let path = dir.join(&filename);

        // 目标已存在说明序号分配出了问题，拒绝写入而不是覆盖
        if fs::try_exists(&path)
            .await
            .map_err(|e| ProjectStoreError::Io(e.to_string()))?
        {
            return Err(ProjectStoreError::OrderCollision {
                project_id: project_id.to_string(),
                order,
            });
        }

        // 先写临时文件再改名，目录扫描不会看到半写状态
        let tmp_path = dir.join(format!(".{}.tmp", filename));
        if let Err(e) = fs::write(&tmp_path, data).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(ProjectStoreError::Io(e.to_string()));
        }
        if let Err(e) = fs::rename(&tmp_path, &path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(ProjectStoreError::Io(e.to_string()));
        }

        tracing::debug!(
            project_id = %project_id,
            order,
            size = data.len(),
            "Saved segment"
        );

        Ok(path)
    }

    async fn save_next_segment(
        &self,
        project_id: &ProjectId,
        data: &[u8],
        format: AudioFormat,
    ) -> Result<StoredSegment, ProjectStoreError> {
        let lock = self.write_lock(project_id);
        let _guard = lock.lock().await;

        let dir = self.ensure_project_dir(project_id).await?;
        let order = sequence::next_order_in_dir(&dir).await?;
        let path = self.save_segment(project_id, order, data, format).await?;

        Ok(StoredSegment {
            order,
            filename: segment_filename(order, project_id, format),
            path,
        })
    }

    async fn next_order(&self, project_id: &ProjectId) -> Result<u32, ProjectStoreError> {
        sequence::next_order_in_dir(&self.project_dir(project_id)).await
    }

    async fn list_segments(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<AudioSegment>, ProjectStoreError> {
        catalog::scan_segments(&self.project_dir(project_id)).await
    }

    async fn audio_path(
        &self,
        project_id: &ProjectId,
        filename: &str,
    ) -> Result<PathBuf, ProjectStoreError> {
        Self::validate_filename(filename)?;

        let path = self.project_dir(project_id).join(filename);
        if !fs::try_exists(&path)
            .await
            .map_err(|e| ProjectStoreError::Io(e.to_string()))?
        {
            return Err(ProjectStoreError::FileNotFound(filename.to_string()));
        }

        Ok(path)
    }

    async fn project_exists(&self, project_id: &ProjectId) -> bool {
        match fs::metadata(self.project_dir(project_id)).await {
            Ok(metadata) => metadata.is_dir(),
            Err(_) => false,
        }
    }
}
