//! Project Query Handlers
//!
//! 读路径全部从磁盘状态即时重建，无缓存、无快照隔离：
//! 返回的是生成时刻的分段集合。

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::ProjectStorePort;
use crate::application::queries::{GetAudioFile, GetPlaylist, ListProjectFiles};
use crate::domain::playlist::render_playlist;
use crate::domain::project::{AudioFormat, ProjectId};

/// 分段文件信息
#[derive(Debug, Clone)]
pub struct SegmentFileInfo {
    pub order: u32,
    pub filename: String,
    pub download_url: String,
    pub duration_secs: f64,
}

/// ListProjectFiles Handler - 项目文件列表
pub struct ListProjectFilesHandler {
    project_store: Arc<dyn ProjectStorePort>,
}

impl ListProjectFilesHandler {
    pub fn new(project_store: Arc<dyn ProjectStorePort>) -> Self {
        Self { project_store }
    }

    pub async fn handle(
        &self,
        query: ListProjectFiles,
    ) -> Result<Vec<SegmentFileInfo>, ApplicationError> {
        let project_id = ProjectId::new(query.project_id)?;
        let segments = self.project_store.list_segments(&project_id).await?;

        // 目录层是宽容的；「没有任何分段」在这一层翻译成 not found
        if segments.is_empty() {
            return Err(ApplicationError::not_found(
                "Project",
                project_id.to_string(),
            ));
        }

        Ok(segments
            .into_iter()
            .map(|s| SegmentFileInfo {
                order: s.order,
                download_url: format!("/audio/{}/{}", project_id, s.filename),
                filename: s.filename,
                duration_secs: s.duration_secs,
            })
            .collect())
    }
}

/// GetPlaylist Handler - 播放列表生成
pub struct GetPlaylistHandler {
    project_store: Arc<dyn ProjectStorePort>,
}

impl GetPlaylistHandler {
    pub fn new(project_store: Arc<dyn ProjectStorePort>) -> Self {
        Self { project_store }
    }

    pub async fn handle(&self, query: GetPlaylist) -> Result<String, ApplicationError> {
        let project_id = ProjectId::new(query.project_id)?;
        let segments = self.project_store.list_segments(&project_id).await?;

        if segments.is_empty() {
            return Err(ApplicationError::not_found(
                "Project",
                project_id.to_string(),
            ));
        }

        tracing::debug!(
            project_id = %project_id,
            segment_count = segments.len(),
            "Rendering playlist"
        );

        Ok(render_playlist(&project_id, &segments, &query.base_url))
    }
}

/// 分段文件的读取信息
#[derive(Debug, Clone)]
pub struct AudioFileInfo {
    pub path: PathBuf,
    pub content_type: &'static str,
    pub size_bytes: u64,
}

/// GetAudioFile Handler - 单个分段下载
pub struct GetAudioFileHandler {
    project_store: Arc<dyn ProjectStorePort>,
}

impl GetAudioFileHandler {
    pub fn new(project_store: Arc<dyn ProjectStorePort>) -> Self {
        Self { project_store }
    }

    pub async fn handle(&self, query: GetAudioFile) -> Result<AudioFileInfo, ApplicationError> {
        let project_id = ProjectId::new(query.project_id)?;
        let path = self
            .project_store
            .audio_path(&project_id, &query.filename)
            .await?;

        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| ApplicationError::StorageError(e.to_string()))?;

        let content_type = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(AudioFormat::from_extension)
            .map(|f| f.content_type())
            .unwrap_or("application/octet-stream");

        Ok(AudioFileInfo {
            path,
            content_type,
            size_bytes: metadata.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::FileProjectStore;
    use tempfile::tempdir;

    async fn store_with_segments(dir: &std::path::Path) -> Arc<FileProjectStore> {
        let store = Arc::new(FileProjectStore::new(dir).await.unwrap());
        let p1 = ProjectId::new("p1").unwrap();
        store
            .save_segment(&p1, 1, &vec![0u8; 88_200], AudioFormat::Wav)
            .await
            .unwrap();
        store
            .save_segment(&p1, 2, &vec![0u8; 176_400], AudioFormat::Wav)
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_list_returns_ordered_files_with_urls() {
        let temp_dir = tempdir().unwrap();
        let store = store_with_segments(temp_dir.path()).await;
        let handler = ListProjectFilesHandler::new(store);

        let files = handler
            .handle(ListProjectFiles {
                project_id: "p1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].order, 1);
        assert_eq!(files[0].download_url, "/audio/p1/001_p1.wav");
        assert_eq!(files[1].order, 2);
    }

    #[tokio::test]
    async fn test_list_unknown_project_is_not_found() {
        let temp_dir = tempdir().unwrap();
        let store = Arc::new(FileProjectStore::new(temp_dir.path()).await.unwrap());
        let handler = ListProjectFilesHandler::new(store);

        let err = handler
            .handle(ListProjectFiles {
                project_id: "ghost".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_playlist_end_to_end() {
        let temp_dir = tempdir().unwrap();
        let store = store_with_segments(temp_dir.path()).await;
        let handler = GetPlaylistHandler::new(store);

        let playlist = handler
            .handle(GetPlaylist {
                project_id: "p1".to_string(),
                base_url: "/audio".to_string(),
            })
            .await
            .unwrap();

        assert!(playlist.starts_with("#EXTM3U\n"));
        assert_eq!(playlist.matches("#EXTINF:").count(), 2);

        let first = playlist.find("/audio/p1/001_p1.wav").unwrap();
        let second = playlist.find("/audio/p1/002_p1.wav").unwrap();
        assert!(first < second);
        assert!(playlist.ends_with("#EXT-X-ENDLIST\n"));
    }

    #[tokio::test]
    async fn test_playlist_unknown_project_is_not_found() {
        let temp_dir = tempdir().unwrap();
        let store = Arc::new(FileProjectStore::new(temp_dir.path()).await.unwrap());
        let handler = GetPlaylistHandler::new(store);

        let err = handler
            .handle(GetPlaylist {
                project_id: "ghost".to_string(),
                base_url: "/audio".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_audio_file_resolves_content_type() {
        let temp_dir = tempdir().unwrap();
        let store = store_with_segments(temp_dir.path()).await;
        let handler = GetAudioFileHandler::new(store);

        let info = handler
            .handle(GetAudioFile {
                project_id: "p1".to_string(),
                filename: "001_p1.wav".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(info.content_type, "audio/wav");
        assert_eq!(info.size_bytes, 88_200);
    }

    #[tokio::test]
    async fn test_get_audio_file_rejects_traversal() {
        let temp_dir = tempdir().unwrap();
        let store = store_with_segments(temp_dir.path()).await;
        let handler = GetAudioFileHandler::new(store);

        let err = handler
            .handle(GetAudioFile {
                project_id: "p1".to_string(),
                filename: "../001_p1.wav".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }
}
