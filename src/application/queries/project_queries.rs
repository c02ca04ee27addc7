//! Project Queries

/// 列出项目全部分段文件
#[derive(Debug, Clone)]
pub struct ListProjectFiles {
    pub project_id: String,
}

/// 生成项目播放列表
#[derive(Debug, Clone)]
pub struct GetPlaylist {
    pub project_id: String,
    /// 分段 URL 前缀，如 `/audio` 或 `https://host/audio`
    pub base_url: String,
}

/// 获取单个分段文件
#[derive(Debug, Clone)]
pub struct GetAudioFile {
    pub project_id: String,
    pub filename: String,
}
