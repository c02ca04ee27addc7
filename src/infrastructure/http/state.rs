//! Application State
//!
//! 包含所有端口与 Command/Query Handlers 的应用状态。
//! 配置以显式值注入，不依赖全局状态。

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::{
    // Command handlers
    SynthesizeHandler,
    // Query handlers
    GetAudioFileHandler, GetPlaylistHandler, ListProjectFilesHandler,
    // Ports
    AudioTranscoderPort, ProjectStorePort, TtsEnginePort,
};
use crate::domain::project::AudioFormat;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub project_store: Arc<dyn ProjectStorePort>,
    pub tts_engine: Arc<dyn TtsEnginePort>,
    pub transcoder: Arc<dyn AudioTranscoderPort>,

    // ========== Command Handlers ==========
    pub synthesize_handler: SynthesizeHandler,

    // ========== Query Handlers ==========
    pub list_project_files_handler: ListProjectFilesHandler,
    pub get_playlist_handler: GetPlaylistHandler,
    pub get_audio_file_handler: GetAudioFileHandler,

    // ========== 边界配置 ==========
    /// 播放列表里分段 URL 的前缀
    pub audio_base_url: String,
    /// 请求未指定时的输出格式
    pub default_output_format: AudioFormat,
    /// 提示音频上传大小上限（字节）
    pub max_prompt_size: u64,
    /// 提示音频/转码中间文件的暂存目录
    pub temp_dir: PathBuf,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        project_store: Arc<dyn ProjectStorePort>,
        tts_engine: Arc<dyn TtsEnginePort>,
        transcoder: Arc<dyn AudioTranscoderPort>,
        audio_base_url: String,
        default_output_format: AudioFormat,
        max_prompt_size: u64,
        temp_dir: PathBuf,
    ) -> Self {
        Self {
            // Command handlers
            synthesize_handler: SynthesizeHandler::new(
                project_store.clone(),
                tts_engine.clone(),
                transcoder.clone(),
                temp_dir.clone(),
            ),

            // Query handlers
            list_project_files_handler: ListProjectFilesHandler::new(project_store.clone()),
            get_playlist_handler: GetPlaylistHandler::new(project_store.clone()),
            get_audio_file_handler: GetAudioFileHandler::new(project_store.clone()),

            // Ports
            project_store,
            tts_engine,
            transcoder,

            audio_base_url,
            default_output_format,
            max_prompt_size,
            temp_dir,
        }
    }
}
