//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（ProjectStore、TtsEngine、AudioTranscoder）
//! - commands: 命令及处理器（合成写路径）
//! - queries: 查询及处理器（目录、播放列表、分段下载）
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{SynthesizeHandler, SynthesizeResult},
    SynthesizeCommand,
};

pub use queries::{
    handlers::{
        AudioFileInfo, GetAudioFileHandler, GetPlaylistHandler, ListProjectFilesHandler,
        SegmentFileInfo,
    },
    GetAudioFile, GetPlaylist, ListProjectFiles,
};

pub use error::ApplicationError;

pub use ports::{
    AudioTranscoderPort, ProjectStoreError, ProjectStorePort, StoredSegment, SynthesisRequest,
    SynthesisResponse, TranscodeError, TtsEnginePort, TtsError,
};
