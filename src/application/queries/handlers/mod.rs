//! Query Handlers

mod project_handlers;

pub use project_handlers::{
    AudioFileInfo, GetAudioFileHandler, GetPlaylistHandler, ListProjectFilesHandler,
    SegmentFileInfo,
};
