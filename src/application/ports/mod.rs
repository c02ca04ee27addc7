//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_transcoder;
mod project_store;
mod tts_engine;

pub use audio_transcoder::{AudioTranscoderPort, TranscodeError};
pub use project_store::{ProjectStoreError, ProjectStorePort, StoredSegment};
pub use tts_engine::{SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError};
