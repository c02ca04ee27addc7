//! Stanza - TTS 项目分段流式播放系统
//!
//! 架构设计: Hexagonal Architecture + CQRS
//!
//! 领域层 (domain/):
//! - Project Context: 项目与音频分段（顺序、命名、格式）
//! - playlist: M3U8 播放列表渲染（纯函数）
//! - text_splitter: 合成前的文本分句
//!
//! 应用层 (application/):
//! - Ports: 端口定义（ProjectStore, TtsEngine, AudioTranscoder）
//! - Commands: 合成写路径（分配序号 + 落盘）
//! - Queries: 目录、播放列表、分段下载
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + 播放器端点
//! - Adapters: 文件系统存储、TTS Client、转码占位

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
