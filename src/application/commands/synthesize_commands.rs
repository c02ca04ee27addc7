//! Synthesize Commands

use std::path::PathBuf;

use crate::domain::project::AudioFormat;

/// 合成命令
///
/// 一次请求可能产生多个分段（split_sentences 为 true 时按句切分，
/// 每句一个分段）
#[derive(Debug, Clone)]
pub struct SynthesizeCommand {
    /// 要合成的文本
    pub text: String,
    /// 项目 ID；为空时生成新项目
    pub project_id: Option<String>,
    /// 声音克隆提示音频路径（已由边界层落盘的临时文件）
    pub prompt_speech_path: Option<PathBuf>,
    /// 提示音频对应文本
    pub prompt_text: Option<String>,
    /// 输出格式
    pub output_format: AudioFormat,
    /// 是否按句切分
    pub split_sentences: bool,
}
