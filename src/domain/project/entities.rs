//! Project Context - Entities

use std::path::PathBuf;

use super::value_objects::AudioFormat;

/// 音频分段
///
/// 一个项目目录下的一个音频文件。分段在创建后不再修改，只允许追加新分段。
/// 所有字段在目录扫描时从磁盘状态重建，没有持久化索引。
#[derive(Debug, Clone)]
pub struct AudioSegment {
    /// 播放顺序（项目内唯一）；文件名无序号前缀时回退为 0
    pub order: u32,
    /// 文件名（不含目录）
    pub filename: String,
    /// 磁盘上的完整路径
    pub path: PathBuf,
    /// 容器格式
    pub format: AudioFormat,
    /// 文件大小（字节）
    pub size_bytes: u64,
    /// 估算时长（秒）- 按未压缩单声道 44.1kHz 16bit 从文件大小折算，仅供参考
    pub duration_secs: f64,
}
