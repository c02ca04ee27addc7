//! 分段序号分配
//!
//! 无状态的目录扫描分配器：文件系统是唯一事实来源，没有计数器文件，
//! 进程崩溃后不存在计数器与磁盘脱节的问题。代价是每次分配 O(分段数)
//! 的目录扫描。
//!
//! 单独调用不提供并发互斥——两个同时扫描的写入者会看到相同的最大序号。
//! 互斥由 `FileProjectStore::save_next_segment` 的项目写锁提供。

use std::path::Path;
use tokio::fs;

use crate::application::ports::ProjectStoreError;
use crate::domain::project::{parse_order, AudioFormat};

/// 扫描项目目录，返回下一个空闲序号
///
/// 取所有可识别音频文件的前导序号最大值 + 1；目录为空或不存在时返回 1。
/// 不符合 `{order}_{...}` 命名的文件忽略，不视为错误。
pub async fn next_order_in_dir(dir: &Path) -> Result<u32, ProjectStoreError> {
    let mut max_order = 0u32;

    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        // 项目尚未写入过任何分段
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(1),
        Err(e) => return Err(ProjectStoreError::Io(e.to_string())),
    };

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ProjectStoreError::Io(e.to_string()))?
    {
        let path = entry.path();
        let recognized = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(AudioFormat::from_extension)
            .is_some();
        if !recognized {
            continue;
        }

        let filename = entry.file_name();
        if let Some(order) = filename.to_str().and_then(parse_order) {
            max_order = max_order.max(order);
        }
    }

    Ok(max_order + 1)
}
