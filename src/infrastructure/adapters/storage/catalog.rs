//! 分段目录扫描
//!
//! 每次调用从磁盘状态重建项目的分段列表，不维护缓存。
//! 读路径最大限度宽容：单个文件的异常（命名不规范、扫描中途被删、
//! 尚未写完）只影响该文件，绝不让整个列表失败。

use std::path::Path;
use tokio::fs;

use crate::application::ports::ProjectStoreError;
use crate::domain::project::{parse_order, AudioFormat, AudioSegment};

/// 时长估算换算率：未压缩单声道 44.1kHz 16bit ≈ 88,200 字节/秒
///
/// 估算值仅用于播放列表的 EXTINF 提示，不要求精确
const PCM_BYTES_PER_SECOND: f64 = 88_200.0;

/// 扫描项目目录，返回按 (order, filename) 升序排列的分段列表
///
/// - 目录不存在返回空列表（「从未创建」与「空项目」的区分留给边界层）
/// - 仅收录可识别的音频扩展名，其余文件跳过
/// - 序号解析失败回退为 0 并记录 WARN
/// - 零字节或元数据读取失败的文件视为「尚未写完」跳过
pub async fn scan_segments(dir: &Path) -> Result<Vec<AudioSegment>, ProjectStoreError> {
    let mut segments: Vec<AudioSegment> = Vec::new();

    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(segments),
        Err(e) => return Err(ProjectStoreError::Io(e.to_string())),
    };

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ProjectStoreError::Io(e.to_string()))?
    {
        let path = entry.path();

        let format = match path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(AudioFormat::from_extension)
        {
            Some(format) => format,
            None => {
                tracing::debug!(path = %path.display(), "Skipping non-audio file");
                continue;
            }
        };

        let filename = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(_) => {
                tracing::warn!(path = %path.display(), "Skipping non-UTF8 filename");
                continue;
            }
        };

        // 扫描与删除的竞态：文件消失时跳过而不是失败
        let metadata = match entry.metadata().await {
            Ok(metadata) if metadata.is_file() => metadata,
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!(
                    path = %path.display(),
                    error = %e,
                    "Skipping unreadable segment file"
                );
                continue;
            }
        };

        let size_bytes = metadata.len();
        if size_bytes == 0 {
            // 写入方尚未完成，下次扫描再收录
            tracing::debug!(path = %path.display(), "Skipping zero-byte segment file");
            continue;
        }

        let order = match parse_order(&filename) {
            Some(order) => order,
            None => {
                tracing::warn!(
                    filename = %filename,
                    "Segment filename has no order prefix, defaulting to 0"
                );
                0
            }
        };

        segments.push(AudioSegment {
            order,
            duration_secs: size_bytes as f64 / PCM_BYTES_PER_SECOND,
            filename,
            path,
            format,
            size_bytes,
        });
    }

    segments.sort_by(|a, b| {
        a.order
            .cmp(&b.order)
            .then_with(|| a.filename.cmp(&b.filename))
    });

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_dir_returns_empty() {
        let temp_dir = tempdir().unwrap();
        let segments = scan_segments(&temp_dir.path().join("nope")).await.unwrap();
        assert!(segments.is_empty());
    }

    #[tokio::test]
    async fn test_non_audio_files_excluded() {
        let temp_dir = tempdir().unwrap();
        std::fs::write(temp_dir.path().join("001_p1.wav"), vec![0u8; 100]).unwrap();
        std::fs::write(temp_dir.path().join("notes.txt"), b"hello").unwrap();

        let segments = scan_segments(temp_dir.path()).await.unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].filename, "001_p1.wav");
    }

    #[tokio::test]
    async fn test_segments_sorted_by_order() {
        let temp_dir = tempdir().unwrap();
        std::fs::write(temp_dir.path().join("010_p1.wav"), vec![0u8; 10]).unwrap();
        std::fs::write(temp_dir.path().join("002_p1.wav"), vec![0u8; 10]).unwrap();

        let segments = scan_segments(temp_dir.path()).await.unwrap();
        let orders: Vec<u32> = segments.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![2, 10]);
    }

    #[tokio::test]
    async fn test_unparseable_order_defaults_to_zero() {
        let temp_dir = tempdir().unwrap();
        std::fs::write(temp_dir.path().join("intro.wav"), vec![0u8; 10]).unwrap();
        std::fs::write(temp_dir.path().join("001_p1.wav"), vec![0u8; 10]).unwrap();

        let segments = scan_segments(temp_dir.path()).await.unwrap();
        assert_eq!(segments.len(), 2);
        // order=0 排在最前
        assert_eq!(segments[0].filename, "intro.wav");
        assert_eq!(segments[0].order, 0);
    }

    #[tokio::test]
    async fn test_zero_byte_file_skipped() {
        let temp_dir = tempdir().unwrap();
        std::fs::write(temp_dir.path().join("001_p1.wav"), vec![0u8; 10]).unwrap();
        std::fs::write(temp_dir.path().join("002_p1.wav"), b"").unwrap();

        let segments = scan_segments(temp_dir.path()).await.unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].order, 1);
    }

    #[tokio::test]
    async fn test_duration_estimated_from_size() {
        let temp_dir = tempdir().unwrap();
        // 88,200 字节 ≈ 1 秒
        std::fs::write(temp_dir.path().join("001_p1.wav"), vec![0u8; 88_200]).unwrap();

        let segments = scan_segments(temp_dir.path()).await.unwrap();
        assert!((segments[0].duration_secs - 1.0).abs() < 1e-9);
        assert_eq!(segments[0].size_bytes, 88_200);
    }
}
