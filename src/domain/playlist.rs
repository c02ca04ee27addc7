//! M3U8 播放列表生成
//!
//! 将有序分段目录渲染为标准 HLS (VOD) 播放列表文本。
//! 渲染是 `(segments, base_url)` 的纯函数：相同输入永远产生
//! 字节级一致的输出，播放列表本身从不落盘。

use crate::domain::project::{AudioSegment, ProjectId};

/// 播放列表 MIME 类型 (Apple HLS)
pub const PLAYLIST_CONTENT_TYPE: &str = "application/vnd.apple.mpegurl";

/// TARGETDURATION 下限（秒）
///
/// 实际值取所有分段估算时长的最大值向上取整，但不低于该下限，
/// 保证 TARGETDURATION 始终覆盖每条 EXTINF
const MIN_TARGET_DURATION: u64 = 10;

/// EXTINF 最小值（秒）- 合规播放器拒绝 0 时长分段
const MIN_SEGMENT_DURATION: f64 = 1.0;

/// 渲染项目播放列表
///
/// - 按 (order, filename) 升序排列；当所有 order 都是 0（文件名无序号前缀）
///   时退化为按文件名字典序，输出仍然确定
/// - 每个分段输出 `#EXTINF:<时长>,` 与解析后的 URL 两行，
///   URL 为 `{base_url}/{project_id}/{文件名 URL 转义}`
/// - 时长提示为估算值，钳制到不小于 1 秒
pub fn render_playlist(project_id: &ProjectId, segments: &[AudioSegment], base_url: &str) -> String {
    let mut ordered: Vec<&AudioSegment> = segments.iter().collect();
    ordered.sort_by(|a, b| {
        a.order
            .cmp(&b.order)
            .then_with(|| a.filename.cmp(&b.filename))
    });

    let base = base_url.trim_end_matches('/');

    let mut playlist = String::new();
    playlist.push_str("#EXTM3U\n");
    playlist.push_str("#EXT-X-VERSION:3\n");
    playlist.push_str("#EXT-X-MEDIA-SEQUENCE:0\n");
    playlist.push_str("#EXT-X-ALLOW-CACHE:YES\n");
    playlist.push_str(&format!(
        "#EXT-X-TARGETDURATION:{}\n",
        target_duration(&ordered)
    ));
    playlist.push_str("#EXT-X-PLAYLIST-TYPE:VOD\n\n");

    for segment in &ordered {
        playlist.push_str(&format!(
            "#EXTINF:{:.1},\n",
            clamp_duration(segment.duration_secs)
        ));
        playlist.push_str(&format!(
            "{}/{}/{}\n",
            base,
            project_id,
            urlencoding::encode(&segment.filename)
        ));
    }

    playlist.push_str("#EXT-X-ENDLIST\n");
    playlist
}

fn clamp_duration(estimate: f64) -> f64 {
    if estimate.is_finite() && estimate >= MIN_SEGMENT_DURATION {
        estimate
    } else {
        MIN_SEGMENT_DURATION
    }
}

fn target_duration(segments: &[&AudioSegment]) -> u64 {
    segments
        .iter()
        .map(|s| clamp_duration(s.duration_secs).ceil() as u64)
        .max()
        .unwrap_or(0)
        .max(MIN_TARGET_DURATION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::AudioFormat;
    use std::path::PathBuf;

    fn segment(order: u32, filename: &str, duration_secs: f64) -> AudioSegment {
        AudioSegment {
            order,
            filename: filename.to_string(),
            path: PathBuf::from(filename),
            format: AudioFormat::Wav,
            size_bytes: 0,
            duration_secs,
        }
    }

    fn project() -> ProjectId {
        ProjectId::new("p1").unwrap()
    }

    #[test]
    fn test_render_is_deterministic() {
        let segments = vec![
            segment(2, "002_p1.wav", 3.5),
            segment(1, "001_p1.wav", 2.0),
        ];
        let a = render_playlist(&project(), &segments, "/audio");
        let b = render_playlist(&project(), &segments, "/audio");
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_orders_by_segment_order() {
        let segments = vec![
            segment(2, "002_p1.wav", 3.5),
            segment(1, "001_p1.wav", 2.0),
        ];
        let playlist = render_playlist(&project(), &segments, "/audio");

        let first = playlist.find("/audio/p1/001_p1.wav").unwrap();
        let second = playlist.find("/audio/p1/002_p1.wav").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_render_falls_back_to_filename_order() {
        // 无序号前缀的文件 order 都是 0，退化为文件名字典序
        let segments = vec![
            segment(0, "zeta.wav", 2.0),
            segment(0, "alpha.wav", 2.0),
            segment(0, "mid.wav", 2.0),
        ];
        let playlist = render_playlist(&project(), &segments, "/audio");

        let a = playlist.find("alpha.wav").unwrap();
        let m = playlist.find("mid.wav").unwrap();
        let z = playlist.find("zeta.wav").unwrap();
        assert!(a < m && m < z);
    }

    #[test]
    fn test_render_header_and_end_marker() {
        let playlist = render_playlist(&project(), &[segment(1, "001_p1.wav", 2.0)], "/audio");

        assert!(playlist.starts_with("#EXTM3U\n"));
        assert!(playlist.contains("#EXT-X-VERSION:3\n"));
        assert!(playlist.contains("#EXT-X-MEDIA-SEQUENCE:0\n"));
        assert!(playlist.contains("#EXT-X-PLAYLIST-TYPE:VOD\n"));
        assert!(playlist.ends_with("#EXT-X-ENDLIST\n"));
    }

    #[test]
    fn test_two_segment_end_to_end_shape() {
        let segments = vec![
            segment(1, "001_p1.wav", 2.0),
            segment(2, "002_p1.wav", 3.0),
        ];
        let playlist = render_playlist(&project(), &segments, "/audio");

        let extinf_count = playlist.matches("#EXTINF:").count();
        assert_eq!(extinf_count, 2);

        let lines: Vec<&str> = playlist.lines().collect();
        let idx = lines.iter().position(|l| l.starts_with("#EXTINF:")).unwrap();
        assert_eq!(lines[idx + 1], "/audio/p1/001_p1.wav");
        assert!(lines[idx + 2].starts_with("#EXTINF:"));
        assert_eq!(lines[idx + 3], "/audio/p1/002_p1.wav");
    }

    #[test]
    fn test_zero_duration_clamped() {
        let playlist = render_playlist(&project(), &[segment(1, "001_p1.wav", 0.0)], "/audio");
        assert!(playlist.contains("#EXTINF:1.0,\n"));
    }

    #[test]
    fn test_filename_url_escaped() {
        let playlist =
            render_playlist(&project(), &[segment(0, "my track.wav", 2.0)], "/audio");
        assert!(playlist.contains("/audio/p1/my%20track.wav"));
        assert!(!playlist.contains("/audio/p1/my track.wav"));
    }

    #[test]
    fn test_target_duration_covers_longest_segment() {
        let segments = vec![
            segment(1, "001_p1.wav", 42.3),
            segment(2, "002_p1.wav", 7.0),
        ];
        let playlist = render_playlist(&project(), &segments, "/audio");
        assert!(playlist.contains("#EXT-X-TARGETDURATION:43\n"));
    }

    #[test]
    fn test_target_duration_floor_for_short_segments() {
        let playlist = render_playlist(&project(), &[segment(1, "001_p1.wav", 2.0)], "/audio");
        assert!(playlist.contains("#EXT-X-TARGETDURATION:10\n"));
    }

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let playlist = render_playlist(&project(), &[segment(1, "001_p1.wav", 2.0)], "/audio/");
        assert!(playlist.contains("/audio/p1/001_p1.wav"));
        assert!(!playlist.contains("//p1/"));
    }
}
