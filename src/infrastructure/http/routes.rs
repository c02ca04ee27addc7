//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                        GET   健康检查
//! - /api/synthesize                  POST  合成语音（multipart，追加分段）
//! - /stream/{project_id}             GET   M3U8 播放列表
//! - /projects/{project_id}/files     GET   项目分段列表
//! - /audio/{project_id}/{filename}   GET   下载单个分段
//!
//! 播放器直接消费的端点（stream/audio）在根路径，保持 URL 简洁

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/stream/:project_id", get(handlers::stream_project))
        .route(
            "/projects/:project_id/files",
            get(handlers::get_project_files),
        )
        .route(
            "/audio/:project_id/:filename",
            get(handlers::get_audio_file),
        )
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/synthesize", post(handlers::synthesize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::path::Path;
    use tower::util::ServiceExt;

    use crate::application::ProjectStorePort;
    use crate::domain::project::{AudioFormat, ProjectId};
    use crate::infrastructure::adapters::{
        FakeTtsClient, FileProjectStore, PassthroughTranscoder,
    };

    async fn test_state(dir: &Path) -> Arc<AppState> {
        let store = Arc::new(FileProjectStore::new(dir).await.unwrap());
        Arc::new(AppState::new(
            store,
            Arc::new(FakeTtsClient::with_defaults()),
            Arc::new(PassthroughTranscoder::new()),
            "/audio".to_string(),
            AudioFormat::Wav,
            1024 * 1024,
            dir.join("temp"),
        ))
    }

    fn app(state: Arc<AppState>) -> Router {
        create_routes().with_state(state)
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_ping() {
        let temp_dir = tempfile::tempdir().unwrap();
        let app = app(test_state(temp_dir.path()).await);

        let response = app
            .oneshot(Request::builder().uri("/api/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stream_unknown_project_returns_404() {
        let temp_dir = tempfile::tempdir().unwrap();
        let app = app(test_state(temp_dir.path()).await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/stream/ghost")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_stream_returns_playlist_after_writes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let state = test_state(temp_dir.path()).await;

        let p1 = ProjectId::new("p1").unwrap();
        state
            .project_store
            .save_segment(&p1, 1, &vec![0u8; 1000], AudioFormat::Wav)
            .await
            .unwrap();
        state
            .project_store
            .save_segment(&p1, 2, &vec![0u8; 1000], AudioFormat::Wav)
            .await
            .unwrap();

        let response = app(state)
            .oneshot(
                Request::builder()
                    .uri("/stream/p1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"],
            "application/vnd.apple.mpegurl"
        );

        let playlist = body_string(response).await;
        assert_eq!(playlist.matches("#EXTINF:").count(), 2);
        assert!(playlist.contains("/audio/p1/001_p1.wav"));
        assert!(playlist.contains("/audio/p1/002_p1.wav"));
    }

    #[tokio::test]
    async fn test_audio_download() {
        let temp_dir = tempfile::tempdir().unwrap();
        let state = test_state(temp_dir.path()).await;

        let p1 = ProjectId::new("p1").unwrap();
        state
            .project_store
            .save_segment(&p1, 1, b"wav-bytes", AudioFormat::Wav)
            .await
            .unwrap();

        let response = app(state)
            .oneshot(
                Request::builder()
                    .uri("/audio/p1/001_p1.wav")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "audio/wav");
        assert_eq!(body_string(response).await, "wav-bytes");
    }

    #[tokio::test]
    async fn test_audio_download_missing_returns_404() {
        let temp_dir = tempfile::tempdir().unwrap();
        let app = app(test_state(temp_dir.path()).await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/audio/p1/999_p1.wav")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_project_files_listing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let state = test_state(temp_dir.path()).await;

        let p1 = ProjectId::new("p1").unwrap();
        state
            .project_store
            .save_segment(&p1, 1, &vec![0u8; 1000], AudioFormat::Wav)
            .await
            .unwrap();

        let response = app(state)
            .oneshot(
                Request::builder()
                    .uri("/projects/p1/files")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["project_id"], "p1");
        assert_eq!(body["data"]["files"][0]["filename"], "001_p1.wav");
        assert_eq!(
            body["data"]["files"][0]["download_url"],
            "/audio/p1/001_p1.wav"
        );
    }
}
