//! Stanza - TTS 项目分段流式播放系统
//!
//! - Domain: project/, playlist, text_splitter
//! - Application: commands, queries, ports
//! - Infrastructure: http, adapters (storage, tts, transcoder)

use std::sync::Arc;

use stanza::config::{load_config, print_config};
use stanza::infrastructure::adapters::{
    FileProjectStore, HttpTtsClient, HttpTtsClientConfig, PassthroughTranscoder,
};
// use stanza::infrastructure::adapters::{FakeTtsClient, FakeTtsClientConfig};
use stanza::infrastructure::http::{AppState, HttpServer, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},stanza={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Stanza - TTS 项目分段流式播放系统");
    print_config(&config);

    // 创建文件系统项目存储（根目录不存在时创建）
    let project_store = Arc::new(
        FileProjectStore::new(&config.storage.audio_dir)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to init project store: {}", e))?,
    );

    // 创建 HTTP TTS 引擎
    let tts_config = HttpTtsClientConfig {
        base_url: config.tts.url.clone(),
        timeout_secs: config.tts.timeout_secs,
        max_retries: config.tts.max_retries,
    };
    let tts_engine = Arc::new(
        HttpTtsClient::new(tts_config).map_err(|e| anyhow::anyhow!("Failed to init TTS client: {}", e))?,
    );

    // // 创建 Fake TTS 引擎（离线开发用，生成静音音频）
    // let tts_engine = Arc::new(FakeTtsClient::with_defaults());

    // 转码占位实现（仅 WAV 直通）
    let transcoder = Arc::new(PassthroughTranscoder::new());

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(
        project_store,
        tts_engine,
        transcoder,
        config.server.audio_base_url(),
        config.audio.output_format,
        config.storage.max_prompt_size,
        config.storage.temp_dir(),
    );

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
