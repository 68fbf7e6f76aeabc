use std::net::SocketAddr;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use movie_browser_backend::{
    api,
    config::AppConfig,
    external::{CacheCleanupTask, ExternalApiClient, OmdbClient, SearchCache},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();

    // Initialize external API client
    let omdb = OmdbClient::new(
        config.omdb_api_key.clone(),
        &config.omdb_base_url,
        config.http_timeout,
    )?;
    if !omdb.is_configured() {
        tracing::warn!("OMDB_API_KEY is not set, movie searches will fail");
    }
    let external_client = ExternalApiClient::new(omdb, SearchCache::new(config.search_cache_ttl));

    // Start cache cleanup task
    if external_client.cache.is_enabled() {
        let cache_cleanup_task = CacheCleanupTask::new(
            external_client.cache.clone(),
            Duration::from_secs(5 * 60), // 每5分钟清理一次
        );
        tokio::spawn(cache_cleanup_task.start());
        tracing::info!("📊 Cache cleanup task started (interval: 5 minutes)");
    }

    let addr: SocketAddr = config.bind_address().parse()?;
    let state = api::AppState::new(config, external_client);

    // 启动时加载默认查询，失败只记录日志，页面请求时会重试。
    // 与早到的页面请求共用同一次运行
    let orchestrator = state.orchestrator.clone();
    tokio::spawn(async move {
        if let Err(e) = orchestrator.ensure_loaded(None).await {
            tracing::error!("Initial movie load failed: {}", e);
        }
    });

    let app = api::router(state);

    tracing::info!("🚀 Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
