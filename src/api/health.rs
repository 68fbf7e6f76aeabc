use axum::{
    extract::State,
    http::Uri,
    response::IntoResponse,
};
use serde_json::json;

use super::AppState;
use super::error::{ApiError, ApiResult};
use super::response::success;

/// 健康检查端点
pub async fn health_check(
    State(state): State<AppState>,
) -> ApiResult<impl IntoResponse> {
    let omdb_status = if state.external_client.is_available() {
        "available"
    } else {
        "not_configured"
    };

    let snapshot = state.store.snapshot();
    let cache_stats = state.external_client.get_cache_stats();

    Ok(success(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "omdb_api": omdb_status,
        "store": {
            "loaded": state.store.is_loaded(),
            "movie_count": snapshot.movies.len(),
            "search_term": snapshot.search_term,
            "updated_at": snapshot.updated_at.map(|t| t.to_rfc3339()),
            "last_error": snapshot.last_error,
        },
        "search_cache": cache_stats,
        "page_size": state.config.page_size,
    })))
}

/// 清理缓存
pub async fn cleanup_cache(
    State(state): State<AppState>,
) -> ApiResult<impl IntoResponse> {
    state.external_client.cleanup_cache();

    Ok(success(json!({
        "message": "Cache cleanup completed",
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

/// 清空所有缓存
pub async fn clear_cache(
    State(state): State<AppState>,
) -> ApiResult<impl IntoResponse> {
    state.external_client.clear_cache();

    Ok(success(json!({
        "message": "All caches cleared",
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
