pub mod movies;
pub mod health;
pub mod error;
pub mod response;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::config::AppConfig;
use crate::external::ExternalApiClient;
use crate::services::FetchOrchestrator;
use crate::store::MovieStore;
use crate::web;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: MovieStore,
    pub external_client: ExternalApiClient,
    pub orchestrator: FetchOrchestrator,
}

impl AppState {
    pub fn new(config: AppConfig, external_client: ExternalApiClient) -> Self {
        let store = MovieStore::new();
        let orchestrator = FetchOrchestrator::new(
            Arc::new(external_client.clone()),
            store.clone(),
            config.default_queries.clone(),
        );

        Self {
            config: Arc::new(config),
            store,
            external_client,
            orchestrator,
        }
    }
}

/// 构建全部路由
pub fn router(state: AppState) -> Router {
    Router::new()
        // Main page
        .route("/", get(web::pages::main_page))
        // Movies
        .route("/api/movies", get(movies::get_movies))
        .route("/api/movies/refresh", post(movies::refresh_movies))
        // Health and cache
        .route("/api/health", get(health::health_check))
        .route("/api/cache/cleanup", post(health::cleanup_cache))
        .route("/api/cache/clear", post(health::clear_cache))
        .fallback(health::not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
