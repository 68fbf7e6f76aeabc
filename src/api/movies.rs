use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use super::AppState;
use super::error::ApiResult;
use super::response::{success, ApiResponse};
use crate::models::{BrowseParams, MainPageView};

#[derive(Debug, Deserialize)]
pub struct RefreshParams {
    pub search: Option<String>,
}

/// 获取当前页面数据（JSON）
///
/// 与 `/` 页面使用同一套筛选与分页逻辑。抓取失败时返回
/// 存储中已有的数据，并在 `error` 字段中说明原因。
pub async fn get_movies(
    Query(params): Query<BrowseParams>,
    State(state): State<AppState>,
) -> ApiResult<impl IntoResponse> {
    let filter = params.filter()?;
    let page = params.requested_page()?;
    let search_term = params.search_term().map(str::to_string);

    let fetch_error = match state.orchestrator.ensure_loaded(search_term.as_deref()).await {
        Ok(_) => None,
        Err(e) => {
            tracing::warn!("Serving stored movies after failed fetch: {}", e);
            Some(e.to_string())
        }
    };

    let snapshot = state.store.snapshot();
    let view = MainPageView::build(&snapshot.movies, filter, page, state.config.page_size)
        .with_search_terms(search_term.as_deref(), snapshot.search_term)
        .with_error(fetch_error.clone());

    Ok(match fetch_error {
        Some(error) => ApiResponse::success_with_message(view, error),
        None => success(view),
    })
}

/// 强制重新抓取
pub async fn refresh_movies(
    Query(params): Query<RefreshParams>,
    State(state): State<AppState>,
) -> ApiResult<impl IntoResponse> {
    let outcome = state.orchestrator.refresh(params.search.as_deref()).await?;
    Ok(success(outcome))
}
