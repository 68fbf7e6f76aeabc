// 主页面
//
// 服务端渲染的电影浏览页：搜索框、筛选表单、卡片网格与分页栏。

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};

use super::components::{escape_html, filters_form, movie_card, pagination};
use super::layout;
use crate::api::AppState;
use crate::models::{BrowseParams, MainPageView, MovieFilter};

/// 渲染电影浏览页
///
/// 搜索词与存储中的不一致时先抓取，然后对存储的列表筛选、分页。
/// 抓取失败时仍渲染已有的电影，并显示错误提示。
pub async fn main_page(
    Query(params): Query<BrowseParams>,
    State(state): State<AppState>,
) -> (StatusCode, Html<String>) {
    let (filter, mut status, mut error) = match params.filter() {
        Ok(filter) => (filter, StatusCode::OK, None),
        Err(e) => (MovieFilter::default(), StatusCode::BAD_REQUEST, Some(e.to_string())),
    };

    let search_term = params.search_term().map(str::to_string);
    if let Err(e) = state.orchestrator.ensure_loaded(search_term.as_deref()).await {
        tracing::warn!("Rendering stored movies after failed fetch: {}", e);
        if status == StatusCode::OK {
            status = StatusCode::BAD_GATEWAY;
        }
        error.get_or_insert_with(|| format!("Could not load movies: {e}"));
    }

    // 非法页码已经在 filter() 中报告过
    let page = params.requested_page().unwrap_or(1);

    let snapshot = state.store.snapshot();
    let view = MainPageView::build(&snapshot.movies, filter, page, state.config.page_size)
        .with_search_terms(search_term.as_deref(), snapshot.search_term)
        .with_error(error);

    (status, Html(render_main_page(&view)))
}

pub fn render_main_page(view: &MainPageView) -> String {
    let search = view.search_term.as_deref();

    let error_html = view
        .error
        .as_deref()
        .map(|e| format!(r#"<div class="error" role="alert">{}</div>"#, escape_html(e)))
        .unwrap_or_default();

    let notice_html = view
        .notice
        .as_deref()
        .map(|n| format!(r#"<div class="notice" role="status">{}</div>"#, escape_html(n)))
        .unwrap_or_default();

    let content = match view.message.as_deref() {
        Some(message) => format!("<p>{}</p>", escape_html(message)),
        None => {
            let cards: String = view.movies.iter().map(movie_card).collect();
            format!(
                r#"<div class="cardcontainer">{cards}</div>{}"#,
                pagination(&view.controls, search, &view.filter)
            )
        }
    };

    let body = format!(
        r#"{error_html}{notice_html}
        {}
        {content}"#,
        filters_form(search, &view.filter)
    );

    layout::page("Movies", &body)
}
