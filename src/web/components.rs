// 主页面的 HTML 组件

use crate::models::{Movie, MovieFilter, MovieType, PageControl};

/// HTML 转义，可用于元素内容和带引号的属性
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 生成保留当前搜索词和筛选条件的 `/?...` 链接
pub fn page_href(search: Option<&str>, filter: &MovieFilter, page: usize) -> String {
    let mut params = Vec::new();
    if let Some(search) = search {
        params.push(format!("search={}", urlencoding::encode(search)));
    }
    if let Some(ref year) = filter.year {
        params.push(format!("year={}", urlencoding::encode(year)));
    }
    if let Some(movie_type) = filter.movie_type {
        params.push(format!("type={}", movie_type.as_str()));
    }
    params.push(format!("page={page}"));

    format!("/?{}", params.join("&"))
}

/// 电影卡片
pub fn movie_card(movie: &Movie) -> String {
    let title = escape_html(&movie.title);
    let poster_html = movie
        .poster_url()
        .map(|url| {
            format!(
                r#"<img class="moviecard__poster" src="{}" alt="{title}" loading="lazy">"#,
                escape_html(url)
            )
        })
        .unwrap_or_else(|| r#"<div class="moviecard__poster moviecard__poster--empty"></div>"#.to_string());

    format!(
        r#"<div class="moviecard" data-imdb-id="{id}">
            {poster_html}
            <div class="moviecard__title">{title}</div>
            <div class="moviecard__meta">{year} · {kind}</div>
        </div>"#,
        id = escape_html(&movie.imdb_id),
        year = escape_html(&movie.year),
        kind = escape_html(&movie.movie_type),
    )
}

/// 搜索框与年份、类型筛选
///
/// 提交表单后总是回到第 1 页。
pub fn filters_form(search: Option<&str>, filter: &MovieFilter) -> String {
    let search_value = escape_html(search.unwrap_or_default());
    let year_value = escape_html(filter.year.as_deref().unwrap_or_default());

    let mut options = vec![option_html("", "All", filter.movie_type.is_none())];
    options.extend(
        MovieType::ALL
            .iter()
            .map(|t| option_html(t.as_str(), t.label(), filter.movie_type == Some(*t))),
    );
    let options_html = options.join("");

    format!(
        r#"<form class="filters" method="get" action="/">
            <input type="text" name="search" placeholder="Search movies" value="{search_value}">
            <input type="text" name="year" placeholder="Filter by year" value="{year_value}">
            <select name="type">{options_html}</select>
            <button type="submit">Apply</button>
        </form>"#
    )
}

fn option_html(value: &str, label: &str, selected: bool) -> String {
    let selected = if selected { " selected" } else { "" };
    format!(r#"<option value="{value}"{selected}>{label}</option>"#)
}

/// 分页栏，没有控件时返回空串
pub fn pagination(controls: &[PageControl], search: Option<&str>, filter: &MovieFilter) -> String {
    if controls.is_empty() {
        return String::new();
    }

    let items: String = controls
        .iter()
        .map(|control| match control {
            PageControl::Page { number, active } => {
                let class = if *active {
                    "pagination__button active"
                } else {
                    "pagination__button"
                };
                format!(
                    r#"<a class="{class}" href="{}">{number}</a>"#,
                    escape_html(&page_href(search, filter, *number))
                )
            }
            PageControl::Ellipsis => "<span>...</span>".to_string(),
        })
        .collect();

    format!(r#"<div class="pagination">{items}</div>"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<Tom & "Jerry's">"#),
            "&lt;Tom &amp; &quot;Jerry&#39;s&quot;&gt;"
        );
    }

    #[test]
    fn test_page_href_keeps_filters() {
        let filter = MovieFilter::new(Some("2020".to_string()), Some(MovieType::Series));
        assert_eq!(
            page_href(Some("star wars"), &filter, 3),
            "/?search=star%20wars&year=2020&type=series&page=3"
        );
        assert_eq!(page_href(None, &MovieFilter::default(), 1), "/?page=1");
    }

    #[test]
    fn test_movie_card_escapes_title() {
        let movie = Movie::new("tt1", "<script>", "2001", "movie");
        let html = movie_card(&movie);
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("moviecard__poster--empty"));
    }

    #[test]
    fn test_filters_form_selects_type() {
        let filter = MovieFilter::new(None, Some(MovieType::Game));
        let html = filters_form(None, &filter);
        assert!(html.contains(r#"<option value="game" selected>Game</option>"#));
        assert!(html.contains(r#"<option value="">All</option>"#));
    }

    #[test]
    fn test_pagination_renders_ellipsis() {
        let controls = vec![
            PageControl::Page { number: 1, active: false },
            PageControl::Ellipsis,
            PageControl::Page { number: 3, active: true },
        ];
        let html = pagination(&controls, None, &MovieFilter::default());
        assert!(html.contains("<span>...</span>"));
        assert!(html.contains(r#"class="pagination__button active""#));
        assert!(pagination(&[], None, &MovieFilter::default()).is_empty());
    }
}
