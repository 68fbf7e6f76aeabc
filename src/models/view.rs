use serde::{Deserialize, Serialize};

use super::filter::MovieFilter;
use super::movie::{Movie, MovieType};
use super::pagination::{PageControl, Pagination};
use super::validation::{StringValidator, ValidationError, Validator};

const MAX_SEARCH_CHARS: usize = 200;
const MAX_YEAR_CHARS: usize = 16;

pub const NO_RESULTS_MESSAGE: &str = "No movies found.";

/// 主页面的请求参数（查询字符串）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrowseParams {
    pub search: Option<String>,
    pub year: Option<String>,
    #[serde(rename = "type")]
    pub movie_type: Option<String>,
    pub page: Option<String>,
}

impl BrowseParams {
    /// 去掉首尾空白后的搜索词，空串视为未搜索
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// 请求的页码，未提供时为第 1 页
    pub fn requested_page(&self) -> Result<usize, ValidationError> {
        match self.page.as_deref().map(str::trim) {
            None | Some("") => Ok(1),
            Some(raw) => raw
                .parse()
                .map_err(|_| ValidationError::InvalidPage(raw.to_string())),
        }
    }

    /// 解析筛选条件，类型必须是下拉框中的某一项
    pub fn filter(&self) -> Result<MovieFilter, ValidationError> {
        self.validate()?;

        let movie_type = match self.movie_type.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(
                MovieType::from_str(raw)
                    .ok_or_else(|| ValidationError::UnknownMovieType(raw.to_string()))?,
            ),
        };

        Ok(MovieFilter::new(self.year.clone(), movie_type))
    }
}

impl Validator for BrowseParams {
    type Error = ValidationError;

    fn validate(&self) -> Result<(), Self::Error> {
        if let Some(ref search) = self.search {
            if !StringValidator::max_chars(search, MAX_SEARCH_CHARS) {
                return Err(ValidationError::SearchTermTooLong { max: MAX_SEARCH_CHARS });
            }
        }
        if let Some(ref year) = self.year {
            if !StringValidator::max_chars(year, MAX_YEAR_CHARS) {
                return Err(ValidationError::YearFilterTooLong { max: MAX_YEAR_CHARS });
            }
        }
        self.requested_page()?;
        Ok(())
    }
}

/// 主页面渲染所需的全部数据
///
/// HTML 页面与 `/api/movies` 共用这一结构。
#[derive(Debug, Clone, Serialize)]
pub struct MainPageView {
    pub search_term: Option<String>,
    pub filter: MovieFilter,
    pub total_stored: usize,
    pub total_filtered: usize,
    pub pagination: Pagination,
    pub controls: Vec<PageControl>,
    pub movies: Vec<Movie>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// 展示的结果与请求的搜索词不一致时的提示
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MainPageView {
    /// 先筛选，再分页
    pub fn build(
        stored: &[Movie],
        filter: MovieFilter,
        requested_page: usize,
        page_size: usize,
    ) -> Self {
        let filtered = filter.apply(stored);
        let pagination = Pagination::new(filtered.len(), page_size, requested_page);

        let (controls, movies, message) = if filtered.is_empty() {
            (Vec::new(), Vec::new(), Some(NO_RESULTS_MESSAGE.to_string()))
        } else {
            let controls = if pagination.has_controls() {
                pagination.controls()
            } else {
                Vec::new()
            };
            (controls, pagination.window(&filtered).to_vec(), None)
        };

        Self {
            search_term: None,
            filter,
            total_stored: stored.len(),
            total_filtered: filtered.len(),
            pagination,
            controls,
            movies,
            message,
            notice: None,
            error: None,
        }
    }

    /// 以存储中数据实际对应的搜索词标注页面
    ///
    /// 并发请求下存储可能已被更新的运行覆盖，此时附加提示说明
    /// 当前展示的是哪个搜索词的结果。
    pub fn with_search_terms(mut self, requested: Option<&str>, stored: Option<String>) -> Self {
        if requested != stored.as_deref() {
            self.notice = Some(match stored.as_deref() {
                Some(term) => format!("Showing results for \"{term}\""),
                None => "Showing results for the default searches".to_string(),
            });
        }
        self.search_term = stored;
        self
    }

    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.total_filtered == 0
    }
}
