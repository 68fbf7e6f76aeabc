use serde::{Deserialize, Serialize};

use super::movie::{Movie, MovieType};

/// 列表筛选条件
///
/// - `year`: 年份子串匹配（"20" 同时匹配 "2005" 与 "1920"）
/// - `movie_type`: 类型精确匹配
///
/// 两个条件都为空时保留全部电影。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub movie_type: Option<MovieType>,
}

impl MovieFilter {
    pub fn new(year: Option<String>, movie_type: Option<MovieType>) -> Self {
        // 空字符串等同于未设置
        let year = year.filter(|y| !y.is_empty());
        Self { year, movie_type }
    }

    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.movie_type.is_none()
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        let year_ok = match self.year.as_deref() {
            Some(year) => movie.year.contains(year),
            None => true,
        };
        let type_ok = match self.movie_type {
            Some(movie_type) => movie.movie_type == movie_type.as_str(),
            None => true,
        };
        year_ok && type_ok
    }

    /// 按顺序保留满足条件的电影
    pub fn apply(&self, movies: &[Movie]) -> Vec<Movie> {
        movies
            .iter()
            .filter(|movie| self.matches(movie))
            .cloned()
            .collect()
    }
}
