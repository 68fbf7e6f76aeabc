use serde::{Deserialize, Serialize};

/// 电影搜索结果条目
///
/// 字段名沿用 OMDb 返回的原始名称（`imdbID`、`Year`、`Type` 等），
/// 抓取之后不再修改，由 `MovieStore` 持有。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Type", default)]
    pub movie_type: String,
    #[serde(rename = "Poster", default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

impl Movie {
    pub fn new(
        imdb_id: impl Into<String>,
        title: impl Into<String>,
        year: impl Into<String>,
        movie_type: impl Into<String>,
    ) -> Self {
        Self {
            imdb_id: imdb_id.into(),
            title: title.into(),
            year: year.into(),
            movie_type: movie_type.into(),
            poster: None,
        }
    }

    pub fn with_poster(mut self, poster: impl Into<String>) -> Self {
        self.poster = Some(poster.into());
        self
    }

    /// 可用的海报地址（OMDb 用 "N/A" 表示没有海报）
    pub fn poster_url(&self) -> Option<&str> {
        self.poster
            .as_deref()
            .filter(|p| !p.is_empty() && *p != "N/A")
    }
}

/// 电影类型（类型筛选下拉框的可选值）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovieType {
    Movie,
    Series,
    Episode,
    Game,
}

impl MovieType {
    pub const ALL: [MovieType; 4] = [
        MovieType::Movie,
        MovieType::Series,
        MovieType::Episode,
        MovieType::Game,
    ];

    /// OMDb 中的类型字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            MovieType::Movie => "movie",
            MovieType::Series => "series",
            MovieType::Episode => "episode",
            MovieType::Game => "game",
        }
    }

    /// 下拉框显示名称
    pub fn label(&self) -> &'static str {
        match self {
            MovieType::Movie => "Movie",
            MovieType::Series => "Series",
            MovieType::Episode => "Episode",
            MovieType::Game => "Game",
        }
    }

    /// 从字符串解析类型，区分大小写
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "movie" => Some(MovieType::Movie),
            "series" => Some(MovieType::Series),
            "episode" => Some(MovieType::Episode),
            "game" => Some(MovieType::Game),
            _ => None,
        }
    }
}

impl std::fmt::Display for MovieType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
