// 应用配置
//
// 从环境变量读取（启动时先加载 .env），无效的数值回退到默认值并打印警告。

use std::time::Duration;

use serde::Serialize;

use crate::external::omdb::DEFAULT_BASE_URL;
use crate::models::DEFAULT_PAGE_SIZE;

/// 未配置 DEFAULT_QUERIES 时的默认查询
pub const DEFAULT_QUERIES: [&str; 9] = [
    "batman",
    "ant",
    "spiderman",
    "ironman",
    "star wars",
    "pivo",
    "sat",
    "say",
    "sleep",
];

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CACHE_TTL_SECS: u64 = 30 * 60;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[serde(skip_serializing)]
    pub omdb_api_key: Option<String>,
    pub omdb_base_url: String,
    pub default_queries: Vec<String>,
    pub page_size: usize,
    pub search_cache_ttl: Duration,
    pub http_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            omdb_api_key: None,
            omdb_base_url: DEFAULT_BASE_URL.to_string(),
            default_queries: DEFAULT_QUERIES.iter().map(|q| q.to_string()).collect(),
            page_size: DEFAULT_PAGE_SIZE,
            search_cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 通过任意查找函数构建配置
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let default_queries = lookup("DEFAULT_QUERIES")
            .map(|raw| parse_query_list(&raw))
            .filter(|queries| !queries.is_empty())
            .unwrap_or(defaults.default_queries);

        let page_size = parse_or("PAGE_SIZE", lookup("PAGE_SIZE"), defaults.page_size);
        let page_size = if page_size == 0 {
            tracing::warn!("PAGE_SIZE must be at least 1, using {}", DEFAULT_PAGE_SIZE);
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", lookup("PORT"), defaults.port),
            omdb_api_key: lookup("OMDB_API_KEY").filter(|k| !k.trim().is_empty()),
            omdb_base_url: lookup("OMDB_BASE_URL").unwrap_or(defaults.omdb_base_url),
            default_queries,
            page_size,
            search_cache_ttl: Duration::from_secs(parse_or(
                "SEARCH_CACHE_TTL_SECS",
                lookup("SEARCH_CACHE_TTL_SECS"),
                DEFAULT_CACHE_TTL_SECS,
            )),
            http_timeout: Duration::from_secs(parse_or(
                "HTTP_TIMEOUT_SECS",
                lookup("HTTP_TIMEOUT_SECS"),
                DEFAULT_HTTP_TIMEOUT_SECS,
            )),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 逗号分隔的查询列表，忽略空项
pub fn parse_query_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_or<T>(key: &str, value: Option<String>, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match value {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value for {}: {:?}, using {}", key, raw, default);
            default
        }),
    }
}
