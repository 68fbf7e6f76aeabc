pub mod omdb;
pub mod cache;
pub mod error;

use std::sync::Arc;

use async_trait::async_trait;

pub use omdb::{OmdbClient, OmdbSearchResponse};
pub use cache::{SearchCache, CacheStats, CacheCleanupTask};
pub use error::FetchError;

use crate::models::Movie;

/// 电影数据来源
///
/// 一次调用对应一个查询词；返回的列表可能为空。
#[async_trait]
pub trait MovieSource: Send + Sync {
    async fn fetch_movies(&self, query: &str) -> Result<Vec<Movie>, FetchError>;

    fn name(&self) -> &str;
}

/// 带缓存的外部 API 客户端
#[derive(Clone)]
pub struct ExternalApiClient {
    source: Arc<dyn MovieSource>,
    pub cache: SearchCache,
    configured: bool,
}

impl ExternalApiClient {
    pub fn new(omdb: OmdbClient, cache: SearchCache) -> Self {
        let configured = omdb.is_configured();
        Self {
            source: Arc::new(omdb),
            cache,
            configured,
        }
    }

    /// 使用任意数据来源（测试中用内存数据）
    pub fn with_source(source: Arc<dyn MovieSource>, cache: SearchCache) -> Self {
        Self {
            source,
            cache,
            configured: true,
        }
    }

    /// 检查外部 API 是否可用
    pub fn is_available(&self) -> bool {
        self.configured
    }

    /// 获取缓存统计信息
    pub fn get_cache_stats(&self) -> CacheStats {
        self.cache.get_stats()
    }

    /// 清理过期缓存
    pub fn cleanup_cache(&self) {
        self.cache.cleanup_expired();
    }

    /// 清空所有缓存
    pub fn clear_cache(&self) {
        self.cache.clear_all();
    }
}

#[async_trait]
impl MovieSource for ExternalApiClient {
    /// 搜索电影（带缓存）
    async fn fetch_movies(&self, query: &str) -> Result<Vec<Movie>, FetchError> {
        if let Some(cached) = self.cache.get(query) {
            tracing::debug!("Cache hit for movie search: {}", query);
            return Ok(cached);
        }

        let movies = self.source.fetch_movies(query).await?;

        self.cache.set(query, movies.clone());
        tracing::debug!(
            "Fetched {} movies for '{}' from {}",
            movies.len(),
            query,
            self.source.name()
        );

        Ok(movies)
    }

    fn name(&self) -> &str {
        self.source.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MovieSource for CountingSource {
        async fn fetch_movies(&self, query: &str) -> Result<Vec<Movie>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Movie::new(format!("tt-{query}"), query, "2001", "movie")])
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[tokio::test]
    async fn test_second_fetch_served_from_cache() {
        let source = Arc::new(CountingSource { calls: AtomicUsize::new(0) });
        let client = ExternalApiClient::with_source(
            source.clone(),
            SearchCache::new(Duration::from_secs(60)),
        );

        let first = client.fetch_movies("ant").await.unwrap();
        let second = client.fetch_movies("ant").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.get_cache_stats().search_cache_size, 1);
    }

    #[tokio::test]
    async fn test_disabled_cache_always_fetches() {
        let source = Arc::new(CountingSource { calls: AtomicUsize::new(0) });
        let client = ExternalApiClient::with_source(source.clone(), SearchCache::disabled());

        client.fetch_movies("ant").await.unwrap();
        client.fetch_movies("ant").await.unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }
}
