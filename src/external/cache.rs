use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use serde::{Deserialize, Serialize};

use crate::models::Movie;

/// 缓存条目
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    created_at: Instant,
    ttl: Duration,
}

impl<T> CacheEntry<T> {
    fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            created_at: Instant::now(),
            ttl,
        }
    }

    fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }
}

/// 内存缓存实现
#[derive(Debug, Clone)]
pub struct MemoryCache<T> {
    cache: Arc<RwLock<HashMap<String, CacheEntry<T>>>>,
    default_ttl: Duration,
}

impl<T: Clone> MemoryCache<T> {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            default_ttl,
        }
    }

    pub fn get(&self, key: &str) -> Option<T> {
        let cache = self.cache.read().ok()?;
        let entry = cache.get(key)?;

        if entry.is_expired() {
            drop(cache);
            self.remove(key);
            None
        } else {
            Some(entry.data.clone())
        }
    }

    pub fn set(&self, key: String, value: T) {
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(key, CacheEntry::new(value, self.default_ttl));
        }
    }

    pub fn remove(&self, key: &str) {
        if let Ok(mut cache) = self.cache.write() {
            cache.remove(key);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
        }
    }

    pub fn cleanup_expired(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.retain(|_, entry| !entry.is_expired());
        }
    }

    pub fn size(&self) -> usize {
        self.cache.read().map(|c| c.len()).unwrap_or(0)
    }
}

/// 按查询词缓存的搜索结果
///
/// TTL 为 0 时缓存关闭，每次都直接请求外部 API。
#[derive(Debug, Clone)]
pub struct SearchCache {
    results: MemoryCache<Vec<Movie>>,
    enabled: bool,
}

impl SearchCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            results: MemoryCache::new(ttl),
            enabled: !ttl.is_zero(),
        }
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// 生成搜索缓存键（忽略大小写与首尾空白）
    fn cache_key(query: &str) -> String {
        format!("search:{}", query.trim().to_lowercase())
    }

    pub fn get(&self, query: &str) -> Option<Vec<Movie>> {
        if !self.enabled {
            return None;
        }
        self.results.get(&Self::cache_key(query))
    }

    pub fn set(&self, query: &str, movies: Vec<Movie>) {
        if self.enabled {
            self.results.set(Self::cache_key(query), movies);
        }
    }

    /// 清理过期缓存
    pub fn cleanup_expired(&self) {
        self.results.cleanup_expired();
    }

    /// 清空所有缓存
    pub fn clear_all(&self) {
        self.results.clear();
    }

    /// 获取缓存统计信息
    pub fn get_stats(&self) -> CacheStats {
        CacheStats {
            enabled: self.enabled,
            search_cache_size: self.results.size(),
        }
    }
}

/// 缓存统计信息
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheStats {
    pub enabled: bool,
    pub search_cache_size: usize,
}

/// 缓存清理任务
pub struct CacheCleanupTask {
    cache: SearchCache,
    interval: Duration,
}

impl CacheCleanupTask {
    pub fn new(cache: SearchCache, interval: Duration) -> Self {
        Self { cache, interval }
    }

    /// 启动定期清理任务
    pub async fn start(self) {
        let mut interval = tokio::time::interval(self.interval);

        loop {
            interval.tick().await;
            self.cache.cleanup_expired();
            tracing::debug!("Cache cleanup completed. Stats: {:?}", self.cache.get_stats());
        }
    }
}
