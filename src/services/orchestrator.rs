// 抓取编排
//
// 一次运行：确定查询集合 -> 并发请求每个查询 -> 全部完成后按查询顺序拼接
// -> 带票据写入存储。任意一个请求失败则整批失败，存储中的列表不变。
// 同一搜索词的按需加载同时只进行一次，后到的调用等待已有的运行。

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use futures::future::{try_join_all, BoxFuture, Shared};
use futures::FutureExt;
use serde::Serialize;

use crate::external::{FetchError, MovieSource};
use crate::models::Movie;
use crate::store::{CommitOutcome, MovieStore};

/// 一次运行的结果
#[derive(Debug, Clone, Serialize)]
pub struct RefreshOutcome {
    pub seq: u64,
    pub search_term: Option<String>,
    pub queries: Vec<String>,
    pub movie_count: usize,
    pub applied: bool,
    pub took_ms: u64,
}

type SharedRefresh = Shared<BoxFuture<'static, Result<RefreshOutcome, FetchError>>>;

#[derive(Clone)]
pub struct FetchOrchestrator {
    source: Arc<dyn MovieSource>,
    store: MovieStore,
    default_queries: Arc<Vec<String>>,
    /// 正在进行的按需加载，按搜索词索引
    inflight: Arc<Mutex<HashMap<Option<String>, SharedRefresh>>>,
}

impl FetchOrchestrator {
    pub fn new(source: Arc<dyn MovieSource>, store: MovieStore, default_queries: Vec<String>) -> Self {
        Self {
            source,
            store,
            default_queries: Arc::new(default_queries),
            inflight: Arc::default(),
        }
    }

    pub fn store(&self) -> &MovieStore {
        &self.store
    }

    pub fn default_queries(&self) -> &[String] {
        &self.default_queries
    }

    /// 搜索词为空时使用默认查询，否则只查这一个词
    pub fn queries_for(&self, search_term: Option<&str>) -> Vec<String> {
        match search_term.map(str::trim).filter(|s| !s.is_empty()) {
            Some(term) => vec![term.to_string()],
            None => self.default_queries.to_vec(),
        }
    }

    /// 并发执行所有查询，按查询顺序拼接结果（不去重）
    pub async fn fetch_all(&self, queries: &[String]) -> Result<Vec<Movie>, FetchError> {
        let requests = queries.iter().map(|query| self.source.fetch_movies(query));
        let results = try_join_all(requests).await?;
        Ok(results.into_iter().flatten().collect())
    }

    /// 抓取并写入存储
    ///
    /// 失败时返回错误并在存储中记录失败信息；被更新的运行取代时
    /// 返回 `applied = false`。
    pub async fn refresh(&self, search_term: Option<&str>) -> Result<RefreshOutcome, FetchError> {
        let start_time = Instant::now();
        let search_term = search_term
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let queries = self.queries_for(search_term.as_deref());
        let ticket = self.store.begin_run(search_term.clone());

        tracing::info!(
            "Refresh #{} started with {} queries (search: {:?})",
            ticket.seq,
            queries.len(),
            search_term
        );

        let movies = match self.fetch_all(&queries).await {
            Ok(movies) => movies,
            Err(e) => {
                tracing::error!("Refresh #{} failed: {}", ticket.seq, e);
                if self.store.record_failure(&ticket, e.to_string()) == CommitOutcome::Superseded {
                    tracing::debug!("Refresh #{} failure ignored, newer data already stored", ticket.seq);
                }
                return Err(e);
            }
        };

        let movie_count = movies.len();
        let applied = self.store.commit(&ticket, movies) == CommitOutcome::Applied;

        if applied {
            tracing::info!("Refresh #{} stored {} movies", ticket.seq, movie_count);
        } else {
            tracing::warn!(
                "Refresh #{} discarded {} movies, superseded by a newer run",
                ticket.seq,
                movie_count
            );
        }

        Ok(RefreshOutcome {
            seq: ticket.seq,
            search_term,
            queries,
            movie_count,
            applied,
            took_ms: start_time.elapsed().as_millis() as u64,
        })
    }

    /// 搜索词与存储中的不同（或尚未加载）时才刷新
    ///
    /// 同一搜索词已有加载在进行时，等待并共享它的结果。
    pub async fn ensure_loaded(&self, search_term: Option<&str>) -> Result<Option<RefreshOutcome>, FetchError> {
        let wanted = search_term
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        if self.store.is_loaded() && self.store.search_term() == wanted {
            return Ok(None);
        }

        let run = {
            let mut inflight = self.inflight.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            match inflight.get(&wanted) {
                Some(run) => {
                    tracing::debug!("Joining in-flight load (search: {:?})", wanted);
                    run.clone()
                }
                None => {
                    let orchestrator = self.clone();
                    let key = wanted.clone();
                    let run = async move {
                        let result = orchestrator.refresh(key.as_deref()).await;
                        orchestrator.finish_inflight(&key);
                        result
                    }
                    .boxed()
                    .shared();
                    inflight.insert(wanted, run.clone());
                    run
                }
            }
        };

        run.await.map(Some)
    }

    fn finish_inflight(&self, key: &Option<String>) {
        if let Ok(mut inflight) = self.inflight.lock() {
            inflight.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// 内存数据来源，可为每个查询设置延迟或错误
    #[derive(Default)]
    struct ScriptedSource {
        results: HashMap<String, Vec<Movie>>,
        delays: HashMap<String, Duration>,
        failures: HashMap<String, FetchError>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn with(mut self, query: &str, ids: &[&str]) -> Self {
            let movies = ids
                .iter()
                .map(|id| Movie::new(*id, query, "2001", "movie"))
                .collect();
            self.results.insert(query.to_string(), movies);
            self
        }

        fn delayed(mut self, query: &str, ms: u64) -> Self {
            self.delays.insert(query.to_string(), Duration::from_millis(ms));
            self
        }

        fn failing(mut self, query: &str, error: FetchError) -> Self {
            self.failures.insert(query.to_string(), error);
            self
        }
    }

    #[async_trait]
    impl MovieSource for ScriptedSource {
        async fn fetch_movies(&self, query: &str) -> Result<Vec<Movie>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delays.get(query) {
                tokio::time::sleep(*delay).await;
            }
            if let Some(error) = self.failures.get(query) {
                return Err(error.clone());
            }
            Ok(self.results.get(query).cloned().unwrap_or_default())
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn ids(movies: &[Movie]) -> Vec<&str> {
        movies.iter().map(|m| m.imdb_id.as_str()).collect()
    }

    fn defaults() -> Vec<String> {
        vec!["batman".to_string(), "ant".to_string(), "sleep".to_string()]
    }

    #[test]
    fn test_queries_for() {
        let orchestrator = FetchOrchestrator::new(
            Arc::new(ScriptedSource::default()),
            MovieStore::new(),
            defaults(),
        );

        assert_eq!(orchestrator.queries_for(None), defaults());
        assert_eq!(orchestrator.queries_for(Some("")), defaults());
        assert_eq!(orchestrator.queries_for(Some(" pivo ")), vec!["pivo".to_string()]);
    }

    #[tokio::test]
    async fn test_merge_keeps_query_order_even_when_finish_order_differs() {
        let source = ScriptedSource::default()
            .with("batman", &["b1", "b2"])
            .with("ant", &["a1"])
            .with("sleep", &["s1", "b1"])
            .delayed("batman", 50);
        let orchestrator = FetchOrchestrator::new(Arc::new(source), MovieStore::new(), defaults());

        let movies = orchestrator.fetch_all(&defaults()).await.unwrap();

        // 不去重：b1 出现两次
        assert_eq!(ids(&movies), vec!["b1", "b2", "a1", "s1", "b1"]);
    }

    #[tokio::test]
    async fn test_refresh_writes_store() {
        let source = ScriptedSource::default().with("batman", &["b1"]).with("ant", &["a1"]);
        let store = MovieStore::new();
        let orchestrator = FetchOrchestrator::new(Arc::new(source), store.clone(), defaults());

        let outcome = orchestrator.refresh(None).await.unwrap();

        assert!(outcome.applied);
        assert_eq!(outcome.movie_count, 2);
        assert_eq!(outcome.queries, defaults());
        assert_eq!(ids(&store.select_movies().unwrap()), vec!["b1", "a1"]);
    }

    #[tokio::test]
    async fn test_single_failure_fails_batch_and_keeps_store() {
        let source = ScriptedSource::default()
            .with("batman", &["b1"])
            .with("ant", &["a1"])
            .failing("sleep", FetchError::HttpStatus(503));
        let store = MovieStore::new();
        store.set_movies(vec![Movie::new("old", "Old", "1990", "movie")]);
        let orchestrator = FetchOrchestrator::new(Arc::new(source), store.clone(), defaults());

        let result = orchestrator.refresh(None).await;

        assert_eq!(result.unwrap_err(), FetchError::HttpStatus(503));
        assert_eq!(ids(&store.select_movies().unwrap()), vec!["old"]);
        assert_eq!(
            store.snapshot().last_error.as_deref(),
            Some("HTTP error: status 503")
        );
    }

    #[tokio::test]
    async fn test_latest_run_wins() {
        let source = ScriptedSource::default()
            .with("slow", &["slow1"])
            .with("fast", &["fast1"])
            .delayed("slow", 100);
        let store = MovieStore::new();
        let orchestrator = FetchOrchestrator::new(Arc::new(source), store.clone(), defaults());

        let slow = {
            let orchestrator = orchestrator.clone();
            tokio::spawn(async move { orchestrator.refresh(Some("slow")).await })
        };
        // 确保 slow 先领取票据
        tokio::time::sleep(Duration::from_millis(20)).await;
        let fast = orchestrator.refresh(Some("fast")).await.unwrap();
        let slow = slow.await.unwrap().unwrap();

        assert!(fast.applied);
        assert!(!slow.applied);
        assert_eq!(ids(&store.select_movies().unwrap()), vec!["fast1"]);
        assert_eq!(store.search_term().as_deref(), Some("fast"));
    }

    #[tokio::test]
    async fn test_ensure_loaded_skips_same_term() {
        let source = ScriptedSource::default().with("pivo", &["p1"]);
        let orchestrator = FetchOrchestrator::new(Arc::new(source), MovieStore::new(), defaults());

        assert!(orchestrator.ensure_loaded(Some("pivo")).await.unwrap().is_some());
        assert!(orchestrator.ensure_loaded(Some("pivo")).await.unwrap().is_none());
        assert!(orchestrator.ensure_loaded(None).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_concurrent_loads_share_one_run() {
        let source = Arc::new(
            ScriptedSource::default()
                .with("batman", &["b1"])
                .with("ant", &["a1"])
                .delayed("batman", 50),
        );
        let store = MovieStore::new();
        let orchestrator = FetchOrchestrator::new(source.clone(), store.clone(), defaults());

        let (first, second) = tokio::join!(
            orchestrator.ensure_loaded(None),
            orchestrator.ensure_loaded(Some("  "))
        );
        let first = first.unwrap().unwrap();
        let second = second.unwrap().unwrap();

        // 只执行了一批默认查询
        assert_eq!(source.calls.load(Ordering::SeqCst), defaults().len());
        assert_eq!(first.seq, second.seq);
        assert_eq!(ids(&store.select_movies().unwrap()), vec!["b1", "a1"]);

        // 运行结束后不再占用，下一次不同的搜索会重新抓取
        assert!(orchestrator.inflight.lock().unwrap().is_empty());
        assert!(orchestrator.ensure_loaded(Some("ant")).await.unwrap().is_some());
        assert_eq!(source.calls.load(Ordering::SeqCst), defaults().len() + 1);
    }
}
