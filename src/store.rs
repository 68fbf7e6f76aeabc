// 电影列表共享状态
//
// 以显式句柄的形式在 AppState 中传递，而不是进程级全局变量。
// 每次抓取先领取一个递增的运行票据（RunTicket），提交时只有
// 比已提交票据更新的运行才会写入，保证后开始的运行总是胜出。

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use crate::models::Movie;

/// 一次抓取运行的票据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTicket {
    pub seq: u64,
    pub search_term: Option<String>,
}

/// 提交结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Applied,
    /// 已有更新的运行提交过，本次结果被丢弃
    Superseded,
}

#[derive(Debug, Default)]
struct StoreState {
    movies: Option<Arc<Vec<Movie>>>,
    search_term: Option<String>,
    next_seq: u64,
    committed_seq: u64,
    last_error: Option<String>,
    updated_at: Option<DateTime<Utc>>,
}

/// 存储快照，供页面渲染使用
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    pub movies: Arc<Vec<Movie>>,
    pub search_term: Option<String>,
    pub last_error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct MovieStore {
    state: Arc<RwLock<StoreState>>,
}

impl MovieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取电影列表，尚未加载时返回 None
    pub fn select_movies(&self) -> Option<Arc<Vec<Movie>>> {
        self.state.read().ok()?.movies.clone()
    }

    /// 直接写入电影列表（不经过票据检查）
    pub fn set_movies(&self, movies: Vec<Movie>) {
        if let Ok(mut state) = self.state.write() {
            state.movies = Some(Arc::new(movies));
            state.last_error = None;
            state.updated_at = Some(Utc::now());
        }
    }

    /// 当前数据对应的搜索词
    pub fn search_term(&self) -> Option<String> {
        self.state.read().ok().and_then(|s| s.search_term.clone())
    }

    pub fn is_loaded(&self) -> bool {
        self.state.read().map(|s| s.movies.is_some()).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.state
            .read()
            .ok()
            .and_then(|s| s.movies.as_ref().map(|m| m.len()))
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        match self.state.read() {
            Ok(state) => StoreSnapshot {
                movies: state.movies.clone().unwrap_or_default(),
                search_term: state.search_term.clone(),
                last_error: state.last_error.clone(),
                updated_at: state.updated_at,
            },
            Err(_) => StoreSnapshot {
                movies: Arc::default(),
                search_term: None,
                last_error: Some("Movie store is unavailable".to_string()),
                updated_at: None,
            },
        }
    }

    /// 开始一次抓取运行
    pub fn begin_run(&self, search_term: Option<String>) -> RunTicket {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        state.next_seq += 1;

        RunTicket {
            seq: state.next_seq,
            search_term,
        }
    }

    /// 提交抓取结果
    pub fn commit(&self, ticket: &RunTicket, movies: Vec<Movie>) -> CommitOutcome {
        let Ok(mut state) = self.state.write() else {
            return CommitOutcome::Superseded;
        };

        if ticket.seq <= state.committed_seq {
            return CommitOutcome::Superseded;
        }

        state.committed_seq = ticket.seq;
        state.movies = Some(Arc::new(movies));
        state.search_term = ticket.search_term.clone();
        state.last_error = None;
        state.updated_at = Some(Utc::now());
        CommitOutcome::Applied
    }

    /// 记录失败的运行，电影列表保持不变
    pub fn record_failure(&self, ticket: &RunTicket, error: impl Into<String>) -> CommitOutcome {
        let Ok(mut state) = self.state.write() else {
            return CommitOutcome::Superseded;
        };

        if ticket.seq <= state.committed_seq {
            return CommitOutcome::Superseded;
        }

        state.last_error = Some(error.into());
        CommitOutcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: &str) -> Movie {
        Movie::new(id, "Title", "2001", "movie")
    }

    #[test]
    fn test_select_before_load() {
        let store = MovieStore::new();
        assert!(store.select_movies().is_none());
        assert!(!store.is_loaded());
        assert!(store.snapshot().movies.is_empty());
    }

    #[test]
    fn test_set_and_select() {
        let store = MovieStore::new();
        store.set_movies(vec![movie("tt1"), movie("tt2")]);
        assert_eq!(store.select_movies().unwrap().len(), 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_later_run_wins_regardless_of_finish_order() {
        let store = MovieStore::new();
        let first = store.begin_run(Some("batman".to_string()));
        let second = store.begin_run(Some("ant".to_string()));

        assert_eq!(store.commit(&second, vec![movie("tt2")]), CommitOutcome::Applied);
        assert_eq!(store.commit(&first, vec![movie("tt1")]), CommitOutcome::Superseded);

        assert_eq!(store.select_movies().unwrap()[0].imdb_id, "tt2");
        assert_eq!(store.search_term().as_deref(), Some("ant"));
    }

    #[test]
    fn test_in_order_commits_both_apply() {
        let store = MovieStore::new();
        let first = store.begin_run(None);
        let second = store.begin_run(None);

        assert_eq!(store.commit(&first, vec![movie("tt1")]), CommitOutcome::Applied);
        assert_eq!(store.commit(&second, vec![movie("tt2")]), CommitOutcome::Applied);
        assert_eq!(store.select_movies().unwrap()[0].imdb_id, "tt2");
    }

    #[test]
    fn test_failure_keeps_movies() {
        let store = MovieStore::new();
        let ok = store.begin_run(None);
        store.commit(&ok, vec![movie("tt1")]);

        let failed = store.begin_run(Some("sleep".to_string()));
        assert_eq!(store.record_failure(&failed, "network down"), CommitOutcome::Applied);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.movies.len(), 1);
        assert_eq!(snapshot.last_error.as_deref(), Some("network down"));
        assert_eq!(snapshot.search_term, None);
    }

    #[test]
    fn test_failure_of_superseded_run_is_ignored() {
        let store = MovieStore::new();
        let old = store.begin_run(None);
        let new = store.begin_run(None);
        store.commit(&new, vec![movie("tt1")]);

        assert_eq!(store.record_failure(&old, "timeout"), CommitOutcome::Superseded);
        assert!(store.snapshot().last_error.is_none());
    }
}
