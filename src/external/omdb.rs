use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::error::FetchError;
use super::MovieSource;
use crate::models::Movie;

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com";

/// OMDb 用这条错误表示"没有结果"，按空列表处理
const NOT_FOUND_ERROR: &str = "Movie not found!";

/// OMDb API客户端
#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
}

impl OmdbClient {
    pub fn new(api_key: Option<String>, base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url: Url::parse(base_url)?,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// 按标题搜索
    pub async fn search(&self, query: &str) -> Result<OmdbSearchResponse, FetchError> {
        let api_key = self.api_key.as_ref().ok_or(FetchError::NotConfigured)?;

        let response = self
            .client
            .get(self.base_url.clone())
            .query(&[("s", query), ("apikey", api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status().as_u16()));
        }

        let search_result: OmdbSearchResponse = response.json().await?;
        Ok(search_result)
    }
}

#[async_trait]
impl MovieSource for OmdbClient {
    async fn fetch_movies(&self, query: &str) -> Result<Vec<Movie>, FetchError> {
        let response = self.search(query).await?;
        response.into_movies()
    }

    fn name(&self) -> &str {
        "omdb"
    }
}

/// OMDb搜索响应
///
/// 成功时 `Response` 为 "True" 并带有 `Search` 列表；
/// 失败时 `Response` 为 "False" 并带有 `Error` 说明。
#[derive(Debug, Deserialize, Serialize)]
pub struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    pub search: Vec<Movie>,
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl OmdbSearchResponse {
    pub fn into_movies(self) -> Result<Vec<Movie>, FetchError> {
        if self.response.eq_ignore_ascii_case("true") {
            return Ok(self.search);
        }

        match self.error {
            Some(ref error) if error == NOT_FOUND_ERROR => Ok(Vec::new()),
            Some(error) => Err(FetchError::Api(error)),
            None => Err(FetchError::Api("Unknown error".to_string())),
        }
    }
}
