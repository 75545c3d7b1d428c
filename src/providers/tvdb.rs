use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use reqwest::{Client, StatusCode, header};
use serde::Deserialize;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::{EpisodeProvider, EpisodeRecord, SeriesRecord, SeriesSearchResult};

/// Season grouping carrying the canonical broadcast ordering
const AIRED_ORDER: &str = "Aired Order";

/// TheTVDB v4 API client
#[derive(Debug)]
pub struct Tvdb {
    /// HTTP client for API requests
    client: Client,
    /// Base URL of the API, e.g. https://api4.thetvdb.com/v4
    base_url: Url,
    /// Bearer token obtained from the login endpoint
    token: String,
}

/// Envelope every TVDB v4 response is wrapped in
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    /// Payload of the response
    data: T,
}

/// Response payload of the login endpoint
#[derive(Debug, Deserialize)]
struct LoginData {
    /// Bearer token for subsequent requests
    token: String,
}

/// A single series search hit
#[derive(Debug, Deserialize)]
struct SearchHit {
    /// Numeric series id as a string
    tvdb_id: Option<String>,
    /// Series display name
    name: Option<String>,
    /// Release year
    year: Option<String>,
}

/// Series details payload
#[derive(Debug, Deserialize)]
struct SeriesData {
    id: u64,
    name: String,
    year: Option<String>,
}

/// Extended series payload listing its seasons
#[derive(Debug, Deserialize)]
struct SeriesExtendedData {
    #[serde(default)]
    seasons: Vec<SeasonSummary>,
}

/// Season summary within an extended series payload
#[derive(Debug, Deserialize)]
struct SeasonSummary {
    id: u64,
    #[serde(rename = "type")]
    season_type: SeasonType,
}

/// Season grouping descriptor
#[derive(Debug, Deserialize)]
struct SeasonType {
    name: String,
}

/// Extended season payload listing its episodes
#[derive(Debug, Deserialize)]
struct SeasonExtendedData {
    #[serde(default)]
    episodes: Vec<EpisodeData>,
}

/// Episode payload as returned by the API
#[derive(Debug, Deserialize)]
struct EpisodeData {
    id: u64,
    name: Option<String>,
    #[serde(rename = "seasonNumber")]
    season_number: u32,
    #[serde(rename = "number")]
    episode_number: u32,
    #[serde(rename = "absoluteNumber")]
    absolute_number: Option<u32>,
    /// First-aired date as "YYYY-MM-DD", sometimes null or empty
    aired: Option<String>,
}

impl EpisodeData {
    /// Convert the wire representation into an EpisodeRecord
    fn into_record(self) -> EpisodeRecord {
        let aired = self
            .aired
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());
        EpisodeRecord {
            id: self.id,
            name: self.name.unwrap_or_default(),
            season_number: self.season_number,
            episode_number: self.episode_number,
            absolute_number: self.absolute_number,
            aired,
        }
    }
}

impl Tvdb {
    /// Log in to TheTVDB and return a ready-to-use client
    ///
    /// # Arguments
    /// * `api_key` - TVDB v4 API key
    /// * `endpoint` - Base URL of the API
    /// * `timeout_secs` - Per-request timeout in seconds
    pub async fn connect(
        api_key: &str,
        endpoint: &str,
        timeout_secs: u64,
    ) -> Result<Self, ProviderError> {
        let base_url = Url::parse(endpoint)
            .map_err(|e| ProviderError::ConnectionError(format!("Invalid endpoint URL: {}", e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let login_url = join_path(&base_url, "login")?;
        let response = client
            .post(login_url)
            .json(&serde_json::json!({ "apikey": api_key }))
            .send()
            .await
            .map_err(map_transport_error)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ProviderError::AuthenticationError(
                "TVDB rejected the API key".to_string(),
            ));
        }
        let response = check_status(response).await?;

        let login: Envelope<LoginData> = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        debug!("Authenticated against TVDB at {}", base_url);

        Ok(Self {
            client,
            base_url,
            token: login.data.token,
        })
    }

    /// Issue an authenticated GET and deserialize the response envelope
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let url = join_path(&self.base_url, path)?;
        let response = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .query(query)
            .send()
            .await
            .map_err(map_transport_error)?;

        let response = check_status(response).await?;
        response
            .json::<Envelope<T>>()
            .await
            .map(|envelope| envelope.data)
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl EpisodeProvider for Tvdb {
    async fn search_series(&self, query: &str) -> Result<Vec<SeriesSearchResult>, ProviderError> {
        let hits: Vec<SearchHit> = self
            .get_json("search", &[("query", query), ("type", "series")])
            .await?;

        let results = hits
            .into_iter()
            .filter_map(|hit| {
                let tvdb_id = hit.tvdb_id?;
                let name = hit.name?;
                Some(SeriesSearchResult {
                    tvdb_id,
                    name,
                    year: hit.year,
                })
            })
            .collect();

        Ok(results)
    }

    async fn series_details(&self, series_id: u64) -> Result<SeriesRecord, ProviderError> {
        let data: SeriesData = self.get_json(&format!("series/{}", series_id), &[]).await?;

        Ok(SeriesRecord {
            id: data.id,
            name: data.name,
            year: data.year,
        })
    }

    async fn episodes(&self, series_id: u64) -> Result<Vec<EpisodeRecord>, ProviderError> {
        let extended: SeriesExtendedData = self
            .get_json(&format!("series/{}/extended", series_id), &[])
            .await?;

        let mut episodes = Vec::new();
        for season in extended
            .seasons
            .into_iter()
            .filter(|s| s.season_type.name == AIRED_ORDER)
        {
            let season_data: SeasonExtendedData = self
                .get_json(&format!("seasons/{}/extended", season.id), &[])
                .await?;
            episodes.extend(season_data.episodes.into_iter().map(EpisodeData::into_record));
        }

        if episodes.is_empty() {
            warn!("TVDB returned no aired-order episodes for series {}", series_id);
        }

        Ok(episodes)
    }
}

/// Join a relative path onto the base URL, preserving any base path segment
fn join_path(base: &Url, path: &str) -> Result<Url, ProviderError> {
    let joined = format!("{}/{}", base.as_str().trim_end_matches('/'), path);
    Url::parse(&joined).map_err(|e| ProviderError::ConnectionError(e.to_string()))
}

/// Map a reqwest transport error to the provider taxonomy
fn map_transport_error(error: reqwest::Error) -> ProviderError {
    if error.is_connect() || error.is_timeout() {
        ProviderError::ConnectionError(error.to_string())
    } else {
        ProviderError::RequestFailed(error.to_string())
    }
}

/// Turn a non-success HTTP status into an ApiError
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    if status == StatusCode::NOT_FOUND {
        return Err(ProviderError::SeriesNotFound(message));
    }
    Err(ProviderError::ApiError {
        status_code: status.as_u16(),
        message,
    })
}
