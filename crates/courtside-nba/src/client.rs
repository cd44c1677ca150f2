// HTTP client for the NBA stats API.
//
// Implements `StatsProvider` with two endpoints: `commonallplayers` for the
// all-time player index (fetched once, then cached) and `playercareerstats`
// for a player's season totals.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, Local, NaiveDate};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, ORIGIN, REFERER};
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use courtside_core::config::ProviderConfig;
use courtside_core::provider::{PlayerId, ProviderError, SeasonTotals, StatsProvider};

use crate::career;
use crate::index::{self, IndexedPlayer};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const STATS_REFERER: &str = "https://www.nba.com/";
const STATS_ORIGIN: &str = "https://www.nba.com";

// ---------------------------------------------------------------------------
// Season helpers
// ---------------------------------------------------------------------------

/// The season in progress (or most recently finished) on `date`, as
/// `YYYY-YY`. Seasons are considered to start in October.
pub fn season_for(date: NaiveDate) -> String {
    let start = if date.month() >= 10 {
        date.year()
    } else {
        date.year() - 1
    };
    format!("{}-{:02}", start, (start + 1).rem_euclid(100))
}

// ---------------------------------------------------------------------------
// NbaStatsClient
// ---------------------------------------------------------------------------

pub struct NbaStatsClient {
    http: reqwest::Client,
    base_url: String,
    league_id: String,
    index_season: String,
    index: OnceCell<Vec<IndexedPlayer>>,
}

impl NbaStatsClient {
    /// Build a client from the provider section of the config.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(REFERER, HeaderValue::from_static(STATS_REFERER));
        headers.insert(ORIGIN, HeaderValue::from_static(STATS_ORIGIN));
        headers.insert("x-nba-stats-origin", HeaderValue::from_static("stats"));
        headers.insert("x-nba-stats-token", HeaderValue::from_static("true"));

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Transport {
                endpoint: config.base_url.clone(),
                source: Box::new(e),
            })?;

        let index_season = config
            .index_season
            .clone()
            .unwrap_or_else(|| season_for(Local::now().date_naive()));

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            league_id: config.league_id.clone(),
            index_season,
            index: OnceCell::new(),
        })
    }

    pub fn index_season(&self) -> &str {
        &self.index_season
    }

    /// GET `{base_url}/{endpoint}` and decode the JSON body.
    async fn get_json(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Value, ProviderError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, ?query, "stats request");

        let transport = |e: reqwest::Error| ProviderError::Transport {
            endpoint: endpoint.to_string(),
            source: Box::new(e),
        };

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        debug!(endpoint, status = status.as_u16(), "stats response");
        if !status.is_success() {
            return Err(ProviderError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<Value>().await.map_err(transport)
    }

    /// The all-time player index, fetched on first use.
    async fn player_index(&self) -> Result<&[IndexedPlayer], ProviderError> {
        let players = self
            .index
            .get_or_try_init(|| async {
                let body = self
                    .get_json(
                        index::ENDPOINT,
                        &[
                            ("LeagueID", self.league_id.clone()),
                            ("Season", self.index_season.clone()),
                            ("IsOnlyCurrentSeason", "0".to_string()),
                        ],
                    )
                    .await?;
                let players = index::parse_player_index(body)?;
                info!(
                    "loaded player index: {} players (season {})",
                    players.len(),
                    self.index_season
                );
                Ok::<_, ProviderError>(players)
            })
            .await?;
        Ok(players.as_slice())
    }
}

#[async_trait]
impl StatsProvider for NbaStatsClient {
    async fn find_player_id(&self, name: &str) -> Result<Option<PlayerId>, ProviderError> {
        let players = self.player_index().await?;
        let found = index::find_first_match(players, name);
        if let Some(player) = found {
            debug!("'{}' resolved to {} ({})", name, player.full_name, player.id);
        }
        Ok(found.map(|p| p.id))
    }

    async fn career_totals(&self, id: PlayerId) -> Result<Vec<SeasonTotals>, ProviderError> {
        let body = self
            .get_json(
                career::ENDPOINT,
                &[
                    ("PlayerID", id.to_string()),
                    ("PerMode", "Totals".to_string()),
                    ("LeagueID", self.league_id.clone()),
                ],
            )
            .await?;
        career::parse_career_totals(body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
