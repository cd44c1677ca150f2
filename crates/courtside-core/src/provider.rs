// Stats provider abstraction: name resolution and career totals retrieval.
//
// The comparison pipeline only talks to a `StatsProvider`. The NBA HTTP client
// lives in its own crate; tests plug in in-memory fakes.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Identifiers and raw rows
// ---------------------------------------------------------------------------

/// Provider-specific player identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of a player's career table, as cumulative season totals.
///
/// A player traded mid-season may appear once per team plus once with the
/// combined `TOT` team abbreviation.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonTotals {
    pub season_id: String,
    pub team: String,
    pub games_played: u32,
    pub points: f64,
    pub assists: f64,
    pub rebounds: f64,
    pub steals: f64,
    pub blocks: f64,
    /// Field-goal percentage as a fraction (0.0-1.0). `None` when unreported.
    pub fg_pct: Option<f64>,
    /// Three-point percentage as a fraction (0.0-1.0). `None` when unreported.
    pub fg3_pct: Option<f64>,
}

/// Team abbreviation the provider uses for a combined multi-team season row.
pub const COMBINED_TEAM: &str = "TOT";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("unexpected response from {endpoint}: {message}")]
    Schema { endpoint: String, message: String },
}

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

/// A remote source of player identities and career statistics.
#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// Find the first player whose full name matches `name`.
    ///
    /// Returns `Ok(None)` when nothing matches. Multiple matches are not
    /// disambiguated: the first one wins.
    async fn find_player_id(&self, name: &str) -> Result<Option<PlayerId>, ProviderError>;

    /// Fetch the regular-season career table for `id`, one row per season
    /// (and per team, for traded seasons).
    async fn career_totals(&self, id: PlayerId) -> Result<Vec<SeasonTotals>, ProviderError>;
}
