// Regular-season career totals from the playercareerstats endpoint.

use courtside_core::provider::{ProviderError, SeasonTotals};
use serde_json::Value;

use crate::result_set::{self, cell_count, cell_f64, cell_string, cell_u64};

pub const ENDPOINT: &str = "playercareerstats";
const RESULT_SET: &str = "SeasonTotalsRegularSeason";

/// Parse a `playercareerstats` response (PerMode=Totals) into season rows.
pub fn parse_career_totals(body: Value) -> Result<Vec<SeasonTotals>, ProviderError> {
    let set = result_set::extract(ENDPOINT, body, RESULT_SET)?;
    let col = |name: &str| set.column(ENDPOINT, name);

    let season = col("SEASON_ID")?;
    let team = col("TEAM_ABBREVIATION")?;
    let gp = col("GP")?;
    let fg_pct = col("FG_PCT")?;
    let fg3_pct = col("FG3_PCT")?;
    let reb = col("REB")?;
    let ast = col("AST")?;
    let stl = col("STL")?;
    let blk = col("BLK")?;
    let pts = col("PTS")?;

    let rows = set
        .row_set
        .iter()
        .map(|row| SeasonTotals {
            season_id: cell_string(row, season),
            team: cell_string(row, team),
            games_played: cell_u64(row, gp)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0),
            points: cell_count(row, pts),
            assists: cell_count(row, ast),
            rebounds: cell_count(row, reb),
            steals: cell_count(row, stl),
            blocks: cell_count(row, blk),
            fg_pct: cell_f64(row, fg_pct),
            fg3_pct: cell_f64(row, fg3_pct),
        })
        .collect();
    Ok(rows)
}
