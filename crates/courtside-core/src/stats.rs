// Per-game season records and games-weighted career averages.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::provider::{ProviderError, SeasonTotals, StatsProvider, COMBINED_TEAM};

// ---------------------------------------------------------------------------
// Season records
// ---------------------------------------------------------------------------

/// A season reduced to per-game rates.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonRecord {
    pub season_id: String,
    pub team: String,
    pub games_played: u32,
    pub pts: f64,
    pub ast: f64,
    pub reb: f64,
    pub stl: f64,
    pub blk: f64,
    pub fg_pct: Option<f64>,
    pub fg3_pct: Option<f64>,
}

/// Divide a season total by games played. Zero games yields a rate of 0.
pub fn per_game(total: f64, games_played: u32) -> f64 {
    if games_played == 0 {
        return 0.0;
    }
    total / f64::from(games_played)
}

impl From<&SeasonTotals> for SeasonRecord {
    fn from(t: &SeasonTotals) -> Self {
        let gp = t.games_played;
        SeasonRecord {
            season_id: t.season_id.clone(),
            team: t.team.clone(),
            games_played: gp,
            pts: per_game(t.points, gp),
            ast: per_game(t.assists, gp),
            reb: per_game(t.rebounds, gp),
            stl: per_game(t.steals, gp),
            blk: per_game(t.blocks, gp),
            fg_pct: t.fg_pct,
            fg3_pct: t.fg3_pct,
        }
    }
}

/// Convert a career table of totals to per-game season records.
pub fn to_season_records(totals: &[SeasonTotals]) -> Vec<SeasonRecord> {
    totals.iter().map(SeasonRecord::from).collect()
}

/// Drop the per-team rows of any season that also has a combined `TOT` row,
/// so a traded season counts once.
pub fn collapse_traded_seasons(totals: Vec<SeasonTotals>) -> Vec<SeasonTotals> {
    let combined: HashSet<String> = totals
        .iter()
        .filter(|t| t.team == COMBINED_TEAM)
        .map(|t| t.season_id.clone())
        .collect();

    totals
        .into_iter()
        .filter(|t| t.team == COMBINED_TEAM || !combined.contains(&t.season_id))
        .collect()
}

// ---------------------------------------------------------------------------
// Fetching
// ---------------------------------------------------------------------------

/// Options applied while turning a provider's career table into records.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchOptions {
    pub collapse_traded_seasons: bool,
}

/// Outcome of fetching one player's stats.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerStats {
    Found(Vec<SeasonRecord>),
    /// The name did not resolve. Carries the user-facing message.
    NotFound { message: String },
}

/// Message reported when a name does not resolve to a player.
pub fn not_found_message(name: &str) -> String {
    format!("Player {name} not found!")
}

/// Resolve `name` and fetch its per-game career table.
///
/// An unresolved name is not an error: it yields `PlayerStats::NotFound` and
/// the career-stats endpoint is never called. Provider failures propagate.
pub async fn get_player_stats<P: StatsProvider + ?Sized>(
    provider: &P,
    name: &str,
    options: FetchOptions,
) -> Result<PlayerStats, ProviderError> {
    let query = name.trim();
    let Some(id) = provider.find_player_id(query).await? else {
        info!("no player matched '{}'", query);
        return Ok(PlayerStats::NotFound {
            message: not_found_message(query),
        });
    };

    let mut totals = provider.career_totals(id).await?;
    if options.collapse_traded_seasons {
        totals = collapse_traded_seasons(totals);
    }
    info!("fetched {} season rows for '{}' (id {})", totals.len(), query, id);

    Ok(PlayerStats::Found(to_season_records(&totals)))
}

// ---------------------------------------------------------------------------
// Career averages
// ---------------------------------------------------------------------------

/// Games-weighted career per-game averages, rounded to one decimal.
/// Shooting percentages are on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CareerAverages {
    pub pts: f64,
    pub ast: f64,
    pub reb: f64,
    pub stl: f64,
    pub blk: f64,
    pub fg_pct: f64,
    pub fg3_pct: f64,
}

/// Round to one decimal place, half away from zero.
///
/// Scaling by ten first means a value stored just below a half (45.65 is
/// 45.6499999...) scales to exactly 456.5 and rounds up to 45.7. Python's
/// `round(x, 1)` rounds the exact binary value and gives 45.6; it also
/// rounds true halves to even (1.25 to 1.2, here 1.3).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Σ(value_i × gp_i) / Σ(gp_i), or 0 when no games were played. Seasons
/// without a value contribute nothing to the numerator.
fn weighted_mean<F>(records: &[SeasonRecord], total_gp: u64, value: F) -> f64
where
    F: Fn(&SeasonRecord) -> Option<f64>,
{
    if total_gp == 0 {
        return 0.0;
    }
    let weighted: f64 = records
        .iter()
        .filter_map(|r| value(r).map(|v| v * f64::from(r.games_played)))
        .sum();
    weighted / total_gp as f64
}

/// Reduce season records to career averages weighted by games played.
pub fn compute_career_averages(records: &[SeasonRecord]) -> CareerAverages {
    let total_gp: u64 = records.iter().map(|r| u64::from(r.games_played)).sum();
    if total_gp == 0 {
        warn!(
            "career table has {} seasons but zero games played; averages fall back to 0",
            records.len()
        );
        return CareerAverages::default();
    }

    CareerAverages {
        pts: round1(weighted_mean(records, total_gp, |r| Some(r.pts))),
        ast: round1(weighted_mean(records, total_gp, |r| Some(r.ast))),
        reb: round1(weighted_mean(records, total_gp, |r| Some(r.reb))),
        stl: round1(weighted_mean(records, total_gp, |r| Some(r.stl))),
        blk: round1(weighted_mean(records, total_gp, |r| Some(r.blk))),
        fg_pct: round1(weighted_mean(records, total_gp, |r| r.fg_pct) * 100.0),
        fg3_pct: round1(weighted_mean(records, total_gp, |r| r.fg3_pct) * 100.0),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::PlayerId;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn totals(season: &str, team: &str, gp: u32, pts: f64) -> SeasonTotals {
        SeasonTotals {
            season_id: season.into(),
            team: team.into(),
            games_played: gp,
            points: pts,
            assists: 0.0,
            rebounds: 0.0,
            steals: 0.0,
            blocks: 0.0,
            fg_pct: Some(0.5),
            fg3_pct: Some(0.35),
        }
    }

    fn record(gp: u32, pts: f64) -> SeasonRecord {
        SeasonRecord {
            season_id: "2000-01".into(),
            team: "LAL".into(),
            games_played: gp,
            pts,
            ast: 0.0,
            reb: 0.0,
            stl: 0.0,
            blk: 0.0,
            fg_pct: None,
            fg3_pct: None,
        }
    }

    // -- per-game derivation --

    #[test]
    fn totals_divided_by_games_played() {
        let mut t = totals("2003-04", "CLE", 79, 1654.0);
        t.assists = 465.0;
        t.rebounds = 432.0;
        t.steals = 130.0;
        t.blocks = 58.0;

        let r = SeasonRecord::from(&t);
        assert!((r.pts - 1654.0 / 79.0).abs() < 1e-12);
        assert!((r.ast - 465.0 / 79.0).abs() < 1e-12);
        assert!((r.reb - 432.0 / 79.0).abs() < 1e-12);
        assert!((r.stl - 130.0 / 79.0).abs() < 1e-12);
        assert!((r.blk - 58.0 / 79.0).abs() < 1e-12);
        assert_eq!(r.fg_pct, Some(0.5));
        assert_eq!(r.games_played, 79);
    }

    #[test]
    fn zero_games_season_has_zero_rates() {
        let r = SeasonRecord::from(&totals("2019-20", "BKN", 0, 0.0));
        assert_eq!(r.pts, 0.0);
        assert!(r.pts.is_finite());
    }

    // -- weighted averages --

    #[test]
    fn weighted_by_games_played() {
        // 10 games at 20 ppg and 30 games at 30 ppg -> 27.5
        let avg = compute_career_averages(&[record(10, 20.0), record(30, 30.0)]);
        assert_eq!(avg.pts, 27.5);
    }

    #[test]
    fn zero_total_games_yields_all_zero() {
        let avg = compute_career_averages(&[record(0, 12.0), record(0, 8.0)]);
        assert_eq!(avg, CareerAverages::default());
    }

    #[test]
    fn empty_table_yields_all_zero() {
        assert_eq!(compute_career_averages(&[]), CareerAverages::default());
    }

    #[test]
    fn weighted_average_lies_within_season_range() {
        let tables: Vec<Vec<SeasonRecord>> = vec![
            vec![record(82, 27.2), record(3, 4.0), record(55, 31.1)],
            vec![record(1, 0.0), record(1, 50.0)],
            vec![record(70, 18.35)],
            vec![record(0, 99.0), record(12, 14.0), record(64, 22.9)],
        ];
        for table in tables {
            let played: Vec<f64> = table
                .iter()
                .filter(|r| r.games_played > 0)
                .map(|r| r.pts)
                .collect();
            let min = played.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = played.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let avg = compute_career_averages(&table).pts;
            // Rounding to one decimal can move the value by at most 0.05.
            assert!(avg >= min - 0.05 && avg <= max + 0.05, "{avg} not in [{min}, {max}]");
        }
    }

    #[test]
    fn shooting_percentages_scaled_and_missing_skipped() {
        let mut a = record(50, 10.0);
        a.fg_pct = Some(0.5);
        a.fg3_pct = None;
        let mut b = record(50, 10.0);
        b.fg_pct = Some(0.4);
        b.fg3_pct = Some(0.3);

        let avg = compute_career_averages(&[a, b]);
        assert_eq!(avg.fg_pct, 45.0);
        // Missing 3P% contributes nothing, denominator is still all games.
        assert_eq!(avg.fg3_pct, 15.0);
    }

    #[test]
    fn round1_is_half_away_from_zero() {
        assert_eq!(round1(27.25), 27.3);
        assert_eq!(round1(27.24), 27.2);
        assert_eq!(round1(0.0), 0.0);
        assert_eq!(round1(-0.25), -0.3);
        assert_eq!(round1(1.25), 1.3);
        assert_eq!(round1(45.65), 45.7);
    }

    // -- traded seasons --

    #[test]
    fn collapse_keeps_combined_row_only() {
        let rows = vec![
            totals("2007-08", "PHX", 82, 1500.0),
            totals("2008-09", "TOT", 70, 1400.0),
            totals("2008-09", "MIA", 40, 800.0),
            totals("2008-09", "PHX", 30, 600.0),
            totals("2009-10", "MIA", 75, 1300.0),
        ];
        let collapsed = collapse_traded_seasons(rows);
        let teams: Vec<&str> = collapsed.iter().map(|t| t.team.as_str()).collect();
        assert_eq!(teams, vec!["PHX", "TOT", "MIA"]);
        assert_eq!(collapsed[2].season_id, "2009-10");
    }

    // -- fetching --

    struct OnePlayer {
        career_calls: AtomicUsize,
    }

    #[async_trait]
    impl StatsProvider for OnePlayer {
        async fn find_player_id(&self, name: &str) -> Result<Option<PlayerId>, ProviderError> {
            Ok((name == "Known Player").then_some(PlayerId(7)))
        }

        async fn career_totals(&self, _id: PlayerId) -> Result<Vec<SeasonTotals>, ProviderError> {
            self.career_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![
                totals("2001-02", "TOT", 60, 1200.0),
                totals("2001-02", "BOS", 30, 600.0),
                totals("2001-02", "NYK", 30, 600.0),
            ])
        }
    }

    #[tokio::test]
    async fn unknown_name_reports_interpolated_message() {
        let provider = OnePlayer {
            career_calls: AtomicUsize::new(0),
        };
        let stats = get_player_stats(&provider, "Nobody Atall", FetchOptions::default())
            .await
            .unwrap();

        assert_eq!(
            stats,
            PlayerStats::NotFound {
                message: "Player Nobody Atall not found!".into()
            }
        );
        assert_eq!(provider.career_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn query_is_trimmed_before_resolving() {
        let provider = OnePlayer {
            career_calls: AtomicUsize::new(0),
        };
        let stats = get_player_stats(&provider, "  Known Player ", FetchOptions::default())
            .await
            .unwrap();
        let PlayerStats::Found(records) = stats else {
            panic!("expected the trimmed name to resolve");
        };
        assert_eq!(records.len(), 3);
    }

    #[tokio::test]
    async fn collapse_option_applied_to_fetched_rows() {
        let provider = OnePlayer {
            career_calls: AtomicUsize::new(0),
        };
        let options = FetchOptions {
            collapse_traded_seasons: true,
        };
        let stats = get_player_stats(&provider, "Known Player", options)
            .await
            .unwrap();
        let PlayerStats::Found(records) = stats else {
            panic!("expected Found");
        };
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].team, "TOT");
        assert_eq!(records[0].pts, 20.0);
    }
}
