// Head-to-head comparison: per-category winners, stat score, accolade tiebreak.

use std::fmt;
use tracing::info;

use crate::accolades::{AccoladeTable, Accolades};
use crate::provider::{ProviderError, StatsProvider};
use crate::stats::{compute_career_averages, get_player_stats, CareerAverages, FetchOptions, PlayerStats};

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Stat categories, in comparison and display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Points,
    Assists,
    Rebounds,
    Steals,
    Blocks,
    FieldGoalPct,
    ThreePointPct,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Points,
        Category::Assists,
        Category::Rebounds,
        Category::Steals,
        Category::Blocks,
        Category::FieldGoalPct,
        Category::ThreePointPct,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Points => "PTS",
            Category::Assists => "AST",
            Category::Rebounds => "REB",
            Category::Steals => "STL",
            Category::Blocks => "BLK",
            Category::FieldGoalPct => "FG%",
            Category::ThreePointPct => "3P%",
        }
    }

    pub fn value(self, avg: &CareerAverages) -> f64 {
        match self {
            Category::Points => avg.pts,
            Category::Assists => avg.ast,
            Category::Rebounds => avg.reb,
            Category::Steals => avg.stl,
            Category::Blocks => avg.blk,
            Category::FieldGoalPct => avg.fg_pct,
            Category::ThreePointPct => avg.fg3_pct,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Which side of the comparison won something.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

/// Outcome of a single category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryResult {
    pub category: Category,
    pub first: f64,
    pub second: f64,
    /// `None` on a tie.
    pub winner: Option<Side>,
}

/// Result of the championship tiebreak when the stat score is level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tiebreak {
    Championships(Side),
    /// Both championship counts known and equal.
    TooClose,
    /// At least one player has no accolade data; nothing is decided.
    Undecided,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Stats(Side),
    StatsTied(Tiebreak),
}

/// A completed comparison between two players.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub first_name: String,
    pub second_name: String,
    pub first_averages: CareerAverages,
    pub second_averages: CareerAverages,
    pub categories: Vec<CategoryResult>,
    pub first_score: u32,
    pub second_score: u32,
    pub first_accolades: Accolades,
    pub second_accolades: Accolades,
    pub verdict: Verdict,
}

impl Comparison {
    pub fn name(&self, side: Side) -> &str {
        match side {
            Side::First => &self.first_name,
            Side::Second => &self.second_name,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::First => self.first_score,
            Side::Second => self.second_score,
        }
    }
}

/// Either a comparison, or the messages explaining why none was made.
#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonOutcome {
    Compared(Box<Comparison>),
    Failed { messages: Vec<String> },
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Compare every category. Strictly greater wins; equal is a tie.
pub fn compare_categories(first: &CareerAverages, second: &CareerAverages) -> Vec<CategoryResult> {
    Category::ALL
        .iter()
        .map(|&category| {
            let a = category.value(first);
            let b = category.value(second);
            let winner = if a > b {
                Some(Side::First)
            } else if b > a {
                Some(Side::Second)
            } else {
                None
            };
            CategoryResult {
                category,
                first: a,
                second: b,
                winner,
            }
        })
        .collect()
}

/// Count category wins per side: `(first, second)`.
pub fn tally(results: &[CategoryResult]) -> (u32, u32) {
    results.iter().fold((0, 0), |(a, b), r| match r.winner {
        Some(Side::First) => (a + 1, b),
        Some(Side::Second) => (a, b + 1),
        None => (a, b),
    })
}

/// Championship counts decide a level stat score.
pub fn championship_tiebreak(first: &Accolades, second: &Accolades) -> Tiebreak {
    match (first.championships(), second.championships()) {
        (Some(a), Some(b)) if a > b => Tiebreak::Championships(Side::First),
        (Some(a), Some(b)) if b > a => Tiebreak::Championships(Side::Second),
        (Some(_), Some(_)) => Tiebreak::TooClose,
        _ => Tiebreak::Undecided,
    }
}

pub fn decide(first_score: u32, second_score: u32, first: &Accolades, second: &Accolades) -> Verdict {
    if first_score > second_score {
        Verdict::Stats(Side::First)
    } else if second_score > first_score {
        Verdict::Stats(Side::Second)
    } else {
        Verdict::StatsTied(championship_tiebreak(first, second))
    }
}

/// Build a comparison from already-computed averages.
pub fn compare_averages(
    first_name: &str,
    first_averages: CareerAverages,
    second_name: &str,
    second_averages: CareerAverages,
    accolades: &AccoladeTable,
) -> Comparison {
    let categories = compare_categories(&first_averages, &second_averages);
    let (first_score, second_score) = tally(&categories);
    let first_accolades = accolades.lookup(first_name);
    let second_accolades = accolades.lookup(second_name);
    let verdict = decide(first_score, second_score, &first_accolades, &second_accolades);

    Comparison {
        first_name: first_name.to_string(),
        second_name: second_name.to_string(),
        first_averages,
        second_averages,
        categories,
        first_score,
        second_score,
        first_accolades,
        second_accolades,
        verdict,
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Fetch both players in order and compare them.
///
/// Both names are always looked up. If either is missing, no averages are
/// computed and the outcome carries the not-found messages.
pub async fn compare_players<P: StatsProvider + ?Sized>(
    provider: &P,
    accolades: &AccoladeTable,
    first_name: &str,
    second_name: &str,
    options: FetchOptions,
) -> Result<ComparisonOutcome, ProviderError> {
    let first_name = first_name.trim();
    let second_name = second_name.trim();

    let first = get_player_stats(provider, first_name, options).await?;
    let second = get_player_stats(provider, second_name, options).await?;

    let (first_records, second_records) = match (first, second) {
        (PlayerStats::Found(a), PlayerStats::Found(b)) => (a, b),
        (first, second) => {
            let messages = [first, second]
                .into_iter()
                .filter_map(|s| match s {
                    PlayerStats::NotFound { message } => Some(message),
                    PlayerStats::Found(_) => None,
                })
                .collect();
            return Ok(ComparisonOutcome::Failed { messages });
        }
    };

    let comparison = compare_averages(
        first_name,
        compute_career_averages(&first_records),
        second_name,
        compute_career_averages(&second_records),
        accolades,
    );
    info!(
        "compared '{}' vs '{}': {}-{}",
        first_name, second_name, comparison.first_score, comparison.second_score
    );

    Ok(ComparisonOutcome::Compared(Box::new(comparison)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
