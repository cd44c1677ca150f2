// All-time player index and full-name matching.

use courtside_core::provider::{PlayerId, ProviderError};
use serde_json::Value;
use tracing::warn;

use crate::result_set::{self, cell_string, cell_u64};

pub const ENDPOINT: &str = "commonallplayers";
const RESULT_SET: &str = "CommonAllPlayers";

/// One entry of the player index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedPlayer {
    pub id: PlayerId,
    pub full_name: String,
    /// Lowercased, diacritic-folded `full_name` used for matching.
    search_key: String,
}

impl IndexedPlayer {
    pub fn new(id: PlayerId, full_name: &str) -> Self {
        Self {
            id,
            full_name: full_name.to_string(),
            search_key: search_key(full_name),
        }
    }
}

/// Parse a `commonallplayers` response into index entries, in response order.
pub fn parse_player_index(body: Value) -> Result<Vec<IndexedPlayer>, ProviderError> {
    let set = result_set::extract(ENDPOINT, body, RESULT_SET)?;
    let id_col = set.column(ENDPOINT, "PERSON_ID")?;
    let name_col = set.column(ENDPOINT, "DISPLAY_FIRST_LAST")?;

    let mut players = Vec::with_capacity(set.row_set.len());
    for row in &set.row_set {
        let Some(id) = cell_u64(row, id_col) else {
            warn!("skipping index row without a numeric PERSON_ID: {:?}", row.get(id_col));
            continue;
        };
        let name = cell_string(row, name_col);
        if name.is_empty() {
            continue;
        }
        players.push(IndexedPlayer::new(PlayerId(id), &name));
    }
    Ok(players)
}

/// Player for `query`, ignoring case and accents. An exact full-name match
/// wins anywhere in the index; otherwise the first name containing `query`.
/// Exact first keeps "Tim Hardaway" from landing on "Tim Hardaway Jr.".
pub fn find_first_match<'a>(players: &'a [IndexedPlayer], query: &str) -> Option<&'a IndexedPlayer> {
    let needle = search_key(query);
    if needle.is_empty() {
        return None;
    }
    players
        .iter()
        .find(|p| p.search_key == needle)
        .or_else(|| players.iter().find(|p| p.search_key.contains(&needle)))
}

/// Lowercase, fold common Latin diacritics, and collapse whitespace.
pub fn search_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .flat_map(char::to_lowercase)
        .map(fold_diacritic)
        .collect()
}

fn fold_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'ğ' => 'g',
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => 'i',
        'ł' | 'ľ' | 'ĺ' => 'l',
        'ñ' | 'ń' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => 'o',
        'ŕ' | 'ř' => 'r',
        'ś' | 'š' | 'ş' | 'ș' => 's',
        'ť' | 'ț' | 'ţ' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' | 'ų' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}
