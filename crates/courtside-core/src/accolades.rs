// Career accolade table: championships, Finals MVPs, and MVPs per player.
//
// Keys are title-normalized full names, so lookups ignore case and stray
// whitespace. The built-in list can be extended from config/accolades.toml.

use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Career accolade counts for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccoladeRecord {
    pub championships: u32,
    pub finals_mvps: u32,
    pub mvps: u32,
}

impl AccoladeRecord {
    pub const fn new(championships: u32, finals_mvps: u32, mvps: u32) -> Self {
        Self {
            championships,
            finals_mvps,
            mvps,
        }
    }
}

/// Accolades as displayed: either known counts or "not available".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accolades(pub Option<AccoladeRecord>);

impl Accolades {
    pub fn championships(&self) -> Option<u32> {
        self.0.map(|r| r.championships)
    }
}

impl fmt::Display for Accolades {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(r) => write!(
                f,
                "Championships: {}, Finals MVPs: {}, MVPs: {}",
                r.championships, r.finals_mvps, r.mvps
            ),
            None => f.write_str("Championships: N/A, Finals MVPs: N/A, MVPs: N/A"),
        }
    }
}

/// Built-in accolade list.
const BUILTIN: &[(&str, AccoladeRecord)] = &[
    ("LeBron James", AccoladeRecord::new(4, 4, 4)),
    ("Kevin Durant", AccoladeRecord::new(2, 2, 1)),
    ("Stephen Curry", AccoladeRecord::new(4, 1, 2)),
    ("Michael Jordan", AccoladeRecord::new(6, 6, 5)),
    ("Tim Duncan", AccoladeRecord::new(5, 3, 2)),
    ("Shaquille O'Neal", AccoladeRecord::new(4, 3, 1)),
    ("Kobe Bryant", AccoladeRecord::new(5, 2, 1)),
    ("Dirk Nowitzki", AccoladeRecord::new(1, 1, 1)),
    ("Dwyane Wade", AccoladeRecord::new(3, 1, 0)),
    ("Kareem Abdul-Jabbar", AccoladeRecord::new(6, 2, 6)),
    ("Wilt Chamberlain", AccoladeRecord::new(2, 1, 4)),
    ("Bill Russell", AccoladeRecord::new(11, 1, 5)),
    ("Larry Bird", AccoladeRecord::new(3, 2, 3)),
    ("Magic Johnson", AccoladeRecord::new(5, 3, 3)),
    ("Kevin Garnett", AccoladeRecord::new(1, 0, 1)),
    ("Tracy McGrady", AccoladeRecord::new(0, 0, 0)),
    ("Hakeem Olajuwon", AccoladeRecord::new(2, 2, 1)),
    ("Damian Lillard", AccoladeRecord::new(0, 0, 0)),
    ("Giannis Antetokounmpo", AccoladeRecord::new(1, 1, 2)),
    ("Nikola Jokic", AccoladeRecord::new(1, 1, 3)),
    ("Russell Westbrook", AccoladeRecord::new(0, 0, 1)),
    ("James Harden", AccoladeRecord::new(0, 0, 1)),
    ("Kawhi Leonard", AccoladeRecord::new(2, 2, 0)),
];

/// Normalize a player name for accolade lookup.
///
/// Trims, collapses internal whitespace, and title-cases: a letter is
/// uppercased when it follows a non-letter and lowercased otherwise, so
/// `"shaquille o'neal"` becomes `"Shaquille O'Neal"`.
pub fn normalize_name(name: &str) -> String {
    let collapsed = name.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut out = String::with_capacity(collapsed.len());
    let mut prev_is_letter = false;
    for c in collapsed.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

/// Read-only accolade lookup keyed by normalized name.
#[derive(Debug, Clone)]
pub struct AccoladeTable {
    entries: HashMap<String, AccoladeRecord>,
}

impl AccoladeTable {
    /// The built-in table.
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN.iter().map(|(name, r)| (name.to_string(), *r)))
    }

    /// Build a table from `(name, record)` pairs. Later entries for the same
    /// normalized name replace earlier ones.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, AccoladeRecord)>,
    {
        let entries = entries
            .into_iter()
            .map(|(name, record)| (normalize_name(&name), record))
            .collect();
        Self { entries }
    }

    /// Add or replace entries, e.g. from the user's accolades file.
    pub fn extend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, AccoladeRecord)>,
    {
        for (name, record) in entries {
            self.entries.insert(normalize_name(&name), record);
        }
    }

    /// Look up a player's accolades. Unknown players are "not available".
    pub fn lookup(&self, name: &str) -> Accolades {
        let key = normalize_name(name);
        let found = self.entries.get(&key).copied();
        if found.is_none() {
            debug!("no accolade entry for '{}'", key);
        }
        Accolades(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_matches_expected_forms() {
        assert_eq!(normalize_name(" lebron james "), "Lebron James");
        assert_eq!(normalize_name("LeBron James"), "Lebron James");
        assert_eq!(normalize_name("shaquille o'neal"), "Shaquille O'Neal");
        assert_eq!(normalize_name("KAREEM ABDUL-JABBAR"), "Kareem Abdul-Jabbar");
        assert_eq!(normalize_name("tracy   mcgrady"), "Tracy Mcgrady");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        let table = AccoladeTable::builtin();
        let a = table.lookup(" lebron james ");
        let b = table.lookup("LeBron James");
        assert_eq!(a, b);
        assert_eq!(a.0, Some(AccoladeRecord::new(4, 4, 4)));
    }

    #[test]
    fn mixed_case_builtin_names_are_reachable() {
        let table = AccoladeTable::builtin();
        assert_eq!(table.lookup("Tracy McGrady").championships(), Some(0));
        assert_eq!(table.lookup("shaquille o'neal").championships(), Some(4));
        assert_eq!(table.lookup("bill russell").championships(), Some(11));
        assert_eq!(table.entries.len(), BUILTIN.len());
    }

    #[test]
    fn unknown_player_is_not_available() {
        let table = AccoladeTable::builtin();
        let acc = table.lookup("Anthony Davis");
        assert_eq!(acc, Accolades(None));
        assert_eq!(acc.championships(), None);
        assert_eq!(
            acc.to_string(),
            "Championships: N/A, Finals MVPs: N/A, MVPs: N/A"
        );
    }

    #[test]
    fn extend_adds_and_overrides() {
        let mut table = AccoladeTable::builtin();
        table.extend(vec![
            ("anthony davis".to_string(), AccoladeRecord::new(1, 0, 0)),
            ("Nikola Jokic".to_string(), AccoladeRecord::new(1, 1, 4)),
        ]);
        assert_eq!(table.lookup("Anthony Davis").championships(), Some(1));
        assert_eq!(table.lookup("nikola jokic").0.map(|r| r.mvps), Some(4));
        assert_eq!(table.entries.len(), BUILTIN.len() + 1);
    }

    #[test]
    fn display_known_record() {
        let acc = AccoladeTable::builtin().lookup("Michael Jordan");
        assert_eq!(
            acc.to_string(),
            "Championships: 6, Finals MVPs: 6, MVPs: 5"
        );
    }
}
