//! Pure selection over the clan dataset: filtering, grouping, lookup, totals.
//! Nothing here produces markup.

use std::collections::BTreeMap;
use std::fmt;

use crate::types::ClanRecord;

/// Letters offered by the alphabet filter, in display order
pub const ALPHABET: &[&str] = &[
    "ALL", "B", "C", "D", "F", "G", "H", "J", "K", "L", "M", "N", "Q", "S", "T", "X", "Z",
];

pub const ALL_LETTERS: &str = "ALL";

/// Alphabet filter selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LetterFilter {
    All,
    Letter(String),
}

impl LetterFilter {
    /// `ALL` in any case, or a single alphabetic character (upper-cased).
    /// Anything else selects everything.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case(ALL_LETTERS) {
            return LetterFilter::All;
        }
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_alphabetic() => LetterFilter::Letter(c.to_uppercase().collect()),
            _ => LetterFilter::All,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LetterFilter::All => ALL_LETTERS,
            LetterFilter::Letter(letter) => letter,
        }
    }

    pub fn matches(&self, clan: &ClanRecord) -> bool {
        match self {
            LetterFilter::All => true,
            LetterFilter::Letter(letter) => clan.first_letter() == *letter,
        }
    }
}

impl fmt::Display for LetterFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clans passing the alphabet filter, in dataset order
pub fn filter_by_letter<'a>(clans: &'a [ClanRecord], filter: &LetterFilter) -> Vec<&'a ClanRecord> {
    clans.iter().filter(|clan| filter.matches(clan)).collect()
}

/// Group clans by upper-cased first letter. Keys ascend; each group keeps
/// the order it was given.
pub fn group_by_first_letter<'a>(
    clans: &[&'a ClanRecord],
) -> BTreeMap<String, Vec<&'a ClanRecord>> {
    let mut groups: BTreeMap<String, Vec<&'a ClanRecord>> = BTreeMap::new();
    for clan in clans {
        groups.entry(clan.first_letter()).or_default().push(clan);
    }
    groups
}

/// Case-insensitive name-prefix search, in dataset order.
///
/// The query is used as typed (only lower-cased), so surrounding spaces take
/// part in the match.
pub fn search_by_prefix<'a>(clans: &'a [ClanRecord], query: &str) -> Vec<&'a ClanRecord> {
    let query = query.to_lowercase();
    clans
        .iter()
        .filter(|clan| clan.name.to_lowercase().starts_with(&query))
        .collect()
}

/// First clan whose name is exactly `name` (case-sensitive)
pub fn find_by_name<'a>(clans: &'a [ClanRecord], name: &str) -> Option<&'a ClanRecord> {
    clans.iter().find(|clan| clan.name == name)
}

/// Aggregate counts shown by the stats counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub clans: u64,
    pub praises: u64,
}

pub fn totals(clans: &[ClanRecord]) -> Totals {
    Totals {
        clans: clans.len() as u64,
        praises: clans.iter().map(|c| c.izithakazelo.len() as u64).sum(),
    }
}
