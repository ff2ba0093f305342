//! Fuzzy title matching between local folder names and catalog items.
//!
//! Folder names like `Inception (2010)` are normalized the same way as catalog
//! names, then every catalog item of the requested type is scored:
//!
//! | rule | points |
//! |---|---|
//! | normalized names equal | 100 |
//! | one name contains the other | 50 |
//! | otherwise, shared words / larger word count | up to 30 |
//! | both years known and equal | +20 |
//!
//! The highest score wins, the first candidate wins ties, and a best score at or
//! below [`MatchPolicy::min_score`] means no match.

use crate::catalog::{Catalog, CatalogItem, ItemType};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::path::PathBuf;
use unicode_normalization::UnicodeNormalization;

pub const DEFAULT_MIN_MATCH_SCORE: f64 = 40.0;
pub const DEFAULT_MAX_GENRES: usize = 5;

const EXACT_SCORE: f64 = 100.0;
const CONTAINS_SCORE: f64 = 50.0;
const WORD_OVERLAP_WEIGHT: f64 = 30.0;
const YEAR_BONUS: f64 = 20.0;

static YEAR_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\((\d{4})\)").expect("year marker regex is valid"));
static YEAR_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\(\d{4}\).*$").expect("year suffix regex is valid"));
static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("punctuation regex is valid"));

/// Matching and linking limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchPolicy {
    /// A best score at or below this is rejected.
    pub min_score: f64,
    /// Genres linked per item, taken in catalog order.
    pub max_genres: usize,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_MATCH_SCORE,
            max_genres: DEFAULT_MAX_GENRES,
        }
    }
}

/// Normalize a title for comparison: NFC, drop a `(YYYY)` marker and anything
/// after it, lower-case, strip punctuation, collapse whitespace.
pub fn normalize_title(name: &str) -> String {
    let composed: String = name.nfc().collect();
    let lowered = composed.to_lowercase();
    let without_year = YEAR_SUFFIX.replace(&lowered, "");
    let cleaned = PUNCTUATION.replace_all(&without_year, "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First `(YYYY)` marker in a folder name.
pub fn parse_year(name: &str) -> Option<i32> {
    YEAR_MARKER
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Similarity score between two normalized titles.
pub fn score(
    local: &str,
    local_year: Option<i32>,
    candidate: &str,
    candidate_year: Option<i32>,
) -> f64 {
    let mut total = if !local.is_empty() && local == candidate {
        EXACT_SCORE
    } else if !local.is_empty()
        && !candidate.is_empty()
        && (candidate.contains(local) || local.contains(candidate))
    {
        CONTAINS_SCORE
    } else {
        word_overlap(local, candidate) * WORD_OVERLAP_WEIGHT
    };

    if let (Some(a), Some(b)) = (local_year, candidate_year) {
        if a == b {
            total += YEAR_BONUS;
        }
    }
    total
}

fn word_overlap(a: &str, b: &str) -> f64 {
    let left: HashSet<&str> = a.split_whitespace().collect();
    let right: HashSet<&str> = b.split_whitespace().collect();
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    let shared = left.intersection(&right).count();
    shared as f64 / left.len().max(right.len()) as f64
}

/// A title folder found directly under a media root.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalEntry {
    /// Folder basename, also used as the symlink name.
    pub name: String,
    pub absolute_path: PathBuf,
    pub parsed_year: Option<i32>,
    pub normalized_name: String,
}

impl LocalEntry {
    pub fn new(name: impl Into<String>, absolute_path: impl Into<PathBuf>) -> Self {
        let name = name.into();
        Self {
            parsed_year: parse_year(&name),
            normalized_name: normalize_title(&name),
            absolute_path: absolute_path.into(),
            name,
        }
    }
}

/// Winning candidate and its score.
#[derive(Debug, Clone, Copy)]
pub struct TitleMatch<'a> {
    pub item: &'a CatalogItem,
    pub score: f64,
}

struct Candidate<'a> {
    item: &'a CatalogItem,
    normalized: String,
}

/// Catalog items of one type with their names normalized once up front.
pub struct TitleMatcher<'a> {
    candidates: Vec<Candidate<'a>>,
    min_score: f64,
}

impl<'a> TitleMatcher<'a> {
    pub fn new(catalog: &'a Catalog, item_type: ItemType, policy: &MatchPolicy) -> Self {
        let candidates = catalog
            .items()
            .iter()
            .filter(|item| item.item_type == item_type)
            .map(|item| Candidate {
                item,
                normalized: normalize_title(&item.name),
            })
            .collect();
        Self {
            candidates,
            min_score: policy.min_score,
        }
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Best candidate for `entry`, or `None` when nothing clears the threshold.
    pub fn best_match(&self, entry: &LocalEntry) -> Option<TitleMatch<'a>> {
        let mut best: Option<TitleMatch<'a>> = None;
        for candidate in &self.candidates {
            let candidate_score = score(
                &entry.normalized_name,
                entry.parsed_year,
                &candidate.normalized,
                candidate.item.production_year,
            );
            if candidate_score <= self.min_score {
                continue;
            }
            let better = best.map_or(true, |current| candidate_score > current.score);
            if better {
                best = Some(TitleMatch {
                    item: candidate.item,
                    score: candidate_score,
                });
            }
        }
        best
    }
}

/// One-off lookup: best catalog item of `item_type` for a local folder name.
pub fn find_match<'a>(
    local_name: &str,
    parsed_year: Option<i32>,
    catalog: &'a Catalog,
    item_type: ItemType,
    policy: &MatchPolicy,
) -> Option<TitleMatch<'a>> {
    let mut entry = LocalEntry::new(local_name, PathBuf::new());
    entry.parsed_year = parsed_year;
    TitleMatcher::new(catalog, item_type, policy).best_match(&entry)
}
