//! Club name matching
//!
//! Coaches type their club's name freehand at registration, so the same
//! club arrives as "Hawks Lacrosse Club", "The Hawks" and "hawks lax".
//! Names are normalized (case, punctuation and noise words removed) and
//! then scored by edit distance.

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Words that say nothing about which club a name refers to
const NOISE_WORDS: &[&str] = &[
    "the", "club", "lacrosse", "lax", "association", "athletic", "athletics", "youth", "sports",
    "inc", "llc", "fc", "sc",
];

/// Score at or above which two names are treated as the same club
pub const DUPLICATE_THRESHOLD: u8 = 85;

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("static pattern is valid"));

/// A candidate name and how closely it matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubMatch {
    pub name: String,
    pub score: u8,
}

pub struct ClubNameMatcher;

impl ClubNameMatcher {
    /// Lowercases, replaces punctuation with spaces, drops noise words and
    /// collapses whitespace
    pub fn normalize(name: &str) -> String {
        let lower = name.to_lowercase();
        let spaced = NON_ALPHANUMERIC.replace_all(&lower, " ");
        spaced
            .split_whitespace()
            .filter(|word| !NOISE_WORDS.contains(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Edit distance between two strings, counted in chars
    pub fn levenshtein(a: &str, b: &str) -> usize {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        if a.is_empty() {
            return b.len();
        }
        if b.is_empty() {
            return a.len();
        }

        let mut previous: Vec<usize> = (0..=b.len()).collect();
        let mut current = vec![0; b.len() + 1];

        for (i, ca) in a.iter().enumerate() {
            current[0] = i + 1;
            for (j, cb) in b.iter().enumerate() {
                let substitution = previous[j] + usize::from(ca != cb);
                current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
            }
            std::mem::swap(&mut previous, &mut current);
        }

        previous[b.len()]
    }

    /// Similarity of two names from 0 to 100
    ///
    /// Names that normalize to the same text score 100. A name that
    /// normalizes to nothing scores 0 against anything else.
    pub fn calculate_similarity(a: &str, b: &str) -> u8 {
        let a = Self::normalize(a);
        let b = Self::normalize(b);

        if a == b {
            return 100;
        }
        if a.is_empty() || b.is_empty() {
            return 0;
        }

        let max_len = a.chars().count().max(b.chars().count());
        let distance = Self::levenshtein(&a, &b);
        // round half up in integers: floor((200 * (max - dist) + max) / (2 * max))
        let score = (200 * (max_len - distance) + max_len) / (2 * max_len);
        score.min(100) as u8
    }

    /// Candidates scoring at least `threshold`, best first, ties by name
    pub fn find_matches<S: AsRef<str>>(name: &str, candidates: &[S], threshold: u8) -> Vec<ClubMatch> {
        let mut matches: Vec<ClubMatch> = candidates
            .iter()
            .map(|candidate| ClubMatch {
                name: candidate.as_ref().to_string(),
                score: Self::calculate_similarity(name, candidate.as_ref()),
            })
            .filter(|m| m.score >= threshold)
            .collect();

        matches.sort_by(|a, b| match b.score.cmp(&a.score) {
            Ordering::Equal => a.name.cmp(&b.name),
            other => other,
        });

        debug!(club = name, candidates = candidates.len(), matched = matches.len(), "club name matched");
        matches
    }

    pub fn best_match<S: AsRef<str>>(name: &str, candidates: &[S], threshold: u8) -> Option<ClubMatch> {
        Self::find_matches(name, candidates, threshold).into_iter().next()
    }

    pub fn is_likely_duplicate(a: &str, b: &str) -> bool {
        Self::calculate_similarity(a, b) >= DUPLICATE_THRESHOLD
    }
}
