//! Levenshtein (edit) distance
//!
//! Single-row dynamic programming over `char`s:
//! - O(m*n) time, O(min(m,n)) space
//! - Rows up to 64 cells stay on the stack
//! - Optional early termination with a max distance threshold

use super::{score_from_distance, EditDistance};
use smallvec::SmallVec;

/// Row cells kept inline before spilling to the heap.
/// Film titles are almost always shorter than this.
const INLINE_ROW: usize = 64;

type CharBuf = SmallVec<[char; INLINE_ROW]>;
type Row = SmallVec<[usize; INLINE_ROW]>;

/// Edit distance between two char slices.
///
/// `row[j]` holds the distance between the current prefix of the longer
/// slice and the first `j` chars of the shorter one. `diag` carries the
/// value of the cell up-left of the one being written.
#[inline]
fn dp_distance(a: &[char], b: &[char]) -> usize {
    // Shorter slice on the column axis
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return long.len();
    }

    let mut row: Row = (0..=short.len()).collect();

    for (i, &lc) in long.iter().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;

        for (j, &sc) in short.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if lc == sc {
                diag
            } else {
                1 + above.min(row[j]).min(diag)
            };
            diag = above;
        }
    }

    row[short.len()]
}

/// Edit distance between two char slices, giving up once it must exceed `max`.
#[inline]
fn dp_distance_bounded(a: &[char], b: &[char], max: usize) -> Option<usize> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    // Every extra char in the longer slice costs at least one insertion
    if long.len() - short.len() > max {
        return None;
    }
    if short.is_empty() {
        return Some(long.len());
    }

    let mut row: Row = (0..=short.len()).collect();

    for (i, &lc) in long.iter().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        let mut row_min = row[0];

        for (j, &sc) in short.iter().enumerate() {
            let above = row[j + 1];
            let cell = if lc == sc {
                diag
            } else {
                1 + above.min(row[j]).min(diag)
            };
            row[j + 1] = cell;
            row_min = row_min.min(cell);
            diag = above;
        }

        // Values never decrease going down a column
        if row_min > max {
            return None;
        }
    }

    let result = row[short.len()];
    (result <= max).then_some(result)
}

/// Levenshtein distance calculator with optional early termination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Levenshtein {
    /// Maximum distance to compute (for early termination)
    pub max_distance: Option<usize>,
}

impl Levenshtein {
    #[must_use]
    pub fn new() -> Self {
        Self { max_distance: None }
    }

    #[must_use]
    pub fn with_max_distance(max_distance: usize) -> Self {
        Self {
            max_distance: Some(max_distance),
        }
    }

    /// Returns `None` if the distance exceeds `max_distance`.
    #[must_use]
    pub fn compute(&self, a: &str, b: &str) -> Option<usize> {
        match self.max_distance {
            Some(max) => levenshtein_bounded(a, b, max),
            None => Some(levenshtein(a, b)),
        }
    }
}

impl EditDistance for Levenshtein {
    fn distance(&self, a: &str, b: &str) -> usize {
        // Past the threshold, report max + 1 ("further than allowed")
        match self.max_distance {
            Some(max) => levenshtein_bounded(a, b, max).unwrap_or(max.saturating_add(1)),
            None => levenshtein(a, b),
        }
    }

    fn name(&self) -> &'static str {
        "levenshtein"
    }
}

/// Minimum number of single-char insertions, deletions or substitutions
/// turning `a` into `b`.
///
/// # Example
/// ```
/// use filmguess::algorithms::levenshtein::levenshtein;
///
/// assert_eq!(levenshtein("kitten", "sitting"), 3);
/// assert_eq!(levenshtein("matric", "matrix"), 1);
/// ```
#[inline]
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let a_chars: CharBuf = a.chars().collect();
    let b_chars: CharBuf = b.chars().collect();
    dp_distance(&a_chars, &b_chars)
}

/// Levenshtein distance, or `None` once it is known to exceed `max_distance`.
///
/// # Example
/// ```
/// use filmguess::algorithms::levenshtein::levenshtein_bounded;
///
/// assert_eq!(levenshtein_bounded("abc", "abd", 2), Some(1));
/// assert_eq!(levenshtein_bounded("abcdef", "ghijkl", 3), None);
/// ```
#[inline]
#[must_use]
pub fn levenshtein_bounded(a: &str, b: &str, max_distance: usize) -> Option<usize> {
    if a == b {
        return Some(0);
    }
    let a_chars: CharBuf = a.chars().collect();
    let b_chars: CharBuf = b.chars().collect();
    dp_distance_bounded(&a_chars, &b_chars, max_distance)
}

/// Normalized similarity (0.0 to 1.0): `1 - distance / max_len`.
#[inline]
#[must_use]
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    let a_chars: CharBuf = a.chars().collect();
    let b_chars: CharBuf = b.chars().collect();
    levenshtein_similarity_chars(&a_chars, &b_chars)
}

/// Similarity over pre-collected chars, so a guess compared against many
/// titles is only decoded once.
#[inline]
#[must_use]
pub fn levenshtein_similarity_chars(a: &[char], b: &[char]) -> f64 {
    let dist = if a == b { 0 } else { dp_distance(a, b) };
    score_from_distance(dist, a.len(), b.len())
}

/// Whether `levenshtein_similarity_chars(a, b) >= min_similarity`, pruning
/// the DP table when the score clearly cannot get there.
///
/// The bound handed to the DP is rounded up, so pruning never rejects a pair
/// the exact score would accept; the final comparison uses the exact score.
#[must_use]
pub fn levenshtein_similarity_at_least(a: &[char], b: &[char], min_similarity: f64) -> bool {
    // Scores live in [0, 1]; NaN never compares >=
    if min_similarity.is_nan() || min_similarity > 1.0 {
        return false;
    }
    if min_similarity <= 0.0 {
        return true;
    }
    if a == b {
        return true;
    }

    let max_len = a.len().max(b.len());
    let slack = (1.0 - min_similarity) * max_len as f64;

    match dp_distance_bounded(a, b, slack.ceil() as usize) {
        Some(dist) => score_from_distance(dist, a.len(), b.len()) >= min_similarity,
        None => false,
    }
}
