//! Guess matching
//!
//! Decides whether a free-text guess names one of the acceptable titles of a
//! movie. Both sides are normalized (trim + lowercase), scored with the
//! normalized Levenshtein similarity, and accepted when the score reaches the
//! threshold. Every input yields a decision; nothing here fails.

use crate::algorithms::levenshtein::{levenshtein_similarity_at_least, levenshtein_similarity_chars};
use crate::algorithms::normalize::normalize_title_cow;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Similarity a guess needs to count as correct when none is given.
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// Minimum batch size for parallel processing.
///
/// Below this, scoring sequentially beats the cost of handing work to the
/// rayon pool. Titles are short, so each comparison is cheap.
const PARALLEL_THRESHOLD: usize = 100;

type Chars = SmallVec<[char; 64]>;

fn normalized_chars(s: &str) -> Chars {
    normalize_title_cow(s).chars().collect()
}

/// The best-scoring target for a guess (diagnostics only).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    /// Position of the target in the slice it came from
    pub index: usize,
    pub target: String,
    pub score: f64,
}

/// Threshold-based title matcher.
///
/// No range check is done on the threshold: values at or below 0.0 accept
/// any pair, values above 1.0 (or NaN) accept none.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TitleMatcher {
    pub threshold: f64,
}

impl Default for TitleMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl TitleMatcher {
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Similarity of two raw strings after normalization.
    ///
    /// Symmetric; 1.0 iff both normalize to the same string.
    #[must_use]
    pub fn score(&self, a: &str, b: &str) -> f64 {
        levenshtein_similarity_chars(&normalized_chars(a), &normalized_chars(b))
    }

    /// Whether `input` is close enough to any of `targets`.
    ///
    /// Stops at the first acceptable target. An empty `targets` never matches.
    #[must_use]
    pub fn is_match<S: AsRef<str>>(&self, input: &str, targets: &[S]) -> bool {
        let guess = normalized_chars(input);
        targets.iter().any(|target| {
            let target = normalized_chars(target.as_ref());
            levenshtein_similarity_at_least(&guess, &target, self.threshold)
        })
    }

    /// Highest-scoring target, first one winning ties. `None` if `targets` is empty.
    #[must_use]
    pub fn best_match<S: AsRef<str>>(&self, input: &str, targets: &[S]) -> Option<Candidate> {
        let guess = normalized_chars(input);
        let mut best: Option<Candidate> = None;

        for (index, target) in targets.iter().enumerate() {
            let target = target.as_ref();
            let score = levenshtein_similarity_chars(&guess, &normalized_chars(target));
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(Candidate {
                    index,
                    target: target.to_string(),
                    score,
                });
            }
        }

        best
    }

    /// Evaluate many guesses against the same targets.
    ///
    /// Results are in input order. Large batches are split across threads.
    #[must_use]
    pub fn matches_many<I, S>(&self, inputs: &[I], targets: &[S]) -> Vec<bool>
    where
        I: AsRef<str> + Sync,
        S: AsRef<str> + Sync,
    {
        if inputs.len() < PARALLEL_THRESHOLD {
            inputs
                .iter()
                .map(|input| self.is_match(input.as_ref(), targets))
                .collect()
        } else {
            inputs
                .par_iter()
                .map(|input| self.is_match(input.as_ref(), targets))
                .collect()
        }
    }
}

/// Whether `input` matches any of `targets` with a similarity of at least
/// `threshold`.
///
/// # Example
/// ```
/// use filmguess::is_similar;
///
/// assert!(is_similar("Matric", &["Matrix"], 0.8));
/// assert!(!is_similar("Matric", &["Matrix"], 0.9));
/// assert!(!is_similar::<&str>("Matrix", &[], 0.0));
/// ```
#[must_use]
pub fn is_similar<S: AsRef<str>>(input: &str, targets: &[S], threshold: f64) -> bool {
    TitleMatcher::new(threshold).is_match(input, targets)
}

/// [`is_similar`] with [`DEFAULT_THRESHOLD`].
#[must_use]
pub fn is_similar_default<S: AsRef<str>>(input: &str, targets: &[S]) -> bool {
    is_similar(input, targets, DEFAULT_THRESHOLD)
}
