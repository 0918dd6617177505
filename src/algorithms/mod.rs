//! String similarity primitives used by the title matcher
//!
//! Each primitive is a standalone function for composability,
//! plus a trait-based interface so the matcher can be handed any metric.

pub mod levenshtein;
pub mod normalize;

pub use levenshtein::*;
pub use normalize::*;

/// Trait for all similarity metrics.
/// Returns a value between 0.0 (completely different) and 1.0 (identical).
pub trait Similarity: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;

    /// Name of the algorithm for debugging/logging
    fn name(&self) -> &'static str;
}

/// Trait for edit distance algorithms that return integer distances
pub trait EditDistance: Send + Sync {
    fn distance(&self, a: &str, b: &str) -> usize;

    /// Convert to normalized similarity score (0.0 to 1.0).
    ///
    /// Lengths are counted in chars. Two empty strings are identical.
    fn similarity(&self, a: &str, b: &str) -> f64 {
        score_from_distance(self.distance(a, b), a.chars().count(), b.chars().count())
    }

    fn name(&self) -> &'static str;
}

/// Blanket implementation: any EditDistance is also a Similarity
impl<T: EditDistance> Similarity for T {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        EditDistance::similarity(self, a, b)
    }

    fn name(&self) -> &'static str {
        EditDistance::name(self)
    }
}

/// `1 - distance / max_len`, with two empty strings scoring 1.0.
#[inline]
#[must_use]
pub fn score_from_distance(distance: usize, len_a: usize, len_b: usize) -> f64 {
    let max_len = len_a.max(len_b);
    if max_len == 0 {
        1.0
    } else {
        1.0 - (distance as f64 / max_len as f64)
    }
}
