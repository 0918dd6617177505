//! Evaluation of match decisions.
//!
//! Runs the matcher over guesses whose correct answer is known and counts
//! hits and misses, so a threshold can be checked against real typos.

use crate::matcher::TitleMatcher;
use serde::{Deserialize, Serialize};

/// Confusion matrix values for classification evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    /// Accepted guesses that should have been accepted
    pub true_positives: usize,
    /// Accepted guesses that should have been rejected
    pub false_positives: usize,
    /// Rejected guesses that should have been accepted
    pub false_negatives: usize,
    /// Rejected guesses that should have been rejected
    pub true_negatives: usize,
}

impl ConfusionMatrix {
    pub fn record(&mut self, predicted: bool, expected: bool) {
        match (predicted, expected) {
            (true, true) => self.true_positives += 1,
            (true, false) => self.false_positives += 1,
            (false, true) => self.false_negatives += 1,
            (false, false) => self.true_negatives += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.false_negatives + self.true_negatives
    }

    /// TP / (TP + FP)
    pub fn precision(&self) -> f64 {
        let denominator = self.true_positives + self.false_positives;
        if denominator == 0 {
            // nothing accepted: perfect only if nothing was missed either
            if self.false_negatives == 0 { 1.0 } else { 0.0 }
        } else {
            self.true_positives as f64 / denominator as f64
        }
    }

    /// TP / (TP + FN)
    pub fn recall(&self) -> f64 {
        let denominator = self.true_positives + self.false_negatives;
        if denominator == 0 {
            if self.false_positives == 0 { 1.0 } else { 0.0 }
        } else {
            self.true_positives as f64 / denominator as f64
        }
    }

    /// Weighted harmonic mean of precision and recall.
    ///
    /// `beta = 1.0` gives F1; `beta < 1` favours precision (fewer wrong
    /// titles accepted), `beta > 1` favours recall (fewer typos rejected).
    pub fn f_score(&self, beta: f64) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 {
            return 0.0;
        }
        let beta_sq = beta * beta;
        (1.0 + beta_sq) * p * r / (beta_sq * p + r)
    }

    /// Share of correct decisions; 1.0 for an empty matrix
    pub fn accuracy(&self) -> f64 {
        match self.total() {
            0 => 1.0,
            total => (self.true_positives + self.true_negatives) as f64 / total as f64,
        }
    }
}

/// A guess with the titles it was made against and whether it should count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelledGuess {
    pub guess: String,
    pub targets: Vec<String>,
    pub expected: bool,
}

impl LabelledGuess {
    pub fn new(guess: impl Into<String>, targets: &[&str], expected: bool) -> Self {
        Self {
            guess: guess.into(),
            targets: targets.iter().map(|t| t.to_string()).collect(),
            expected,
        }
    }
}

/// Run `matcher` over `samples` and tally its decisions.
pub fn evaluate(matcher: &TitleMatcher, samples: &[LabelledGuess]) -> ConfusionMatrix {
    let mut matrix = ConfusionMatrix::default();
    for sample in samples {
        matrix.record(matcher.is_match(&sample.guess, &sample.targets), sample.expected);
    }
    matrix
}
