//! filmguess - film title trivia with typo-tolerant answers
//!
//! Players are shown a numbered, dated list of films and type the title of
//! each one. A guess counts when its normalized Levenshtein similarity to one
//! of the accepted titles reaches a threshold (0.8 by default).
//!
//! # Features
//! - Pure, total matching core ([`is_similar`]), safe to call from any thread
//! - Catalog loading from `Title / Alt Title (Year)` lists
//! - Pluggable persistence of found movies ([`ProgressStore`])
//! - Quiz sessions and match-quality metrics

pub mod algorithms;
pub mod catalog;
pub mod config;
pub mod matcher;
pub mod metrics;
pub mod progress;
pub mod quiz;

pub use algorithms::{EditDistance, Similarity};
pub use catalog::{Catalog, CatalogError, Movie};
pub use config::{ConfigError, QuizConfig};
pub use matcher::{is_similar, is_similar_default, Candidate, TitleMatcher, DEFAULT_THRESHOLD};
pub use progress::{JsonFileStore, MemoryStore, ProgressError, ProgressStore};
pub use quiz::{Outcome, Quiz, QuizError};
