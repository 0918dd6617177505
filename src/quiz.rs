//! Quiz session
//!
//! Ties a [`Catalog`] to a [`ProgressStore`]: each submitted guess is run
//! through the matcher, and a correct one is added to the found set and
//! persisted right away.

use crate::catalog::{Catalog, Movie};
use crate::config::QuizConfig;
use crate::matcher::TitleMatcher;
use crate::progress::{ProgressError, ProgressStore};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("No movie numbered {0}")]
    UnknownMovie(u32),

    #[error(transparent)]
    Progress(#[from] ProgressError),
}

/// Result of one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Guess accepted, movie recorded as found
    Correct,
    /// Guess rejected; nothing recorded
    Incorrect,
    /// Movie was already found; the guess was ignored
    AlreadyFound,
}

impl Outcome {
    /// Short message shown to the player
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Correct => "Correct! Well done.",
            Outcome::Incorrect => "Incorrect! Try again.",
            Outcome::AlreadyFound => "Already found.",
        }
    }
}

pub struct Quiz<S: ProgressStore> {
    catalog: Catalog,
    store: S,
    storage_key: String,
    matcher: TitleMatcher,
    /// Found numbers in the order they were found
    found: Vec<u32>,
}

impl<S: ProgressStore> Quiz<S> {
    /// Start a session, restoring previously found movies from `store`.
    ///
    /// Stored numbers the catalog does not know are dropped.
    pub fn new(catalog: Catalog, store: S, config: &QuizConfig) -> Result<Self, QuizError> {
        let stored = store.load(&config.storage_key)?;

        let mut found: Vec<u32> = Vec::with_capacity(stored.len());
        for number in stored {
            if !catalog.contains(number) {
                tracing::warn!(number, key = %config.storage_key, "dropping unknown movie from progress");
            } else if !found.contains(&number) {
                found.push(number);
            }
        }

        tracing::info!(
            found = found.len(),
            total = catalog.len(),
            threshold = config.threshold,
            "quiz ready"
        );

        Ok(Self {
            catalog,
            store,
            storage_key: config.storage_key.clone(),
            matcher: config.matcher(),
            found,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn matcher(&self) -> &TitleMatcher {
        &self.matcher
    }

    pub fn is_found(&self, number: u32) -> bool {
        self.found.contains(&number)
    }

    /// Found numbers in the order they were found
    pub fn found(&self) -> &[u32] {
        &self.found
    }

    /// Movies not found yet, in catalog order
    pub fn remaining(&self) -> impl Iterator<Item = &Movie> {
        self.catalog.iter().filter(|m| !self.is_found(m.number))
    }

    /// `(found, total)`
    pub fn progress(&self) -> (usize, usize) {
        (self.found.len(), self.catalog.len())
    }

    pub fn is_complete(&self) -> bool {
        self.found.len() == self.catalog.len()
    }

    /// Check `guess` against movie `number`.
    ///
    /// A correct guess is persisted before returning. If saving fails the
    /// movie is not marked found, so the session and the store stay in step.
    pub fn submit(&mut self, number: u32, guess: &str) -> Result<Outcome, QuizError> {
        let movie = self
            .catalog
            .get(number)
            .ok_or(QuizError::UnknownMovie(number))?;

        if self.found.contains(&number) {
            return Ok(Outcome::AlreadyFound);
        }

        if !movie.is_answer(guess, &self.matcher) {
            tracing::debug!(number, guess, "incorrect guess");
            return Ok(Outcome::Incorrect);
        }

        let mut updated = self.found.clone();
        updated.push(number);
        self.store.save(&self.storage_key, &updated)?;
        self.found = updated;

        tracing::info!(number, title = %movie.titles[0], "movie found");
        Ok(Outcome::Correct)
    }

    /// Forget all progress, in memory and in the store.
    pub fn reset(&mut self) -> Result<(), QuizError> {
        self.store.save(&self.storage_key, &[])?;
        self.found.clear();
        tracing::info!(key = %self.storage_key, "progress reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::MemoryStore;

    const MOVIES: &str = "\
The Matrix / Matrix (1999)
Pulp Fiction (1994)
Blade Runner / Blade Runner: The Final Cut (1982)
";

    fn quiz_with(store: MemoryStore) -> Quiz<MemoryStore> {
        let catalog = Catalog::parse(MOVIES).unwrap();
        Quiz::new(catalog, store, &QuizConfig::default()).unwrap()
    }

    /// Store whose saves always fail
    struct ReadOnlyStore;

    impl ProgressStore for ReadOnlyStore {
        fn load(&self, _key: &str) -> Result<Vec<u32>, ProgressError> {
            Ok(Vec::new())
        }

        fn save(&self, _key: &str, _numbers: &[u32]) -> Result<(), ProgressError> {
            Err(ProgressError::Io {
                path: "readonly".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    #[test]
    fn test_correct_guess_is_persisted() {
        let store = MemoryStore::new();
        let mut quiz = quiz_with(store.clone());

        assert_eq!(quiz.submit(2, "pulp ficton").unwrap(), Outcome::Correct);
        assert!(quiz.is_found(2));
        assert_eq!(store.load("movies").unwrap(), vec![2]);
        assert_eq!(quiz.progress(), (1, 3));
    }

    #[test]
    fn test_incorrect_guess_is_not_persisted() {
        let store = MemoryStore::new();
        let mut quiz = quiz_with(store.clone());

        assert_eq!(quiz.submit(1, "Inception").unwrap(), Outcome::Incorrect);
        assert!(!quiz.is_found(1));
        assert!(store.load("movies").unwrap().is_empty());
    }

    #[test]
    fn test_alternate_titles_accepted() {
        let mut quiz = quiz_with(MemoryStore::new());
        assert_eq!(quiz.submit(1, "matrix").unwrap(), Outcome::Correct);
        assert_eq!(
            quiz.submit(3, "Blade Runner The Final Cut").unwrap(),
            Outcome::Correct
        );
        assert_eq!(quiz.found(), &[1, 3]);
    }

    #[test]
    fn test_already_found_ignores_guess() {
        let mut quiz = quiz_with(MemoryStore::new());
        quiz.submit(2, "Pulp Fiction").unwrap();
        assert_eq!(quiz.submit(2, "anything").unwrap(), Outcome::AlreadyFound);
        assert_eq!(quiz.submit(2, "Pulp Fiction").unwrap(), Outcome::AlreadyFound);
        assert_eq!(quiz.found(), &[2]);
    }

    #[test]
    fn test_unknown_movie() {
        let mut quiz = quiz_with(MemoryStore::new());
        assert!(matches!(quiz.submit(0, "x"), Err(QuizError::UnknownMovie(0))));
        assert!(matches!(quiz.submit(4, "x"), Err(QuizError::UnknownMovie(4))));
    }

    #[test]
    fn test_restores_and_sanitizes_progress() {
        let store = MemoryStore::new();
        store.save("movies", &[3, 42, 3, 1]).unwrap();

        let quiz = quiz_with(store);
        assert_eq!(quiz.found(), &[3, 1]);
        let remaining: Vec<u32> = quiz.remaining().map(|m| m.number).collect();
        assert_eq!(remaining, vec![2]);
    }

    #[test]
    fn test_complete_and_reset() {
        let store = MemoryStore::new();
        let mut quiz = quiz_with(store.clone());
        quiz.submit(1, "The Matrix").unwrap();
        quiz.submit(2, "Pulp Fiction").unwrap();
        quiz.submit(3, "Blade Runner").unwrap();
        assert!(quiz.is_complete());

        quiz.reset().unwrap();
        assert_eq!(quiz.progress(), (0, 3));
        assert!(store.load("movies").unwrap().is_empty());
    }

    #[test]
    fn test_custom_key_and_threshold() {
        let store = MemoryStore::new();
        let config = QuizConfig {
            threshold: 1.0,
            storage_key: "films".to_string(),
            ..QuizConfig::default()
        };
        let mut quiz = Quiz::new(Catalog::parse(MOVIES).unwrap(), store.clone(), &config).unwrap();

        assert_eq!(quiz.submit(2, "Pulp Ficton").unwrap(), Outcome::Incorrect);
        assert_eq!(quiz.submit(2, " PULP FICTION ").unwrap(), Outcome::Correct);
        assert_eq!(store.load("films").unwrap(), vec![2]);
        assert!(store.load("movies").unwrap().is_empty());
    }

    #[test]
    fn test_failed_save_leaves_movie_unfound() {
        let catalog = Catalog::parse(MOVIES).unwrap();
        let mut quiz = Quiz::new(catalog, ReadOnlyStore, &QuizConfig::default()).unwrap();

        assert!(matches!(quiz.submit(2, "Pulp Fiction"), Err(QuizError::Progress(_))));
        assert!(!quiz.is_found(2));
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(Outcome::Correct.message(), "Correct! Well done.");
        assert_eq!(Outcome::Incorrect.message(), "Incorrect! Try again.");
    }
}
