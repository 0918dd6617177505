//! Movie catalog
//!
//! The catalog is a plain text list, one movie per line:
//!
//! ```text
//! The Matrix (1999)
//! Star Wars / Star Wars: A New Hope (1977)
//! ```
//!
//! Alternate titles are separated by `" / "`. Movies are numbered from 1 in
//! file order; blank lines are skipped.

use crate::matcher::TitleMatcher;
use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

/// Separator between alternate titles on one line
pub const TITLE_SEPARATOR: &str = " / ";

/// Catalogs at least this long are scanned in parallel by `find_matches`.
const PARALLEL_THRESHOLD: usize = 100;

static LINE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s*\((\d+)\)$").expect("catalog line pattern is valid"));

/// Errors that can occur while loading a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Line does not look like `Title (Year)`
    #[error("Invalid format at line {line}: \"{content}\"")]
    InvalidLine { line: usize, content: String },

    #[error("Invalid year at line {line}: {year}")]
    InvalidYear { line: usize, year: String },
}

/// One entry of the quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub number: u32,
    /// Acceptable titles, in file order. Never empty.
    pub titles: Vec<String>,
    pub year: u32,
}

impl Movie {
    /// Whether `guess` names this movie.
    #[must_use]
    pub fn is_answer(&self, guess: &str, matcher: &TitleMatcher) -> bool {
        matcher.is_match(guess, &self.titles)
    }

    /// `"Title A / Title B (1999)"`
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} ({})", self.titles.join(TITLE_SEPARATOR), self.year)
    }
}

/// Ordered list of movies numbered 1..=len
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    movies: Vec<Movie>,
}

impl Catalog {
    /// Parse catalog text. The first malformed line fails the whole load.
    pub fn parse(text: &str) -> Result<Self, CatalogError> {
        let mut movies = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let line_no = index + 1;

            let caps = LINE_PATTERN
                .captures(line)
                .ok_or_else(|| CatalogError::InvalidLine {
                    line: line_no,
                    content: line.to_string(),
                })?;
            let year_text = &caps[2];
            let year: u32 = year_text.parse().map_err(|_| CatalogError::InvalidYear {
                line: line_no,
                year: year_text.to_string(),
            })?;

            // The captured text starts with a non-space char, so at least
            // one title survives the split.
            let titles: Vec<String> = caps[1]
                .split(TITLE_SEPARATOR)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();

            movies.push(Movie {
                number: movies.len() as u32 + 1,
                titles,
                year,
            });
        }

        tracing::debug!(count = movies.len(), "parsed catalog");
        Ok(Self { movies })
    }

    /// Read and parse a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::parse(&text)?;
        tracing::info!(path = %path.display(), movies = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Movie by its 1-based number
    #[must_use]
    pub fn get(&self, number: u32) -> Option<&Movie> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        self.movies.get(index)
    }

    pub fn contains(&self, number: u32) -> bool {
        self.get(number).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Movie> {
        self.movies.iter()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Pretty JSON array of movies
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.movies)
    }

    /// Numbers of every movie `guess` matches, ascending.
    #[must_use]
    pub fn find_matches(&self, guess: &str, matcher: &TitleMatcher) -> Vec<u32> {
        if self.movies.len() < PARALLEL_THRESHOLD {
            self.movies
                .iter()
                .filter(|m| m.is_answer(guess, matcher))
                .map(|m| m.number)
                .collect()
        } else {
            self.movies
                .par_iter()
                .filter(|m| m.is_answer(guess, matcher))
                .map(|m| m.number)
                .collect()
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Movie;
    type IntoIter = std::slice::Iter<'a, Movie>;

    fn into_iter(self) -> Self::IntoIter {
        self.movies.iter()
    }
}
