//! Quiz configuration
//!
//! Loaded from a JSON file; every field is optional.
//!
//! ```json
//! { "threshold": 0.85, "storage_key": "movies", "catalog_path": "movies.txt" }
//! ```

use crate::matcher::{TitleMatcher, DEFAULT_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key the found set is stored under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "movies";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Minimum similarity for a guess to count
    pub threshold: f64,
    pub storage_key: String,
    pub catalog_path: Option<PathBuf>,
    pub progress_path: Option<PathBuf>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            catalog_path: None,
            progress_path: None,
        }
    }
}

impl QuizConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if !(0.0..=1.0).contains(&config.threshold) {
            // Still usable: the matcher simply accepts everything or nothing
            tracing::warn!(threshold = config.threshold, "threshold outside [0, 1]");
        }
        Ok(config)
    }

    pub fn matcher(&self) -> TitleMatcher {
        TitleMatcher::new(self.threshold)
    }
}
