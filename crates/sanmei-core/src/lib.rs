// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod angle;
pub mod catalog;
pub mod config;
pub mod coords;
pub mod export;
pub mod search_intent;
pub mod view;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub use angle::Dms;
pub use coords::{parse_coordinate_text, LonLat};
pub use search_intent::{classify_search_term, SearchIntent};

#[derive(Error, Debug)]
pub enum SanmeiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid feature at index {index}: {reason}")]
    InvalidFeature { index: usize, reason: String },
    #[error("No POI with id {0}")]
    NotFound(u64),
}

/// What the search box should do with a submitted string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Resolution {
    /// The text was a coordinate; move the map there.
    Recenter(LonLat),
    /// Anything else goes to the POI query.
    Search(SearchIntent),
}

/// Coordinates win over searches: the classifier only sees input the
/// coordinate parser declined.
pub fn resolve(input: &str) -> Resolution {
    match parse_coordinate_text(input) {
        Some(lon_lat) => {
            log::debug!(
                "[Resolve] '{}' -> recenter at ({}, {})",
                input,
                lon_lat.lon,
                lon_lat.lat
            );
            Resolution::Recenter(lon_lat)
        }
        None => {
            let intent = SearchIntent::classify(input);
            log::debug!("[Resolve] '{}' -> {:?}", input, intent);
            Resolution::Search(intent)
        }
    }
}

/// Directory holding `config.json`; falls back to the working directory.
pub fn get_config_root() -> PathBuf {
    directories::ProjectDirs::from("org", "sanmei", "sanmei")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_coordinate_short_circuits_search() {
        match resolve("36.5039, 138.9853") {
            Resolution::Recenter(p) => {
                assert_eq!(p.lon, 138.9853);
                assert_eq!(p.lat, 36.5039);
            }
            other => panic!("expected recenter, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_falls_back_to_search() {
        assert_eq!(
            resolve("富士山"),
            Resolution::Search(SearchIntent::ByName("富士山".to_string()))
        );
        // A bare number is not a coordinate pair, so it is an id lookup.
        assert_eq!(resolve("12345"), Resolution::Search(SearchIntent::ById(12345)));
    }

    #[test]
    fn test_resolve_short_digit_pair_is_a_name_search() {
        // "36 138" looks like an integer pair but is too short for packed DMS.
        assert_eq!(
            resolve("36 138"),
            Resolution::Search(SearchIntent::ByName("36 138".to_string()))
        );
    }
}
