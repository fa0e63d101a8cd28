// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::{Deserialize, Serialize};

/// What a search-box string asks the POI query layer for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchIntent {
    /// "0", "00", ... : the most recently added records.
    ByRecentId,
    /// Exact record id.
    ById(u64),
    /// `name@region`: region is matched as a prefix, name as a substring.
    ByRegionAndName {
        region_prefix: String,
        name_substring: String,
    },
    /// Everything else: the whole trimmed input as a name substring.
    ByName(String),
}

impl SearchIntent {
    /// Classifies a raw search string. Never fails; every input maps to
    /// exactly one intent.
    pub fn classify(input: &str) -> Self {
        let s = input.trim();

        // 1. All digits: id lookup, or the recent-items sentinel for zero.
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            if s.bytes().all(|b| b == b'0') {
                return SearchIntent::ByRecentId;
            }
            // Too large for an id: nothing can match it, search it as text.
            if let Ok(id) = s.parse::<u64>() {
                return SearchIntent::ById(id);
            }
        }

        // 2. name@region, split on the first '@' only.
        if let Some((name, region)) = s.split_once('@') {
            if !name.is_empty() && !region.is_empty() {
                return SearchIntent::ByRegionAndName {
                    region_prefix: region.to_string(),
                    name_substring: name.to_string(),
                };
            }
        }

        // 3. Plain name filter.
        SearchIntent::ByName(s.to_string())
    }

    /// SQL `LIKE` pattern for the region column (`value%`), if any.
    ///
    /// Wildcards in the value itself are not escaped here; that is up to
    /// whoever binds the pattern.
    pub fn region_pattern(&self) -> Option<String> {
        match self {
            SearchIntent::ByRegionAndName { region_prefix, .. } => {
                Some(format!("{}%", region_prefix))
            }
            _ => None,
        }
    }

    /// The name fragment to filter on, unchanged.
    pub fn name_substring(&self) -> Option<&str> {
        match self {
            SearchIntent::ByRegionAndName { name_substring, .. } => Some(name_substring.as_str()),
            SearchIntent::ByName(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

pub fn classify_search_term(input: &str) -> SearchIntent {
    SearchIntent::classify(input)
}
