// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::angle::{from_digit, from_dms, Dms};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Decimal-degree position, longitude first like GeoJSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl From<LonLat> for [f64; 2] {
    fn from(p: LonLat) -> Self {
        p.to_array()
    }
}

type Matcher = fn(&str) -> Option<LonLat>;

/// Tried in order; the first one that accepts the whole input wins.
const MATCHERS: [(&str, Matcher); 4] = [
    ("integer pair", match_integer_pair),
    ("decimal pair", match_decimal_pair),
    ("symbol dms", match_symbol_dms),
    ("kanji dms", match_kanji_dms),
];

/// Reads typed text as a `latitude, longitude` position.
///
/// Accepted forms, all latitude first:
/// - packed digit runs: `362000, 1385900`
/// - decimal degrees: `36.5039, 138.9853`
/// - symbol DMS: `北緯36°30′14″ 東経138°59′7″` (prefix words optional)
/// - kanji DMS: `36度30分14秒,138度59分7秒`
///
/// `None` means the text is not a coordinate at all, which callers treat as
/// "search by name instead". Out-of-range minutes or seconds also give `None`.
pub fn parse_coordinate_text(input: &str) -> Option<LonLat> {
    let s = input.trim();
    MATCHERS.iter().find_map(|(name, matcher)| {
        let found = matcher(s);
        if found.is_some() {
            log::debug!("[Coords] '{}' matched as {}", s, name);
        }
        found
    })
}

fn match_integer_pair(s: &str) -> Option<LonLat> {
    static INT_PAIR_RE: OnceLock<Regex> = OnceLock::new();
    let re = INT_PAIR_RE.get_or_init(|| Regex::new(r"^([0-9]+)[,\s]\s*([0-9]+)$").unwrap());
    let caps = re.captures(s)?;
    let lat = from_digit(&caps[1])?;
    let lon = from_digit(&caps[2])?;
    Some(LonLat::new(lon, lat))
}

fn match_decimal_pair(s: &str) -> Option<LonLat> {
    static DEC_PAIR_RE: OnceLock<Regex> = OnceLock::new();
    let re = DEC_PAIR_RE.get_or_init(|| {
        Regex::new(r"^([0-9]+\.[0-9]*)[,\s]\s*([0-9]+\.[0-9]*)$").unwrap()
    });
    let caps = re.captures(s)?;
    let lat = caps[1].parse::<f64>().ok()?;
    let lon = caps[2].parse::<f64>().ok()?;
    Some(LonLat::new(lon, lat))
}

fn match_symbol_dms(s: &str) -> Option<LonLat> {
    static SYMBOL_DMS_RE: OnceLock<Regex> = OnceLock::new();
    let re = SYMBOL_DMS_RE.get_or_init(|| Regex::new(&dms_pair_pattern("°", "′", "″")).unwrap());
    dms_pair(re.captures(s)?)
}

fn match_kanji_dms(s: &str) -> Option<LonLat> {
    static KANJI_DMS_RE: OnceLock<Regex> = OnceLock::new();
    let re = KANJI_DMS_RE.get_or_init(|| Regex::new(&dms_pair_pattern("度", "分", "秒")).unwrap());
    dms_pair(re.captures(s)?)
}

/// Latitude then longitude, each `D<deg>M<min>S<sec>`, with the optional
/// 北緯/東経 words and a comma or newline between the two halves.
fn dms_pair_pattern(deg: &str, min: &str, sec: &str) -> String {
    let angle = format!(r"([0-9]+){deg}\s*([0-9]+){min}\s*([0-9]+(?:\.[0-9]*)?){sec}");
    format!(r"^(?:北緯)?\s*{angle}[,\n]?\s*(?:東経)?\s*{angle}$")
}

fn dms_pair(caps: Captures<'_>) -> Option<LonLat> {
    let lat = dms_from_captures(&caps, 1)?;
    let lon = dms_from_captures(&caps, 4)?;
    Some(LonLat::new(from_dms(&lon), from_dms(&lat)))
}

fn dms_from_captures(caps: &Captures<'_>, first: usize) -> Option<Dms> {
    let degrees = caps[first].parse::<f64>().ok()?;
    let minutes = caps[first + 1].parse::<u32>().ok()?;
    let seconds = caps[first + 2].parse::<f64>().ok()?;
    Dms::new(degrees, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: LonLat, lon: f64, lat: f64) {
        assert!(
            (actual.lon - lon).abs() < 1e-9 && (actual.lat - lat).abs() < 1e-9,
            "expected ({}, {}), got {:?}",
            lon,
            lat,
            actual
        );
    }

    #[test]
    fn test_integer_pair_swaps_axes() {
        let p = parse_coordinate_text("362000, 1385900").unwrap();
        assert_close(p, 138.0 + 59.0 / 60.0, 36.0 + 20.0 / 60.0);
    }

    #[test]
    fn test_integer_pair_separators() {
        let expected = parse_coordinate_text("362000,1385900").unwrap();
        assert_eq!(parse_coordinate_text("362000 1385900"), Some(expected));
        assert_eq!(parse_coordinate_text("362000\t 1385900"), Some(expected));
        assert_eq!(parse_coordinate_text("  362000, 1385900\n"), Some(expected));
    }

    #[test]
    fn test_integer_pair_too_short_is_no_match() {
        assert_eq!(parse_coordinate_text("3620, 1385900"), None);
        assert_eq!(parse_coordinate_text("36 138"), None);
    }

    #[test]
    fn test_decimal_pair() {
        let p = parse_coordinate_text("36.5039, 138.9853").unwrap();
        assert_eq!(p, LonLat::new(138.9853, 36.5039));
        assert_eq!(p.to_array(), [138.9853, 36.5039]);

        let p = parse_coordinate_text("36. 138.5").unwrap();
        assert_eq!(p, LonLat::new(138.5, 36.0));
    }

    #[test]
    fn test_decimal_pair_requires_point_on_both() {
        assert_eq!(parse_coordinate_text("36.5, 138"), None);
    }

    #[test]
    fn test_symbol_dms_prefix_words_ignored() {
        let plain = parse_coordinate_text("36°30′14″,138°59′7″").unwrap();
        let prefixed = parse_coordinate_text("北緯36°30′14″ 東経138°59′7″").unwrap();
        assert_eq!(plain, prefixed);
        assert_close(
            plain,
            138.0 + 59.0 / 60.0 + 7.0 / 3600.0,
            36.0 + 30.0 / 60.0 + 14.0 / 3600.0,
        );
    }

    #[test]
    fn test_symbol_dms_newline_and_fractional_seconds() {
        let p = parse_coordinate_text("36° 30′ 14.5″\n138° 59′ 7″").unwrap();
        assert_close(
            p,
            138.0 + 59.0 / 60.0 + 7.0 / 3600.0,
            36.0 + 30.0 / 60.0 + 14.5 / 3600.0,
        );
    }

    #[test]
    fn test_kanji_dms_matches_symbol_dms() {
        let symbol = parse_coordinate_text("36°30′14″,138°59′7″").unwrap();
        let kanji = parse_coordinate_text("北緯36度30分14秒,東経138度59分7秒").unwrap();
        assert_eq!(symbol, kanji);
    }

    #[test]
    fn test_mixed_units_do_not_match() {
        assert_eq!(parse_coordinate_text("36度30′14″,138°59′7″"), None);
    }

    #[test]
    fn test_dms_out_of_range_is_no_match() {
        assert_eq!(parse_coordinate_text("36°75′90″,138°59′7″"), None);
        assert_eq!(parse_coordinate_text("36度30分60秒,138度59分7秒"), None);
    }

    #[test]
    fn test_partial_match_is_rejected() {
        assert_eq!(parse_coordinate_text("hello"), None);
        assert_eq!(parse_coordinate_text("at 36.5039, 138.9853"), None);
        assert_eq!(parse_coordinate_text("36°30′14″,138°59′7″ summit"), None);
        assert_eq!(parse_coordinate_text(""), None);
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        assert_eq!(parse_coordinate_text("３６２０００, １３８５９００"), None);
    }
}
