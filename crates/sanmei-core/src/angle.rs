// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Degree <-> degrees/minutes/seconds conversion.
//!
//! Only magnitudes are handled. There is no hemisphere letter or sign in any
//! notation we accept, so every [`Dms`] is a north/east value.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dms {
    /// Always a whole, non-negative number.
    pub degrees: f64,
    pub minutes: u32,
    /// Whole seconds from [`to_dms`]; may carry a fraction when parsed from text.
    pub seconds: f64,
}

impl Dms {
    /// Builds a triple, rejecting minutes or seconds outside `0..60` and
    /// degrees that are negative, fractional or not finite.
    pub fn new(degrees: f64, minutes: u32, seconds: f64) -> Option<Self> {
        if !degrees.is_finite() || degrees < 0.0 || degrees.fract() != 0.0 {
            return None;
        }
        if minutes >= 60 || !(0.0..60.0).contains(&seconds) {
            return None;
        }
        Some(Self {
            degrees,
            minutes,
            seconds,
        })
    }

    pub fn to_degrees(&self) -> f64 {
        from_dms(self)
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°{:02}′", self.degrees, self.minutes)?;
        if self.seconds.fract() == 0.0 {
            write!(f, "{:02}″", self.seconds as u32)
        } else if self.seconds < 10.0 {
            write!(f, "0{}″", self.seconds)
        } else {
            write!(f, "{}″", self.seconds)
        }
    }
}

/// Decimal degrees to a DMS triple, rounded once to the nearest whole second.
///
/// The sign of `deg` is dropped. The split stays in `f64` so magnitudes far
/// past any real coordinate still decompose instead of saturating; a
/// non-finite `deg` gives non-finite degrees and seconds.
pub fn to_dms(deg: f64) -> Dms {
    let total = (deg.abs() * 3600.0).round();
    let within_degree = total.rem_euclid(3600.0);
    Dms {
        degrees: total.div_euclid(3600.0),
        minutes: within_degree.div_euclid(60.0) as u32,
        seconds: within_degree.rem_euclid(60.0),
    }
}

/// Composes from the smallest unit outward: `(s / 60 + m) / 60 + d`.
pub fn from_dms(dms: &Dms) -> f64 {
    (dms.seconds / 60.0 + dms.minutes as f64) / 60.0 + dms.degrees
}

/// Splits a packed digit run such as `362000` into `36°20′00″`.
///
/// The last two digits are seconds, the two before them minutes, and
/// whatever leads is degrees, so at least five digits are needed.
pub fn from_digit_dms(s: &str) -> Option<Dms> {
    if s.len() < 5 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let split_min = s.len() - 4;
    let split_sec = s.len() - 2;
    let degrees = s[..split_min].parse::<f64>().ok()?;
    let minutes = s[split_min..split_sec].parse::<u32>().ok()?;
    let seconds = s[split_sec..].parse::<u32>().ok()?;
    Dms::new(degrees, minutes, seconds as f64)
}

/// Packed digit run straight to decimal degrees.
pub fn from_digit(s: &str) -> Option<f64> {
    from_digit_dms(s).map(|dms| from_dms(&dms))
}

/// `{d}°{mm}′{ss}″`, always with the Unicode degree/prime/double-prime glyphs.
pub fn format_dms(dms: &Dms) -> String {
    dms.to_string()
}

pub fn format_deg(deg: f64) -> String {
    format_dms(&to_dms(deg))
}
