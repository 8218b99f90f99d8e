//! Display strings derived from snapshot numbers.
//!
//! Every formatter here has a parser that reads the string back, so a
//! rendered value can be checked against the number it came from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

// ---------------------------------------------------------------------------
// MM:SS durations
// ---------------------------------------------------------------------------

/// Call duration in whole seconds, rendered as `MM:SS`.
///
/// Minutes are not wrapped into hours: 75 minutes renders as `75:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CallDuration(pub u32);

impl CallDuration {
    /// Saturates at `u32::MAX` seconds.
    pub fn from_mm_ss(minutes: u32, seconds: u32) -> Self {
        Self(minutes.saturating_mul(60).saturating_add(seconds))
    }

    pub fn as_secs(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CallDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for CallDuration {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ParseError::Duration(s.to_string());
        let (mm, ss) = s.trim().split_once(':').ok_or_else(bad)?;
        if ss.len() != 2 || !is_digits(mm) || !is_digits(ss) {
            return Err(bad());
        }
        let minutes: u32 = mm.parse().map_err(|_| bad())?;
        let seconds: u32 = ss.parse().map_err(|_| bad())?;
        if seconds >= 60 {
            return Err(bad());
        }
        minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds))
            .map(Self)
            .ok_or_else(bad)
    }
}

impl TryFrom<String> for CallDuration {
    type Error = ParseError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CallDuration> for String {
    fn from(d: CallDuration) -> Self {
        d.to_string()
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

// ---------------------------------------------------------------------------
// One-decimal fixed point
// ---------------------------------------------------------------------------

/// Fixed-point number with one decimal place, stored in tenths.
///
/// Used for packet loss and jitter so that the rendered `0.2` is exactly
/// the stored value. Serializes as a JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tenths(pub u32);

impl Tenths {
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl fmt::Display for Tenths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

impl FromStr for Tenths {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ParseError::Tenths(s.to_string());
        let t = s.trim();
        let (whole, frac) = match t.split_once('.') {
            Some((w, f)) if f.len() == 1 => (w, f),
            Some(_) => return Err(bad()),
            None => (t, "0"),
        };
        if !is_digits(whole) || !is_digits(frac) {
            return Err(bad());
        }
        let whole: u32 = whole.parse().map_err(|_| bad())?;
        let frac: u32 = frac.parse().map_err(|_| bad())?;
        whole
            .checked_mul(10)
            .and_then(|w| w.checked_add(frac))
            .map(Self)
            .ok_or_else(bad)
    }
}

impl Serialize for Tenths {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Tenths {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = f64::deserialize(deserializer)?;
        if !v.is_finite() || v < 0.0 || v * 10.0 > f64::from(u32::MAX) {
            return Err(serde::de::Error::custom(format!(
                "expected a non-negative one-decimal number, got {v}"
            )));
        }
        Ok(Self((v * 10.0).round() as u32))
    }
}

/// Append a percent sign: `Tenths(2)` → `"0.2%"`, `85` → `"85%"`.
pub fn format_percent(value: impl fmt::Display) -> String {
    format!("{value}%")
}

// ---------------------------------------------------------------------------
// Millions
// ---------------------------------------------------------------------------

/// Precision of [`format_millions`]: one decimal of a million.
pub const MILLIONS_STEP: u64 = 100_000;

/// `5_512_345` → `"5.5M"`.
pub fn format_millions(n: u64) -> String {
    format!("{:.1}M", n as f64 / 1_000_000.0)
}

/// Read a [`format_millions`] string back; the result is within half a
/// [`MILLIONS_STEP`] of the value that was formatted.
pub fn parse_millions(s: &str) -> Result<u64, ParseError> {
    let bad = || ParseError::Millions(s.to_string());
    let digits = s.trim().strip_suffix('M').ok_or_else(bad)?;
    let tenths: Tenths = digits.parse().map_err(|_| bad())?;
    Ok(u64::from(tenths.0) * MILLIONS_STEP)
}
