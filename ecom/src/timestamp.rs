//! Parsing of the `placedAt` order field.
//!
//! The feed mostly sends `YYYY-MM-DDTHH:MM:SS.ffffff` strings, but some
//! producers send epoch seconds instead, either as JSON numbers or as numeric
//! strings. Both are accepted; anything else leaves the order date empty.

use chrono::{DateTime, Local, NaiveDateTime, Timelike};
use common::config::EpochTimezone;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

const BASE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

static FORMATTED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2})\.(\d{1,6})$")
        .expect("placedAt pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacedAt {
    /// No value, `null`, or an empty string.
    Missing,
    /// Parsed from the fixed `YYYY-MM-DDTHH:MM:SS.ffffff` format.
    Formatted(NaiveDateTime),
    /// Interpreted as epoch seconds in the configured zone.
    Epoch(NaiveDateTime),
    /// Neither format matched.
    Invalid,
}

impl PlacedAt {
    pub fn value(self) -> Option<NaiveDateTime> {
        match self {
            PlacedAt::Formatted(date) | PlacedAt::Epoch(date) => Some(date),
            PlacedAt::Missing | PlacedAt::Invalid => None,
        }
    }
}

pub fn parse_placed_at(raw: Option<&Value>, zone: EpochTimezone) -> PlacedAt {
    let raw = match raw {
        None | Some(Value::Null) => return PlacedAt::Missing,
        Some(Value::String(text)) if text.is_empty() => return PlacedAt::Missing,
        Some(raw) => raw,
    };

    if let Some(date) = raw.as_str().and_then(parse_formatted) {
        return PlacedAt::Formatted(date);
    }

    match epoch_seconds(raw).and_then(|seconds| from_epoch(seconds, zone)) {
        Some(date) => PlacedAt::Epoch(date),
        None => PlacedAt::Invalid,
    }
}

/// Parses `YYYY-MM-DDTHH:MM:SS.f` with one to six fractional digits.
pub fn parse_formatted(text: &str) -> Option<NaiveDateTime> {
    let captures = FORMATTED.captures(text)?;
    let base = NaiveDateTime::parse_from_str(&captures[1], BASE_FORMAT).ok()?;
    // chrono accepts second 60 as a leap second; wall-clock order dates never carry one.
    if base.nanosecond() >= 1_000_000_000 {
        return None;
    }

    let fraction = &captures[2];
    let micros: u32 = format!("{fraction:0<6}").parse().ok()?;
    base.with_nanosecond(micros * 1_000)
}

fn epoch_seconds(raw: &Value) -> Option<f64> {
    let seconds = match raw {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    seconds.is_finite().then_some(seconds)
}

fn from_epoch(seconds: f64, zone: EpochTimezone) -> Option<NaiveDateTime> {
    let micros = (seconds * 1_000_000.0).round();
    if micros.abs() >= i64::MAX as f64 {
        return None;
    }
    let instant = DateTime::from_timestamp_micros(micros as i64)?;

    Some(match zone {
        EpochTimezone::Local => instant.with_timezone(&Local).naive_local(),
        EpochTimezone::Utc => instant.naive_utc(),
    })
}

/// Output form: `YYYY-MM-DD HH:MM:SS`, plus `.ffffff` only when there is a sub-second part.
pub fn format_order_date(date: &NaiveDateTime) -> String {
    if date.nanosecond() == 0 {
        date.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        date.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
    }
}
