//! Lenient deserializers for the vendor's loosely typed JSON.
//!
//! Numeric fields show up as JSON strings or numbers depending on the
//! endpoint (and sometimes the account), so everything numeric goes through
//! one of these.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveDateTime;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::encode::DATE_TIME_FORMAT;

/// Text form of a string, number, bool or null.
pub fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match Value::deserialize(d)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// Parse a number from either representation; empty or null gives the default.
pub fn lenient<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
    T::Err: Display,
{
    let text = string_or_number(d)?;
    let text = text.trim();
    if text.is_empty() {
        return Ok(T::default());
    }
    text.parse::<T>()
        .map_err(|e| D::Error::custom(format!("invalid number `{text}`: {e}")))
}

/// `yes`/`no` (or a real bool) to bool.
pub fn yes_no<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    match Value::deserialize(d)? {
        Value::Bool(b) => Ok(b),
        Value::String(s) => Ok(s.eq_ignore_ascii_case("yes")),
        Value::Null => Ok(false),
        other => Err(D::Error::custom(format!("expected yes/no, got {other}"))),
    }
}

pub fn date_time<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
    let text = String::deserialize(d)?;
    NaiveDateTime::parse_from_str(&text, DATE_TIME_FORMAT)
        .map_err(|e| D::Error::custom(format!("invalid date `{text}`: {e}")))
}

pub fn hms_duration<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
    let text = String::deserialize(d)?;
    parse_hms(&text).ok_or_else(|| D::Error::custom(format!("invalid duration `{text}`")))
}

/// `HH:MM:SS` to a duration. Hours may exceed 24.
pub fn parse_hms(text: &str) -> Option<Duration> {
    let mut parts = text.trim().split(':');
    let hours: u64 = parts.next()?.parse().ok()?;
    let minutes: u64 = parts.next()?.parse().ok()?;
    let seconds: u64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || minutes >= 60 || seconds >= 60 {
        return None;
    }
    let total = hours.checked_mul(3600)?.checked_add(minutes * 60 + seconds)?;
    Some(Duration::from_secs(total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "string_or_number")]
        value: String,
        #[serde(default, deserialize_with = "lenient")]
        rate: f64,
        #[serde(default, deserialize_with = "lenient")]
        seconds: u64,
    }

    #[test]
    fn numbers_decode_from_strings_or_numbers() {
        let a: Row = serde_json::from_str(r#"{"value":"1","rate":"0.00900000","seconds":"5"}"#)
            .unwrap();
        let b: Row = serde_json::from_str(r#"{"value":1,"rate":0.009,"seconds":5}"#).unwrap();
        assert_eq!(a.value, b.value);
        assert_eq!(a.rate, 0.009);
        assert_eq!(b.rate, 0.009);
        assert_eq!(a.seconds, 5);
        assert_eq!(b.seconds, 5);
    }

    #[test]
    fn empty_numbers_fall_back_to_default() {
        let row: Row = serde_json::from_str(r#"{"value":null,"rate":""}"#).unwrap();
        assert_eq!(row.value, "");
        assert_eq!(row.rate, 0.0);
        assert_eq!(row.seconds, 0);
    }

    #[test]
    fn garbage_numbers_are_rejected() {
        assert!(serde_json::from_str::<Row>(r#"{"value":"1","rate":"cheap"}"#).is_err());
        assert!(serde_json::from_str::<Row>(r#"{"value":[1]}"#).is_err());
    }

    #[test]
    fn hms_parses_to_exact_seconds() {
        assert_eq!(parse_hms("00:00:05"), Some(Duration::from_secs(5)));
        assert_eq!(parse_hms("01:02:03"), Some(Duration::from_secs(3723)));
        assert_eq!(parse_hms("30:00:00"), Some(Duration::from_secs(108_000)));
        assert_eq!(parse_hms("00:05"), None);
        assert_eq!(parse_hms("00:61:00"), None);
        assert_eq!(parse_hms("1:2:3:4"), None);
    }

    #[test]
    fn oversized_hours_are_rejected() {
        assert_eq!(parse_hms("9999999999999999999:00:00"), None);

        #[derive(Debug, Deserialize)]
        struct Call {
            #[serde(deserialize_with = "hms_duration")]
            #[allow(dead_code)]
            d: Duration,
        }
        assert!(serde_json::from_str::<Call>(r#"{"d":"9999999999999999999:00:00"}"#).is_err());
    }
}
