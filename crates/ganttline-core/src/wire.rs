//! Lenient date decoding for the timeline API.
//!
//! The feed mixes plain `YYYY-MM-DD` dates with full ISO-8601 timestamps; only the calendar
//! date matters for layout.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

fn parse_wire_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    let trimmed = raw.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
}

pub(crate) fn date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_wire_date(&raw).map_err(serde::de::Error::custom)
}

/// Missing, `null` and empty strings all decode to `None`
pub(crate) fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.filter(|value| !value.trim().is_empty())
        .map(|value| parse_wire_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
