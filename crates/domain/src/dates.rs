// Copyright (C) 2026 Meltemi Kite Tours
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! ISO 8601 calendar-date parsing and serde helpers.
//!
//! Trip dates travel as plain `YYYY-MM-DD` strings; timestamps use RFC 3339
//! via `time::serde::rfc3339` directly.

use crate::error::DomainError;
use time::Date;
use time::format_description::FormatItem;
use time::macros::format_description;

/// The `YYYY-MM-DD` wire format for calendar dates.
const DATE_FORMAT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::DateParse` if the string is not a valid calendar
/// date in that format.
pub fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), DATE_FORMAT).map_err(|e| DomainError::DateParse {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Serde adapter serializing a `Date` as `YYYY-MM-DD`.
pub mod iso_date {
    use super::DATE_FORMAT;
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _, ser::Error as _};
    use time::Date;

    /// Serializes a date as a `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Returns a serializer error if the date cannot be formatted.
    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted: String = date.format(DATE_FORMAT).map_err(S::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    /// Deserializes a date from a `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Returns a deserializer error if the string is not a valid date.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        Date::parse(&raw, DATE_FORMAT).map_err(D::Error::custom)
    }
}

/// Serde adapter for `Option<Date>` fields using the `YYYY-MM-DD` format.
pub mod iso_date_option {
    use super::DATE_FORMAT;
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _, ser::Error as _};
    use time::Date;

    /// Serializes an optional date as a `YYYY-MM-DD` string or null.
    ///
    /// # Errors
    ///
    /// Returns a serializer error if the date cannot be formatted.
    pub fn serialize<S: Serializer>(
        date: &Option<Date>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => {
                let formatted: String = d.format(DATE_FORMAT).map_err(S::Error::custom)?;
                serializer.serialize_some(&formatted)
            }
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional date from a `YYYY-MM-DD` string or null.
    ///
    /// # Errors
    ///
    /// Returns a deserializer error if a present string is not a valid date.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Date>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| Date::parse(&s, DATE_FORMAT).map_err(D::Error::custom))
            .transpose()
    }
}
