//! Timestamp type for the variant catalog.
//!
//! Wraps `time::PrimitiveDateTime`, always UTC, serialized as RFC3339.
//! Repository writes take these as explicit parameters; nothing in the
//! crate reads the wall clock.

use std::{borrow::Borrow, fmt::Display};

use time::format_description::well_known::Rfc3339;

/// A UTC timestamp with subsecond precision.
///
/// Used for the creation/update stamps on variants, attribute associations,
/// and inventory rows. Stored in SQLite through `sqlx`'s `time` support and
/// (de)serialized as RFC3339.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
    sqlx::Type,
)]
#[serde(from = "DateTimeDto", into = "DateTimeDto")]
#[sqlx(transparent)]
pub struct DateTime(time::PrimitiveDateTime);

impl Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value: time::OffsetDateTime = (*self).into();
        write!(f, "{}", value.format(&Rfc3339).unwrap())
    }
}

impl<T: Borrow<time::OffsetDateTime>> From<T> for DateTime {
    fn from(value: T) -> Self {
        let utc = value.borrow().to_offset(time::UtcOffset::UTC);
        Self(time::PrimitiveDateTime::new(utc.date(), utc.time()))
    }
}

impl From<DateTime> for time::OffsetDateTime {
    fn from(value: DateTime) -> time::OffsetDateTime {
        value.0.assume_utc()
    }
}

// Helper type pinning (de)serialization to RFC3339.

#[derive(serde::Serialize, serde::Deserialize)]
struct DateTimeDto(#[serde(with = "time::serde::rfc3339")] time::OffsetDateTime);

impl From<DateTimeDto> for DateTime {
    fn from(value: DateTimeDto) -> Self {
        value.0.into()
    }
}

impl From<DateTime> for DateTimeDto {
    fn from(value: DateTime) -> Self {
        DateTimeDto(value.into())
    }
}
