// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil UTC timestamps.
//!
//! [`CivilTimestamp`] is a broken-down Gregorian calendar instant, always
//! interpreted as UTC.  It is the value exchanged with callers on the civil
//! side of every conversion in this crate.
//!
//! Seconds are civil seconds only: an inserted leap second (`23:59:60`) is
//! not representable.  Converting such an instant from `chrono` saturates at
//! `23:59:59.999999999`.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// A proleptic-Gregorian UTC date and time with nanosecond resolution.
///
/// Fields are ordered from most to least significant, so the derived
/// [`Ord`] is chronological order.
///
/// Values built with [`new`](Self::new) always denote a real instant.
/// Values decoded from a Julian Day outside the Gregorian domain (before
/// 1582-10-15, beyond chrono's year range, or non-finite) only guarantee
/// `month` in `1..=12`, `day` in `1..=31` and in-range time fields; the
/// year may be any `i32` and [`to_chrono`](Self::to_chrono) may return
/// `None` for them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilTimestamp {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    nanosecond: u32,
}

impl CivilTimestamp {
    // ── constructors ──────────────────────────────────────────────────

    /// Build a timestamp from its calendar fields.
    ///
    /// Returns `None` unless the fields denote a real Gregorian instant:
    /// the day must exist in the given month and year, `hour < 24`,
    /// `minute < 60`, `second < 60` and `nanosecond < 1e9`.  Years are
    /// limited to the range `chrono` can represent.
    pub fn new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanosecond: u32,
    ) -> Option<Self> {
        if nanosecond >= NANOS_PER_SECOND || second >= 60 {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month.into(), day.into())?.and_hms_nano_opt(
            hour.into(),
            minute.into(),
            second.into(),
            nanosecond,
        )?;
        Some(Self::from_raw_parts(
            year, month, day, hour, minute, second, nanosecond,
        ))
    }

    /// Convenience constructor for whole-second instants.
    pub fn from_ymd_hms(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Option<Self> {
        Self::new(year, month, day, hour, minute, second, 0)
    }

    /// UTC midnight at the start of the given day, without validation.
    ///
    /// Used to build the static leap-second table in a `const` context.
    pub(crate) const fn midnight(year: i32, month: u8, day: u8) -> Self {
        Self::from_raw_parts(year, month, day, 0, 0, 0, 0)
    }

    /// Assemble fields that the caller has already normalized.
    pub(crate) const fn from_raw_parts(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanosecond: u32,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            nanosecond,
        }
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }

    #[inline]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    #[inline]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    #[inline]
    pub const fn second(&self) -> u8 {
        self.second
    }

    /// Sub-second part in nanoseconds, always `< 1e9`.
    #[inline]
    pub const fn nanosecond(&self) -> u32 {
        self.nanosecond
    }

    /// `true` when the time of day is exactly `00:00:00.000000000`.
    #[inline]
    pub const fn is_midnight(&self) -> bool {
        self.hour == 0 && self.minute == 0 && self.second == 0 && self.nanosecond == 0
    }

    // ── chrono bridge ─────────────────────────────────────────────────

    /// Convert to a `chrono::DateTime<Utc>`.
    ///
    /// Returns `None` if the fields fall outside chrono's representable
    /// range (or, for values produced from out-of-domain Julian dates, do
    /// not form a valid date at all).
    pub fn to_chrono(&self) -> Option<DateTime<Utc>> {
        let date = NaiveDate::from_ymd_opt(self.year, self.month.into(), self.day.into())?;
        let time = date.and_hms_nano_opt(
            self.hour.into(),
            self.minute.into(),
            self.second.into(),
            self.nanosecond,
        )?;
        Some(DateTime::<Utc>::from_naive_utc_and_offset(time, Utc))
    }

    /// Build from a `chrono::DateTime<Utc>`.
    ///
    /// chrono encodes a leap second as `nanosecond >= 1e9`; that instant is
    /// clamped to the last representable nanosecond of second 59.
    pub fn from_chrono(dt: &DateTime<Utc>) -> Self {
        Self::from_raw_parts(
            dt.year(),
            dt.month() as u8,
            dt.day() as u8,
            dt.hour() as u8,
            dt.minute() as u8,
            dt.second() as u8,
            dt.nanosecond().min(NANOS_PER_SECOND - 1),
        )
    }
}

impl From<DateTime<Utc>> for CivilTimestamp {
    #[inline]
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_chrono(&dt)
    }
}

impl std::fmt::Display for CivilTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:09}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second, self.nanosecond
        )
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────
//
// Serialized as a flat struct of fields; deserialization goes through
// `CivilTimestamp::new` so invalid instants are rejected.

#[cfg(feature = "serde")]
impl Serialize for CivilTimestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("CivilTimestamp", 7)?;
        s.serialize_field("year", &self.year)?;
        s.serialize_field("month", &self.month)?;
        s.serialize_field("day", &self.day)?;
        s.serialize_field("hour", &self.hour)?;
        s.serialize_field("minute", &self.minute)?;
        s.serialize_field("second", &self.second)?;
        s.serialize_field("nanosecond", &self.nanosecond)?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for CivilTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            year: i32,
            month: u8,
            day: u8,
            #[serde(default)]
            hour: u8,
            #[serde(default)]
            minute: u8,
            #[serde(default)]
            second: u8,
            #[serde(default)]
            nanosecond: u32,
        }

        let raw = Raw::deserialize(deserializer)?;
        CivilTimestamp::new(
            raw.year,
            raw.month,
            raw.day,
            raw.hour,
            raw.minute,
            raw.second,
            raw.nanosecond,
        )
        .ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid civil timestamp {:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:09}",
                raw.year, raw.month, raw.day, raw.hour, raw.minute, raw.second, raw.nanosecond
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_accepts_valid_instants() {
        let t = CivilTimestamp::new(2024, 2, 29, 23, 59, 59, 999_999_999).unwrap();
        assert_eq!(t.year(), 2024);
        assert_eq!(t.month(), 2);
        assert_eq!(t.day(), 29);
        assert_eq!(t.nanosecond(), 999_999_999);
    }

    #[test]
    fn new_rejects_invalid_fields() {
        assert!(CivilTimestamp::new(2023, 2, 29, 0, 0, 0, 0).is_none());
        assert!(CivilTimestamp::new(2024, 13, 1, 0, 0, 0, 0).is_none());
        assert!(CivilTimestamp::new(2024, 4, 31, 0, 0, 0, 0).is_none());
        assert!(CivilTimestamp::new(2024, 1, 1, 24, 0, 0, 0).is_none());
        assert!(CivilTimestamp::new(2024, 1, 1, 0, 60, 0, 0).is_none());
        assert!(CivilTimestamp::new(2016, 12, 31, 23, 59, 60, 0).is_none());
        assert!(CivilTimestamp::new(2024, 1, 1, 0, 0, 0, 1_000_000_000).is_none());
    }

    #[test]
    fn ordering_is_chronological() {
        let a = CivilTimestamp::new(2016, 12, 31, 23, 59, 59, 999_999_999).unwrap();
        let b = CivilTimestamp::from_ymd_hms(2017, 1, 1, 0, 0, 0).unwrap();
        let c = CivilTimestamp::new(2017, 1, 1, 0, 0, 0, 1).unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn chrono_roundtrip() {
        let dt = Utc
            .with_ymd_and_hms(2000, 1, 1, 11, 58, 55)
            .unwrap()
            .with_nanosecond(816_000_000)
            .unwrap();
        let civil = CivilTimestamp::from(dt);
        assert_eq!(civil.to_chrono(), Some(dt));
    }

    #[test]
    fn chrono_leap_second_saturates() {
        let leap = NaiveDate::from_ymd_opt(2016, 12, 31)
            .unwrap()
            .and_hms_nano_opt(23, 59, 59, 1_500_000_000)
            .unwrap();
        let dt = DateTime::<Utc>::from_naive_utc_and_offset(leap, Utc);
        let civil = CivilTimestamp::from_chrono(&dt);
        assert_eq!(civil.second(), 59);
        assert_eq!(civil.nanosecond(), 999_999_999);
    }

    #[test]
    fn display_is_iso8601() {
        let t = CivilTimestamp::new(1972, 7, 1, 0, 0, 1, 5).unwrap();
        assert_eq!(t.to_string(), "1972-07-01T00:00:01.000000005Z");
    }

    #[test]
    fn midnight_helper() {
        let m = CivilTimestamp::midnight(2017, 1, 1);
        assert!(m.is_midnight());
        assert_eq!(Some(m), CivilTimestamp::from_ymd_hms(2017, 1, 1, 0, 0, 0));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_rejects_invalid_dates() {
        let ok: CivilTimestamp =
            serde_json::from_str(r#"{"year":2017,"month":1,"day":1}"#).unwrap();
        assert!(ok.is_midnight());
        let bad = serde_json::from_str::<CivilTimestamp>(r#"{"year":2017,"month":2,"day":30}"#);
        assert!(bad.is_err());
    }
}
