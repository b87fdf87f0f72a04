// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Leap-second table — TAI − UTC lookup
//!
//! Since 1972-01-01 UTC has been kept within 0.9 s of UT1 by inserting whole
//! leap seconds, so `TAI − UTC` is an integer that changes in discrete steps.
//! A [`LeapSecondTable`] records every step as a [`LeapSecondEntry`]: the UTC
//! midnight at which a new value takes effect, and that value.
//!
//! The built-in table ([`LeapSecondTable::iers`]) reproduces IERS Bulletin C
//! through the 2017-01-01 insertion.  Announcing a new leap second is a data
//! update: append an entry to `IERS_LEAP_SECONDS` and redeploy.  Callers that
//! need a different history (tests, or a deployment with a newer bulletin)
//! build their own table with [`LeapSecondTable::new`] and hand it to a
//! [`JedConverter`](crate::JedConverter).
//!
//! ## Pre-1972 instants
//! Before the first entry the lookup returns `0`.  The fractional,
//! drifting offsets of 1961–1971 UTC are not modelled.
//!
//! ## References
//! * IERS Bulletin C (leap second announcements)
//! * USNO: "Leap seconds", TAI − UTC history

use std::borrow::Cow;

use qtty::Seconds;
use thiserror::Error;

use crate::civil::CivilTimestamp;

/// `TT − TAI`, fixed by definition.
pub const TT_MINUS_TAI: Seconds = Seconds::new(32.184);

/// One step of the TAI − UTC history.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LeapSecondEntry {
    /// UTC midnight at which `tai_minus_utc` takes effect.
    pub effective: CivilTimestamp,
    /// Cumulative TAI − UTC in whole seconds from `effective` onwards.
    pub tai_minus_utc: i32,
}

impl LeapSecondEntry {
    pub const fn new(effective: CivilTimestamp, tai_minus_utc: i32) -> Self {
        Self {
            effective,
            tai_minus_utc,
        }
    }
}

impl std::fmt::Display for LeapSecondEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} TAI-UTC {}", self.effective, self.tai_minus_utc)
    }
}

const fn entry(year: i32, month: u8, tai_minus_utc: i32) -> LeapSecondEntry {
    LeapSecondEntry::new(CivilTimestamp::midnight(year, month, 1), tai_minus_utc)
}

/// IERS Bulletin C: TAI − UTC from 1972 to the last announced insertion.
///
/// Each date is the first UTC midnight after the leap second, i.e. the
/// second itself was inserted at the end of the previous day.  1972-01-01 is
/// the start of the integer-second regime, when TAI − UTC was already 10 s.
const IERS_LEAP_SECONDS: &[LeapSecondEntry] = &[
    entry(1972, 1, 10),
    entry(1972, 7, 11),
    entry(1973, 1, 12),
    entry(1974, 1, 13),
    entry(1975, 1, 14),
    entry(1976, 1, 15),
    entry(1977, 1, 16),
    entry(1978, 1, 17),
    entry(1979, 1, 18),
    entry(1980, 1, 19),
    entry(1981, 7, 20),
    entry(1982, 7, 21),
    entry(1983, 7, 22),
    entry(1985, 7, 23),
    entry(1988, 1, 24),
    entry(1990, 1, 25),
    entry(1991, 1, 26),
    entry(1992, 7, 27),
    entry(1993, 7, 28),
    entry(1994, 7, 29),
    entry(1996, 1, 30),
    entry(1997, 7, 31),
    entry(1999, 1, 32),
    entry(2006, 1, 33),
    entry(2009, 1, 34),
    entry(2012, 7, 35),
    entry(2015, 7, 36),
    entry(2017, 1, 37),
];

static IERS_TABLE: LeapSecondTable = LeapSecondTable {
    entries: Cow::Borrowed(IERS_LEAP_SECONDS),
};

/// Reasons a list of entries cannot form a [`LeapSecondTable`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LeapSecondError {
    #[error("leap second table is empty")]
    Empty,
    #[error("leap second entry does not take effect at UTC midnight ({0})")]
    NotMidnight(LeapSecondEntry),
    #[error("leap seconds are disordered ({0} is not before {1})")]
    OutOfOrder(LeapSecondEntry, LeapSecondEntry),
    #[error("TAI-UTC decreases ({0} -> {1})")]
    Retracted(LeapSecondEntry, LeapSecondEntry),
}

/// Ordered, immutable TAI − UTC history.
///
/// Invariants, checked by [`new`](Self::new):
/// * at least one entry;
/// * every `effective` instant is a UTC midnight;
/// * entries are strictly ascending by `effective`;
/// * `tai_minus_utc` never decreases.
///
/// The table is never mutated after construction and is safe to share
/// between threads without synchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<LeapSecondEntry>", into = "Vec<LeapSecondEntry>")
)]
pub struct LeapSecondTable {
    entries: Cow<'static, [LeapSecondEntry]>,
}

impl LeapSecondTable {
    /// The built-in IERS table (1972-01-01 … 2017-01-01, TAI − UTC = 37 s).
    #[inline]
    pub fn iers() -> &'static LeapSecondTable {
        &IERS_TABLE
    }

    /// Build a table from caller-supplied entries, validating its invariants.
    pub fn new(entries: Vec<LeapSecondEntry>) -> Result<Self, LeapSecondError> {
        let first = entries.first().ok_or(LeapSecondError::Empty)?;
        if !first.effective.is_midnight() {
            return Err(LeapSecondError::NotMidnight(*first));
        }
        for pair in entries.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if !next.effective.is_midnight() {
                return Err(LeapSecondError::NotMidnight(next));
            }
            if next.effective <= prev.effective {
                return Err(LeapSecondError::OutOfOrder(prev, next));
            }
            if next.tai_minus_utc < prev.tai_minus_utc {
                return Err(LeapSecondError::Retracted(prev, next));
            }
        }

        tracing::debug!(
            entries = entries.len(),
            first = %entries[0],
            last = %entries[entries.len() - 1],
            "accepted leap second table"
        );
        Ok(Self {
            entries: Cow::Owned(entries),
        })
    }

    /// TAI − UTC in whole seconds at `instant`.
    ///
    /// Returns the value of the latest entry whose `effective` instant is
    /// `≤ instant`, or `0` if `instant` precedes the whole table.
    pub fn offset_at(&self, instant: &CivilTimestamp) -> i32 {
        match self.entries.partition_point(|e| e.effective <= *instant) {
            0 => 0,
            n => self.entries[n - 1].tai_minus_utc,
        }
    }

    /// `TT − UTC` at `instant`: TAI − UTC plus the fixed 32.184 s.
    #[inline]
    pub fn tt_offset_at(&self, instant: &CivilTimestamp) -> Seconds {
        tt_minus_utc(self.offset_at(instant))
    }

    /// The most recent entry, used as the first guess when inverting.
    #[inline]
    pub fn latest(&self) -> &LeapSecondEntry {
        // `new` rejects empty tables and the built-in one is non-empty.
        &self.entries[self.entries.len() - 1]
    }

    #[inline]
    pub fn entries(&self) -> &[LeapSecondEntry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; provided for API symmetry with [`len`](Self::len).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LeapSecondTable {
    fn default() -> Self {
        IERS_TABLE.clone()
    }
}

impl TryFrom<Vec<LeapSecondEntry>> for LeapSecondTable {
    type Error = LeapSecondError;

    fn try_from(entries: Vec<LeapSecondEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<LeapSecondTable> for Vec<LeapSecondEntry> {
    fn from(table: LeapSecondTable) -> Self {
        table.entries.into_owned()
    }
}

/// `TT − UTC` for a given integral TAI − UTC.
#[inline]
pub(crate) fn tt_minus_utc(tai_minus_utc: i32) -> Seconds {
    Seconds::new(f64::from(tai_minus_utc)) + TT_MINUS_TAI
}
