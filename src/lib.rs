// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian Ephemeris Date conversion
//!
//! Converts between civil UTC timestamps and the **Julian Ephemeris Date**
//! (JED), the continuous Terrestrial Time day count used by ephemerides:
//!
//! ```text
//! JED = JD(UTC) + (TAI − UTC + 32.184 s) / 86 400
//! ```
//!
//! `TAI − UTC` comes from a [`LeapSecondTable`]; the built-in one follows
//! IERS Bulletin C through 2017-01-01 (37 s).
//!
//! # Entry points
//!
//! - [`date`] / [`std_time`] — the two plain conversions, `f64` on the JED
//!   side, using the built-in table.
//! - [`JedConverter`] — the same conversions against any table, with a
//!   configurable number of inverse correction passes.
//! - [`JulianEphemerisDate`] — the typed JED, `Time<JDE>`, with `qtty`
//!   day arithmetic and a chrono bridge.
//! - [`calendar`] — the raw JD(UTC) ↔ Gregorian routines.
//!
//! ```rust
//! use julianephdate::{date, std_time, CivilTimestamp};
//!
//! let t = CivilTimestamp::new(2000, 1, 1, 11, 58, 55, 816_000_000).unwrap();
//! let jed = date(&t);
//! assert!((jed - 2_451_545.0).abs() < 1e-8);
//!
//! let back = std_time(jed);
//! assert_eq!((back.hour(), back.minute(), back.second()), (11, 58, 55));
//! ```
//!
//! # Limitations
//!
//! - Calendar fields are only defined from the Gregorian reform
//!   (JD 2 299 160.5, 1582-10-15) onwards.
//! - TAI − UTC is taken as 0 before 1972-01-01.
//! - A JED that falls inside an inserted leap second has no civil UTC
//!   counterpart; the inverse returns an instant within 1 s of it.

pub mod calendar;
mod civil;
mod converter;
mod ephemeris_date;
mod instant;
mod leap_seconds;
mod scales;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use civil::CivilTimestamp;
pub use converter::{JedConverter, DEFAULT_MAX_CORRECTION_PASSES};
pub use instant::{Time, TimeScale};
pub use leap_seconds::{LeapSecondEntry, LeapSecondError, LeapSecondTable, TT_MINUS_TAI};
pub use scales::JDE;

/// Julian Ephemeris Date — Julian day count on the TT axis.
///
/// This is a type alias for [`Time<JDE>`].
pub type JulianEphemerisDate = Time<JDE>;

/// Julian Ephemeris Date for a civil UTC timestamp, using the built-in
/// leap-second table.
#[inline]
pub fn date(t: &CivilTimestamp) -> f64 {
    JedConverter::default().civil_to_jed(t).value()
}

/// Civil UTC timestamp for a Julian Ephemeris Date, using the built-in
/// leap-second table.
#[inline]
pub fn std_time(jed: f64) -> CivilTimestamp {
    JedConverter::default().jed_to_civil(JulianEphemerisDate::new(jed))
}
