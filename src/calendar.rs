// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Calendar ↔ Julian Day arithmetic
//!
//! Pure conversions between a Julian Day on the **UTC** axis and the
//! broken-down Gregorian fields of a [`CivilTimestamp`].  No time-scale
//! offset is involved here; the leap-second and TT corrections are layered
//! on top by [`JedConverter`](crate::JedConverter).
//!
//! Both directions use the classical Gregorian formulas from
//! *Jean Meeus — Astronomical Algorithms (2nd ed. 1998)*, ch. 7.
//!
//! ## Valid range
//! The formulas assume the Gregorian calendar and are valid for
//! `JD ≥ 2 299 160.5` (1582-10-15T00:00Z).  Earlier values produce
//! unspecified calendar fields; nothing panics.
//!
//! ## Precision
//! The time of day is decomposed hour → minute → second by keeping each
//! stage's floor and carrying the exact remainder forward.  Rounding is
//! applied once, at the nanosecond stage, and any carry it produces is
//! propagated back up (possibly into the next calendar day).

use crate::civil::CivilTimestamp;
use qtty::Days;

/// First day of the Gregorian calendar, 1582-10-15T00:00Z.
pub(crate) const GREGORIAN_REFORM_JD: Days = Days::new(2_299_160.5);

const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// Julian Day (UTC axis) for a civil UTC timestamp.
///
/// Months January and February are counted as months 13 and 14 of the
/// previous year, and `B = 2 − A + ⌊A/4⌋` applies the Gregorian century
/// correction.
pub fn civil_to_jd(t: &CivilTimestamp) -> Days {
    let day_fraction = (f64::from(t.hour())
        + f64::from(t.minute()) / 60.0
        + (f64::from(t.second()) + f64::from(t.nanosecond()) / 1e9) / 3_600.0)
        / 24.0;

    // Year arithmetic stays in f64: years near the i32 limits come back
    // from `jd_to_civil` for huge Julian Days.
    let (mut y, mut m) = (f64::from(t.year()), f64::from(t.month()));
    if m <= 2.0 {
        y -= 1.0;
        m += 12.0;
    }

    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    let jd0 = (365.25 * (y + 4_716.0)).floor()
        + (30.6001 * (m + 1.0)).floor()
        + f64::from(t.day())
        + b
        - 1_524.5;

    Days::new(jd0 + day_fraction)
}

/// Civil UTC timestamp for a Julian Day on the UTC axis.
///
/// The inverse of [`civil_to_jd`], exact to nanosecond rounding for day
/// fractions that `f64` represents exactly, and to the resolution of the
/// `f64` input (≈ 40 µs near the present epoch) otherwise.
pub fn jd_to_civil(jd_utc: Days) -> CivilTimestamp {
    if jd_utc < GREGORIAN_REFORM_JD {
        tracing::debug!(
            jd = jd_utc.value(),
            "Julian Day precedes the Gregorian reform; calendar fields are unspecified"
        );
    }

    // Shift by half a day so that day boundaries fall on midnight.
    let shifted = jd_utc.value() + 0.5;
    let z = shifted.floor();
    let f = shifted - z;

    let (hour, minute, second, nanosecond, next_day) = time_of_day(f);
    let (year, month, day) = if next_day {
        gregorian_date(z + 1.0)
    } else {
        gregorian_date(z)
    };

    CivilTimestamp::from_raw_parts(year, month, day, hour, minute, second, nanosecond)
}

/// Gregorian `(year, month, day)` for the integral day number `z` of a
/// noon-shifted Julian Day.
///
/// Non-finite or out-of-range `z` saturates: the year to the `i32` limits,
/// the month to `1..=12` and the day to `1..=31`.
fn gregorian_date(z: f64) -> (i32, u8, u8) {
    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1_524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor();
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4_716.0 } else { c - 4_715.0 };

    (
        year as i32,
        (month as u8).clamp(1, 12),
        (day as u8).clamp(1, 31),
    )
}

/// Split a day fraction `0 ≤ f < 1` into `(h, m, s, ns, carry)`.
///
/// `carry` is set when nanosecond rounding reaches the next midnight; the
/// time fields are then all zero.
fn time_of_day(f: f64) -> (u8, u8, u8, u32, bool) {
    let hours = f * 24.0;
    let mut hour = hours.floor();
    let minutes = (hours - hour) * 60.0;
    let mut minute = minutes.floor();
    let seconds = (minutes - minute) * 60.0;
    let mut second = seconds.floor();
    let mut nanosecond = ((seconds - second) * 1e9).round();

    if nanosecond >= f64::from(NANOS_PER_SECOND) {
        nanosecond -= f64::from(NANOS_PER_SECOND);
        second += 1.0;
    }
    if second >= 60.0 {
        second -= 60.0;
        minute += 1.0;
    }
    if minute >= 60.0 {
        minute -= 60.0;
        hour += 1.0;
    }
    let carry = hour >= 24.0;
    if carry {
        hour -= 24.0;
    }

    (
        hour as u8,
        minute as u8,
        second as u8,
        nanosecond as u32,
        carry,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn civil(y: i32, mo: u8, d: u8, h: u8, mi: u8, s: u8, ns: u32) -> CivilTimestamp {
        CivilTimestamp::new(y, mo, d, h, mi, s, ns).unwrap()
    }

    #[test]
    fn j2000_noon() {
        let jd = civil_to_jd(&civil(2000, 1, 1, 12, 0, 0, 0));
        assert_eq!(jd, Days::new(2_451_545.0));
        assert_eq!(jd_to_civil(jd), civil(2000, 1, 1, 12, 0, 0, 0));
    }

    #[test]
    fn gregorian_reform_day() {
        let jd = civil_to_jd(&civil(1582, 10, 15, 0, 0, 0, 0));
        assert_eq!(jd, GREGORIAN_REFORM_JD);
        assert_eq!(jd_to_civil(jd), civil(1582, 10, 15, 0, 0, 0, 0));
    }

    #[test]
    fn meeus_sputnik_example() {
        // Meeus, example 7.a: 1957 October 4.81 → JD 2436116.31
        let t = civil(1957, 10, 4, 19, 26, 24, 0);
        let jd = civil_to_jd(&t);
        assert!((jd - Days::new(2_436_116.31)).abs() < Days::new(1e-9));

        let back = jd_to_civil(Days::new(2_436_116.31));
        let delta = back.to_chrono().unwrap() - t.to_chrono().unwrap();
        assert!(delta.num_microseconds().unwrap().abs() < 1_000);
    }

    #[test]
    fn january_and_february_use_previous_year() {
        let feb = civil_to_jd(&civil(2024, 2, 29, 0, 0, 0, 0));
        let mar = civil_to_jd(&civil(2024, 3, 1, 0, 0, 0, 0));
        assert_eq!(mar - feb, Days::new(1.0));

        let dec = civil_to_jd(&civil(1999, 12, 31, 0, 0, 0, 0));
        let jan = civil_to_jd(&civil(2000, 1, 1, 0, 0, 0, 0));
        assert_eq!(jan - dec, Days::new(1.0));
    }

    #[test]
    fn exact_day_fractions_are_idempotent() {
        let samples = [
            civil(2024, 2, 29, 6, 0, 0, 0),
            civil(1999, 12, 31, 21, 0, 0, 0),
            civil(2000, 3, 1, 0, 0, 0, 0),
            civil(1900, 3, 1, 18, 45, 0, 0),
            civil(2100, 12, 31, 22, 30, 0, 0),
        ];
        for t in samples {
            assert_eq!(jd_to_civil(civil_to_jd(&t)), t, "{t}");
        }
    }

    #[test]
    fn inexact_day_fractions_stay_within_resolution() {
        let t = civil(2017, 6, 15, 13, 37, 42, 123_456_789);
        let back = jd_to_civil(civil_to_jd(&t));
        let delta = back.to_chrono().unwrap() - t.to_chrono().unwrap();
        assert!(delta.num_microseconds().unwrap().abs() < 100, "{back}");
    }

    #[test]
    fn nanosecond_rounding_carries_into_next_day() {
        let largest_below_one = 1.0 - f64::EPSILON / 2.0;
        assert_eq!(time_of_day(largest_below_one), (0, 0, 0, 0, true));
    }

    #[test]
    fn time_of_day_cascade() {
        assert_eq!(time_of_day(0.0), (0, 0, 0, 0, false));
        assert_eq!(time_of_day(0.5), (12, 0, 0, 0, false));
        assert_eq!(time_of_day(0.765_625), (18, 22, 30, 0, false));
    }

    #[test]
    fn pre_gregorian_input_does_not_panic() {
        let _ = jd_to_civil(Days::new(0.0));
        let _ = jd_to_civil(Days::new(-1.0e9));
        let _ = jd_to_civil(Days::new(f64::NAN));
    }

    #[test]
    fn huge_julian_days_roundtrip_without_overflow() {
        for jd in [1.0e15, -1.0e15, f64::MAX, f64::MIN] {
            let t = jd_to_civil(Days::new(jd));
            let _ = civil_to_jd(&t);
        }
        // January at the i32 limits shifts the year past them.
        for year in [i32::MIN, i32::MAX] {
            let t = CivilTimestamp::from_raw_parts(year, 1, 1, 0, 0, 0, 0);
            assert!(civil_to_jd(&t).value().is_finite());
        }
    }

    #[test]
    fn non_finite_input_keeps_month_and_day_in_range() {
        for jd in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.0e15] {
            let t = jd_to_civil(Days::new(jd));
            assert!((1..=12).contains(&t.month()), "{jd}: {t}");
            assert!((1..=31).contains(&t.day()), "{jd}: {t}");
        }
    }
}
