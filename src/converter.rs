// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Civil UTC ↔ Julian Ephemeris Date
//!
//! ```text
//! JED = JD(UTC) + (TAI − UTC + 32.184 s) / 86 400
//! ```
//!
//! The forward direction looks up TAI − UTC at the civil instant and is a
//! single formula.  The inverse is circular: the offset to subtract depends
//! on the UTC instant being computed.  [`JedConverter::jed_to_civil`] resolves
//! this with a bounded fixed-point iteration:
//!
//! 1. **Guess** with the latest offset in the table.
//! 2. **Correct**: convert, look up the offset at the candidate instant,
//!    and stop as soon as it matches the offset that produced it.
//!
//! A single correction pass (the classical approach) can land up to one
//! second off when the guess and the true instant straddle a transition.
//! The default converter allows a few more passes, which removes that
//! error everywhere except inside an inserted leap second itself, where no
//! civil UTC instant exists and the result is within 1 s of the truth.

use qtty::Day;

use crate::calendar::{civil_to_jd, jd_to_civil};
use crate::civil::CivilTimestamp;
use crate::leap_seconds::{tt_minus_utc, LeapSecondTable};
use crate::JulianEphemerisDate;

/// Correction passes allowed by [`JedConverter::new`].
pub const DEFAULT_MAX_CORRECTION_PASSES: usize = 4;

/// Converts between civil UTC timestamps and Julian Ephemeris Dates using a
/// borrowed [`LeapSecondTable`].
///
/// `JedConverter` is `Copy`; build one per table and pass it by value.
#[derive(Debug, Copy, Clone)]
pub struct JedConverter<'a> {
    table: &'a LeapSecondTable,
    max_correction_passes: usize,
}

impl<'a> JedConverter<'a> {
    // ── constructors ──────────────────────────────────────────────────

    /// Converter that iterates the inverse until the offset is stable, up to
    /// [`DEFAULT_MAX_CORRECTION_PASSES`].
    pub const fn new(table: &'a LeapSecondTable) -> Self {
        Self {
            table,
            max_correction_passes: DEFAULT_MAX_CORRECTION_PASSES,
        }
    }

    /// Converter that performs exactly one guess and one correction pass.
    ///
    /// When the guess lands on the other side of a transition from the true
    /// instant, the result is off by that transition (one second).
    pub const fn single_pass(table: &'a LeapSecondTable) -> Self {
        Self {
            table,
            max_correction_passes: 1,
        }
    }

    /// Override the number of correction passes.  Values below 1 are
    /// raised to 1; the guess pass is always followed by a correction.
    pub fn with_max_correction_passes(mut self, passes: usize) -> Self {
        self.max_correction_passes = if passes == 0 { 1 } else { passes };
        self
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn table(&self) -> &'a LeapSecondTable {
        self.table
    }

    #[inline]
    pub const fn max_correction_passes(&self) -> usize {
        self.max_correction_passes
    }

    // ── conversions ───────────────────────────────────────────────────

    /// Julian Ephemeris Date for a civil UTC timestamp.
    ///
    /// TAI − UTC is taken from the table at `t` itself.
    pub fn civil_to_jed(&self, t: &CivilTimestamp) -> JulianEphemerisDate {
        let jd_utc = civil_to_jd(t);
        let offset = self.table.tt_offset_at(t);
        JulianEphemerisDate::from_days(jd_utc + offset.to::<Day>())
    }

    /// Civil UTC timestamp for a Julian Ephemeris Date.
    ///
    /// Results are only meaningful for `jed` on or after the Gregorian
    /// reform (see [`JulianEphemerisDate::is_gregorian`]).
    pub fn jed_to_civil(&self, jed: JulianEphemerisDate) -> CivilTimestamp {
        let to_utc = |tai_minus_utc: i32| {
            jd_to_civil(jed.quantity() - tt_minus_utc(tai_minus_utc).to::<Day>())
        };

        let mut offset = self.table.latest().tai_minus_utc;
        for pass in 1..=self.max_correction_passes {
            let candidate = to_utc(offset);
            let corrected = self.table.offset_at(&candidate);
            if corrected == offset {
                return candidate;
            }
            tracing::trace!(
                pass,
                %candidate,
                from = offset,
                to = corrected,
                "TAI-UTC changed during inverse correction"
            );
            offset = corrected;
        }

        if self.max_correction_passes > 1 {
            tracing::debug!(
                jed = jed.value(),
                passes = self.max_correction_passes,
                tai_minus_utc = offset,
                "TAI-UTC did not settle; instant lies inside a leap second"
            );
        }
        to_utc(offset)
    }
}

impl Default for JedConverter<'static> {
    fn default() -> Self {
        Self::new(LeapSecondTable::iers())
    }
}
