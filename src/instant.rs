// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Generic time–scale parameterised day count.
//!
//! [`Time<S>`] stores a single [`Days`] quantity whose *meaning* is fixed by
//! the compile-time marker `S: TimeScale`.  Scales live on the TT axis, so
//! cross-scale conversion is a constant offset routed through JD(TT).
//!
//! Civil UTC is deliberately **not** a `TimeScale`: its offset from TT
//! depends on a leap-second table.  The bridge to civil time is
//! [`Time::from_civil`] / [`Time::to_civil`], which use the built-in IERS
//! table, or an explicit [`JedConverter`] for any other table.

use chrono::{DateTime, Utc};
use qtty::Days;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::civil::CivilTimestamp;
use crate::converter::JedConverter;
use crate::scales::JDE;

// ═══════════════════════════════════════════════════════════════════════════
// TimeScale trait
// ═══════════════════════════════════════════════════════════════════════════

/// Marker trait for uniform time scales.
///
/// A scale supplies a display label and the pair of conversions between its
/// native day count and **Julian Date in TT**.
pub trait TimeScale: Copy + Clone + std::fmt::Debug + PartialEq + PartialOrd + 'static {
    /// Display label used by [`Time`] formatting.
    const LABEL: &'static str;

    /// Convert a quantity in this scale's native unit to an absolute JD(TT).
    fn to_jd_tt(value: Days) -> Days;

    /// Convert an absolute JD(TT) back to this scale's native quantity.
    fn from_jd_tt(jd_tt: Days) -> Days;
}

// ═══════════════════════════════════════════════════════════════════════════
// Time<S>
// ═══════════════════════════════════════════════════════════════════════════

/// A point on time scale `S`, layout-identical to a single `f64`.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Time<S: TimeScale> {
    quantity: Days,
    _scale: PhantomData<S>,
}

impl<S: TimeScale> Time<S> {
    // ── constructors ──────────────────────────────────────────────────

    /// Create from a raw scalar (days on this scale).
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self::from_days(Days::new(value))
    }

    /// Create from a [`Days`] quantity.
    #[inline]
    pub const fn from_days(days: Days) -> Self {
        Self {
            quantity: days,
            _scale: PhantomData,
        }
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn quantity(&self) -> Days {
        self.quantity
    }

    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// Absolute Julian Day (TT) corresponding to this instant.
    #[inline]
    pub fn julian_day(&self) -> Days {
        S::to_jd_tt(self.quantity)
    }

    /// Build an instant from an absolute Julian Day (TT).
    #[inline]
    pub fn from_julian_day(jd_tt: Days) -> Self {
        Self::from_days(S::from_jd_tt(jd_tt))
    }

    /// Convert this instant to another time scale via JD(TT).
    #[inline]
    pub fn to<T: TimeScale>(&self) -> Time<T> {
        Time::<T>::from_julian_day(self.julian_day())
    }

    // ── civil helpers ─────────────────────────────────────────────────

    /// Instant for a civil UTC timestamp, using the built-in leap-second
    /// table.
    pub fn from_civil(t: &CivilTimestamp) -> Self {
        JedConverter::default().civil_to_jed(t).to::<S>()
    }

    /// Civil UTC timestamp for this instant, using the built-in
    /// leap-second table.
    pub fn to_civil(&self) -> CivilTimestamp {
        JedConverter::default().jed_to_civil(self.to::<JDE>())
    }

    /// Build an instant from a `chrono::DateTime<Utc>`.
    ///
    /// An inserted leap second (`…:60`) is treated as `…:59.999999999`.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        Self::from_civil(&CivilTimestamp::from(datetime))
    }

    /// Convert to a `chrono::DateTime<Utc>`.
    ///
    /// Returns `None` if the instant falls outside chrono's range.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        self.to_civil().to_chrono()
    }
}

// ── Display ───────────────────────────────────────────────────────────────

impl<S: TimeScale> std::fmt::Display for Time<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", S::LABEL, self.quantity)
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl<S: TimeScale> Serialize for Time<S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de, S: TimeScale> Deserialize<'de> for Time<S> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        f64::deserialize(deserializer).map(Self::new)
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl<S: TimeScale> Add<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity + rhs)
    }
}

impl<S: TimeScale> AddAssign<Days> for Time<S> {
    #[inline]
    fn add_assign(&mut self, rhs: Days) {
        self.quantity += rhs;
    }
}

impl<S: TimeScale> Sub<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity - rhs)
    }
}

impl<S: TimeScale> SubAssign<Days> for Time<S> {
    #[inline]
    fn sub_assign(&mut self, rhs: Days) {
        self.quantity -= rhs;
    }
}

impl<S: TimeScale> Sub for Time<S> {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.quantity - rhs.quantity
    }
}

impl<S: TimeScale> From<Days> for Time<S> {
    #[inline]
    fn from(days: Days) -> Self {
        Self::from_days(days)
    }
}

impl<S: TimeScale> From<Time<S>> for Days {
    #[inline]
    fn from(time: Time<S>) -> Self {
        time.quantity
    }
}
