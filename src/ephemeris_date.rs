// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian Ephemeris Date (`Time<JDE>`) specific extensions.

use crate::calendar::GREGORIAN_REFORM_JD;
use crate::instant::Time;
use crate::scales::JDE;

impl Time<JDE> {
    /// J2000.0 epoch: 2000-01-01T12:00:00 TT (JDE 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// 1582-10-15T00:00, first day of the Gregorian calendar.
    ///
    /// Calendar conversions are only defined from here on.
    pub const GREGORIAN_REFORM: Self = Self::from_days(GREGORIAN_REFORM_JD);

    /// `true` if this date lies on or after [`Self::GREGORIAN_REFORM`].
    ///
    /// The check is on the TT axis; the ≈ 1 minute between TT and UTC is
    /// irrelevant at this epoch.
    #[inline]
    pub fn is_gregorian(&self) -> bool {
        *self >= Self::GREGORIAN_REFORM
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::civil::CivilTimestamp;
    use qtty::Days;

    #[test]
    fn gregorian_threshold() {
        assert!(Time::<JDE>::J2000.is_gregorian());
        assert!(Time::<JDE>::GREGORIAN_REFORM.is_gregorian());
        assert!(!(Time::<JDE>::GREGORIAN_REFORM - Days::new(1.0)).is_gregorian());
    }

    #[test]
    fn j2000_is_reached_from_civil_utc() {
        let t = CivilTimestamp::new(2000, 1, 1, 11, 58, 55, 816_000_000).unwrap();
        let jde = Time::<JDE>::from_civil(&t);
        assert!((jde - Time::<JDE>::J2000).abs() < Days::new(1e-8));
    }
}
