// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-scale marker types.
//!
//! Each zero-sized type identifies a uniform time scale and encodes how its
//! day count relates to the canonical **Julian Date in TT**.  The crate
//! works on a single scale, [`JDE`], whose day count *is* JD(TT).

use qtty::Days;

use crate::instant::TimeScale;

/// Julian Ephemeris Date — Julian day count on the TT axis.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JDE;

impl TimeScale for JDE {
    const LABEL: &'static str = "JDE";

    #[inline(always)]
    fn to_jd_tt(value: Days) -> Days {
        value
    }

    #[inline(always)]
    fn from_jd_tt(jd_tt: Days) -> Days {
        jd_tt
    }
}
