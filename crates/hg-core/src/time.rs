//! Time of day.
//!
//! # Design
//!
//! Times are whole seconds after midnight of the simulated day, stored as
//! `u32`.  Integer seconds keep departure arithmetic exact and match the
//! resolution the downstream simulation reads.  Values past 24:00:00 are
//! legal: an event ending at 23:50 with a 30 minute departure window yields
//! departures up to 24:20:00, written exactly like that.

use std::fmt;
use std::str::FromStr;

use crate::HgError;

/// Seconds since midnight of the simulated day.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SimTime(pub u32);

impl SimTime {
    pub const MIDNIGHT: SimTime = SimTime(0);

    /// Build a time from clock fields.
    ///
    /// # Panics
    /// Panics if the total does not fit in `u32` seconds.  Use
    /// [`checked_from_hms`](Self::checked_from_hms) for untrusted input.
    #[inline]
    pub const fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Self {
        match Self::checked_from_hms(hours, minutes, seconds) {
            Some(t) => t,
            None => panic!("time of day overflows u32 seconds"),
        }
    }

    /// Like [`from_hms`](Self::from_hms), `None` on overflow.
    pub const fn checked_from_hms(hours: u32, minutes: u32, seconds: u32) -> Option<Self> {
        let Some(h) = hours.checked_mul(3_600) else { return None };
        let Some(m) = minutes.checked_mul(60) else { return None };
        let Some(hm) = h.checked_add(m) else { return None };
        match hm.checked_add(seconds) {
            Some(total) => Some(SimTime(total)),
            None => None,
        }
    }

    #[inline]
    pub fn secs(self) -> u32 {
        self.0
    }

    /// The time `secs` seconds after `self`.
    ///
    /// # Panics
    /// Panics in debug mode on `u32` overflow (136 years of seconds).
    #[inline]
    pub fn offset(self, secs: u32) -> SimTime {
        SimTime(self.0 + secs)
    }

    /// `(hours, minutes, seconds)`; hours are not wrapped at 24.
    pub fn hms(self) -> (u32, u32, u32) {
        (self.0 / 3_600, (self.0 % 3_600) / 60, self.0 % 60)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.hms();
        write!(f, "{h:02}:{m:02}:{s:02}")
    }
}

impl FromStr for SimTime {
    type Err = HgError;

    /// Accepts `HH:MM:SS`, `HH:MM`, or a plain number of seconds.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bad = || HgError::Parse(format!("invalid time {s:?}: expected HH:MM[:SS] or seconds"));

        if !s.contains(':') {
            return s.parse::<u32>().map(SimTime).map_err(|_| bad());
        }

        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(bad());
        }
        let mut fields = [0u32; 3];
        for (slot, part) in fields.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| bad())?;
        }
        let [h, m, sec] = fields;
        if m >= 60 || sec >= 60 {
            return Err(bad());
        }
        SimTime::checked_from_hms(h, m, sec).ok_or_else(bad)
    }
}
