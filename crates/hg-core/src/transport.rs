//! Transport modes and link mode sets.
//!
//! Network links carry the set of modes allowed on them (MATSim writes this
//! as a comma-separated `modes` attribute).  The set is stored as a small
//! bitset so eligibility checks are a single `AND`.

use std::str::FromStr;

use crate::HgError;

/// A travel mode known to the synthesizer.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TransportMode {
    /// Private vehicle.
    Car,
    /// Scheduled public transport (bus, rail, ferry…).
    Pt,
    /// On foot.
    Walk,
    /// Bicycle.
    Bike,
    /// Car passenger.
    Ride,
    /// Commercial goods traffic.
    Freight,
    /// Heavy goods vehicle.
    Truck,
}

impl TransportMode {
    pub const ALL: [TransportMode; 7] = [
        TransportMode::Car,
        TransportMode::Pt,
        TransportMode::Walk,
        TransportMode::Bike,
        TransportMode::Ride,
        TransportMode::Freight,
        TransportMode::Truck,
    ];

    /// Label as used in network and population files.
    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Car     => "car",
            TransportMode::Pt      => "pt",
            TransportMode::Walk    => "walk",
            TransportMode::Bike    => "bike",
            TransportMode::Ride    => "ride",
            TransportMode::Freight => "freight",
            TransportMode::Truck   => "truck",
        }
    }

    #[inline]
    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = HgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        TransportMode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| HgError::Parse(format!("unknown transport mode {s:?}")))
    }
}

// ── ModeSet ───────────────────────────────────────────────────────────────────

/// A set of [`TransportMode`]s.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct ModeSet(u16);

impl ModeSet {
    pub const EMPTY: ModeSet = ModeSet(0);

    pub fn single(mode: TransportMode) -> Self {
        ModeSet(mode.bit())
    }

    /// Parse a comma-separated list such as `"car,ride,freight"`.
    ///
    /// Network files routinely contain modes this crate does not model
    /// (`"tram"`, `"rail"`, …).  Those tokens are skipped and logged at
    /// `debug` level rather than rejected: they can never match an allowed
    /// mode, so ignoring them does not change eligibility.
    pub fn parse(list: &str) -> Self {
        let mut set = ModeSet::EMPTY;
        for token in list.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match token.parse::<TransportMode>() {
                Ok(mode) => set.insert(mode),
                Err(_) => log::debug!("ignoring unmodelled mode {token:?}"),
            }
        }
        set
    }

    #[inline]
    pub fn insert(&mut self, mode: TransportMode) {
        self.0 |= mode.bit();
    }

    #[inline]
    pub fn contains(self, mode: TransportMode) -> bool {
        self.0 & mode.bit() != 0
    }

    /// `true` if at least one mode is in both sets.
    #[inline]
    pub fn intersects(self, other: ModeSet) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = TransportMode> {
        TransportMode::ALL.into_iter().filter(move |m| self.contains(*m))
    }
}

impl FromIterator<TransportMode> for ModeSet {
    fn from_iter<I: IntoIterator<Item = TransportMode>>(iter: I) -> Self {
        let mut set = ModeSet::EMPTY;
        for mode in iter {
            set.insert(mode);
        }
        set
    }
}

impl std::fmt::Display for ModeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels: Vec<&str> = self.iter().map(TransportMode::as_str).collect();
        f.write_str(&labels.join(","))
    }
}
