//! Link eligibility: which links may serve as a synthetic home location.
//!
//! A link is eligible iff
//!
//! 1. its mode set intersects the allowed modes,
//! 2. its length is at most `max_length_m`, and
//! 3. its road type is present and not in the excluded set.
//!
//! The checks run in that order and short-circuit, so a link without a road
//! type is only a problem when it would otherwise qualify.  What happens then
//! is decided by [`MissingRoadTypePolicy`].

use hg_core::{LinkId, ModeSet};

use crate::{Network, NetworkError, NetworkResult};

/// Handling of a link whose road type is missing but which passed the mode
/// and length checks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MissingRoadTypePolicy {
    /// Abort with [`NetworkError::MissingRoadType`] on the first such link.
    #[default]
    Fail,
    /// Drop the link and report the number dropped at `warn` level.
    Skip,
}

/// The home-location eligibility predicate.
#[derive(Clone, Debug)]
pub struct LinkFilter {
    pub allowed_modes:       ModeSet,
    pub max_length_m:        f64,
    pub excluded_road_types: Vec<String>,
    pub missing_road_type:   MissingRoadTypePolicy,
}

impl LinkFilter {
    /// A filter with no excluded road types and the `Fail` policy.
    ///
    /// Rejects a non-positive or non-finite `max_length_m` and an empty mode
    /// set, both of which would make every link ineligible.
    pub fn new(allowed_modes: ModeSet, max_length_m: f64) -> NetworkResult<Self> {
        if !(max_length_m.is_finite() && max_length_m > 0.0) {
            return Err(NetworkError::Config(format!(
                "max link length must be a positive number of metres, got {max_length_m}"
            )));
        }
        if allowed_modes.is_empty() {
            return Err(NetworkError::Config("no allowed modes given".into()));
        }
        Ok(Self {
            allowed_modes,
            max_length_m,
            excluded_road_types: Vec::new(),
            missing_road_type: MissingRoadTypePolicy::Fail,
        })
    }

    pub fn exclude_road_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_road_types.extend(types.into_iter().map(Into::into));
        self
    }

    pub fn missing_road_type(mut self, policy: MissingRoadTypePolicy) -> Self {
        self.missing_road_type = policy;
        self
    }

    /// Evaluate the predicate for one link.
    ///
    /// Returns `None` when the road type is missing so the caller can
    /// apply the policy.
    pub fn accepts(&self, net: &Network, link: LinkId) -> Option<bool> {
        let i = link.index();
        if !net.link_modes[i].intersects(self.allowed_modes) {
            return Some(false);
        }
        if net.link_length_m[i] > self.max_length_m {
            return Some(false);
        }
        let road_type = net.link_road_type[i].as_deref()?;
        Some(!self.excluded_road_types.iter().any(|t| t == road_type))
    }

    /// All eligible links of `net`, in arena order.
    pub fn eligible_links(&self, net: &Network) -> NetworkResult<Vec<LinkId>> {
        let mut eligible = Vec::new();
        let mut skipped = 0usize;

        for link in net.links() {
            match self.accepts(net, link) {
                Some(true) => eligible.push(link),
                Some(false) => {}
                None => match self.missing_road_type {
                    MissingRoadTypePolicy::Fail => {
                        return Err(NetworkError::MissingRoadType {
                            link: net.link_ext_id(link).to_string(),
                        });
                    }
                    MissingRoadTypePolicy::Skip => {
                        log::debug!("skipping link {} without road type", net.link_ext_id(link));
                        skipped += 1;
                    }
                },
            }
        }

        if skipped > 0 {
            log::warn!("skipped {skipped} otherwise eligible links without a road type");
        }
        log::info!(
            "{} of {} links are eligible home locations",
            eligible.len(),
            net.link_count()
        );
        Ok(eligible)
    }
}
