//! Flat row view of a plan, shared by the tabular backends.

use hg_synth::Plan;

/// One plan as a table row.  Borrows its text from the plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanRow<'a> {
    pub person_id:      &'a str,
    pub agent_id:       u32,
    /// Departure from the venue, seconds since midnight.
    pub departure_secs: u32,
    pub origin_type:    &'a str,
    pub origin_x:       f64,
    pub origin_y:       f64,
    pub mode:           &'static str,
    pub home_type:      &'a str,
    pub home_x:         f64,
    pub home_y:         f64,
    pub home_zone:      &'a str,
    pub home_link:      &'a str,
}

impl<'a> From<&'a Plan> for PlanRow<'a> {
    fn from(plan: &'a Plan) -> Self {
        Self {
            person_id:      &plan.person_id,
            agent_id:       plan.agent.0,
            departure_secs: plan.departure().secs(),
            origin_type:    &plan.origin.activity_type,
            origin_x:       plan.origin.coord.x,
            origin_y:       plan.origin.coord.y,
            mode:           plan.leg.mode.as_str(),
            home_type:      &plan.destination.activity_type,
            home_x:         plan.destination.coord.x,
            home_y:         plan.destination.coord.y,
            home_zone:      &plan.home_zone,
            home_link:      &plan.home_link,
        }
    }
}
