// src/selector.rs
//
// Picks the final trajectory for the tick: the head of the prioritized
// queue. Mirrors `TrajectorySelector::GetSelectedTrajectory`.

use crate::prioritizer::PrioritizedTrajectories;
use crate::trajectory::Trajectory;

pub struct TrajectorySelector;

impl TrajectorySelector {
    pub fn new() -> Self {
        Self
    }

    /// Returns the minimum-cost trajectory, ties broken by input order. The
    /// queue is never empty by construction; if every candidate has
    /// `cost = +inf` the lowest-id one is still returned — the actuator
    /// layer is responsible for handling a non-drivable plan.
    pub fn get_selected_trajectory(&self, prioritized: PrioritizedTrajectories) -> Option<Trajectory> {
        prioritized.into_vec().into_iter().next()
    }
}

impl Default for TrajectorySelector {
    fn default() -> Self {
        Self::new()
    }
}
