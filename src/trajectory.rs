// src/trajectory.rs
//
// The candidate/selected output of the pipeline: a geometric path plus the
// bookkeeping (lane ids, cost) the evaluator/prioritizer/selector stages need.

use std::fmt;

use crate::geometry::GlobalCoordinates;
use crate::lanes::{GlobalLaneId, LaneId};

/// One candidate (or the final selected) trajectory.
///
/// Invariant: `waypoints` is ordered along the direction of motion; `position`
/// and `yaw` are the local-frame origin used while the spline anchors were
/// being fit (see `trajectory_planner`).
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub unique_id: i32,
    pub lane_id: LaneId,
    pub global_lane_id: GlobalLaneId,
    pub position: GlobalCoordinates,
    pub yaw: f64,
    pub velocity: f64,
    pub waypoints: Vec<GlobalCoordinates>,
    pub cost: f64,
}

impl Trajectory {
    /// A trajectory is not drivable for this tick iff its cost was set to
    /// +infinity by the evaluator.
    pub fn is_drivable(&self) -> bool {
        self.cost.is_finite()
    }
}

impl fmt::Display for Trajectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Trajectory{{id: {}, lane: {}, global_lane: {}, velocity: {:.3}, cost: {}, waypoints: {}}}",
            self.unique_id,
            self.lane_id,
            self.global_lane_id,
            self.velocity,
            self.cost,
            self.waypoints.len()
        )
    }
}

/// Ordered candidates produced by `TrajectoryPlanner`, one per input maneuver.
pub type PlannedTrajectories = Vec<Trajectory>;

/// Same cardinality/order as `PlannedTrajectories`, after `TrajectoryEvaluator`
/// has assigned costs.
pub type RatedTrajectories = Vec<Trajectory>;
